//! Duration display helpers shared by the engine, presets, and CLI.

/// Split a second count into (hours, minutes, seconds).
pub fn decompose(secs: u64) -> (u64, u64, u64) {
    (secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// `HH:MM:SS` for durations of an hour or more, `MM:SS` below that.
/// Components are always zero-padded to two digits.
pub fn format_duration(secs: u64) -> String {
    let (hours, minutes, seconds) = decompose(secs);
    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}
