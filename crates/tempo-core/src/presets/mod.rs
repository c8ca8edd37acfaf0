//! Named durations the user can save and re-apply.

mod store;

pub use store::PresetStore;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::format::format_duration;

/// A saved countdown duration.
///
/// The wire format keeps the short `duration` field name. Legacy data may
/// carry fractional seconds; reads round them and writes emit whole
/// seconds, so the stored list converges on integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "duration", deserialize_with = "secs_from_number")]
    pub duration_secs: u64,
}

fn secs_from_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() || raw <= 0.0 {
        return Ok(0);
    }
    Ok(raw.round() as u64)
}

impl Preset {
    pub fn new(name: impl Into<String>, duration_secs: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            duration_secs,
        }
    }

    /// `MM:SS` / `HH:MM:SS` for list display.
    pub fn formatted_duration(&self) -> String {
        format_duration(self.duration_secs)
    }
}

/// The seed list written on first run.
pub fn default_presets() -> Vec<Preset> {
    vec![
        Preset::new("5 min", 5 * 60),
        Preset::new("10 min", 10 * 60),
        Preset::new("15 min", 15 * 60),
        Preset::new("25 min (Pomodoro)", 25 * 60),
        Preset::new("30 min", 30 * 60),
        Preset::new("45 min", 45 * 60),
        Preset::new("1 hour", 60 * 60),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_list_is_exact() {
        let presets = default_presets();
        let expected = [
            ("5 min", 300),
            ("10 min", 600),
            ("15 min", 900),
            ("25 min (Pomodoro)", 1500),
            ("30 min", 1800),
            ("45 min", 2700),
            ("1 hour", 3600),
        ];
        assert_eq!(presets.len(), expected.len());
        for (preset, (name, secs)) in presets.iter().zip(expected) {
            assert_eq!(preset.name, name);
            assert_eq!(preset.duration_secs, secs);
        }
    }

    #[test]
    fn wire_format_accepts_float_durations() {
        let json = format!(
            "{{\"id\":\"{}\",\"name\":\"tea\",\"duration\":180.4}}",
            Uuid::new_v4()
        );
        let preset: Preset = serde_json::from_str(&json).unwrap();
        assert_eq!(preset.duration_secs, 180);
    }

    #[test]
    fn wire_format_accepts_integer_durations() {
        let json = format!(
            "{{\"id\":\"{}\",\"name\":\"tea\",\"duration\":180}}",
            Uuid::new_v4()
        );
        let preset: Preset = serde_json::from_str(&json).unwrap();
        assert_eq!(preset.duration_secs, 180);
    }

    #[test]
    fn negative_durations_clamp_to_zero() {
        let json = format!(
            "{{\"id\":\"{}\",\"name\":\"bad\",\"duration\":-5}}",
            Uuid::new_v4()
        );
        let preset: Preset = serde_json::from_str(&json).unwrap();
        assert_eq!(preset.duration_secs, 0);
    }

    #[test]
    fn writes_emit_whole_seconds() {
        let preset = Preset::new("5 min", 300);
        let json = serde_json::to_string(&preset).unwrap();
        assert!(json.contains("\"duration\":300"));
    }

    #[test]
    fn formatted_duration_matches_display_rules() {
        assert_eq!(Preset::new("5 min", 300).formatted_duration(), "05:00");
        assert_eq!(Preset::new("1 hour", 3600).formatted_duration(), "01:00:00");
    }
}
