use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use super::SoundPlayer;
use crate::sound::AlarmSound;

/// System audio players to try, in order of preference.
const PLAYERS: [&str; 3] = ["paplay", "aplay", "afplay"];

/// Plays alarm sounds by handing the wav asset to the first system audio
/// player that is present. A missing asset or missing player degrades to
/// the terminal bell.
pub struct SystemSoundPlayer {
    sounds_dir: PathBuf,
}

impl SystemSoundPlayer {
    pub fn new(sounds_dir: PathBuf) -> Self {
        Self { sounds_dir }
    }

    fn asset_path(&self, sound: AlarmSound) -> PathBuf {
        self.sounds_dir.join(format!("{}.wav", sound.file_stem()))
    }
}

impl SoundPlayer for SystemSoundPlayer {
    fn play(&self, sound: AlarmSound) {
        let path = self.asset_path(sound);
        if !path.exists() {
            debug!(sound = sound.name(), path = %path.display(), "sound asset missing");
            bell();
            return;
        }
        // spawn() hands the file to a child process and returns immediately;
        // playback must never block the caller.
        for player in PLAYERS {
            match Command::new(player)
                .arg(&path)
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
            {
                Ok(_) => return,
                Err(e) => debug!(player, error = %e, "audio player unavailable"),
            }
        }
        warn!("no system audio player found");
        bell();
    }
}

/// Generic beep: the terminal bell is the one audio device always present.
fn bell() {
    let mut out = std::io::stdout();
    let _ = out.write_all(b"\x07");
    let _ = out.flush();
}
