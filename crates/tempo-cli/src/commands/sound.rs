use clap::Subcommand;

use tempo_core::{AlarmSound, Config, SoundPlayer, SystemSoundPlayer};

use super::timer;

#[derive(Subcommand)]
pub enum SoundAction {
    /// List the sound catalog (the selected sound is starred)
    List,
    /// Show the selected alarm sound
    Get,
    /// Select the alarm sound for future completions
    Set { name: String },
    /// Play a sound now
    Test { name: Option<String> },
}

pub fn run(action: SoundAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = timer::open_store()?;
    match action {
        SoundAction::List => {
            let selected = store.alarm_sound()?;
            for sound in AlarmSound::ALL {
                let marker = if sound == selected { "*" } else { " " };
                println!("{marker} {}", sound.name());
            }
        }
        SoundAction::Get => println!("{}", store.alarm_sound()?.name()),
        SoundAction::Set { name } => {
            let Some(sound) = AlarmSound::from_name(&name) else {
                return Err(format!("unknown sound '{name}'; see `tempo-cli sound list`").into());
            };
            store.set_alarm_sound(sound)?;
            println!("Alarm sound set to {}", sound.name());
        }
        SoundAction::Test { name } => {
            let sound = match name {
                Some(name) => AlarmSound::from_name(&name)
                    .ok_or_else(|| format!("unknown sound '{name}'"))?,
                None => store.alarm_sound()?,
            };
            let cfg = Config::load_or_default();
            SystemSoundPlayer::new(cfg.sounds_dir()?).play(sound);
        }
    }
    Ok(())
}
