use std::path::PathBuf;

use clap::Subcommand;

use tempo_core::{data_dir, Config};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the configuration as TOML
    Show,
    /// Print the data directory path
    Path,
    /// Set a configuration value
    Set { key: String, value: String },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let cfg = Config::load()?;
            print!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigAction::Path => println!("{}", data_dir()?.display()),
        ConfigAction::Set { key, value } => {
            let mut cfg = Config::load()?;
            match key.as_str() {
                "notifications.enabled" => cfg.notifications.enabled = value.parse()?,
                "sound.enabled" => cfg.sound.enabled = value.parse()?,
                "sound.dir" => cfg.sound.dir = Some(PathBuf::from(&value)),
                "timer.default_hours" => cfg.timer.default_hours = value.parse()?,
                "timer.default_minutes" => cfg.timer.default_minutes = value.parse()?,
                "timer.default_seconds" => cfg.timer.default_seconds = value.parse()?,
                other => return Err(format!("unknown config key: {other}").into()),
            }
            cfg.save()?;
            println!("{key} = {value}");
        }
    }
    Ok(())
}
