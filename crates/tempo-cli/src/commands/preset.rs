use clap::Subcommand;
use uuid::Uuid;

use tempo_core::{Config, Database, Preset};

use super::timer;

#[derive(Subcommand)]
pub enum PresetAction {
    /// List saved presets in display order
    List {
        #[arg(long)]
        json: bool,
    },
    /// Add a preset
    Add {
        name: String,
        /// Duration in seconds
        #[arg(long)]
        duration: u64,
    },
    /// Remove presets by list position
    Remove {
        #[arg(required = true)]
        indices: Vec<usize>,
    },
    /// Rename or re-time a preset by id
    Update {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        /// New duration in seconds
        #[arg(long)]
        duration: Option<u64>,
    },
    /// Move presets to a new position
    Move {
        #[arg(required = true)]
        from: Vec<usize>,
        #[arg(long)]
        to: usize,
    },
    /// Load a preset into the timer's duration selectors (stops any
    /// running countdown, does not start a new one)
    Apply { index: usize },
    /// Restore the built-in preset list
    ResetDefaults,
}

fn print_list(presets: &[Preset]) {
    for (index, preset) in presets.iter().enumerate() {
        println!("{index:>2}  {:>8}  {}", preset.formatted_duration(), preset.name);
    }
}

pub fn run(action: PresetAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = timer::open_store()?;
    match action {
        PresetAction::List { json } => {
            let presets = store.load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&presets)?);
            } else {
                print_list(&presets);
            }
        }
        PresetAction::Add { name, duration } => {
            let presets = store.add(Preset::new(name, duration))?;
            print_list(&presets);
        }
        PresetAction::Remove { indices } => {
            let presets = store.delete(&indices)?;
            print_list(&presets);
        }
        PresetAction::Update { id, name, duration } => {
            let presets = store.load()?;
            let Some(mut preset) = presets.into_iter().find(|p| p.id == id) else {
                return Err(format!("no preset with id {id}").into());
            };
            if let Some(name) = name {
                preset.name = name;
            }
            if let Some(duration) = duration {
                preset.duration_secs = duration;
            }
            let presets = store.update(preset)?;
            print_list(&presets);
        }
        PresetAction::Move { from, to } => {
            let presets = store.reorder(&from, to)?;
            print_list(&presets);
        }
        PresetAction::Apply { index } => {
            let presets = store.load()?;
            let chosen = presets
                .get(index)
                .ok_or_else(|| format!("no preset at position {index}"))?;

            let db = Database::open()?;
            let cfg = Config::load_or_default();
            let mut stored = timer::load_timer(&db, &cfg);
            if let Some(event) = timer::catch_up(&mut stored) {
                timer::announce_completion(&cfg, &event)?;
            }
            let event = stored.engine.apply_preset(chosen);
            stored.last_tick_epoch = None;
            timer::save_timer(&db, &stored)?;
            timer::print_event(&event)?;
        }
        PresetAction::ResetDefaults => {
            let presets = store.reset_to_defaults()?;
            print_list(&presets);
        }
    }
    Ok(())
}
