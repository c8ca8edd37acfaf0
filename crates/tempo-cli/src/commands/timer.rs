use std::sync::{mpsc, Arc, Mutex};

use chrono::Utc;
use clap::Subcommand;
use serde::{Deserialize, Serialize};

use tempo_core::{
    Clock, Config, Database, DesktopNotifier, Event, Notifier, NullNotifier, NullSoundPlayer,
    PresetStore, SoundPlayer, SystemSoundPlayer, ThreadClock, TimerController, TimerEngine,
    TimerState,
};

const ENGINE_KEY: &str = "timer_engine";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a countdown (or resume a paused one)
    Start {
        #[arg(long)]
        hours: Option<u32>,
        #[arg(long)]
        minutes: Option<u32>,
        #[arg(long)]
        seconds: Option<u32>,
        /// Apply a saved preset (by list position) before starting
        #[arg(long)]
        preset: Option<usize>,
    },
    /// Pause the running countdown
    Pause,
    /// Resume a paused countdown
    Resume,
    /// Reset to idle
    Reset,
    /// Print the current countdown state as JSON
    Status,
    /// Run a countdown in the foreground until it completes
    Watch {
        #[arg(long)]
        hours: Option<u32>,
        #[arg(long)]
        minutes: Option<u32>,
        #[arg(long)]
        seconds: Option<u32>,
        /// Count down a saved preset (by list position)
        #[arg(long)]
        preset: Option<usize>,
    },
}

/// Engine image persisted between invocations, with the wall-clock second
/// it was last advanced to.
#[derive(Serialize, Deserialize)]
pub(crate) struct StoredTimer {
    pub(crate) engine: TimerEngine,
    pub(crate) last_tick_epoch: Option<i64>,
}

pub(crate) fn open_store() -> Result<PresetStore, Box<dyn std::error::Error>> {
    Ok(PresetStore::new(Box::new(Database::open()?)))
}

pub(crate) fn load_timer(db: &Database, cfg: &Config) -> StoredTimer {
    if let Ok(Some(json)) = db.kv_get(ENGINE_KEY) {
        if let Ok(stored) = serde_json::from_str::<StoredTimer>(&json) {
            return stored;
        }
    }
    StoredTimer {
        engine: TimerEngine::with_input(
            cfg.timer.default_hours,
            cfg.timer.default_minutes,
            cfg.timer.default_seconds,
        ),
        last_tick_epoch: None,
    }
}

pub(crate) fn save_timer(db: &Database, stored: &StoredTimer) -> Result<(), Box<dyn std::error::Error>> {
    db.kv_set(ENGINE_KEY, &serde_json::to_string(stored)?)?;
    Ok(())
}

/// Advance the engine by the whole seconds elapsed since the image was
/// saved. Returns the completion event if the countdown finished.
pub(crate) fn catch_up(stored: &mut StoredTimer) -> Option<Event> {
    if stored.engine.state() != TimerState::Running {
        return None;
    }
    let now = Utc::now().timestamp();
    let last = stored.last_tick_epoch.unwrap_or(now);
    let elapsed = now.saturating_sub(last).max(0) as u64;
    stored.last_tick_epoch = Some(now);
    for _ in 0..elapsed {
        match stored.engine.tick() {
            Some(event @ Event::Completed { .. }) => return Some(event),
            Some(_) => {}
            None => break,
        }
    }
    None
}

/// Print the completion event and raise the configured alerts.
pub(crate) fn announce_completion(
    cfg: &Config,
    event: &Event,
) -> Result<(), Box<dyn std::error::Error>> {
    print_event(event)?;
    let store = open_store()?;
    let sound = store.alarm_sound()?;
    if cfg.notifications.enabled {
        DesktopNotifier::new().notify_completion();
    }
    if cfg.sound.enabled {
        SystemSoundPlayer::new(cfg.sounds_dir()?).play(sound);
    }
    Ok(())
}

pub(crate) fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

fn print_snapshot(engine: &TimerEngine) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    if let TimerAction::Watch {
        hours,
        minutes,
        seconds,
        preset,
    } = action
    {
        return watch(hours, minutes, seconds, preset);
    }

    let db = Database::open()?;
    let cfg = Config::load_or_default();
    let mut stored = load_timer(&db, &cfg);

    // Bring the image up to date before acting on it.
    if let Some(event) = catch_up(&mut stored) {
        announce_completion(&cfg, &event)?;
    }

    match action {
        TimerAction::Start {
            hours,
            minutes,
            seconds,
            preset,
        } => {
            if let Some(index) = preset {
                let store = open_store()?;
                let presets = store.load()?;
                let chosen = presets
                    .get(index)
                    .ok_or_else(|| format!("no preset at position {index}"))?;
                let event = stored.engine.apply_preset(chosen);
                print_event(&event)?;
            } else if hours.is_some() || minutes.is_some() || seconds.is_some() {
                stored
                    .engine
                    .set_input(hours.unwrap_or(0), minutes.unwrap_or(0), seconds.unwrap_or(0));
            }
            match stored.engine.start() {
                Some(event) => {
                    stored.last_tick_epoch = Some(Utc::now().timestamp());
                    print_event(&event)?;
                }
                None => print_snapshot(&stored.engine)?,
            }
        }
        TimerAction::Pause => match stored.engine.pause() {
            Some(event) => {
                stored.last_tick_epoch = None;
                print_event(&event)?;
            }
            None => print_snapshot(&stored.engine)?,
        },
        TimerAction::Resume => {
            if stored.engine.state() == TimerState::Paused {
                if let Some(event) = stored.engine.start() {
                    stored.last_tick_epoch = Some(Utc::now().timestamp());
                    print_event(&event)?;
                }
            } else {
                print_snapshot(&stored.engine)?;
            }
        }
        TimerAction::Reset => {
            let event = stored.engine.reset();
            stored.last_tick_epoch = None;
            print_event(&event)?;
        }
        TimerAction::Status => print_snapshot(&stored.engine)?,
        TimerAction::Watch { .. } => unreachable!("handled above"),
    }

    save_timer(&db, &stored)?;
    Ok(())
}

fn watch(
    hours: Option<u32>,
    minutes: Option<u32>,
    seconds: Option<u32>,
    preset: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load_or_default();
    let store = open_store()?;
    let alarm = store.alarm_sound()?;

    let notifier: Arc<dyn Notifier> = if cfg.notifications.enabled {
        Arc::new(DesktopNotifier::new())
    } else {
        Arc::new(NullNotifier)
    };
    let player: Arc<dyn SoundPlayer> = if cfg.sound.enabled {
        Arc::new(SystemSoundPlayer::new(cfg.sounds_dir()?))
    } else {
        Arc::new(NullSoundPlayer)
    };
    let clock: Arc<dyn Clock> = Arc::new(ThreadClock::new());
    let controller = TimerController::new(clock, notifier, player, alarm);

    if let Some(index) = preset {
        let presets = store.load()?;
        let chosen = presets
            .get(index)
            .ok_or_else(|| format!("no preset at position {index}"))?;
        controller.apply_preset(chosen);
    } else if hours.is_some() || minutes.is_some() || seconds.is_some() {
        controller.set_input(hours.unwrap_or(0), minutes.unwrap_or(0), seconds.unwrap_or(0));
    } else {
        controller.set_input(
            cfg.timer.default_hours,
            cfg.timer.default_minutes,
            cfg.timer.default_seconds,
        );
    }

    let (tx, rx) = mpsc::channel();
    let tx = Mutex::new(tx);
    controller.subscribe(move |event| {
        let _ = tx.lock().unwrap().send(event.clone());
    });

    controller.start();
    if controller.state() != TimerState::Running {
        return Err("nothing to count down: total duration is zero".into());
    }

    for event in rx {
        println!("{}", serde_json::to_string(&event)?);
        if matches!(event, Event::Completed { .. }) {
            break;
        }
    }
    Ok(())
}
