//! # Tempo Core Library
//!
//! Core logic for Tempo, a desktop countdown timer: the countdown state
//! machine, saved presets, the alarm-sound catalog, and the persistence
//! behind them. Window chrome and platform delivery stay behind the
//! [`alert`] and [`clock`] traits so a GUI shell, the bundled CLI, and the
//! test suite all drive the same engine.
//!
//! ## Key components
//!
//! - [`TimerEngine`]: tick-driven countdown state machine
//! - [`TimerController`]: the engine wired to a clock and alert collaborators
//! - [`PresetStore`]: durable preset list and alarm-sound preference
//! - [`Database`]: SQLite key-value persistence
//! - [`Config`]: TOML application configuration

pub mod alert;
pub mod clock;
pub mod error;
pub mod events;
pub mod format;
pub mod presets;
pub mod sound;
pub mod storage;
pub mod timer;

pub use alert::{DesktopNotifier, Notifier, NullNotifier, NullSoundPlayer, SoundPlayer, SystemSoundPlayer};
pub use clock::{Clock, ManualClock, ThreadClock, TickHandle};
pub use error::{ConfigError, CoreError, StorageError};
pub use events::Event;
pub use format::{decompose, format_duration};
pub use presets::{default_presets, Preset, PresetStore};
pub use sound::AlarmSound;
pub use storage::{data_dir, Config, Database, KeyValueStore, MemoryStore};
pub use timer::{TimerController, TimerEngine, TimerSnapshot, TimerState};
