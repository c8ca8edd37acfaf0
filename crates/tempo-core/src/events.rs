use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Every state transition and every tick produces an Event.
/// Presentation layers subscribe to these instead of polling the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    Started {
        total_secs: u64,
        at: DateTime<Utc>,
    },
    Paused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    Resumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    Tick {
        remaining_secs: u64,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero. Raised exactly once per countdown.
    Completed {
        total_secs: u64,
        at: DateTime<Utc>,
    },
    Reset {
        at: DateTime<Utc>,
    },
    /// A preset was loaded into the duration selectors (countdown stopped,
    /// nothing auto-started).
    PresetApplied {
        preset_id: Uuid,
        hours: u32,
        minutes: u32,
        seconds: u32,
        at: DateTime<Utc>,
    },
}
