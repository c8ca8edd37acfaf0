mod controller;
mod engine;

pub use controller::TimerController;
pub use engine::{TimerEngine, TimerSnapshot, TimerState};
