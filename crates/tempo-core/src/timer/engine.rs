//! Countdown state machine.
//!
//! The engine is tick-driven and owns no thread: whoever drives it calls
//! `tick()` once per second while the countdown runs. See
//! [`TimerController`](crate::timer::TimerController) for the wired version.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> ... -> Idle
//! ```
//!
//! Completion fires on the tick that reaches zero: a 300-second countdown
//! completes after exactly 300 ticks.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::format::{decompose, format_duration};
use crate::presets::Preset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    #[default]
    Idle,
    Running,
    Paused,
}

/// Read-only view of the countdown. Rebuilt on demand, never persisted as
/// state of record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub total_secs: u64,
    pub remaining_secs: u64,
    pub progress: f64,
    pub formatted_remaining: String,
}

/// Countdown engine.
///
/// The input fields mirror the hour/minute/second selectors of the desktop
/// UI; they are captured into a countdown when one starts from `Idle`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    state: TimerState,
    total_secs: u64,
    remaining_secs: u64,
    hours: u32,
    minutes: u32,
    seconds: u32,
}

impl TimerEngine {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            total_secs: 0,
            remaining_secs: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }

    /// Engine with the input selectors pre-filled.
    pub fn with_input(hours: u32, minutes: u32, seconds: u32) -> Self {
        let mut engine = Self::new();
        engine.set_input(hours, minutes, seconds);
        engine
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// Current (hours, minutes, seconds) input selectors.
    pub fn input(&self) -> (u32, u32, u32) {
        (self.hours, self.minutes, self.seconds)
    }

    /// 0.0 .. 1.0 through the current countdown; 0.0 when nothing is set.
    /// Non-decreasing while running.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / self.total_secs as f64)
    }

    /// `MM:SS` / `HH:MM:SS` rendering of the remaining time.
    pub fn formatted_remaining(&self) -> String {
        format_duration(self.remaining_secs)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.state,
            total_secs: self.total_secs,
            remaining_secs: self.remaining_secs,
            progress: self.progress(),
            formatted_remaining: self.formatted_remaining(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Set the input selectors. Ignored unless idle: the UI disables the
    /// fields while a countdown exists, and this guard is the engine-side
    /// half of that contract.
    pub fn set_input(&mut self, hours: u32, minutes: u32, seconds: u32) {
        if self.state != TimerState::Idle {
            return;
        }
        self.hours = hours;
        self.minutes = minutes;
        self.seconds = seconds;
    }

    /// Start from idle (capturing the input selectors) or resume from
    /// pause without recomputing the total. Starting with a zero duration
    /// is a no-op, not an error.
    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle => {
                let total = u64::from(self.hours) * 3600
                    + u64::from(self.minutes) * 60
                    + u64::from(self.seconds);
                if total == 0 {
                    return None;
                }
                self.total_secs = total;
                self.remaining_secs = total;
                self.state = TimerState::Running;
                Some(Event::Started {
                    total_secs: total,
                    at: Utc::now(),
                })
            }
            TimerState::Paused => {
                self.state = TimerState::Running;
                Some(Event::Resumed {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            TimerState::Running => None,
        }
    }

    /// Freeze the countdown at its current remaining time.
    pub fn pause(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.state = TimerState::Paused;
        Some(Event::Paused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Back to idle with both counters cleared.
    pub fn reset(&mut self) -> Event {
        self.state = TimerState::Idle;
        self.total_secs = 0;
        self.remaining_secs = 0;
        Event::Reset { at: Utc::now() }
    }

    /// One second elapsed. Only meaningful while running; the completion
    /// event fires exactly once, on the tick that reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = TimerState::Idle;
            Some(Event::Completed {
                total_secs: self.total_secs,
                at: Utc::now(),
            })
        } else {
            Some(Event::Tick {
                remaining_secs: self.remaining_secs,
                total_secs: self.total_secs,
                at: Utc::now(),
            })
        }
    }

    /// Stop whatever is in flight and load the preset into the input
    /// selectors. Does not auto-start.
    pub fn apply_preset(&mut self, preset: &Preset) -> Event {
        self.reset();
        let (hours, minutes, seconds) = decompose(preset.duration_secs);
        self.hours = hours as u32;
        self.minutes = minutes as u32;
        self.seconds = seconds as u32;
        Event::PresetApplied {
            preset_id: preset.id,
            hours: self.hours,
            minutes: self.minutes,
            seconds: self.seconds,
            at: Utc::now(),
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::Preset;

    #[test]
    fn zero_duration_start_is_a_noop() {
        let mut engine = TimerEngine::new();
        assert!(engine.start().is_none());
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.total_secs(), 0);
    }

    #[test]
    fn five_minutes_completes_after_exactly_300_ticks() {
        let mut engine = TimerEngine::with_input(0, 5, 0);
        assert!(matches!(
            engine.start(),
            Some(Event::Started { total_secs: 300, .. })
        ));

        let mut completions = 0;
        for _ in 0..300 {
            if let Some(Event::Completed { .. }) = engine.tick() {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.remaining_secs(), 0);

        // Nothing more once idle.
        assert!(engine.tick().is_none());
    }

    #[test]
    fn pause_then_resume_preserves_remaining_exactly() {
        let mut engine = TimerEngine::with_input(0, 10, 0);
        engine.start();
        for _ in 0..10 {
            engine.tick();
        }
        assert_eq!(engine.remaining_secs(), 590);

        engine.pause().unwrap();
        assert_eq!(engine.state(), TimerState::Paused);
        assert!(engine.tick().is_none());
        assert_eq!(engine.remaining_secs(), 590);

        match engine.start() {
            Some(Event::Resumed { remaining_secs, .. }) => assert_eq!(remaining_secs, 590),
            other => panic!("expected Resumed, got {other:?}"),
        }
        assert_eq!(engine.total_secs(), 600);

        engine.tick();
        assert_eq!(engine.remaining_secs(), 589);
    }

    #[test]
    fn reset_zeroes_counters_from_any_state() {
        let mut engine = TimerEngine::with_input(0, 1, 0);
        engine.start();
        engine.tick();
        engine.reset();
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.total_secs(), 0);
        assert_eq!(engine.remaining_secs(), 0);
        assert!(engine.tick().is_none());

        engine.set_input(0, 1, 0);
        engine.start();
        engine.pause();
        engine.reset();
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.remaining_secs(), 0);
    }

    #[test]
    fn input_is_frozen_while_a_countdown_exists() {
        let mut engine = TimerEngine::with_input(0, 0, 30);
        engine.start();
        engine.set_input(2, 0, 0);
        assert_eq!(engine.input(), (0, 0, 30));

        engine.pause();
        engine.set_input(2, 0, 0);
        assert_eq!(engine.input(), (0, 0, 30));

        // Resuming keeps the original total.
        engine.start();
        assert_eq!(engine.total_secs(), 30);
    }

    #[test]
    fn progress_runs_from_zero_to_one() {
        let mut engine = TimerEngine::new();
        assert_eq!(engine.progress(), 0.0);

        engine.set_input(0, 0, 4);
        engine.start();
        assert_eq!(engine.progress(), 0.0);
        engine.tick();
        assert!((engine.progress() - 0.25).abs() < f64::EPSILON);
        engine.tick();
        assert!((engine.progress() - 0.5).abs() < f64::EPSILON);
        engine.tick();
        engine.tick();
        assert_eq!(engine.progress(), 1.0);
    }

    #[test]
    fn apply_preset_while_running_stops_without_starting() {
        let mut engine = TimerEngine::with_input(1, 0, 0);
        engine.start();
        engine.tick();

        let preset = Preset::new("25 min (Pomodoro)", 1500);
        let event = engine.apply_preset(&preset);

        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.input(), (0, 25, 0));
        assert_eq!(engine.total_secs(), 0);
        assert!(engine.tick().is_none());
        match event {
            Event::PresetApplied {
                preset_id,
                hours,
                minutes,
                seconds,
                ..
            } => {
                assert_eq!(preset_id, preset.id);
                assert_eq!((hours, minutes, seconds), (0, 25, 0));
            }
            other => panic!("expected PresetApplied, got {other:?}"),
        }
    }

    #[test]
    fn preset_decomposition_covers_hours() {
        let mut engine = TimerEngine::new();
        engine.apply_preset(&Preset::new("long", 3661));
        assert_eq!(engine.input(), (1, 1, 1));
    }

    #[test]
    fn snapshot_respects_remaining_within_total() {
        let mut engine = TimerEngine::with_input(0, 5, 0);
        engine.start();
        engine.tick();
        let snap = engine.snapshot();
        assert_eq!(snap.state, TimerState::Running);
        assert_eq!(snap.total_secs, 300);
        assert_eq!(snap.remaining_secs, 299);
        assert!(snap.remaining_secs <= snap.total_secs);
        assert_eq!(snap.formatted_remaining, "04:59");
    }

    #[test]
    fn engine_serializes_and_restores() {
        let mut engine = TimerEngine::with_input(0, 2, 0);
        engine.start();
        engine.tick();
        let json = serde_json::to_string(&engine).unwrap();
        let mut restored: TimerEngine = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.state(), TimerState::Running);
        assert_eq!(restored.remaining_secs(), 119);
        restored.tick();
        assert_eq!(restored.remaining_secs(), 118);
    }
}
