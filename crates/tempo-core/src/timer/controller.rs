//! The engine wired to its collaborators.
//!
//! [`TimerController`] drives a [`TimerEngine`] off an injected [`Clock`]
//! at one tick per second and fans every event out to subscribers. The
//! completion alert goes through the injected notifier and sound player,
//! so the countdown itself can never fail on their account.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::debug;

use crate::alert::{Notifier, SoundPlayer};
use crate::clock::{Clock, TickHandle};
use crate::events::Event;
use crate::presets::Preset;
use crate::sound::AlarmSound;
use crate::timer::engine::{TimerEngine, TimerSnapshot, TimerState};

const TICK_INTERVAL: Duration = Duration::from_secs(1);

type EventCallback = Box<dyn Fn(&Event) + Send + Sync>;

pub struct TimerController {
    inner: Arc<Inner>,
}

struct Inner {
    core: Mutex<Core>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    player: Arc<dyn SoundPlayer>,
    subscribers: Mutex<Vec<EventCallback>>,
}

struct Core {
    engine: TimerEngine,
    handle: Option<TickHandle>,
    alarm: AlarmSound,
}

impl TimerController {
    pub fn new(
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
        player: Arc<dyn SoundPlayer>,
        alarm: AlarmSound,
    ) -> Self {
        notifier.request_permission();
        Self {
            inner: Arc::new(Inner {
                core: Mutex::new(Core {
                    engine: TimerEngine::new(),
                    handle: None,
                    alarm,
                }),
                clock,
                notifier,
                player,
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Register a listener for every event the countdown produces.
    pub fn subscribe(&self, callback: impl Fn(&Event) + Send + Sync + 'static) {
        self.inner.subscribers.lock().unwrap().push(Box::new(callback));
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.inner.core.lock().unwrap().engine.snapshot()
    }

    pub fn state(&self) -> TimerState {
        self.inner.core.lock().unwrap().engine.state()
    }

    /// Set the duration selectors; ignored while a countdown exists.
    pub fn set_input(&self, hours: u32, minutes: u32, seconds: u32) {
        self.inner
            .core
            .lock()
            .unwrap()
            .engine
            .set_input(hours, minutes, seconds);
    }

    /// Select the sound for the next completion. An in-flight countdown is
    /// unaffected until it completes.
    pub fn set_alarm_sound(&self, sound: AlarmSound) {
        self.inner.core.lock().unwrap().alarm = sound;
    }

    pub fn alarm_sound(&self) -> AlarmSound {
        self.inner.core.lock().unwrap().alarm
    }

    /// Start or resume. A zero duration stays idle and schedules nothing.
    pub fn start(&self) {
        let event = {
            let mut core = self.inner.core.lock().unwrap();
            let Some(event) = core.engine.start() else {
                return;
            };
            if core.handle.is_none() {
                let weak = Arc::downgrade(&self.inner);
                let handle = self.inner.clock.schedule_repeating(
                    TICK_INTERVAL,
                    Box::new(move || {
                        if let Some(inner) = weak.upgrade() {
                            Inner::on_tick(&inner);
                        }
                    }),
                );
                core.handle = Some(handle);
            }
            event
        };
        self.inner.emit(&event);
    }

    /// Freeze the countdown. The tick schedule is cancelled before this
    /// returns; no stale tick can land afterwards.
    pub fn pause(&self) {
        let (event, handle) = {
            let mut core = self.inner.core.lock().unwrap();
            let Some(event) = core.engine.pause() else {
                return;
            };
            (event, core.handle.take())
        };
        if let Some(handle) = handle {
            self.inner.clock.cancel(handle);
        }
        self.inner.emit(&event);
    }

    /// Clear the countdown and stop ticking.
    pub fn reset(&self) {
        let (event, handle) = {
            let mut core = self.inner.core.lock().unwrap();
            (core.engine.reset(), core.handle.take())
        };
        if let Some(handle) = handle {
            self.inner.clock.cancel(handle);
        }
        self.inner.emit(&event);
    }

    /// Implicit reset, then load the preset into the input selectors.
    pub fn apply_preset(&self, preset: &Preset) {
        let (event, handle) = {
            let mut core = self.inner.core.lock().unwrap();
            let handle = core.handle.take();
            (core.engine.apply_preset(preset), handle)
        };
        if let Some(handle) = handle {
            self.inner.clock.cancel(handle);
        }
        self.inner.emit(&event);
    }
}

impl Inner {
    fn on_tick(inner: &Arc<Inner>) {
        let (event, completion) = {
            let mut core = inner.core.lock().unwrap();
            let Some(event) = core.engine.tick() else {
                return;
            };
            let completion = if matches!(event, Event::Completed { .. }) {
                Some((core.handle.take(), core.alarm))
            } else {
                None
            };
            (event, completion)
        };
        match completion {
            Some((handle, alarm)) => {
                if let Some(handle) = handle {
                    inner.clock.cancel(handle);
                }
                inner.emit(&event);
                debug!("countdown complete, raising alerts");
                inner.notifier.notify_completion();
                inner.player.play(alarm);
            }
            None => inner.emit(&event),
        }
    }

    fn emit(&self, event: &Event) {
        for callback in self.subscribers.lock().unwrap().iter() {
            callback(event);
        }
    }
}
