//! Tick scheduling abstraction.
//!
//! The engine never owns a thread. Whoever drives it schedules a repeating
//! callback through this interface: [`ThreadClock`] in production,
//! [`ManualClock`] in tests where time is advanced explicitly and no test
//! ever sleeps.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Identifies a scheduled repeating callback.
pub type TickHandle = u64;

/// A repeating callback driven by a clock.
pub type TickFn = Box<dyn FnMut() + Send>;

pub trait Clock: Send + Sync {
    /// Run `tick` every `interval` until the handle is cancelled.
    fn schedule_repeating(&self, interval: Duration, tick: TickFn) -> TickHandle;

    /// Stop a scheduled callback. Once this returns, no further invocation
    /// starts and any in-flight invocation has finished. Cancelling from
    /// inside the callback itself only suppresses future runs (the current
    /// one is, by definition, already executing).
    fn cancel(&self, handle: TickHandle);
}

struct Job {
    cancelled: AtomicBool,
    /// Held while the callback runs. `cancel` from another thread blocks on
    /// it so an in-flight tick finishes before cancellation returns.
    running: Mutex<()>,
    thread_id: Mutex<Option<thread::ThreadId>>,
}

/// Wall-clock implementation: one detached thread per scheduled job.
pub struct ThreadClock {
    next_handle: AtomicU64,
    jobs: Mutex<BTreeMap<TickHandle, Arc<Job>>>,
}

impl ThreadClock {
    pub fn new() -> Self {
        Self {
            next_handle: AtomicU64::new(1),
            jobs: Mutex::new(BTreeMap::new()),
        }
    }
}

impl Default for ThreadClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ThreadClock {
    fn schedule_repeating(&self, interval: Duration, mut tick: TickFn) -> TickHandle {
        let handle = self.next_handle.fetch_add(1, Ordering::Relaxed);
        let job = Arc::new(Job {
            cancelled: AtomicBool::new(false),
            running: Mutex::new(()),
            thread_id: Mutex::new(None),
        });
        self.jobs.lock().unwrap().insert(handle, Arc::clone(&job));
        thread::spawn(move || {
            *job.thread_id.lock().unwrap() = Some(thread::current().id());
            loop {
                thread::sleep(interval);
                if job.cancelled.load(Ordering::SeqCst) {
                    break;
                }
                let _guard = job.running.lock().unwrap();
                if job.cancelled.load(Ordering::SeqCst) {
                    break;
                }
                tick();
            }
        });
        handle
    }

    fn cancel(&self, handle: TickHandle) {
        let job = self.jobs.lock().unwrap().remove(&handle);
        let Some(job) = job else { return };
        job.cancelled.store(true, Ordering::SeqCst);
        let from_own_callback = job
            .thread_id
            .lock()
            .unwrap()
            .is_some_and(|id| id == thread::current().id());
        if !from_own_callback {
            // Wait out an in-flight tick so cancellation is synchronous.
            drop(job.running.lock().unwrap());
        }
    }
}

#[derive(Default)]
struct ManualInner {
    jobs: BTreeMap<TickHandle, TickFn>,
    /// Handles cancelled while their job was checked out mid-callback.
    cancelled: HashSet<TickHandle>,
}

/// Test clock. Nothing fires until [`ManualClock::advance`] is called.
#[derive(Default)]
pub struct ManualClock {
    next_handle: AtomicU64,
    inner: Mutex<ManualInner>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            next_handle: AtomicU64::new(1),
            inner: Mutex::new(ManualInner::default()),
        }
    }

    /// Fire every scheduled callback `ticks` times, in handle order.
    pub fn advance(&self, ticks: u64) {
        for _ in 0..ticks {
            let handles: Vec<TickHandle> =
                self.inner.lock().unwrap().jobs.keys().copied().collect();
            for handle in handles {
                // Take the job out of the map so the callback can re-enter
                // the clock (it may cancel itself on completion).
                let job = self.inner.lock().unwrap().jobs.remove(&handle);
                let Some(mut tick) = job else { continue };
                tick();
                let mut inner = self.inner.lock().unwrap();
                if !inner.cancelled.remove(&handle) {
                    inner.jobs.insert(handle, tick);
                }
            }
        }
    }

    /// Number of live scheduled jobs.
    pub fn active_jobs(&self) -> usize {
        self.inner.lock().unwrap().jobs.len()
    }
}

impl Clock for ManualClock {
    fn schedule_repeating(&self, _interval: Duration, tick: TickFn) -> TickHandle {
        let handle = self.next_handle.fetch_add(1, Ordering::Relaxed);
        self.inner.lock().unwrap().jobs.insert(handle, tick);
        handle
    }

    fn cancel(&self, handle: TickHandle) {
        let mut inner = self.inner.lock().unwrap();
        if inner.jobs.remove(&handle).is_none() {
            inner.cancelled.insert(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn manual_clock_only_fires_on_advance() {
        let clock = ManualClock::new();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        clock.schedule_repeating(
            Duration::from_secs(1),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        assert_eq!(count.load(Ordering::SeqCst), 0);
        clock.advance(3);
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn manual_clock_cancel_stops_all_future_ticks() {
        let clock = ManualClock::new();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let handle = clock.schedule_repeating(
            Duration::from_secs(1),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        clock.advance(2);
        clock.cancel(handle);
        clock.advance(5);
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(clock.active_jobs(), 0);
    }

    #[test]
    fn manual_clock_supports_cancel_from_inside_the_callback() {
        let clock = Arc::new(ManualClock::new());
        let count = Arc::new(AtomicUsize::new(0));
        let handle_slot = Arc::new(Mutex::new(None::<TickHandle>));

        let counter = Arc::clone(&count);
        let clock_ref = Arc::clone(&clock);
        let slot = Arc::clone(&handle_slot);
        let handle = clock.schedule_repeating(
            Duration::from_secs(1),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                if let Some(handle) = *slot.lock().unwrap() {
                    clock_ref.cancel(handle);
                }
            }),
        );
        *handle_slot.lock().unwrap() = Some(handle);

        clock.advance(4);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(clock.active_jobs(), 0);
    }

    #[test]
    fn thread_clock_ticks_and_cancels_deterministically() {
        let clock = ThreadClock::new();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let handle = clock.schedule_repeating(
            Duration::from_millis(5),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        while count.load(Ordering::SeqCst) == 0 {
            thread::sleep(Duration::from_millis(1));
        }
        clock.cancel(handle);
        let after_cancel = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(50));
        assert_eq!(count.load(Ordering::SeqCst), after_cancel);
    }
}
