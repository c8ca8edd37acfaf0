//! Completion alert collaborators.
//!
//! Notification and sound delivery are fire-and-forget: failures log and
//! degrade, they never reach the countdown path.

mod notify;
mod player;

pub use notify::DesktopNotifier;
pub use player::SystemSoundPlayer;

use crate::sound::AlarmSound;

/// Delivers the user-facing completion notification.
pub trait Notifier: Send + Sync {
    /// Ask the OS for notification permission where that is a concept.
    fn request_permission(&self);

    /// Announce that the countdown finished.
    fn notify_completion(&self);
}

/// Plays the selected alarm sound.
pub trait SoundPlayer: Send + Sync {
    fn play(&self, sound: AlarmSound);
}

/// Notifier that does nothing. For headless use and disabled notifications.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn request_permission(&self) {}
    fn notify_completion(&self) {}
}

/// Player that does nothing. For headless use and muted configurations.
pub struct NullSoundPlayer;

impl SoundPlayer for NullSoundPlayer {
    fn play(&self, _sound: AlarmSound) {}
}
