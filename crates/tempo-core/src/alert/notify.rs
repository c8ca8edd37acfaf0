use notify_rust::Notification;
use tracing::{debug, warn};

use super::Notifier;

const APP_NAME: &str = "Tempo";

/// Desktop notifications through the platform notification service.
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for DesktopNotifier {
    fn request_permission(&self) {
        // Freedesktop notifications need no upfront grant; nothing to do
        // until a platform that requires one gets its own backend.
        debug!("notification permission implicitly granted");
    }

    fn notify_completion(&self) {
        let shown = Notification::new()
            .appname(APP_NAME)
            .summary("Timer Complete")
            .body("Your countdown has finished.")
            .icon("alarm-clock")
            .show();
        if let Err(e) = shown {
            warn!(error = %e, "completion notification failed");
        }
    }
}
