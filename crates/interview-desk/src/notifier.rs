//! Notice delivery beyond the console: structured logs and, optionally,
//! desktop notifications.

use interview_desk_core::{Notice, NoticeAction, Severity};

use tracing::{debug, info, warn};

const APP_NAME: &str = "Interview Desk";

/// Routes notices to tracing and the desktop notification daemon.
#[derive(Debug, Clone)]
pub struct Notifier {
    desktop: bool,
}

impl Notifier {
    /// Create a notifier; `desktop` also raises OS notifications.
    pub fn new(desktop: bool) -> Self {
        Self { desktop }
    }

    /// Record the notice and forward it to the desktop if enabled.
    pub fn notify(&self, notice: &Notice) {
        match notice.severity {
            Severity::Info => info!(
                title = %notice.title,
                description = %notice.description,
                "Notice"
            ),
            Severity::Destructive => warn!(
                title = %notice.title,
                description = %notice.description,
                retry = notice.action == Some(NoticeAction::Retry),
                "Notice"
            ),
        }

        if self.desktop {
            self.show_desktop(notice);
        }
    }

    fn show_desktop(&self, notice: &Notice) {
        let summary = notice.title.clone();
        let body = notice.description.clone();

        // Notification daemons can block on D-Bus; keep it off the runtime.
        tokio::task::spawn_blocking(move || {
            let result = notify_rust::Notification::new()
                .appname(APP_NAME)
                .summary(&summary)
                .body(&body)
                .show()
                .map(|_| ());
            match result {
                Ok(()) => debug!(title = %summary, "Desktop notification shown"),
                Err(e) => warn!(error = %e, "Desktop notification failed"),
            }
        });
    }
}
