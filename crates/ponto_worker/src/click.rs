//! Notification click and close handling.

use ponto_common::{log_error, PlatformError};
use tracing::info;

use crate::push::Notification;
use crate::worker::{ServiceWorker, WorkerError};

/// The action id of the built-in dismiss button.
pub const DISMISS_ACTION: &str = "dismiss";

/// What a notification click ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The user pressed dismiss
    Dismissed,
    /// An existing window was focused
    Focused(String),
    /// A new window was opened at this URL
    Opened(String),
    /// No window could be focused or opened
    NoWindow,
}

impl ServiceWorker {
    /// Handles `notificationclick`. `action` is empty for a click on the body.
    pub async fn on_notification_click(
        &self,
        notification: &Notification,
        action: &str,
    ) -> Result<ClickOutcome, WorkerError> {
        info!(action, "Notification clicked");

        if let Err(e) = self
            .caps
            .notifications
            .close(&notification.options.tag)
            .await
        {
            log_error(e, "Failed to close notification");
        }

        if action == DISMISS_ACTION {
            info!("Notification dismissed by the user");
            return Ok(ClickOutcome::Dismissed);
        }

        let origin = self.origin();
        let windows = self.caps.clients.match_all_windows(true).await?;
        if let Some(window) = windows
            .into_iter()
            .find(|w| w.focusable && w.url.starts_with(&origin))
        {
            info!(url = %window.url, "Focusing existing window");
            self.caps.clients.focus(&window.id).await?;
            return Ok(ClickOutcome::Focused(window.url));
        }

        let target = notification.target_url().to_string();
        match self.caps.clients.open_window(&target).await {
            Ok(()) => {
                info!(url = %target, "Opened new window");
                Ok(ClickOutcome::Opened(target))
            }
            Err(PlatformError::NotSupported(_)) => Ok(ClickOutcome::NoWindow),
            Err(e) => Err(e.into()),
        }
    }

    /// Handles `notificationclose`.
    pub fn on_notification_close(&self, notification: &Notification) {
        info!(tag = %notification.options.tag, "Notification closed without interaction");
    }
}
