//! Page-side capabilities: service worker container and notification permission.

use async_trait::async_trait;
use ponto_common::{PlatformError, PushManager};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Notification permission as reported by the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Granted,
    Denied,
    /// The user has not decided yet
    Default,
    /// The Notification capability does not exist
    Unsupported,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Granted => "granted",
            Permission::Denied => "denied",
            Permission::Default => "default",
            Permission::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "granted" => Ok(Permission::Granted),
            "denied" => Ok(Permission::Denied),
            "default" => Ok(Permission::Default),
            "unsupported" => Ok(Permission::Unsupported),
            other => Err(PlatformError::Permission(format!(
                "unknown permission state: {other}"
            ))),
        }
    }
}

/// Which browser features exist in the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlatformSupport {
    pub service_worker: bool,
    pub push_manager: bool,
    pub notification: bool,
}

impl PlatformSupport {
    /// Everything present.
    pub fn full() -> Self {
        Self {
            service_worker: true,
            push_manager: true,
            notification: true,
        }
    }

    /// Push works only when all three are present.
    pub fn is_supported(&self) -> bool {
        self.service_worker && self.push_manager && self.notification
    }
}

/// A service worker registration.
#[derive(Clone)]
pub struct Registration {
    pub scope: String,
    pub push_manager: Arc<dyn PushManager>,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

/// `navigator.serviceWorker`
#[async_trait]
pub trait ServiceWorkerContainer: Send + Sync {
    /// Registers the worker script and waits until it is ready.
    async fn register(&self, script_path: &str, scope: &str)
        -> Result<Registration, PlatformError>;
}

/// The `Notification` permission API.
#[async_trait]
pub trait NotificationPermissions: Send + Sync {
    /// `Notification.permission`
    fn current(&self) -> Permission;

    /// `Notification.requestPermission()`
    async fn request(&self) -> Result<Permission, PlatformError>;
}
