//! Worker-side capabilities other than caches.

use async_trait::async_trait;
use ponto_common::PlatformError;

use crate::models::{Request, Response};
use crate::push::NotificationOptions;

/// `fetch()` from the worker global scope.
#[async_trait]
pub trait Network: Send + Sync {
    /// Performs the request. Any HTTP status is `Ok`; only an unreachable
    /// network is an error.
    async fn fetch(&self, request: &Request) -> Result<Response, PlatformError>;
}

/// A window controlled (or not yet controlled) by this worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowClient {
    pub id: String,
    pub url: String,
    /// Whether the client can be focused from the worker
    pub focusable: bool,
}

/// The `clients` global.
#[async_trait]
pub trait Clients: Send + Sync {
    /// Window clients, optionally including uncontrolled ones.
    async fn match_all_windows(
        &self,
        include_uncontrolled: bool,
    ) -> Result<Vec<WindowClient>, PlatformError>;

    async fn focus(&self, client_id: &str) -> Result<(), PlatformError>;

    /// Opens a new window. `NotSupported` when the runtime has no `openWindow`.
    async fn open_window(&self, url: &str) -> Result<(), PlatformError>;

    /// Takes control of every open page.
    async fn claim(&self) -> Result<(), PlatformError>;
}

/// `registration.showNotification` and friends.
#[async_trait]
pub trait NotificationHost: Send + Sync {
    async fn show(&self, title: &str, options: &NotificationOptions) -> Result<(), PlatformError>;

    /// Closes the notification carrying `tag`.
    async fn close(&self, tag: &str) -> Result<(), PlatformError>;
}

/// Worker lifecycle controls.
#[async_trait]
pub trait WorkerLifecycle: Send + Sync {
    /// Activates a waiting worker without waiting for old pages to close.
    async fn skip_waiting(&self) -> Result<(), PlatformError>;
}
