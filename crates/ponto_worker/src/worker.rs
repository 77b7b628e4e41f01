//! The service worker: configuration plus the capabilities it runs against.
//!
//! A worker can be stopped between any two events, so `ServiceWorker` holds
//! no mutable state. Anything that must survive (the VAPID key) goes through
//! the injected storage. Event handlers live in the sibling modules
//! (`fetch`, `lifecycle`, `push`, `click`, `subscription`).

use ponto_common::{
    ApiError, DecodeError, KeyValueStorage, PlatformError, PushApi, PushManager, StorageError,
};
use ponto_config::{AppConfig, NotificationConfig, WorkerConfig};
use std::sync::Arc;
use thiserror::Error;
use url::Url;

use crate::cache::CacheStorage;
use crate::platform::{Clients, Network, NotificationHost, WorkerLifecycle};

/// Errors surfaced by worker event handlers.
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Invalid VAPID key: {0}")]
    InvalidKey(#[from] DecodeError),

    #[error("VAPID public key not configured")]
    MissingVapidKey,

    #[error("Pre-cache of {url} failed: {reason}")]
    Precache { url: String, reason: String },
}

/// Every platform surface the worker touches.
#[derive(Clone)]
pub struct WorkerCapabilities {
    pub caches: Arc<dyn CacheStorage>,
    pub network: Arc<dyn Network>,
    pub clients: Arc<dyn Clients>,
    pub notifications: Arc<dyn NotificationHost>,
    pub lifecycle: Arc<dyn WorkerLifecycle>,
    pub push_manager: Arc<dyn PushManager>,
    /// Persisted worker state
    pub storage: Arc<dyn KeyValueStorage>,
    pub api: Arc<dyn PushApi>,
}

/// Service worker event handlers bound to one configuration.
pub struct ServiceWorker {
    pub(crate) config: WorkerConfig,
    pub(crate) notification_defaults: NotificationConfig,
    pub(crate) origin: Url,
    pub(crate) caps: WorkerCapabilities,
}

impl ServiceWorker {
    /// Creates a worker from its configuration sections.
    ///
    /// Fails only if `config.origin` is not an absolute URL.
    pub fn new(
        config: WorkerConfig,
        notification_defaults: NotificationConfig,
        caps: WorkerCapabilities,
    ) -> Result<Self, WorkerError> {
        let origin = Url::parse(&config.origin)?;
        Ok(Self {
            config,
            notification_defaults,
            origin,
            caps,
        })
    }

    /// Creates a worker from the application configuration.
    pub fn from_app_config(
        config: &AppConfig,
        caps: WorkerCapabilities,
    ) -> Result<Self, WorkerError> {
        Self::new(config.worker.clone(), config.notification.clone(), caps)
    }

    pub fn cache_name(&self) -> &str {
        &self.config.cache_name
    }

    pub fn version(&self) -> &str {
        &self.config.cache_version
    }

    /// The origin as the browser serializes it, e.g. `https://app.example.com`.
    pub fn origin(&self) -> String {
        self.origin.origin().ascii_serialization()
    }

    /// Resolves a worker-relative path (`/static/offline.html`) to an absolute URL.
    pub(crate) fn resolve(&self, path: &str) -> Result<Url, url::ParseError> {
        self.origin.join(path)
    }
}
