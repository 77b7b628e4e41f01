// Declare modules within this crate
pub mod cache; // Cache Storage capability
pub mod click; // notificationclick / notificationclose
pub mod fetch; // Fetch interception strategies
pub mod lifecycle; // install, activate, message
pub mod models; // Request and Response values
pub mod platform; // Network, clients, notifications, lifecycle capabilities
pub mod push; // Push payload to notification
pub mod subscription; // pushsubscriptionchange and background sync
pub mod worker; // ServiceWorker and WorkerError

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod subscription_test;

pub use cache::{CacheStorage, MemoryCacheStorage};
pub use click::ClickOutcome;
pub use fetch::FetchOutcome;
pub use lifecycle::WorkerMessage;
pub use models::{Request, RequestDestination, RequestMode, Response};
pub use platform::{Clients, Network, NotificationHost, WindowClient, WorkerLifecycle};
pub use push::{build_notification, Notification, NotificationAction, NotificationOptions};
pub use worker::{ServiceWorker, WorkerCapabilities, WorkerError};

// This crate holds the service worker's event handlers. The host runtime
// forwards each browser event to the matching `ServiceWorker::on_*` method.
