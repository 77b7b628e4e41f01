//! Capability traits for platform surfaces.
//!
//! The worker and the page client never talk to a browser directly. Each
//! surface they need (push manager, key/value storage, the push server) sits
//! behind one of these small traits, so a host can plug in real bindings and
//! tests can plug in fakes.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    ApiMessage, PushStatus, PushSubscription, ResubscribeRequest, SubscribeOptions,
    SubscribeRequest, TestResult, VapidKeyResponse,
};

pub use crate::storage::KeyValueStorage;

/// Errors raised by a platform capability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The capability does not exist in this runtime
    #[error("Capability not supported: {0}")]
    NotSupported(String),

    /// Service worker registration failed
    #[error("Service worker registration failed: {0}")]
    Registration(String),

    /// The push manager refused or failed an operation
    #[error("Push manager error: {0}")]
    Push(String),

    /// The permission prompt failed
    #[error("Permission request failed: {0}")]
    Permission(String),

    /// Showing or closing a notification failed
    #[error("Notification error: {0}")]
    Notification(String),

    /// A cache storage operation failed
    #[error("Cache error: {0}")]
    Cache(String),

    /// The network could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// Window client operations (focus, open, claim) failed
    #[error("Clients error: {0}")]
    Clients(String),
}

/// Errors raised while calling the push server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Push API unreachable: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("Push API rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The response body could not be decoded
    #[error("Invalid push API response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// The platform push manager of a service worker registration.
#[async_trait]
pub trait PushManager: Send + Sync {
    /// The current subscription, if any.
    async fn get_subscription(&self) -> Result<Option<PushSubscription>, PlatformError>;

    /// Creates (or returns the existing) subscription.
    async fn subscribe(&self, options: &SubscribeOptions)
        -> Result<PushSubscription, PlatformError>;

    /// Revokes a subscription. Returns `false` when it was already gone.
    async fn unsubscribe(&self, subscription: &PushSubscription) -> Result<bool, PlatformError>;
}

/// The application server endpoints under `/api/push` (and `/api/sync`).
#[async_trait]
pub trait PushApi: Send + Sync {
    /// `GET /api/push/vapid-key`
    async fn vapid_key(&self) -> Result<VapidKeyResponse, ApiError>;

    /// `POST /api/push/subscribe` from the page
    async fn subscribe(&self, request: &SubscribeRequest) -> Result<ApiMessage, ApiError>;

    /// `POST /api/push/subscribe` from the worker after a subscription change
    async fn resubscribe(&self, request: &ResubscribeRequest) -> Result<ApiMessage, ApiError>;

    /// `POST /api/push/unsubscribe`
    async fn unsubscribe(&self, endpoint: &str) -> Result<ApiMessage, ApiError>;

    /// `POST /api/push/test`
    async fn send_test(&self, user_id: &str) -> Result<TestResult, ApiError>;

    /// `GET /api/push/status?usuario=`
    async fn status(&self, user_id: &str) -> Result<PushStatus, ApiError>;

    /// `POST /api/sync`
    async fn sync_offline_data(&self) -> Result<(), ApiError>;
}
