// --- File: crates/ponto_common/src/lib.rs ---

// Declare modules within this crate
pub mod encoding; // base64url helpers for VAPID and subscription keys
pub mod error; // Error handling
pub mod http; // HTTP client and the push server API
pub mod logging; // Logging utilities
pub mod models; // Data structures and models
pub mod services; // Capability traits for platform surfaces
pub mod storage; // Key/value storage and its keys

#[cfg(test)]
mod encoding_test;

// Re-export error types and utilities for easier access
pub use error::{config_error, validation_error, Context, PontoError};

pub use encoding::{decode_base64url, encode_base64url, DecodeError};

// Re-export HTTP utilities for easier access
pub use http::{
    api::HttpPushApi,
    client::{create_client, HTTP_CLIENT},
};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_error, log_result};

pub use models::{
    ApiMessage, PushStatus, PushSubscription, PushSubscriptionRecord, ResubscribeRequest,
    SubscribeOptions, SubscribeRequest, SubscriptionKeys, TestResult, VapidKeyResponse,
};
pub use services::{ApiError, KeyValueStorage, PlatformError, PushApi, PushManager};
pub use storage::{MemoryStorage, StorageError};

// This crate provides the pieces shared by the service worker and the page client:
// models, capability traits, error handling, logging and the push server API client.
