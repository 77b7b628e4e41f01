use ponto_common::{ApiError, PlatformError, StorageError};
use thiserror::Error;

use crate::platform::Permission;

/// Why a client operation failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PushFailure {
    #[error("Push notifications are not supported in this browser")]
    Unsupported,

    #[error("Service worker registration failed: {0}")]
    RegistrationFailed(String),

    /// The permission ended up in a state other than granted
    #[error("Notification permission not granted ({0})")]
    PermissionDenied(Permission),

    #[error("VAPID public key not configured")]
    MissingPublicKey,

    #[error("Invalid VAPID public key: {0}")]
    InvalidPublicKey(String),

    /// The platform push manager failed
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("Server rejected the request ({status}): {message}")]
    ServerRejected { status: u16, message: String },

    #[error("Push server unavailable: {0}")]
    ServerUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<ApiError> for PushFailure {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Rejected { status, message } => {
                PushFailure::ServerRejected { status, message }
            }
            other => PushFailure::ServerUnavailable(other.to_string()),
        }
    }
}

impl From<StorageError> for PushFailure {
    fn from(err: StorageError) -> Self {
        PushFailure::Storage(err.to_string())
    }
}
