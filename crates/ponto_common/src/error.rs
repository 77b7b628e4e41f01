use std::fmt;
use thiserror::Error;

use crate::encoding::DecodeError;
use crate::services::{ApiError, PlatformError};
use crate::storage::StorageError;

/// The base error type for all Ponto errors.
///
/// This enum provides a common set of error variants that can be used across all crates.
/// The crate-specific errors convert into it through the `From` impls below.
#[derive(Error, Debug)]
pub enum PontoError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred while reading or writing client-side storage
    #[error("Storage error: {0}")]
    StorageError(String),

    /// A platform capability (cache, push manager, notifications) failed
    #[error("Platform error: {0}")]
    PlatformError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, PontoError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, PontoError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, PontoError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| PontoError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, PontoError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| PontoError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Common error conversions
impl From<reqwest::Error> for PontoError {
    fn from(err: reqwest::Error) -> Self {
        PontoError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for PontoError {
    fn from(err: serde_json::Error) -> Self {
        PontoError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for PontoError {
    fn from(err: std::io::Error) -> Self {
        PontoError::InternalError(err.to_string())
    }
}

impl From<config::ConfigError> for PontoError {
    fn from(err: config::ConfigError) -> Self {
        PontoError::ConfigError(err.to_string())
    }
}

impl From<DecodeError> for PontoError {
    fn from(err: DecodeError) -> Self {
        PontoError::ParseError(err.to_string())
    }
}

impl From<StorageError> for PontoError {
    fn from(err: StorageError) -> Self {
        PontoError::StorageError(err.to_string())
    }
}

impl From<PlatformError> for PontoError {
    fn from(err: PlatformError) -> Self {
        PontoError::PlatformError(err.to_string())
    }
}

impl From<ApiError> for PontoError {
    fn from(err: ApiError) -> Self {
        PontoError::ExternalServiceError {
            service_name: "push-api".to_string(),
            message: err.to_string(),
        }
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> PontoError {
    PontoError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> PontoError {
    PontoError::ValidationError(message.to_string())
}
