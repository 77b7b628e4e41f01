//! Install, activate and page message handling.

use ponto_common::storage::VAPID_KEY;
use ponto_common::{log_error, log_result};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::models::{cache_key, Request, Response};
use crate::worker::{ServiceWorker, WorkerError};

/// Messages a page can post to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerMessage {
    /// Activate a waiting worker now
    SkipWaiting,
    /// Remember the VAPID public key for later re-subscriptions
    SetVapidKey { key: String },
    /// Ask for the worker version
    GetVersion,
    #[serde(other)]
    Unknown,
}

impl ServiceWorker {
    /// Handles the `install` event.
    ///
    /// Fetches every pre-cache URL first and stores them only if all answered
    /// 200, so a failed install leaves the cache untouched. On success the
    /// worker skips waiting. Returns the number of cached entries.
    pub async fn on_install(&self) -> Result<usize, WorkerError> {
        info!(version = %self.version(), "Installing service worker");
        log_result(
            self.precache().await,
            "Static resources cached",
            "Pre-cache failed",
        )?;

        self.caps.lifecycle.skip_waiting().await?;
        Ok(self.config.precache.len())
    }

    async fn precache(&self) -> Result<(), WorkerError> {
        let mut fetched: Vec<(String, Response)> = Vec::with_capacity(self.config.precache.len());

        for path in &self.config.precache {
            let url = self.resolve(path)?;
            let response = self
                .caps
                .network
                .fetch(&Request::get(url.clone()))
                .await
                .map_err(|e| WorkerError::Precache {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;

            if response.status != http::StatusCode::OK {
                return Err(WorkerError::Precache {
                    url: url.to_string(),
                    reason: format!("status {}", response.status),
                });
            }
            fetched.push((cache_key(&url), response));
        }

        for (key, response) in &fetched {
            self.caps
                .caches
                .put(&self.config.cache_name, key, response)
                .await?;
        }
        Ok(())
    }

    /// Handles the `activate` event: drops every other cache, then claims
    /// open pages. Returns the names of the deleted caches.
    pub async fn on_activate(&self) -> Result<Vec<String>, WorkerError> {
        info!(version = %self.version(), "Activating service worker");

        let mut deleted = Vec::new();
        for name in self.caps.caches.keys().await? {
            if name == self.config.cache_name {
                continue;
            }
            info!(cache = %name, "Removing old cache");
            if self.caps.caches.delete(&name).await? {
                deleted.push(name);
            }
        }

        self.caps.clients.claim().await?;
        Ok(deleted)
    }

    /// Handles a `message` event. Returns the reply to post back, if any.
    pub async fn on_message(&self, message: &Value) -> Option<Value> {
        let message = match WorkerMessage::deserialize(message) {
            Ok(message) => message,
            Err(e) => {
                debug!(error = %e, "Ignoring malformed message");
                return None;
            }
        };
        debug!(?message, "Message received");

        match message {
            WorkerMessage::SkipWaiting => {
                if let Err(e) = self.caps.lifecycle.skip_waiting().await {
                    log_error(e, "skipWaiting failed");
                }
                None
            }
            WorkerMessage::SetVapidKey { key } => {
                match self.caps.storage.set_item(VAPID_KEY, &key) {
                    Ok(()) => info!("VAPID key stored"),
                    Err(e) => log_error(e, "Failed to store VAPID key"),
                }
                None
            }
            WorkerMessage::GetVersion => Some(json!({ "version": self.version() })),
            WorkerMessage::Unknown => {
                warn!("Ignoring unknown message type");
                None
            }
        }
    }
}
