// --- File: crates/ponto_common/src/models.rs ---

// Data structures shared by the service worker, the page client and the
// push server API. Field names on the wire follow the existing server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::encoding::{decode_base64url, DecodeError};

/// Key material of a push subscription, as unpadded base64url text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    /// Client public key (P-256 point)
    pub p256dh: String,

    /// Authentication secret
    pub auth: String,
}

/// A browser-issued push subscription.
///
/// Serializes to the same shape as `PushSubscription.toJSON()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushSubscription {
    /// The push service URL messages are delivered to
    pub endpoint: String,

    /// Expiry in milliseconds since the epoch, when the push service sets one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<i64>,

    pub keys: SubscriptionKeys,
}

impl PushSubscription {
    /// Decoded `p256dh` public key bytes.
    pub fn p256dh_bytes(&self) -> Result<Vec<u8>, DecodeError> {
        decode_base64url(&self.keys.p256dh)
    }

    /// Decoded `auth` secret bytes.
    pub fn auth_bytes(&self) -> Result<Vec<u8>, DecodeError> {
        decode_base64url(&self.keys.auth)
    }
}

/// Options passed to the platform subscribe operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscribeOptions {
    /// Always true: every push must show a notification
    pub user_visible_only: bool,

    /// Decoded VAPID public key
    pub application_server_key: Vec<u8>,
}

impl SubscribeOptions {
    /// Builds user-visible subscribe options from a base64url VAPID public key.
    pub fn from_vapid_key(public_key: &str) -> Result<Self, DecodeError> {
        Ok(Self {
            user_visible_only: true,
            application_server_key: decode_base64url(public_key)?,
        })
    }
}

/// The persisted push subscription record.
///
/// This is what the page keeps in local storage after a successful subscribe,
/// and the shape handed to listeners of the subscribed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushSubscriptionRecord {
    /// The user that owns this subscription
    #[serde(rename = "usuario")]
    pub user_id: String,

    pub endpoint: String,

    pub p256dh: String,

    pub auth: String,

    /// The timestamp when this subscription was created
    pub created_at: DateTime<Utc>,
}

impl PushSubscriptionRecord {
    /// Create a new record for `user_id`, stamped with the current time.
    pub fn new(user_id: impl Into<String>, subscription: &PushSubscription) -> Self {
        Self {
            user_id: user_id.into(),
            endpoint: subscription.endpoint.clone(),
            p256dh: subscription.keys.p256dh.clone(),
            auth: subscription.keys.auth.clone(),
            created_at: Utc::now(),
        }
    }
}

// --- Push server API payloads ---

/// Response of `GET /api/push/vapid-key`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VapidKeyResponse {
    #[serde(default)]
    pub success: bool,

    /// Older deployments answer with `publicKey`
    #[serde(default, rename = "vapidKey", alias = "publicKey")]
    pub vapid_key: Option<String>,

    #[serde(default)]
    pub configured: bool,
}

/// Body of `POST /api/push/subscribe`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    #[serde(rename = "usuario")]
    pub user_id: String,

    pub subscription: PushSubscription,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_info: Option<String>,
}

/// Body sent by the worker after the platform replaced a subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResubscribeRequest {
    pub subscription: PushSubscription,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_endpoint: Option<String>,
}

/// Generic `{success, message, error}` answer of the push server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response of `POST /api/push/test`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    #[serde(default)]
    pub success: bool,

    /// Number of notifications delivered
    #[serde(default, rename = "enviados")]
    pub sent: u32,

    #[serde(default)]
    pub total: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response of `GET /api/push/status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushStatus {
    #[serde(default)]
    pub configured: bool,

    #[serde(default)]
    pub ready: bool,

    #[serde(default)]
    pub vapid_key_set: bool,
}
