//! Push event handling: payload parsing and notification display.

use chrono::Utc;
use ponto_common::log_error;
use ponto_config::NotificationConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::worker::ServiceWorker;

/// A button shown on a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Options handed to `showNotification`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationOptions {
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub tag: String,
    pub require_interaction: bool,
    pub vibrate: Vec<u32>,
    /// Free-form data; carries `url` and `timestamp` for pushed messages
    pub data: Value,
    pub actions: Vec<NotificationAction>,
}

/// A notification ready to be shown.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub options: NotificationOptions,
}

impl Notification {
    /// Page to open when the notification is clicked.
    pub fn target_url(&self) -> &str {
        self.options
            .data
            .get("url")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .unwrap_or("/")
    }
}

/// JSON body of a push message. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PushPayload {
    title: Option<String>,
    body: Option<String>,
    message: Option<String>,
    icon: Option<String>,
    badge: Option<String>,
    tag: Option<String>,
    require_interaction: Option<bool>,
    data: Option<Value>,
    actions: Option<Vec<NotificationAction>>,
    url: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn default_actions(icon: &str) -> Vec<NotificationAction> {
    vec![
        NotificationAction {
            action: "open".to_string(),
            title: "📱 Abrir App".to_string(),
            icon: Some(icon.to_string()),
        },
        NotificationAction {
            action: "dismiss".to_string(),
            title: "❌ Dispensar".to_string(),
            icon: Some(icon.to_string()),
        },
    ]
}

/// Builds the notification for a push message.
///
/// A JSON payload overrides the defaults field by field (`body` falls back to
/// `message`, `null` counts as missing) and gets `data.timestamp` and
/// `data.url` stamped in. JSON that is not an object keeps the defaults.
/// Anything that is not JSON is shown as plain body text. `now_ms` is the receive time in
/// milliseconds since the epoch.
pub fn build_notification(
    payload: Option<&[u8]>,
    defaults: &NotificationConfig,
    now_ms: i64,
) -> Notification {
    let mut title = defaults.title.clone();
    let mut options = NotificationOptions {
        body: defaults.body.clone(),
        icon: defaults.icon.clone(),
        badge: defaults.badge.clone(),
        tag: defaults.tag.clone(),
        require_interaction: false,
        vibrate: defaults.vibrate.clone(),
        data: Value::Object(Map::new()),
        actions: Vec::new(),
    };

    match payload.filter(|bytes| !bytes.is_empty()) {
        None => {}
        Some(bytes) => match serde_json::from_slice::<Value>(bytes) {
            Ok(value) => {
                let payload = serde_json::from_value::<PushPayload>(value).unwrap_or_else(|e| {
                    debug!(error = %e, "Push payload has no usable fields");
                    PushPayload::default()
                });
                debug!(?payload, "Push payload parsed");
                if let Some(t) = non_empty(payload.title) {
                    title = t;
                }
                if let Some(body) = non_empty(payload.body).or(non_empty(payload.message)) {
                    options.body = body;
                }
                if let Some(icon) = non_empty(payload.icon) {
                    options.icon = icon;
                }
                if let Some(badge) = non_empty(payload.badge) {
                    options.badge = badge;
                }
                if let Some(tag) = non_empty(payload.tag) {
                    options.tag = tag;
                }
                options.require_interaction = payload.require_interaction.unwrap_or_default();
                options.actions = payload.actions.unwrap_or_default();

                let mut data = match payload.data {
                    Some(Value::Object(map)) => map,
                    _ => Map::new(),
                };
                data.insert("timestamp".to_string(), Value::from(now_ms));
                data.insert(
                    "url".to_string(),
                    Value::from(non_empty(payload.url).unwrap_or_else(|| "/".to_string())),
                );
                options.data = Value::Object(data);
            }
            Err(_) => {
                options.body = String::from_utf8_lossy(bytes).into_owned();
                debug!(body = %options.body, "Push payload used as text");
            }
        },
    }

    if options.actions.is_empty() {
        options.actions = default_actions(&defaults.icon);
    }

    Notification { title, options }
}

impl ServiceWorker {
    /// Handles a `push` event by showing a notification.
    ///
    /// Display failures are logged; the event always completes. Returns the
    /// notification that was (or would have been) shown.
    pub async fn on_push(&self, payload: Option<&[u8]>) -> Notification {
        let notification = build_notification(
            payload,
            &self.notification_defaults,
            Utc::now().timestamp_millis(),
        );

        match self
            .caps
            .notifications
            .show(&notification.title, &notification.options)
            .await
        {
            Ok(()) => info!(title = %notification.title, "Notification shown"),
            Err(e) => log_error(e, "Failed to show notification"),
        }

        notification
    }
}
