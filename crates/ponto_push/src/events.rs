//! Events the client publishes for UI code.

use ponto_common::{PushStatus, PushSubscriptionRecord};
use serde::Serialize;

/// A client event. Serializes as `{event, detail}` using the page event names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "detail")]
pub enum ClientEvent {
    #[serde(rename = "pushReady")]
    Ready { supported: bool },

    #[serde(rename = "pushSubscribed")]
    Subscribed(PushSubscriptionRecord),

    #[serde(rename = "pushUnsubscribed")]
    Unsubscribed,

    #[serde(rename = "pushStatusUpdate", rename_all = "camelCase")]
    StatusUpdate {
        usuario: String,
        status: Option<PushStatus>,
        is_supported: bool,
        is_subscribed: bool,
    },
}

/// Receives client events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &ClientEvent);
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: &ClientEvent) {}
}
