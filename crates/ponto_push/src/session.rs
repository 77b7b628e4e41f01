use ponto_common::PushSubscription;
use serde::Serialize;

use crate::platform::Registration;

/// Client state for one page.
///
/// Owned by the caller and passed `&mut` to every `PushClient` operation.
#[derive(Debug, Clone, Default)]
pub struct PushSession {
    pub registration: Option<Registration>,
    pub subscription: Option<PushSubscription>,
    /// Cached VAPID public key
    pub public_key: Option<String>,
    pub is_supported: bool,
    pub is_subscribed: bool,
    pub current_user: Option<String>,
    /// Set once the start-up registration attempt has finished
    pub ready: bool,
}

impl PushSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.subscription.as_ref().map(|s| s.endpoint.as_str())
    }

    pub(crate) fn clear_subscription(&mut self) {
        self.subscription = None;
        self.is_subscribed = false;
        self.current_user = None;
    }
}

/// Read-only, serializable view of a [`PushSession`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub is_supported: bool,
    pub is_subscribed: bool,
    pub is_registered: bool,
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl From<&PushSession> for SessionSnapshot {
    fn from(session: &PushSession) -> Self {
        Self {
            is_supported: session.is_supported,
            is_subscribed: session.is_subscribed,
            is_registered: session.registration.is_some(),
            ready: session.ready,
            current_user: session.current_user.clone(),
            endpoint: session.endpoint().map(str::to_string),
            scope: session.registration.as_ref().map(|r| r.scope.clone()),
        }
    }
}
