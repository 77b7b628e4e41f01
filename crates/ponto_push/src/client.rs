//! The page push client.
//!
//! `PushClient` drives the worker registration and push subscription
//! lifecycle: unregistered, registered, permission pending, subscribed and
//! unsubscribed. It holds only configuration and capabilities; the
//! per-page state lives in the [`PushSession`] passed to each operation.

use ponto_common::storage::{self, SUBSCRIPTION_KEY, USER_KEY, VAPID_KEY};
use ponto_common::{
    log_error, ApiError, KeyValueStorage, PushApi, PushStatus, PushSubscriptionRecord,
    SubscribeOptions, SubscribeRequest, TestResult,
};
use ponto_config::PushConfig;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::PushFailure;
use crate::events::{ClientEvent, EventSink, NoopSink};
use crate::platform::{NotificationPermissions, Permission, PlatformSupport, ServiceWorkerContainer};
use crate::report::PushOutcome;
use crate::session::{PushSession, SessionSnapshot};

/// Everything the client needs from the page.
#[derive(Clone)]
pub struct ClientCapabilities {
    pub support: PlatformSupport,
    pub container: Arc<dyn ServiceWorkerContainer>,
    pub permissions: Arc<dyn NotificationPermissions>,
    pub storage: Arc<dyn KeyValueStorage>,
    pub api: Arc<dyn PushApi>,
}

/// Browser details sent along with a new subscription.
#[derive(Debug, Clone, Default)]
pub struct DeviceInfo {
    pub user_agent: Option<String>,
    pub platform: Option<String>,
}

pub struct PushClient {
    config: PushConfig,
    caps: ClientCapabilities,
    device: DeviceInfo,
    events: Arc<dyn EventSink>,
}

impl PushClient {
    pub fn new(config: PushConfig, caps: ClientCapabilities) -> Self {
        Self {
            config,
            caps,
            device: DeviceInfo::default(),
            events: Arc::new(NoopSink),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn with_device(mut self, device: DeviceInfo) -> Self {
        self.device = device;
        self
    }

    pub fn config(&self) -> &PushConfig {
        &self.config
    }

    /// Records whether service workers, push and notifications all exist.
    pub fn check_support(&self, session: &mut PushSession) -> bool {
        session.is_supported = self.caps.support.is_supported();
        if !session.is_supported {
            warn!(support = ?self.caps.support, "Push notifications are not supported");
        }
        session.is_supported
    }

    /// Page start-up: registers the worker when possible and announces
    /// readiness.
    pub async fn start(&self, session: &mut PushSession) {
        let supported = self.check_support(session);
        if supported {
            if let Err(e) = self.register_worker(session).await {
                log_error(e, "Service worker registration failed at start-up");
            }
        }
        session.ready = true;
        self.events.emit(&ClientEvent::Ready { supported });
        info!(supported, "Push client ready");
    }

    /// Registers the service worker. Calling it again reuses the registration.
    ///
    /// An existing platform subscription is restored into the session along
    /// with the user saved in storage.
    pub async fn register_worker(&self, session: &mut PushSession) -> Result<(), PushFailure> {
        if !self.check_support(session) {
            return Err(PushFailure::Unsupported);
        }
        if session.registration.is_some() {
            debug!("Service worker already registered");
            return Ok(());
        }

        info!(path = %self.config.sw_path, "Registering service worker");
        let registration = self
            .caps
            .container
            .register(&self.config.sw_path, &self.config.sw_scope)
            .await
            .map_err(|e| PushFailure::RegistrationFailed(e.to_string()))?;
        info!(scope = %registration.scope, "Service worker registered");

        match registration.push_manager.get_subscription().await {
            Ok(Some(existing)) => {
                info!(endpoint = %existing.endpoint, "Existing subscription found");
                session.subscription = Some(existing);
                session.is_subscribed = true;
                match self.caps.storage.get_item(USER_KEY) {
                    Ok(Some(user)) => session.current_user = Some(user),
                    Ok(None) => {}
                    Err(e) => log_error(e, "Failed to read saved user"),
                }
            }
            Ok(None) => {}
            Err(e) => log_error(e, "Failed to read existing subscription"),
        }

        session.registration = Some(registration);
        Ok(())
    }

    /// The VAPID public key.
    ///
    /// Looked up in the session, the configuration, storage, and finally the
    /// server. A key fetched from the server is saved to storage.
    pub async fn public_key(&self, session: &mut PushSession) -> Option<String> {
        if let Some(key) = session.public_key.clone() {
            return Some(key);
        }

        let key = match self.local_public_key() {
            Some(key) => Some(key),
            None => self.remote_public_key().await,
        };
        session.public_key = key.clone();
        key
    }

    fn local_public_key(&self) -> Option<String> {
        if let Some(key) = self.config.vapid_public_key.clone().filter(|k| !k.is_empty()) {
            debug!("VAPID key taken from configuration");
            return Some(key);
        }
        match self.caps.storage.get_item(VAPID_KEY) {
            Ok(key) => key.filter(|k| !k.is_empty()),
            Err(e) => {
                log_error(e, "Failed to read saved VAPID key");
                None
            }
        }
    }

    async fn remote_public_key(&self) -> Option<String> {
        match self.caps.api.vapid_key().await {
            Ok(answer) => {
                let key = answer.vapid_key.filter(|k| !k.is_empty())?;
                if let Err(e) = self.caps.storage.set_item(VAPID_KEY, &key) {
                    log_error(e, "Failed to save VAPID key");
                }
                info!("VAPID key obtained from server");
                Some(key)
            }
            Err(e) => {
                log_error(e, "Failed to fetch VAPID key");
                None
            }
        }
    }

    /// Asks the user for notification permission. A failed prompt counts as
    /// denied.
    pub async fn request_permission(&self, session: &mut PushSession) -> Permission {
        if !self.check_support(session) {
            return Permission::Unsupported;
        }
        match self.caps.permissions.request().await {
            Ok(permission) => {
                info!(%permission, "Notification permission");
                permission
            }
            Err(e) => {
                log_error(e, "Permission request failed");
                Permission::Denied
            }
        }
    }

    /// Subscribes `user` to push.
    ///
    /// Fails with `MissingPublicKey` before touching the push manager when no
    /// VAPID key can be found. On success the record is stored locally and
    /// then sent to the server; a server rejection fails the operation but
    /// keeps the local record. Storage failures are logged only.
    pub async fn subscribe(
        &self,
        session: &mut PushSession,
        user: &str,
    ) -> Result<PushOutcome, PushFailure> {
        self.register_worker(session).await?;
        let registration = session
            .registration
            .clone()
            .ok_or_else(|| PushFailure::RegistrationFailed("no registration".to_string()))?;

        let public_key = self
            .public_key(session)
            .await
            .ok_or(PushFailure::MissingPublicKey)?;

        let permission = match self.caps.permissions.current() {
            Permission::Granted => Permission::Granted,
            _ => self.request_permission(session).await,
        };
        if permission != Permission::Granted {
            return Err(PushFailure::PermissionDenied(permission));
        }

        let options = SubscribeOptions::from_vapid_key(&public_key)
            .map_err(|e| PushFailure::InvalidPublicKey(e.to_string()))?;

        info!(user, "Creating push subscription");
        let subscription = registration.push_manager.subscribe(&options).await?;
        info!(endpoint = %subscription.endpoint, "Subscription created");

        session.subscription = Some(subscription.clone());
        session.is_subscribed = true;
        session.current_user = Some(user.to_string());

        let record = PushSubscriptionRecord::new(user, &subscription);
        if let Err(e) = self.caps.storage.set_item(USER_KEY, user) {
            log_error(e, "Failed to store push user");
        }
        if let Err(e) = storage::save_json(self.caps.storage.as_ref(), SUBSCRIPTION_KEY, &record) {
            log_error(e, "Failed to store subscription record");
        }

        let request = SubscribeRequest {
            user_id: user.to_string(),
            subscription,
            user_agent: self.device.user_agent.clone(),
            device_info: self.device.platform.clone(),
        };
        match self.caps.api.subscribe(&request).await {
            Ok(_) => info!("Subscription saved on the server"),
            Err(e @ ApiError::Rejected { .. }) => {
                error!(error = %e, "Server rejected the subscription");
                return Err(e.into());
            }
            Err(e) if self.config.require_server_ack => {
                error!(error = %e, "Could not reach the push server");
                return Err(e.into());
            }
            Err(e) => warn!(error = %e, "Push server unavailable, subscription kept locally"),
        }

        self.events.emit(&ClientEvent::Subscribed(record.clone()));
        Ok(PushOutcome::Subscribed(record))
    }

    /// Removes the current subscription: server first, then the platform,
    /// then local state.
    ///
    /// With no active subscription this succeeds without side effects. A 404
    /// means the server never had the endpoint and removal goes on; any other
    /// server failure leaves local state unchanged.
    pub async fn unsubscribe(&self, session: &mut PushSession) -> Result<PushOutcome, PushFailure> {
        let Some(subscription) = session.subscription.clone() else {
            warn!("No active subscription");
            return Ok(PushOutcome::NotSubscribed);
        };

        match self.caps.api.unsubscribe(&subscription.endpoint).await {
            Ok(_) => {}
            Err(ApiError::Rejected { status: 404, .. }) => {
                warn!(endpoint = %subscription.endpoint, "Endpoint unknown to the server");
            }
            Err(e) => return Err(e.into()),
        }

        if let Some(registration) = &session.registration {
            registration.push_manager.unsubscribe(&subscription).await?;
        }

        session.clear_subscription();
        for key in [SUBSCRIPTION_KEY, USER_KEY] {
            if let Err(e) = self.caps.storage.remove_item(key) {
                log_error(e, "Failed to clear stored subscription");
            }
        }

        info!(endpoint = %subscription.endpoint, "Subscription removed");
        self.events.emit(&ClientEvent::Unsubscribed);
        Ok(PushOutcome::Unsubscribed)
    }

    /// Full enablement flow for `user`.
    pub async fn initialize(
        &self,
        session: &mut PushSession,
        user: &str,
    ) -> Result<PushOutcome, PushFailure> {
        info!(user, "Initializing push");
        if !self.check_support(session) {
            return Err(PushFailure::Unsupported);
        }
        self.register_worker(session).await?;

        let current = self.caps.permissions.current();
        if current == Permission::Denied {
            return Err(PushFailure::PermissionDenied(current));
        }

        if session.is_subscribed {
            info!("User already subscribed");
            return Ok(PushOutcome::AlreadySubscribed);
        }

        if current == Permission::Default {
            let permission = self.request_permission(session).await;
            if permission != Permission::Granted {
                return Err(PushFailure::PermissionDenied(permission));
            }
        }

        self.subscribe(session, user).await
    }

    /// Asks the server to push a test notification to every device of `user`.
    pub async fn send_test(&self, user: &str) -> Result<TestResult, PushFailure> {
        let result = self.caps.api.send_test(user).await?;
        info!(sent = result.sent, total = result.total, "Test notification sent");
        Ok(result)
    }

    /// Server-side push status of `user`.
    pub async fn status(&self, user: &str) -> Result<PushStatus, PushFailure> {
        Ok(self.caps.api.status(user).await?)
    }

    /// Fetches the status and publishes it as a `StatusUpdate` event.
    /// The event is sent even when the server could not be reached.
    pub async fn refresh_status(&self, session: &PushSession, user: &str) -> Option<PushStatus> {
        let status = match self.status(user).await {
            Ok(status) => Some(status),
            Err(e) => {
                log_error(e, "Failed to get push status");
                None
            }
        };
        self.events.emit(&ClientEvent::StatusUpdate {
            usuario: user.to_string(),
            status: status.clone(),
            is_supported: session.is_supported,
            is_subscribed: session.is_subscribed,
        });
        status
    }

    /// The subscription record stored on this device, if any.
    pub fn saved_subscription(&self) -> Option<PushSubscriptionRecord> {
        match storage::load_json(self.caps.storage.as_ref(), SUBSCRIPTION_KEY) {
            Ok(record) => record,
            Err(e) => {
                log_error(e, "Stored subscription is unreadable");
                None
            }
        }
    }

    pub fn snapshot(&self, session: &PushSession) -> SessionSnapshot {
        SessionSnapshot::from(session)
    }
}
