//! `pushsubscriptionchange` and background `sync` handling.

use ponto_common::storage::VAPID_KEY;
use ponto_common::{log_result, PushSubscription, ResubscribeRequest, SubscribeOptions};
use tracing::{debug, info};

use crate::worker::{ServiceWorker, WorkerError};

impl ServiceWorker {
    /// Handles `pushsubscriptionchange`.
    ///
    /// Subscribes again with the VAPID key kept in worker storage and reports
    /// the new subscription to the server together with the old endpoint.
    /// One attempt only; failures are logged and returned.
    pub async fn on_subscription_change(
        &self,
        old: Option<&PushSubscription>,
    ) -> Result<PushSubscription, WorkerError> {
        info!("Push subscription changed, subscribing again");
        log_result(
            self.resubscribe(old).await,
            "Subscription renewed",
            "Failed to renew subscription",
        )
    }

    async fn resubscribe(
        &self,
        old: Option<&PushSubscription>,
    ) -> Result<PushSubscription, WorkerError> {
        let key = self
            .caps
            .storage
            .get_item(VAPID_KEY)?
            .filter(|key| !key.is_empty())
            .ok_or(WorkerError::MissingVapidKey)?;

        let options = SubscribeOptions::from_vapid_key(&key)?;
        let subscription = self.caps.push_manager.subscribe(&options).await?;
        debug!(endpoint = %subscription.endpoint, "New subscription");

        let request = ResubscribeRequest {
            subscription: subscription.clone(),
            old_endpoint: old.map(|s| s.endpoint.clone()),
        };
        self.caps.api.resubscribe(&request).await?;
        Ok(subscription)
    }

    /// Handles a background `sync` event. Returns whether the tag was ours.
    pub async fn on_sync(&self, tag: &str) -> Result<bool, WorkerError> {
        if tag != self.config.sync_tag {
            debug!(tag, "Ignoring sync tag");
            return Ok(false);
        }

        log_result(
            self.caps.api.sync_offline_data().await,
            "Offline data synced",
            "Background sync failed",
        )?;
        Ok(true)
    }
}
