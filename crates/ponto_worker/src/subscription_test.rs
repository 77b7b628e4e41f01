#[cfg(test)]
mod tests {
    use ponto_common::storage::VAPID_KEY;
    use ponto_common::KeyValueStorage;
    use std::sync::atomic::Ordering;

    use crate::test_support::{subscription, Harness};
    use crate::worker::WorkerError;

    const KEY: &str = "BEl62iUYgUivxIkv69yViEuiBIa-Ib9-SkvMeAtA3LFgDzkrxZJjSgSnfckjBJuBkr3qBUYIHBQFLXYp5Nksh8U";

    #[tokio::test]
    async fn test_subscription_change_resubscribes_and_reports_old_endpoint() {
        let h = Harness::new();
        h.storage.set_item(VAPID_KEY, KEY).unwrap();
        let old = subscription("https://push.example.com/send/expired");

        let renewed = h.worker.on_subscription_change(Some(&old)).await.unwrap();

        assert_eq!(renewed.endpoint, "https://push.example.com/send/renewed");
        let options = h.push_manager.subscribed_with.lock().unwrap();
        assert_eq!(options.len(), 1);
        assert!(options[0].user_visible_only);
        assert_eq!(options[0].application_server_key.len(), 65);

        let sent = h.api.resubscribed.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].old_endpoint.as_deref(),
            Some("https://push.example.com/send/expired")
        );
        assert_eq!(sent[0].subscription, renewed);
    }

    #[tokio::test]
    async fn test_subscription_change_without_key_fails_without_subscribing() {
        let h = Harness::new();

        let err = h.worker.on_subscription_change(None).await.unwrap_err();

        assert!(matches!(err, WorkerError::MissingVapidKey));
        assert!(h.push_manager.subscribed_with.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_subscription_change_is_not_retried_on_server_error() {
        let h = Harness::new();
        h.storage.set_item(VAPID_KEY, KEY).unwrap();
        h.api.reject.store(true, Ordering::SeqCst);

        let err = h.worker.on_subscription_change(None).await.unwrap_err();

        assert!(matches!(err, WorkerError::Api(_)));
        assert_eq!(h.push_manager.subscribed_with.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sync_only_handles_background_sync_tag() {
        let h = Harness::new();

        assert!(!h.worker.on_sync("other-tag").await.unwrap());
        assert_eq!(h.api.syncs.load(Ordering::SeqCst), 0);

        assert!(h.worker.on_sync("background-sync").await.unwrap());
        assert_eq!(h.api.syncs.load(Ordering::SeqCst), 1);
    }
}
