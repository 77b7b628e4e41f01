//! Fakes and mocks for the client tests.

use async_trait::async_trait;
use mockall::mock;
use ponto_common::{
    ApiError, ApiMessage, KeyValueStorage, MemoryStorage, PlatformError, PushApi, PushManager, PushStatus,
    PushSubscription, ResubscribeRequest, StorageError, SubscribeOptions, SubscribeRequest,
    SubscriptionKeys, TestResult, VapidKeyResponse,
};
use ponto_config::PushConfig;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::client::{ClientCapabilities, PushClient};
use crate::events::{ClientEvent, EventSink};
use crate::platform::{
    NotificationPermissions, Permission, PlatformSupport, Registration, ServiceWorkerContainer,
};

pub const VAPID: &str =
    "BEl62iUYgUivxIkv69yViEuiBIa-Ib9-SkvMeAtA3LFgDzkrxZJjSgSnfckjBJuBkr3qBUYIHBQFLXYp5Nksh8U";

mock! {
    pub Api {}

    #[async_trait]
    impl PushApi for Api {
        async fn vapid_key(&self) -> Result<VapidKeyResponse, ApiError>;
        async fn subscribe(&self, request: &SubscribeRequest) -> Result<ApiMessage, ApiError>;
        async fn resubscribe(&self, request: &ResubscribeRequest) -> Result<ApiMessage, ApiError>;
        async fn unsubscribe(&self, endpoint: &str) -> Result<ApiMessage, ApiError>;
        async fn send_test(&self, user_id: &str) -> Result<TestResult, ApiError>;
        async fn status(&self, user_id: &str) -> Result<PushStatus, ApiError>;
        async fn sync_offline_data(&self) -> Result<(), ApiError>;
    }
}

pub fn subscription(endpoint: &str) -> PushSubscription {
    PushSubscription {
        endpoint: endpoint.to_string(),
        expiration_time: None,
        keys: SubscriptionKeys {
            p256dh: "BPk".to_string(),
            auth: "FgQ".to_string(),
        },
    }
}

/// Push manager holding at most one subscription.
#[derive(Default)]
pub struct FakePushManager {
    pub current: Mutex<Option<PushSubscription>>,
    pub subscribe_calls: AtomicUsize,
    pub unsubscribe_calls: AtomicUsize,
}

#[async_trait]
impl PushManager for FakePushManager {
    async fn get_subscription(&self) -> Result<Option<PushSubscription>, PlatformError> {
        Ok(self.current.lock().unwrap().clone())
    }

    async fn subscribe(
        &self,
        options: &SubscribeOptions,
    ) -> Result<PushSubscription, PlatformError> {
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        if options.application_server_key.len() != 65 {
            return Err(PlatformError::Push("invalid applicationServerKey".to_string()));
        }
        let created = subscription("https://fcm.googleapis.com/fcm/send/abc123");
        *self.current.lock().unwrap() = Some(created.clone());
        Ok(created)
    }

    async fn unsubscribe(&self, _subscription: &PushSubscription) -> Result<bool, PlatformError> {
        self.unsubscribe_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.current.lock().unwrap().take().is_some())
    }
}

pub struct FakeContainer {
    pub push_manager: Arc<FakePushManager>,
    pub registrations: AtomicUsize,
}

#[async_trait]
impl ServiceWorkerContainer for FakeContainer {
    async fn register(
        &self,
        script_path: &str,
        scope: &str,
    ) -> Result<Registration, PlatformError> {
        self.registrations.fetch_add(1, Ordering::SeqCst);
        if script_path != "/static/sw.js" {
            return Err(PlatformError::Registration(format!("404 for {script_path}")));
        }
        Ok(Registration {
            scope: format!("https://ponto.example.com{scope}"),
            push_manager: self.push_manager.clone(),
        })
    }
}

/// Permission state that a prompt moves to `answer`.
pub struct FakePermissions {
    pub state: Mutex<Permission>,
    pub answer: Mutex<Permission>,
    pub prompts: AtomicUsize,
}

impl FakePermissions {
    pub fn new(state: Permission, answer: Permission) -> Self {
        Self {
            state: Mutex::new(state),
            answer: Mutex::new(answer),
            prompts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl NotificationPermissions for FakePermissions {
    fn current(&self) -> Permission {
        *self.state.lock().unwrap()
    }

    async fn request(&self) -> Result<Permission, PlatformError> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        let answer = *self.answer.lock().unwrap();
        *self.state.lock().unwrap() = answer;
        Ok(answer)
    }
}

/// Storage that reads as empty and refuses every write, like a full quota.
pub struct FullStorage;

impl KeyValueStorage for FullStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("QuotaExceededError".to_string()))
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("QuotaExceededError".to_string()))
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<ClientEvent>>,
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &ClientEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// A client wired to fakes, with handles on them.
pub struct Harness {
    pub client: PushClient,
    pub push_manager: Arc<FakePushManager>,
    pub container: Arc<FakeContainer>,
    pub permissions: Arc<FakePermissions>,
    pub storage: Arc<MemoryStorage>,
    pub events: Arc<RecordingSink>,
}

impl Harness {
    pub fn new(api: MockApi) -> Self {
        Self::build(api, PushConfig::default(), PlatformSupport::full(), Permission::Granted)
    }

    pub fn build(
        api: MockApi,
        config: PushConfig,
        support: PlatformSupport,
        permission: Permission,
    ) -> Self {
        let push_manager = Arc::new(FakePushManager::default());
        let container = Arc::new(FakeContainer {
            push_manager: push_manager.clone(),
            registrations: AtomicUsize::new(0),
        });
        let permissions = Arc::new(FakePermissions::new(permission, Permission::Granted));
        let storage = Arc::new(MemoryStorage::new());
        let events = Arc::new(RecordingSink::default());

        let caps = ClientCapabilities {
            support,
            container: container.clone(),
            permissions: permissions.clone(),
            storage: storage.clone(),
            api: Arc::new(api),
        };
        let client = PushClient::new(config, caps).with_events(events.clone());

        Self {
            client,
            push_manager,
            container,
            permissions,
            storage,
            events,
        }
    }
}

pub fn config_with_key() -> PushConfig {
    PushConfig {
        vapid_public_key: Some(VAPID.to_string()),
        ..PushConfig::default()
    }
}
