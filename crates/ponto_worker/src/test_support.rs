//! In-memory fakes of every worker capability.

use async_trait::async_trait;
use ponto_common::{
    ApiError, ApiMessage, MemoryStorage, PlatformError, PushApi, PushManager, PushStatus,
    PushSubscription, ResubscribeRequest, SubscribeOptions, SubscribeRequest, SubscriptionKeys,
    TestResult, VapidKeyResponse,
};
use ponto_config::{NotificationConfig, WorkerConfig};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::cache::MemoryCacheStorage;
use crate::models::{Request, Response};
use crate::platform::{Clients, Network, NotificationHost, WindowClient, WorkerLifecycle};
use crate::push::NotificationOptions;
use crate::worker::{ServiceWorker, WorkerCapabilities};

pub const ORIGIN: &str = "https://ponto.example.com";

pub fn url(path: &str) -> url::Url {
    url::Url::parse(ORIGIN)
        .and_then(|origin| origin.join(path))
        .expect("test url")
}

/// A network that answers from a route table, or is entirely offline.
#[derive(Default)]
pub struct FakeNetwork {
    routes: Mutex<HashMap<String, Response>>,
    offline: AtomicBool,
    calls: AtomicUsize,
}

impl FakeNetwork {
    pub fn route(&self, path: &str, response: Response) {
        self.routes
            .lock()
            .unwrap()
            .insert(url(path).to_string(), response);
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Network for FakeNetwork {
    async fn fetch(&self, request: &Request) -> Result<Response, PlatformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(PlatformError::Network("Failed to fetch".to_string()));
        }
        let routes = self.routes.lock().unwrap();
        Ok(routes
            .get(&request.cache_key())
            .cloned()
            .unwrap_or_else(|| Response::new(http::StatusCode::NOT_FOUND, "Not Found")))
    }
}

#[derive(Default)]
pub struct FakeClients {
    pub windows: Mutex<Vec<WindowClient>>,
    pub focused: Mutex<Vec<String>>,
    pub opened: Mutex<Vec<String>>,
    pub claimed: AtomicUsize,
    pub can_open: AtomicBool,
}

impl FakeClients {
    pub fn new() -> Self {
        let clients = Self::default();
        clients.can_open.store(true, Ordering::SeqCst);
        clients
    }

    pub fn add_window(&self, id: &str, url: &str) {
        self.windows.lock().unwrap().push(WindowClient {
            id: id.to_string(),
            url: url.to_string(),
            focusable: true,
        });
    }
}

#[async_trait]
impl Clients for FakeClients {
    async fn match_all_windows(
        &self,
        _include_uncontrolled: bool,
    ) -> Result<Vec<WindowClient>, PlatformError> {
        Ok(self.windows.lock().unwrap().clone())
    }

    async fn focus(&self, client_id: &str) -> Result<(), PlatformError> {
        self.focused.lock().unwrap().push(client_id.to_string());
        Ok(())
    }

    async fn open_window(&self, url: &str) -> Result<(), PlatformError> {
        if !self.can_open.load(Ordering::SeqCst) {
            return Err(PlatformError::NotSupported("openWindow".to_string()));
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn claim(&self) -> Result<(), PlatformError> {
        self.claimed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeNotifications {
    pub shown: Mutex<Vec<(String, NotificationOptions)>>,
    pub closed: Mutex<Vec<String>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl NotificationHost for FakeNotifications {
    async fn show(&self, title: &str, options: &NotificationOptions) -> Result<(), PlatformError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PlatformError::Notification("permission revoked".to_string()));
        }
        self.shown
            .lock()
            .unwrap()
            .push((title.to_string(), options.clone()));
        Ok(())
    }

    async fn close(&self, tag: &str) -> Result<(), PlatformError> {
        self.closed.lock().unwrap().push(tag.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeLifecycle {
    pub skipped: AtomicUsize,
}

#[async_trait]
impl WorkerLifecycle for FakeLifecycle {
    async fn skip_waiting(&self) -> Result<(), PlatformError> {
        self.skipped.fetch_add(1, Ordering::SeqCst);
        Ok(())
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

#[derive(Default)]
pub struct FakePushManager {
    pub subscribed_with: Mutex<Vec<SubscribeOptions>>,
}

#[async_trait]
impl PushManager for FakePushManager {
    async fn get_subscription(&self) -> Result<Option<PushSubscription>, PlatformError> {
        Ok(None)
    }

    async fn subscribe(
        &self,
        options: &SubscribeOptions,
    ) -> Result<PushSubscription, PlatformError> {
        self.subscribed_with.lock().unwrap().push(options.clone());
        Ok(subscription("https://push.example.com/send/renewed"))
    }

    async fn unsubscribe(&self, _subscription: &PushSubscription) -> Result<bool, PlatformError> {
        Ok(true)
    }
}

/// Records what the worker sends to the server.
#[derive(Default)]
pub struct RecordingApi {
    pub resubscribed: Mutex<Vec<ResubscribeRequest>>,
    pub syncs: AtomicUsize,
    pub reject: AtomicBool,
}

impl RecordingApi {
    fn outcome(&self) -> Result<(), ApiError> {
        if self.reject.load(Ordering::SeqCst) {
            return Err(ApiError::Rejected {
                status: 500,
                message: "Erro interno".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PushApi for RecordingApi {
    async fn vapid_key(&self) -> Result<VapidKeyResponse, ApiError> {
        Ok(VapidKeyResponse::default())
    }

    async fn subscribe(&self, _request: &SubscribeRequest) -> Result<ApiMessage, ApiError> {
        self.outcome().map(|_| ApiMessage::default())
    }

    async fn resubscribe(&self, request: &ResubscribeRequest) -> Result<ApiMessage, ApiError> {
        self.outcome()?;
        self.resubscribed.lock().unwrap().push(request.clone());
        Ok(ApiMessage {
            success: true,
            ..ApiMessage::default()
        })
    }

    async fn unsubscribe(&self, _endpoint: &str) -> Result<ApiMessage, ApiError> {
        self.outcome().map(|_| ApiMessage::default())
    }

    async fn send_test(&self, _user_id: &str) -> Result<TestResult, ApiError> {
        Ok(TestResult::default())
    }

    async fn status(&self, _user_id: &str) -> Result<PushStatus, ApiError> {
        Ok(PushStatus::default())
    }

    async fn sync_offline_data(&self) -> Result<(), ApiError> {
        self.outcome()?;
        self.syncs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A worker wired to fakes, with handles on every fake.
pub struct Harness {
    pub worker: ServiceWorker,
    pub caches: Arc<MemoryCacheStorage>,
    pub network: Arc<FakeNetwork>,
    pub clients: Arc<FakeClients>,
    pub notifications: Arc<FakeNotifications>,
    pub lifecycle: Arc<FakeLifecycle>,
    pub push_manager: Arc<FakePushManager>,
    pub storage: Arc<MemoryStorage>,
    pub api: Arc<RecordingApi>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(WorkerConfig {
            origin: ORIGIN.to_string(),
            ..WorkerConfig::default()
        })
    }

    pub fn with_config(config: WorkerConfig) -> Self {
        let caches = Arc::new(MemoryCacheStorage::new());
        let network = Arc::new(FakeNetwork::default());
        let clients = Arc::new(FakeClients::new());
        let notifications = Arc::new(FakeNotifications::default());
        let lifecycle = Arc::new(FakeLifecycle::default());
        let push_manager = Arc::new(FakePushManager::default());
        let storage = Arc::new(MemoryStorage::new());
        let api = Arc::new(RecordingApi::default());

        let caps = WorkerCapabilities {
            caches: caches.clone(),
            network: network.clone(),
            clients: clients.clone(),
            notifications: notifications.clone(),
            lifecycle: lifecycle.clone(),
            push_manager: push_manager.clone(),
            storage: storage.clone(),
            api: api.clone(),
        };
        let worker =
            ServiceWorker::new(config, NotificationConfig::default(), caps).expect("worker");

        Self {
            worker,
            caches,
            network,
            clients,
            notifications,
            lifecycle,
            push_manager,
            storage,
            api,
        }
    }
}
