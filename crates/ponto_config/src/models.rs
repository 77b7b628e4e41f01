// --- File: crates/ponto_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8502,
        }
    }
}

// --- Static file serving ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory served at the root of the static server.
    pub dir: String,
    /// Value of the `Service-Worker-Allowed` header.
    pub worker_allowed_scope: String,
    /// Value of the `Cache-Control` header.
    pub cache_control: String,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            dir: "static".to_string(),
            worker_allowed_scope: "/".to_string(),
            cache_control: "no-cache".to_string(),
        }
    }
}

// --- Page-side push client ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct PushConfig {
    /// Origin of the application server exposing `/api/push/*`.
    pub api_base_url: String,
    pub sw_path: String,
    pub sw_scope: String,
    /// VAPID public key injected by the host page, if any.
    pub vapid_public_key: Option<String>,
    /// When false, an unreachable server does not fail a subscription.
    pub require_server_ack: bool,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8501".to_string(),
            sw_path: "/static/sw.js".to_string(),
            sw_scope: "/".to_string(),
            vapid_public_key: None,
            require_server_ack: true,
        }
    }
}

/// How the worker answers intercepted GET requests.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FetchStrategy {
    #[default]
    NetworkFirst,
    CacheFirst,
}

// --- Service worker ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct WorkerConfig {
    pub cache_name: String,
    pub cache_version: String,
    /// Origin the worker is installed on; only same-origin requests are intercepted.
    pub origin: String,
    pub precache: Vec<String>,
    pub offline_page: String,
    /// URL fragments that are never intercepted (streaming, health checks).
    pub excluded_paths: Vec<String>,
    pub strategy: FetchStrategy,
    pub sync_tag: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            cache_name: "ponto-exsa-v2".to_string(),
            cache_version: "2.0.0".to_string(),
            origin: "http://localhost:8501".to_string(),
            precache: vec![
                "/".to_string(),
                "/static/manifest.json".to_string(),
                "/static/icon-192.svg".to_string(),
                "/static/icon-512.svg".to_string(),
                "/static/offline.html".to_string(),
            ],
            offline_page: "/static/offline.html".to_string(),
            excluded_paths: vec![
                "_stcore".to_string(),
                "stream".to_string(),
                "healthz".to_string(),
            ],
            strategy: FetchStrategy::NetworkFirst,
            sync_tag: "background-sync".to_string(),
        }
    }
}

// --- Notification defaults used when a push payload omits a field ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct NotificationConfig {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub tag: String,
    pub vibrate: Vec<u32>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            title: "Ponto ExSA".to_string(),
            body: "Nova notificação".to_string(),
            icon: "/static/icon-192.svg".to_string(),
            badge: "/static/icon-192.svg".to_string(),
            tag: "ponto-exsa-notification".to_string(),
            vibrate: vec![200, 100, 200, 100, 200],
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
    pub push: PushConfig,
    pub worker: WorkerConfig,
    pub notification: NotificationConfig,
}
