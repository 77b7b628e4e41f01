//! Static file server for the worker script and PWA assets.
//!
//! Every response carries `Service-Worker-Allowed` so the worker served from
//! `/static/sw.js` may control the whole origin, and `Cache-Control:
//! no-cache` so a new worker is picked up on the next visit.

use axum::{routing::get, Router};
use http::header::{HeaderName, HeaderValue, CACHE_CONTROL};
use ponto_common::{config_error, validation_error, PontoError};
use ponto_config::StaticFilesConfig;
use std::path::Path;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub const SERVICE_WORKER_ALLOWED: &str = "service-worker-allowed";

async fn healthz() -> &'static str {
    "ok"
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, PontoError> {
    HeaderValue::from_str(value)
        .map_err(|e| config_error(format!("invalid value for static_files.{name}: {e}")))
}

/// Builds the router serving `config.dir`.
///
/// Fails when the directory does not exist or a header value is not valid.
pub fn router(config: &StaticFilesConfig) -> Result<Router, PontoError> {
    if !Path::new(&config.dir).is_dir() {
        return Err(validation_error(format!(
            "static directory not found: {}",
            config.dir
        )));
    }

    let allowed = header_value("worker_allowed_scope", &config.worker_allowed_scope)?;
    let cache_control = header_value("cache_control", &config.cache_control)?;

    Ok(Router::new()
        .route("/healthz", get(healthz))
        .fallback_service(ServeDir::new(&config.dir))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(SERVICE_WORKER_ALLOWED),
            allowed,
        ))
        .layer(SetResponseHeaderLayer::overriding(CACHE_CONTROL, cache_control))
        .layer(TraceLayer::new_for_http()))
}
