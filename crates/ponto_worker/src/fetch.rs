//! Fetch interception.
//!
//! Network-first by default: a live 200 answer is copied into the cache and
//! returned; when the network is unreachable the cached copy, the offline page
//! or a synthetic 503 is served instead. The cache-first strategy answers
//! from the cache whenever it can and never writes to it.

use http::Method;
use ponto_common::{log_error, PlatformError};
use ponto_config::FetchStrategy;
use tracing::{debug, warn};

use crate::models::{cache_key, Request, Response};
use crate::worker::ServiceWorker;

/// What the worker does with an intercepted request.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Not intercepted; the platform handles the request itself.
    Passthrough,
    /// Answered by the worker.
    Respond(Response),
}

impl FetchOutcome {
    pub fn response(&self) -> Option<&Response> {
        match self {
            FetchOutcome::Respond(response) => Some(response),
            FetchOutcome::Passthrough => None,
        }
    }
}

impl ServiceWorker {
    /// Whether the worker answers `request` at all.
    pub fn intercepts(&self, request: &Request) -> bool {
        if request.method != Method::GET {
            return false;
        }
        if request.url.origin() != self.origin.origin() {
            return false;
        }
        let url = request.url.as_str();
        !self
            .config
            .excluded_paths
            .iter()
            .any(|fragment| url.contains(fragment.as_str()))
    }

    /// Handles a `fetch` event.
    pub async fn on_fetch(&self, request: &Request) -> FetchOutcome {
        if !self.intercepts(request) {
            return FetchOutcome::Passthrough;
        }

        let response = match self.config.strategy {
            FetchStrategy::NetworkFirst => self.network_first(request).await,
            FetchStrategy::CacheFirst => self.cache_first(request).await,
        };
        FetchOutcome::Respond(response)
    }

    async fn network_first(&self, request: &Request) -> Response {
        match self.caps.network.fetch(request).await {
            Ok(response) => {
                if response.status == http::StatusCode::OK {
                    self.store(request, &response).await;
                }
                response
            }
            Err(e) => {
                debug!(url = %request.url, error = %e, "Network unavailable, trying cache");
                match self.cached(&request.cache_key()).await {
                    Some(response) => response,
                    None => self.offline_fallback(request).await,
                }
            }
        }
    }

    async fn cache_first(&self, request: &Request) -> Response {
        if let Some(response) = self.cached(&request.cache_key()).await {
            return response;
        }
        match self.caps.network.fetch(request).await {
            Ok(response) => response,
            Err(e) => {
                debug!(url = %request.url, error = %e, "Network unavailable, nothing cached");
                self.offline_fallback(request).await
            }
        }
    }

    /// The offline page for navigations, a 503 for everything else.
    async fn offline_fallback(&self, request: &Request) -> Response {
        if request.is_navigation() {
            match self.resolve(&self.config.offline_page) {
                Ok(url) => {
                    if let Some(page) = self.cached(&cache_key(&url)).await {
                        return page;
                    }
                    warn!(page = %url, "Offline page is not cached");
                }
                Err(e) => log_error(e, "Invalid offline page path"),
            }
        }
        Response::offline()
    }

    async fn cached(&self, key: &str) -> Option<Response> {
        match self.caps.caches.match_key(&self.config.cache_name, key).await {
            Ok(found) => found,
            Err(e) => {
                log_error(e, "Cache lookup failed");
                None
            }
        }
    }

    async fn store(&self, request: &Request, response: &Response) {
        let result: Result<(), PlatformError> = self
            .caps
            .caches
            .put(&self.config.cache_name, &request.cache_key(), response)
            .await;
        if let Err(e) = result {
            log_error(e, "Failed to cache response");
        }
    }
}
