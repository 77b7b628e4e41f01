//! Push server API client
//!
//! `HttpPushApi` implements [`PushApi`] over HTTP against the application
//! server that stores subscriptions and sends test notifications. It is used
//! by the page client and by the worker's subscription-change and sync
//! handlers.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use tracing::debug;

use crate::http::client::HTTP_CLIENT;
use crate::models::{
    ApiMessage, PushStatus, ResubscribeRequest, SubscribeRequest, TestResult, VapidKeyResponse,
};
use crate::services::{ApiError, PushApi};

pub const VAPID_KEY_PATH: &str = "/api/push/vapid-key";
pub const SUBSCRIBE_PATH: &str = "/api/push/subscribe";
pub const UNSUBSCRIBE_PATH: &str = "/api/push/unsubscribe";
pub const TEST_PATH: &str = "/api/push/test";
pub const STATUS_PATH: &str = "/api/push/status";
pub const SYNC_PATH: &str = "/api/sync";

/// HTTP implementation of the push server API
#[derive(Debug, Clone)]
pub struct HttpPushApi {
    /// HTTP client used for every request
    client: Client,

    /// Origin of the application server, without a trailing slash
    base_url: String,
}

impl HttpPushApi {
    /// Creates a client for `base_url` sharing the process-wide HTTP client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(HTTP_CLIENT.clone(), base_url)
    }

    /// Creates a client for `base_url` with a caller-supplied reqwest client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned + Send,
    {
        debug!(path, "POST to push API");
        let response = self.client.post(self.url(path)).json(body).send().await?;
        read_json(response).await
    }
}

/// Turns a response into `R`, or into `ApiError::Rejected` for non-2xx answers.
///
/// The server reports failures as `{success: false, error}`; that message is
/// preferred over the raw body.
async fn read_json<R: DeserializeOwned + Send>(response: Response) -> Result<R, ApiError> {
    let response = check_status(response).await?;
    response
        .json::<R>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiMessage>(&body)
        .ok()
        .and_then(|answer| answer.error.or(answer.message))
        .unwrap_or(body);

    Err(ApiError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl PushApi for HttpPushApi {
    async fn vapid_key(&self) -> Result<VapidKeyResponse, ApiError> {
        let response = self.client.get(self.url(VAPID_KEY_PATH)).send().await?;
        read_json(response).await
    }

    async fn subscribe(&self, request: &SubscribeRequest) -> Result<ApiMessage, ApiError> {
        self.post_json(SUBSCRIBE_PATH, request).await
    }

    async fn resubscribe(&self, request: &ResubscribeRequest) -> Result<ApiMessage, ApiError> {
        self.post_json(SUBSCRIBE_PATH, request).await
    }

    async fn unsubscribe(&self, endpoint: &str) -> Result<ApiMessage, ApiError> {
        self.post_json(UNSUBSCRIBE_PATH, &json!({ "endpoint": endpoint }))
            .await
    }

    async fn send_test(&self, user_id: &str) -> Result<TestResult, ApiError> {
        self.post_json(TEST_PATH, &json!({ "usuario": user_id })).await
    }

    async fn status(&self, user_id: &str) -> Result<PushStatus, ApiError> {
        let response = self
            .client
            .get(self.url(STATUS_PATH))
            .query(&[("usuario", user_id)])
            .send()
            .await?;
        read_json(response).await
    }

    async fn sync_offline_data(&self) -> Result<(), ApiError> {
        debug!(path = SYNC_PATH, "POST to sync API");
        let response = self
            .client
            .post(self.url(SYNC_PATH))
            .json(&json!({ "action": "sync_offline_data" }))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}
