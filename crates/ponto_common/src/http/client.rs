use once_cell::sync::Lazy;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// Transport timeout of the shared client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `User-Agent` sent to the push server.
pub const USER_AGENT: &str = concat!("ponto-pwa/", env!("CARGO_PKG_VERSION"));

/// Process-wide HTTP client for the push server API.
///
/// JSON is always requested and redirects are not followed: the push server
/// answers directly, and a redirect usually means a login page in front of it.
pub static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    create_client(DEFAULT_TIMEOUT).unwrap_or_else(|err| {
        tracing::warn!("Falling back to an unconfigured HTTP client: {}", err);
        Client::new()
    })
});

/// Builds a client with the given transport timeout and the push API defaults.
pub fn create_client(timeout: Duration) -> Result<Client, ReqwestError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::none())
        .build()
}
