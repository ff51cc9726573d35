//! JSON request wrapper shared by the upstream API clients.
//!
//! A [`RequestClient`] owns one `reqwest::Client` built at construction time.
//! When a proxy URL is supplied the HTTPS route is tunnelled through it; if
//! the proxy cannot be set up the client logs a warning and falls back to a
//! direct connection.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Proxy};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("HTTP {status} {status_text}")]
    Status { status: u16, status_text: String },

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to decode response body: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("invalid header {0}")]
    InvalidHeader(String),
}

impl RequestError {
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Per-call overrides merged on top of the client's default headers.
#[derive(Debug, Default, Clone)]
pub struct RequestOptions {
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }
}

#[derive(Clone)]
pub struct RequestClient {
    client: Client,
    default_headers: HeaderMap,
    proxied: bool,
}

impl RequestClient {
    pub fn new(default_headers: HeaderMap, proxy_url: Option<&str>) -> Self {
        let proxied_client = proxy_url
            .filter(|url| !url.trim().is_empty())
            .and_then(|url| match Self::build_proxied(url) {
                Ok(client) => {
                    info!(proxy = %url, "HTTPS proxy configured");
                    Some(client)
                }
                Err(e) => {
                    warn!(proxy = %url, error = %e, "Proxy unavailable, requests will proceed without proxy");
                    None
                }
            });

        let proxied = proxied_client.is_some();
        let client = proxied_client.unwrap_or_else(Self::build_direct);

        Self {
            client,
            default_headers,
            proxied,
        }
    }

    fn build_proxied(url: &str) -> Result<Client, reqwest::Error> {
        let proxy = Proxy::https(url)?;
        Client::builder().proxy(proxy).build()
    }

    fn build_direct() -> Client {
        Client::builder()
            .no_proxy()
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to build configured HTTP client, using defaults");
                Client::new()
            })
    }

    /// Whether requests are routed through the configured proxy.
    pub fn proxied(&self) -> bool {
        self.proxied
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<T, RequestError> {
        let mut headers = self.default_headers.clone();
        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| RequestError::InvalidHeader(name.clone()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| RequestError::InvalidHeader(name.to_string()))?;
            headers.insert(name, value);
        }

        debug!(%method, url, "Sending request");

        let mut builder = self.client.request(method, url).headers(headers);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(body) = options.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(RequestError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        response.json::<T>().await.map_err(RequestError::Decode)
    }

    pub async fn get<T: DeserializeOwned>(&self, url: &str, options: RequestOptions) -> Result<T, RequestError> {
        self.request(Method::GET, url, options).await
    }

    pub async fn post<T: DeserializeOwned>(&self, url: &str, options: RequestOptions) -> Result<T, RequestError> {
        self.request(Method::POST, url, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::{json, Value};

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("application/json"));
        headers.insert("x-api-key", HeaderValue::from_static("default-key"));
        headers
    }

    #[tokio::test]
    async fn caller_headers_override_defaults() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/ping").header("x-api-key", "override");
                then.status(200).json_body(json!({ "ok": true }));
            })
            .await;

        let client = RequestClient::new(default_headers(), None);
        let body: Value = client
            .get(&server.url("/ping"), RequestOptions::default().with_header("x-api-key", "override"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn non_success_status_carries_code() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/denied");
                then.status(403);
            })
            .await;

        let client = RequestClient::new(default_headers(), None);
        let err = client
            .post::<Value>(&server.url("/denied"), RequestOptions::default().with_body("{}"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(403));
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("Forbidden"));
    }

    #[test]
    fn malformed_proxy_degrades_to_direct() {
        let client = RequestClient::new(default_headers(), Some("not a proxy url"));
        assert!(!client.proxied());
    }

    #[test]
    fn valid_proxy_is_used() {
        let client = RequestClient::new(default_headers(), Some("http://127.0.0.1:8080"));
        assert!(client.proxied());
    }

    #[test]
    fn blank_proxy_is_ignored() {
        let client = RequestClient::new(default_headers(), Some("  "));
        assert!(!client.proxied());
    }
}
