use common::{RequestClient, RequestOptions, Runtime};
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, info};

use super::error::GeckoError;
use super::types::{TokenInfo, TokenInfoResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.geckoterminal.com";
pub const SOLANA_NETWORK: &str = "solana";

pub struct GeckoTerminalClient {
    http: RequestClient,
    base_url: String,
}

impl GeckoTerminalClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let base_url: String = base_url.into();
        Self {
            http: RequestClient::new(headers, None),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Uses `GECKO_BASE_URL` when set.
    pub fn from_runtime(runtime: &dyn Runtime) -> Self {
        Self::new(base_url(runtime))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_token_info(&self, network: &str, address: &str) -> Result<TokenInfo, GeckoError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeckoError::InvalidAddress(address.to_string()));
        }

        let url = format!("{}/api/v2/networks/{network}/tokens/{address}/info", self.base_url);
        info!(network, address, "Fetching token info from GeckoTerminal");

        let response: TokenInfoResponse = self.http.get(&url, RequestOptions::default()).await?;
        debug!(id = %response.data.id, "Token info received");
        Ok(response.data.attributes)
    }

    /// Token info on Solana.
    pub async fn fetch_by_address(&self, address: &str) -> Result<TokenInfo, GeckoError> {
        self.fetch_token_info(SOLANA_NETWORK, address).await
    }
}

pub fn base_url(runtime: &dyn Runtime) -> String {
    runtime
        .get_setting("GECKO_BASE_URL")
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Settings;

    #[test]
    fn base_url_defaults_and_trims() {
        assert_eq!(GeckoTerminalClient::from_runtime(&Settings::new()).base_url(), DEFAULT_BASE_URL);

        let settings = Settings::new().with("GECKO_BASE_URL", "http://localhost:9000/");
        assert_eq!(GeckoTerminalClient::from_runtime(&settings).base_url(), "http://localhost:9000");
    }

    #[tokio::test]
    async fn blank_address_is_rejected_before_any_request() {
        let client = GeckoTerminalClient::new("http://127.0.0.1:9");
        let err = client.fetch_by_address("  ").await.unwrap_err();
        assert!(matches!(err, GeckoError::InvalidAddress(_)));
    }
}
