use common::{RequestClient, RequestOptions, Runtime};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::error::SosoError;
use super::types::{Currency, Envelope, NewsCategory, NewsItem, NewsPage};

pub const DEFAULT_BASE_URL: &str = "https://openapi.sosovalue.com";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const API_KEY_HEADER: &str = "x-soso-api-key";

#[derive(Debug, Clone)]
pub struct SosoConfig {
    pub api_key: String,
    pub base_url: String,
    pub proxy_url: Option<String>,
}

impl SosoConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            proxy_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_proxy(mut self, proxy_url: Option<String>) -> Self {
        self.proxy_url = proxy_url;
        self
    }

    /// Key and base URL from runtime settings, proxy from `HTTPS_PROXY`/`https_proxy`.
    pub fn from_runtime(runtime: &dyn Runtime) -> Option<Self> {
        let api_key = runtime.get_setting("SOSO_API_KEY")?;
        let base_url = runtime
            .get_setting("SOSO_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Some(Self::new(api_key).with_base_url(base_url).with_proxy(proxy_from_env()))
    }
}

pub fn proxy_from_env() -> Option<String> {
    std::env::var("HTTPS_PROXY")
        .or_else(|_| std::env::var("https_proxy"))
        .ok()
        .filter(|p| !p.trim().is_empty())
}

/// Page and category selection for [`SosoValueClient::news_for`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub page_num: u32,
    pub page_size: u32,
    pub category_list: String,
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            page_num: 1,
            page_size: 10,
            category_list: NewsCategory::DEFAULT_FILTER.to_string(),
        }
    }
}

impl NewsQuery {
    pub fn page(page_num: u32, page_size: u32) -> Self {
        Self {
            page_num,
            page_size,
            ..Default::default()
        }
    }
}

pub struct SosoValueClient {
    http: RequestClient,
    base_url: String,
}

impl SosoValueClient {
    pub fn new(config: SosoConfig) -> Result<Self, SosoError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        headers.insert("accept", HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert("user-agent", HeaderValue::from_static(USER_AGENT));
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(&config.api_key)
                .map_err(|_| SosoError::Config("API key is not a valid header value".to_string()))?,
        );

        Ok(Self {
            http: RequestClient::new(headers, config.proxy_url.as_deref()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn proxied(&self) -> bool {
        self.http.proxied()
    }

    fn unwrap_envelope<T>(envelope: Envelope<T>) -> Result<T, SosoError> {
        if envelope.code != 0 {
            return Err(SosoError::Api(
                envelope.msg.filter(|m| !m.is_empty()).unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }
        envelope
            .data
            .ok_or_else(|| SosoError::InvalidResponse("missing data field".to_string()))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        post: bool,
        url: &str,
        options: RequestOptions,
    ) -> Result<T, SosoError> {
        let envelope: Envelope<T> = if post {
            self.http.post(url, options).await?
        } else {
            self.http.get(url, options).await?
        };
        Self::unwrap_envelope(envelope)
    }

    /// Every currency SoSoValue knows about.
    pub async fn list_all(&self) -> Result<Vec<Currency>, SosoError> {
        let url = format!("{}/openapi/v1/data/default/coin/list", self.base_url);
        let currencies: Vec<Currency> = self
            .call(true, &url, RequestOptions::default().with_body("{}"))
            .await?;
        debug!(count = currencies.len(), "Fetched currency list");
        Ok(currencies)
    }

    /// Re-fetches the list and resolves `query` with [`fuzzy_match`].
    pub async fn search(&self, query: &str) -> Result<Option<Currency>, SosoError> {
        let currencies = self.list_all().await?;
        let found = fuzzy_match(query, &currencies).cloned();
        info!(query, found = found.is_some(), "Currency search finished");
        Ok(found)
    }

    /// At most `query.page_size` news items for the currency.
    pub async fn news_for(&self, currency_id: &str, query: &NewsQuery) -> Result<Vec<NewsItem>, SosoError> {
        let url = format!("{}/api/v1/news/featured/currency", self.base_url);
        let options = RequestOptions::default()
            .with_query("currencyId", currency_id)
            .with_query("pageNum", query.page_num)
            .with_query("pageSize", query.page_size)
            .with_query("categoryList", &query.category_list);

        let page: NewsPage = self.call(false, &url, options).await?;
        let mut news = page.list;
        news.truncate(query.page_size as usize);
        debug!(currency_id, count = news.len(), total = ?page.total, "Fetched currency news");
        Ok(news)
    }
}

/// Exact (case-insensitive) match on either name first, then substring in
/// either direction; first hit wins within each pass.
pub fn fuzzy_match<'a>(query: &str, currencies: &'a [Currency]) -> Option<&'a Currency> {
    let query = query.to_lowercase();

    currencies
        .iter()
        .find(|c| c.currency_name.to_lowercase() == query || c.full_name.to_lowercase() == query)
        .or_else(|| {
            currencies.iter().find(|c| {
                let name = c.currency_name.to_lowercase();
                let full = c.full_name.to_lowercase();
                name.contains(&query) || full.contains(&query) || query.contains(&name) || query.contains(&full)
            })
        })
}

/// Currencies whose names start with the first three characters of `query`.
pub fn suggest<'a>(query: &str, currencies: &'a [Currency], limit: usize) -> Vec<&'a Currency> {
    let prefix: String = query.to_lowercase().chars().take(3).collect();
    if prefix.chars().count() < 2 {
        return Vec::new();
    }

    currencies
        .iter()
        .filter(|c| {
            c.currency_name.to_lowercase().starts_with(&prefix) || c.full_name.to_lowercase().starts_with(&prefix)
        })
        .take(limit)
        .collect()
}
