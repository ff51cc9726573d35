use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::action::Action;
use crate::plugin::Plugin;
use crate::runtime::Runtime;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_SMALL_MODEL: &str = "gpt-5-nano";
pub const DEFAULT_LARGE_MODEL: &str = "gpt-5-mini";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const EMBEDDING_DIMENSIONS: usize = 1536;

const EMPTY_EMBEDDING_INPUT: &str = "default text for embedding initialization";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("OpenAI API error: {status} - {status_text}")]
    Status { status: u16, status_text: String },

    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSize {
    Small,
    Large,
}

impl ModelSize {
    fn text_type(self) -> &'static str {
        match self {
            ModelSize::Small => "TEXT_SMALL",
            ModelSize::Large => "TEXT_LARGE",
        }
    }

    fn object_type(self) -> &'static str {
        match self {
            ModelSize::Small => "OBJECT_SMALL",
            ModelSize::Large => "OBJECT_LARGE",
        }
    }
}

/// Sampling parameters for text generation.
#[derive(Debug, Clone)]
pub struct TextParams {
    pub prompt: String,
    pub system: Option<String>,
    pub stop_sequences: Vec<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl TextParams {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
            stop_sequences: Vec::new(),
            max_tokens: 8192,
            temperature: 0.7,
            frequency_penalty: 0.7,
            presence_penalty: 0.7,
        }
    }

    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub small_model: String,
    pub large_model: String,
    pub embedding_model: String,
}

impl ModelSettings {
    /// Resolves model names with the `OPENAI_*` keys taking priority over the generic ones.
    pub fn from_runtime(runtime: &dyn Runtime) -> Self {
        let setting = |key: &str| runtime.get_setting(key);
        Self {
            base_url: setting("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: setting("OPENAI_API_KEY"),
            small_model: setting("OPENAI_SMALL_MODEL")
                .or_else(|| setting("SMALL_MODEL"))
                .unwrap_or_else(|| DEFAULT_SMALL_MODEL.to_string()),
            large_model: setting("OPENAI_LARGE_MODEL")
                .or_else(|| setting("LARGE_MODEL"))
                .unwrap_or_else(|| DEFAULT_LARGE_MODEL.to_string()),
            embedding_model: setting("OPENAI_EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
        }
    }

    pub fn model(&self, size: ModelSize) -> &str {
        match size {
            ModelSize::Small => &self.small_model,
            ModelSize::Large => &self.large_model,
        }
    }
}

#[derive(Clone)]
pub struct Client {
    settings: ModelSettings,
    http_client: HttpClient,
}

impl Client {
    pub fn new(settings: ModelSettings) -> Self {
        Self {
            settings,
            http_client: HttpClient::new(),
        }
    }

    pub fn from_runtime(runtime: &dyn Runtime) -> Self {
        Self::new(ModelSettings::from_runtime(runtime))
    }

    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    fn api_key(&self) -> &str {
        self.settings.api_key.as_deref().unwrap_or_default()
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<reqwest::Response, ProviderError> {
        let resp = self
            .http_client
            .post(self.url(path))
            .bearer_auth(self.api_key())
            .json(body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }
        Ok(resp)
    }

    pub async fn generate_text(&self, size: ModelSize, params: TextParams) -> Result<String, ProviderError> {
        let model = self.settings.model(size);
        info!(model_type = size.text_type(), model, "Using text model");

        let mut messages = Vec::new();
        if let Some(system) = &params.system {
            messages.push(json!({ "role": "system", "content": system }));
        }
        messages.push(json!({ "role": "user", "content": params.prompt }));

        let mut body = json!({
            "model": model,
            "messages": messages,
            "temperature": params.temperature,
            "max_tokens": params.max_tokens,
            "frequency_penalty": params.frequency_penalty,
            "presence_penalty": params.presence_penalty,
        });
        if !params.stop_sequences.is_empty() {
            body["stop"] = json!(params.stop_sequences);
        }

        let response: ChatResponse = self.post_json("/chat/completions", &body).await?.json().await?;
        if let Some(usage) = &response.usage {
            log_usage(size.text_type(), usage);
        }

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }

    /// Asks for a JSON object reply and parses it.
    pub async fn generate_object(
        &self,
        size: ModelSize,
        prompt: &str,
        temperature: Option<f32>,
    ) -> Result<Value, ProviderError> {
        let model = self.settings.model(size);
        info!(model_type = size.object_type(), model, "Using object model");

        let body = json!({
            "model": model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": temperature.unwrap_or(0.0),
            "max_tokens": 4096,
            "response_format": { "type": "json_object" },
        });

        let result = async {
            let response: ChatResponse = self.post_json("/chat/completions", &body).await?.json().await?;
            if let Some(usage) = &response.usage {
                log_usage(size.object_type(), usage);
            }
            let content = response
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
                .ok_or_else(|| ProviderError::InvalidResponse("no completion choices returned".into()))?;
            Ok::<_, ProviderError>(serde_json::from_str(&content)?)
        }
        .await;

        if let Err(e) = &result {
            error!(error = %e, "Error generating object");
        }
        result
    }

    /// Embeds `text`; upstream failures fall back to a zero vector.
    pub async fn embed(&self, text: Option<&str>) -> Vec<f32> {
        let input = text.filter(|t| !t.is_empty()).unwrap_or(EMPTY_EMBEDDING_INPUT);
        let body = json!({
            "model": self.settings.embedding_model,
            "input": input,
        });

        let outcome = async {
            let response: EmbeddingResponse = self.post_json("/embeddings", &body).await?.json().await?;
            if let Some(usage) = &response.usage {
                log_usage("TEXT_EMBEDDING", usage);
            }
            response
                .data
                .into_iter()
                .next()
                .map(|d| d.embedding)
                .ok_or_else(|| ProviderError::InvalidResponse("empty embedding data".into()))
        }
        .await;

        match outcome {
            Ok(embedding) => embedding,
            Err(e) => {
                warn!(error = %e, "Embedding unavailable, returning zero embedding");
                vec![0.0; EMBEDDING_DIMENSIONS]
            }
        }
    }

    /// Checks the key against `GET /models`.
    pub async fn validate_key(&self) -> Result<(), ProviderError> {
        let key = self.settings.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;
        let resp = self
            .http_client
            .get(self.url("/models"))
            .bearer_auth(key)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }
        Ok(())
    }
}

/// Model-provider plugin; contributes no actions.
pub struct CustomOpenAiPlugin;

#[async_trait]
impl Plugin for CustomOpenAiPlugin {
    fn name(&self) -> &'static str {
        "custom-openai"
    }

    fn description(&self) -> &'static str {
        "OpenAI-compatible model provider with a configurable endpoint"
    }

    async fn init(&self, runtime: &dyn Runtime) -> anyhow::Result<()> {
        let client = Client::from_runtime(runtime);
        match client.validate_key().await {
            Ok(()) => info!(base_url = %client.settings().base_url, "OpenAI API key validated successfully"),
            Err(ProviderError::MissingApiKey) => {
                warn!("OPENAI_API_KEY is not set - OpenAI functionality will be limited")
            }
            Err(e) => warn!(error = %e, "OpenAI API key validation failed, functionality will be limited"),
        }
        Ok(())
    }

    fn actions(&self) -> Vec<Arc<dyn Action>> {
        Vec::new()
    }
}

fn log_usage(model_type: &str, usage: &Usage) {
    debug!(
        provider = "openai",
        model_type,
        prompt_tokens = usage.prompt_tokens,
        completion_tokens = usage.completion_tokens,
        total_tokens = usage.total_tokens,
        "Model used"
    );
}
