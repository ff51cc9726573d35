use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::runtime::Runtime;

/// Free-form conversation state handed to handlers.
pub type State = Map<String, Value>;

/// Per-invocation handler options.
pub type HandlerOptions = Map<String, Value>;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Content {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Reply payload tagged with the producing action and the inbound source.
    pub fn reply(text: impl Into<String>, action: &str, source: Option<String>) -> Self {
        Self {
            text: text.into(),
            actions: vec![action.to_string()],
            source,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub sender: String,
    pub content: Content,
}

impl Message {
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            content: Content::text(text),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.content.source = Some(source.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.content.text
    }
}

/// Outcome of one handler invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResult {
    pub fn success(text: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            text: Some(text.into()),
            data,
            error: None,
        }
    }

    /// A normal "nothing matched" outcome, not an error.
    pub fn miss(text: impl Into<String>, data: Value) -> Self {
        Self {
            success: false,
            text: Some(text.into()),
            data,
            error: None,
        }
    }

    pub fn failure(text: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            text: Some(text.into()),
            data: Value::Object(Map::new()),
            error: Some(error.into()),
        }
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

#[async_trait]
pub trait HandlerCallback: Send + Sync {
    async fn call(&self, content: Content) -> anyhow::Result<()>;
}

/// Delivers `content` through the optional callback; failures are logged only.
pub async fn notify(callback: Option<&dyn HandlerCallback>, content: Content) {
    if let Some(callback) = callback {
        if let Err(e) = callback.call(content).await {
            warn!(error = %e, "Handler callback failed");
        }
    }
}

/// One example exchange: user text and the expected reply.
#[derive(Debug, Clone, Copy)]
pub struct ActionExample {
    pub user: &'static str,
    pub reply: &'static str,
}

#[async_trait]
pub trait Action: Send + Sync {
    fn name(&self) -> &'static str;

    fn similes(&self) -> &'static [&'static str] {
        &[]
    }

    fn description(&self) -> &'static str;

    fn examples(&self) -> &'static [ActionExample] {
        &[]
    }

    /// Whether this action should handle `message`.
    async fn validate(&self, runtime: &dyn Runtime, message: &Message) -> bool;

    async fn handler(
        &self,
        runtime: &dyn Runtime,
        message: &Message,
        state: Option<&State>,
        options: &HandlerOptions,
        callback: Option<&dyn HandlerCallback>,
    ) -> ActionResult;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reply_carries_action_and_source() {
        let content = Content::reply("hi", "SEARCH_TOKEN_ID", Some("discord".into()));
        let value = serde_json::to_value(&content).unwrap();
        assert_eq!(
            value,
            json!({ "text": "hi", "actions": ["SEARCH_TOKEN_ID"], "source": "discord" })
        );
    }

    #[test]
    fn failure_has_error_and_empty_data() {
        let result = ActionResult::failure("boom text", "boom");
        assert!(!result.success);
        assert_eq!(result.text(), "boom text");
        assert_eq!(result.error.as_deref(), Some("boom"));
        assert_eq!(result.data, json!({}));
    }
}
