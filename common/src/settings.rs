use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Keys picked up from the process environment.
pub const KNOWN_KEYS: &[&str] = &[
    "SOSO_API_KEY",
    "SOSO_BASE_URL",
    "GECKO_BASE_URL",
    "OPENAI_API_KEY",
    "OPENAI_BASE_URL",
    "OPENAI_SMALL_MODEL",
    "OPENAI_LARGE_MODEL",
    "OPENAI_EMBEDDING_MODEL",
    "SMALL_MODEL",
    "LARGE_MODEL",
    "AGENT_CHARACTER",
];

/// Flat string settings, resolved in layers: `.env`, environment, config file.
/// Empty values are treated as unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Settings {
    values: HashMap<String, String>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let mut settings = Self::new();
        for key in KNOWN_KEYS {
            if let Ok(value) = std::env::var(key) {
                settings.set(*key, value);
            }
        }
        debug!(count = settings.values.len(), "Loaded settings from environment");
        settings
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let values: HashMap<String, toml::Value> =
            toml::from_str(content).context("Failed to parse settings TOML")?;

        let mut settings = Self::new();
        for (key, value) in values {
            let value = match value {
                toml::Value::String(s) => s,
                other => other.to_string(),
            };
            settings.set(key, value);
        }
        Ok(settings)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Layers `other` on top of `self`; keys present in `other` win.
    pub fn merge(mut self, other: Settings) -> Self {
        self.values.extend(other.values);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_unset() {
        let settings = Settings::new().with("SOSO_API_KEY", "  ");
        assert_eq!(settings.get("SOSO_API_KEY"), None);
        assert_eq!(settings.get_or("SOSO_API_KEY", "fallback"), "fallback");
    }

    #[test]
    fn later_layers_override() {
        let base = Settings::new()
            .with("SOSO_BASE_URL", "https://a.example")
            .with("GECKO_BASE_URL", "https://g.example");
        let file = Settings::from_toml_str(
            r#"
            SOSO_BASE_URL = "https://b.example"
            RETRIES = 3
            "#,
        )
        .unwrap();

        let merged = base.merge(file);
        assert_eq!(merged.get("SOSO_BASE_URL"), Some("https://b.example"));
        assert_eq!(merged.get("GECKO_BASE_URL"), Some("https://g.example"));
        assert_eq!(merged.get("RETRIES"), Some("3"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Settings::from_toml_str("SOSO_API_KEY = ").is_err());
    }
}
