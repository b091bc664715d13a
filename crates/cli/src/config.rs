//! Configuration loading from quill.toml.

use runtime::DEFAULT_MAX_ROUNDS;
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Backend configuration.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Cap on gateway round trips per question.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,

    /// Extra system prompt appended to the built-in one.
    pub system: Option<String>,
}

/// Backend provider configuration.
#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    /// Model to use.
    #[serde(default = "default_model")]
    pub model: String,

    /// Anthropic API key. Falls back to the ANTHROPIC_API_KEY
    /// environment variable when unset.
    pub api_key: Option<String>,

    /// Response token limit per gateway call.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            max_rounds: default_max_rounds(),
            system: None,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: None,
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_max_rounds() -> usize {
    DEFAULT_MAX_ROUNDS
}

impl Config {
    /// Load configuration from a TOML file, or defaults if it is absent.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Resolve the API key from the config file or the environment.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        if let Some(key) = &self.backend.api_key {
            return Ok(key.clone());
        }
        std::env::var("ANTHROPIC_API_KEY").map_err(|_| ConfigError::MissingApiKey)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("no API key: set backend.api_key in quill.toml or the ANTHROPIC_API_KEY environment variable")]
    MissingApiKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_sections() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.backend.model, "claude-sonnet-4-20250514");
        assert_eq!(config.max_rounds, DEFAULT_MAX_ROUNDS);
        assert!(config.system.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let config = Config::parse(
            r#"
            max_rounds = 3
            system = "Prefer short answers."

            [backend]
            model = "claude-haiku-4-5-20251001"
            max_tokens = 512
            "#,
        )
        .unwrap();
        assert_eq!(config.max_rounds, 3);
        assert_eq!(config.backend.model, "claude-haiku-4-5-20251001");
        assert_eq!(config.backend.max_tokens, 512);
        assert_eq!(config.system.as_deref(), Some("Prefer short answers."));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Config::parse("backend = nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
