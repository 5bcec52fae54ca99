//! Configuration for the classify worker.

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Main configuration structure for the worker.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub sentiment: SentimentConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Settings for the hosted sentiment API call.
#[derive(Debug, Clone, Deserialize)]
pub struct SentimentConfig {
    /// Endpoint of the hosted sentiment model.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Bearer token for the hosted API. Falls back to the HF_TOKEN
    /// environment variable when unset.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_call_timeout")]
    pub call_timeout_secs: u64,
    /// Pause before the single cold-start retry.
    #[serde(default = "default_retry_backoff")]
    pub retry_backoff_ms: u64,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            connect_timeout_secs: default_connect_timeout(),
            call_timeout_secs: default_call_timeout(),
            retry_backoff_ms: default_retry_backoff(),
        }
    }
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    9090
}
fn default_api_url() -> String {
    "https://huggingface.co/distilbert/distilbert-base-uncased-finetuned-sst-2-english".to_string()
}
fn default_connect_timeout() -> u64 {
    5
}
fn default_call_timeout() -> u64 {
    8
}
fn default_retry_backoff() -> u64 {
    800
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. Environment variables (WORKER__SECTION__KEY format)
    /// 2. config.toml file (if present)
    /// 3. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            // Load from config.toml if exists
            .add_source(File::with_name("config").required(false))
            // Override with environment variables (WORKER__SECTION__KEY format)
            .add_source(
                Environment::with_prefix("WORKER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Config = config.try_deserialize()?;

        // HF_TOKEN is the conventional credential variable for the hosted API.
        if config.sentiment.token.is_none() {
            config.sentiment.token = std::env::var("HF_TOKEN").ok();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_config() {
        let api = ApiConfig::default();
        assert_eq!(api.host, "0.0.0.0");
        assert_eq!(api.port, 9090);
    }

    #[test]
    fn test_default_sentiment_config() {
        let sentiment = SentimentConfig::default();
        assert!(sentiment.token.is_none());
        assert_eq!(sentiment.connect_timeout_secs, 5);
        assert_eq!(sentiment.call_timeout_secs, 8);
        assert_eq!(sentiment.retry_backoff_ms, 800);
    }
}
