//! Server configuration from the environment
//!
//! Everything is read once at startup and injected into the services that
//! need it; nothing below reads the environment again.

use std::time::Duration;

/// Default OpenRouter chat-completions endpoint
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Model used for every tutoring request unless overridden
pub const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-lite-preview-02-05:free";

pub const DEFAULT_PORT: u16 = 5020;

const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 120;

/// Configuration for the LLM provider
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Provider credential. Never leaves the server.
    pub api_key: Option<String>,
    /// Full chat-completions URL
    pub base_url: String,
    pub model: String,
    /// Optional identification headers (`HTTP-Referer`, `X-Title`)
    pub referer: Option<String>,
    pub title: Option<String>,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            referer: None,
            title: None,
            timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        }
    }
}

/// Top-level server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub llm: LlmConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = LlmConfig::default();

        let port = var("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let timeout = var("MATHWISE_UPSTREAM_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse().ok())
            .map_or(defaults.timeout, Duration::from_secs);

        Self {
            port,
            llm: LlmConfig {
                api_key: var("OPENROUTER_API_KEY"),
                base_url: var("OPENROUTER_BASE_URL").unwrap_or(defaults.base_url),
                model: var("MATHWISE_MODEL").unwrap_or(defaults.model),
                referer: var("HTTP_REFERER"),
                title: var("X_TITLE"),
                timeout,
            },
        }
    }
}
