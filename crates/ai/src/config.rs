//! # AI Pipeline Configuration
//!
//! Environment-driven configuration for the recommendation pipeline.
//!
//! ## Environment Variables
//!
//! - `AI_API_KEY`: API key for the external model (absent = pipeline runs
//!   in fallback-only mode)
//! - `AI_API_BASE_URL`: OpenAI-compatible endpoint base (default:
//!   "https://api.openai.com/v1")
//! - `AI_MODEL`: model identifier (default: "gpt-4o-mini")
//! - `AI_REQUEST_TIMEOUT_SECONDS`: per-attempt HTTP timeout (default: 30)
//! - `AI_RETRY_BASE_DELAY_MS`: first retry delay, doubled per attempt
//!   (default: 500)
//! - `AI_CACHE_TTL_HOURS`: persisted-cache freshness window (default: 24)
//! - `AI_MEMORY_CACHE_TTL_SECONDS`: in-process cache TTL (default: 300)
//! - `AI_MEMORY_CACHE_CAPACITY`: in-process cache entries (default: 256)

use std::env;
use std::time::Duration;

use eyre::Result;

#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,

    /// API key; None means the external model is unconfigured and every
    /// request uses the rule-based fallback
    pub api_key: Option<String>,

    /// Model identifier sent with each request
    pub model: String,

    /// Hard timeout for a single HTTP attempt
    pub request_timeout: Duration,

    /// Delay before the first retry; doubles on each subsequent attempt
    pub retry_base_delay: Duration,

    /// How long a persisted successful response stays servable
    pub cache_ttl_hours: i64,

    /// TTL of the in-process cache tier
    pub memory_cache_ttl: Duration,

    /// Capacity of the in-process cache tier
    pub memory_cache_capacity: usize,
}

impl AiConfig {
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("AI_API_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let api_key = env::var("AI_API_KEY").ok().filter(|key| !key.is_empty());
        let model = env::var("AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let request_timeout = env::var("AI_REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|value| value.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(30));

        let retry_base_delay = env::var("AI_RETRY_BASE_DELAY_MS")
            .ok()
            .and_then(|value| value.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or_else(|| Duration::from_millis(500));

        let cache_ttl_hours = env::var("AI_CACHE_TTL_HOURS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(24);

        let memory_cache_ttl = env::var("AI_MEMORY_CACHE_TTL_SECONDS")
            .ok()
            .and_then(|value| value.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(300));

        let memory_cache_capacity = env::var("AI_MEMORY_CACHE_CAPACITY")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(256);

        Ok(Self {
            base_url,
            api_key,
            model,
            request_timeout,
            retry_base_delay,
            cache_ttl_hours,
            memory_cache_ttl,
            memory_cache_capacity,
        })
    }

    /// Whether an external model call is possible at all
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            request_timeout: Duration::from_secs(30),
            retry_base_delay: Duration::from_millis(500),
            cache_ttl_hours: 24,
            memory_cache_ttl: Duration::from_secs(300),
            memory_cache_capacity: 256,
        }
    }
}
