//! Configuration for the Gemini generative-language integration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

/// Gemini client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// Enable/disable the model integration globally
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model name used in the request path
    #[serde(default = "default_model")]
    pub model: String,

    /// API key (read from env GEMINI_API_KEY if not set)
    #[serde(default)]
    pub api_key: Option<Secret<String>>,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Completion cap
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

// Default value functions
fn default_enabled() -> bool {
    true
}
fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}
fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}
fn default_timeout_ms() -> u64 {
    30_000
}
fn default_temperature() -> f32 {
    0.3
}
fn default_max_output_tokens() -> u32 {
    2048
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            timeout_ms: default_timeout_ms(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

impl GeminiConfig {
    /// Apply environment variable overrides
    pub fn from_env(mut self) -> Self {
        if let Ok(val) = std::env::var("GEMINI_ENABLED") {
            self.enabled = val.to_lowercase() == "true" || val == "1";
        }

        if let Ok(val) = std::env::var("GEMINI_BASE_URL") {
            self.base_url = val;
        }

        if let Ok(val) = std::env::var("GEMINI_MODEL") {
            self.model = val;
        }

        if let Ok(val) = std::env::var("GEMINI_API_KEY") {
            self.api_key = Some(Secret::new(val));
        }

        if let Ok(val) = std::env::var("GEMINI_TIMEOUT_MS") {
            if let Ok(timeout) = val.parse() {
                self.timeout_ms = timeout;
            }
        }

        if let Ok(val) = std::env::var("GEMINI_MAX_OUTPUT_TOKENS") {
            if let Ok(max) = val.parse() {
                self.max_output_tokens = max;
            }
        }

        self
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Full URL of the generateContent endpoint
    pub fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}
