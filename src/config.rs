//! Application configuration
//!
//! Environment-driven: `PLANGENIE_`-prefixed variables (with `__` separating
//! nesting levels) are layered over serde defaults, then the `GEMINI_*`
//! shortcuts are applied on top.

use crate::error::Result;
use crate::prioritizer::GeminiConfig;
use serde::Deserialize;

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Request body size limit in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3001
}
fn default_max_body_bytes() -> usize {
    262_144
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub gemini: GeminiConfig,
}

impl AppConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        let source = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("PLANGENIE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut app: AppConfig = source.try_deserialize()?;
        app.gemini = app.gemini.from_env();
        Ok(app)
    }

    /// Socket address string for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.max_body_bytes, 262_144);
        assert_eq!(config.bind_addr(), "0.0.0.0:3001");
        assert!(config.gemini.enabled);
    }

    #[test]
    fn test_load_with_env_override() {
        std::env::set_var("PLANGENIE_SERVER__PORT", "8088");

        let config = AppConfig::load().unwrap();
        assert_eq!(config.server.port, 8088);

        std::env::remove_var("PLANGENIE_SERVER__PORT");
    }
}
