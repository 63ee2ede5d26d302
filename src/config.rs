//! Configuration management for the GeoJSON MCP Server
//!
//! Handles environment variables for the completion API credentials.

use crate::error::{ConfigError, Result};

/// Configuration for the GeoJSON MCP Server
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the completion provider
    pub api_key: String,

    /// Base URL for the completion API
    pub base_url: String,

    /// Model used for coordinate lookups
    pub model: String,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// `OPENAI_API_KEY` is required; `OPENAI_BASE_URL` and `OPENAI_MODEL`
    /// fall back to the defaults in [`completion`].
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            ConfigError::MissingEnvVar {
                var: "OPENAI_API_KEY".to_string(),
            }
        })?;

        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| completion::DEFAULT_BASE_URL.to_string());

        let model = std::env::var("OPENAI_MODEL")
            .unwrap_or_else(|_| completion::DEFAULT_MODEL.to_string());

        Ok(Self {
            api_key,
            base_url,
            model,
        })
    }
}

/// Completion API constants
pub mod completion {
    /// Default base URL for the completion API
    pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

    /// Default completion model
    pub const DEFAULT_MODEL: &str = "gpt-4";

    /// Sampling temperature for coordinate lookups
    pub const TEMPERATURE: f64 = 0.5;

    /// Output token cap for coordinate lookups
    pub const MAX_TOKENS: u32 = 300;
}

/// Default output file name for single-feature saves
pub const DEFAULT_OUTPUT_FILE: &str = "city_point.geojson";
