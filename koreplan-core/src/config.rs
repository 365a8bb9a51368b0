//! Configuration management for koreplan
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (KOREPLAN_*)
//! 3. Config file (~/.config/koreplan/config.toml)
//! 4. Default values

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default chat completion endpoint
pub const DEFAULT_API_BASE: &str = "https://api.deepseek.com";

/// Default chat model
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Rendering configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Year token the backend tends to emit from stale training data
    pub stale_year: i32,

    /// Year the stale token is rewritten to (local calendar year if unset)
    pub current_year: Option<i32>,

    /// Inputs larger than this are shown preformatted instead of rendered
    pub max_input_bytes: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            stale_year: 2023,
            current_year: None,
            max_input_bytes: 256 * 1024,
        }
    }
}

/// Chat API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,

    /// Model used for plan generation
    pub model: String,

    /// Request timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Retry configuration for backend calls
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,

    /// Delay before the second attempt; doubled after every failure
    #[serde(with = "humantime_serde")]
    pub initial_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
        }
    }
}

/// Request limits
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Plan requests admitted per sliding minute
    pub requests_per_minute: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: 10,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Rendering configuration
    pub render: RenderConfig,

    /// Chat API configuration
    pub api: ApiConfig,

    /// Retry configuration
    pub retry: RetryConfig,

    /// Request limits
    pub limits: LimitsConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/koreplan/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("koreplan").join("config.toml"))
    }

    /// Check values that deserialize fine but cannot work
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url).map_err(|e| {
            Error::Config(format!("Invalid api.base_url '{}': {}", self.api.base_url, e))
        })?;

        if self.retry.max_attempts == 0 {
            return Err(Error::Config(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }

        if self.limits.requests_per_minute == 0 {
            return Err(Error::Config(
                "limits.requests_per_minute must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - KOREPLAN_API_BASE: Base URL of the chat API
    /// - KOREPLAN_MODEL: Model to use
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(base_url) = std::env::var("KOREPLAN_API_BASE") {
            self.api.base_url = base_url;
        }

        if let Ok(model) = std::env::var("KOREPLAN_MODEL") {
            self.api.model = model;
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, api_base: Option<String>, model: Option<String>) -> Self {
        if let Some(base_url) = api_base {
            self.api.base_url = base_url;
        }

        if let Some(m) = model {
            self.api.model = m;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(api_base: Option<String>, model: Option<String>) -> Result<Self> {
        let config = Self::load()?
            .with_env_overrides()
            .with_cli_overrides(api_base, model);
        config.validate()?;
        Ok(config)
    }
}
