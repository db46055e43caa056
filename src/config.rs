//! Configuration management for the LMS console

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the LMS backend; all repository paths are relative to it.
    pub base_url: String,
    /// Uniform per-request budget in milliseconds. Exceeding it surfaces as
    /// a network-class error.
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    /// Path of the JSON map file holding tokens and the user snapshot.
    pub storage_path: String,
    /// Storage key under which the access token is persisted.
    pub access_token_key: String,
    /// Storage key under which the refresh token is persisted.
    pub refresh_token_key: String,
    /// Storage key under which the last authenticated user is persisted.
    pub user_key: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix LMS_)
            .add_source(
                Environment::with_prefix("LMS")
                    .separator("_")
                    .try_parsing(true),
            )
            // Override backend URL from LMS_API_BASE_URL env var if present
            .set_override_option("api.base_url", env::var("LMS_API_BASE_URL").ok())?
            // Override token storage keys from env vars if present
            .set_override_option(
                "session.access_token_key",
                env::var("LMS_ACCESS_TOKEN_KEY").ok(),
            )?
            .set_override_option(
                "session.refresh_token_key",
                env::var("LMS_REFRESH_TOKEN_KEY").ok(),
            )?
            .build()?;

        let mut cfg: AppConfig = config.try_deserialize()?;
        // Trailing slashes break path joining; normalize once here.
        while cfg.api.base_url.ends_with('/') {
            cfg.api.base_url.pop();
        }
        Ok(cfg)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_ms: 5000,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_path: ".lms-session.json".to_string(),
            access_token_key: "access_token".to_string(),
            refresh_token_key: "refresh_token".to_string(),
            user_key: "user".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
