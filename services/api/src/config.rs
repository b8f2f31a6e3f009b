//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development. Every upstream credential is optional:
//! a missing key degrades that one capability to its fallback behavior and
//! must never prevent the service from starting.

use std::net::SocketAddr;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Credentials for the SMS provider. All three pieces are required for the
/// capability to count as configured.
#[derive(Clone, Debug)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub allowed_origins: Vec<String>,
    pub openai_api_key: Option<String>,
    pub openweather_api_key: Option<String>,
    pub google_maps_api_key: Option<String>,
    pub news_api_key: Option<String>,
    pub twilio: Option<TwilioConfig>,
    pub chat_model: String,
    pub analysis_model: String,
    pub stt_model: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let allowed_origins: Vec<String> = std::env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173,http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        // --- Load API Keys (all optional) ---
        let openai_api_key = std::env::var("OPENAI_API_KEY").ok();
        let openweather_api_key = std::env::var("OPENWEATHER_API_KEY").ok();
        let google_maps_api_key = std::env::var("GOOGLE_MAPS_API_KEY").ok();
        let news_api_key = std::env::var("NEWS_API_KEY").ok();

        // SMS needs the full credential triple; anything less means demo mode.
        let twilio = match (
            std::env::var("TWILIO_ACCOUNT_SID").ok(),
            std::env::var("TWILIO_AUTH_TOKEN").ok(),
            std::env::var("TWILIO_FROM_NUMBER").ok(),
        ) {
            (Some(account_sid), Some(auth_token), Some(from_number)) => Some(TwilioConfig {
                account_sid,
                auth_token,
                from_number,
            }),
            _ => None,
        };

        // --- Load Adapter-specific Settings ---
        let chat_model =
            std::env::var("CHAT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let analysis_model =
            std::env::var("ANALYSIS_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let stt_model =
            std::env::var("STT_MODEL").unwrap_or_else(|_| "whisper-1".to_string());

        Ok(Self {
            bind_address,
            log_level,
            allowed_origins,
            openai_api_key,
            openweather_api_key,
            google_maps_api_key,
            news_api_key,
            twilio,
            chat_model,
            analysis_model,
            stt_model,
        })
    }
}
