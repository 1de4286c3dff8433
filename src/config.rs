//! Configuration management for SOS Beacon.
//!
//! This module handles loading and validating configuration from environment
//! variables. Every setting has a default so the app runs with no setup.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;

/// Default emergency message. The location link is appended after this text
/// at compose time, which doubles the trailing phrase on purpose.
pub const DEFAULT_MESSAGE_TEMPLATE: &str =
    "Hello, EMERGENCY... I am <name>. I need help... My location:";

/// Default public IP-geolocation endpoint.
pub const DEFAULT_GEO_ENDPOINT: &str = "http://ip-api.com/json/";

/// Configuration for SOS Beacon.
#[derive(Debug, Clone)]
pub struct Config {
    /// IP-geolocation endpoint used when the consent probe fails
    pub geo_endpoint: String,

    /// How long the consent probe waits for the browser to POST coordinates,
    /// in seconds (default: 20)
    pub consent_timeout_secs: u64,

    /// Delay between successive channel launches, in milliseconds
    /// (default: 900)
    pub pacing_ms: u64,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Directory holding the JSON stores and session file (default: "data")
    pub data_dir: PathBuf,

    /// Emergency message template; `<name>` is replaced with the user's name
    pub message_template: String,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `SOS_GEO_ENDPOINT`: IP-geolocation URL (default: `http://ip-api.com/json/`)
    /// - `SOS_CONSENT_TIMEOUT_SECS`: consent probe wait bound (default: 20)
    /// - `SOS_PACING_MS`: delay between channel launches (default: 900)
    /// - `SOS_REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `SOS_DATA_DIR`: store directory (default: "data")
    /// - `SOS_MESSAGE_TEMPLATE`: emergency message template
    /// - `LOG_LEVEL`: logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let geo_endpoint =
            env::var("SOS_GEO_ENDPOINT").unwrap_or_else(|_| DEFAULT_GEO_ENDPOINT.to_string());

        if !geo_endpoint.starts_with("http://") && !geo_endpoint.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "SOS_GEO_ENDPOINT".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let consent_timeout_secs = Self::parse_env_u64("SOS_CONSENT_TIMEOUT_SECS", 20)?;
        let pacing_ms = Self::parse_env_u64("SOS_PACING_MS", 900)?;
        let request_timeout = Self::parse_env_u64("SOS_REQUEST_TIMEOUT", 10)?;

        if consent_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                var: "SOS_CONSENT_TIMEOUT_SECS".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let data_dir = env::var("SOS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let message_template = env::var("SOS_MESSAGE_TEMPLATE")
            .unwrap_or_else(|_| DEFAULT_MESSAGE_TEMPLATE.to_string());

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            geo_endpoint,
            consent_timeout_secs,
            pacing_ms,
            request_timeout,
            data_dir,
            message_template,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            geo_endpoint: DEFAULT_GEO_ENDPOINT.to_string(),
            consent_timeout_secs: 20,
            pacing_ms: 900,
            request_timeout: 10,
            data_dir: PathBuf::from("data"),
            message_template: DEFAULT_MESSAGE_TEMPLATE.to_string(),
            log_level: "error".to_string(),
        }
    }
}
