//! services/reader/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::time::Duration;

use quran_browser_core::pagination::DEFAULT_PAGE_SIZE;
use tracing::Level;

/// Public Quran JSON API used when `QURAN_API_BASE` is not set.
pub const DEFAULT_API_BASE: &str = "https://quranapi.pages.dev/api";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// Base path of the remote JSON resources, without a trailing slash.
    pub quran_api_base: String,
    pub page_size: NonZeroUsize,
    pub http_timeout: Duration,
    pub cors_origin: String,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // --- Server Settings ---
        let bind_address_str = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let cors_origin =
            lookup("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:3000".to_string());

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Remote API Settings ---
        let quran_api_base = lookup("QURAN_API_BASE")
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();
        if quran_api_base.is_empty() {
            return Err(ConfigError::InvalidValue(
                "QURAN_API_BASE".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let http_timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| {
                    ConfigError::InvalidValue(
                        "HTTP_TIMEOUT_SECS".to_string(),
                        format!("'{}' is not a positive number of seconds", raw),
                    )
                })?,
            None => Duration::from_secs(30),
        };

        // --- Pagination ---
        let page_size = match lookup("PAGE_SIZE") {
            Some(raw) => raw.parse::<NonZeroUsize>().map_err(|_| {
                ConfigError::InvalidValue(
                    "PAGE_SIZE".to_string(),
                    format!("'{}' is not a positive integer", raw),
                )
            })?,
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            bind_address,
            quran_api_base,
            page_size,
            http_timeout,
            cors_origin,
            log_level,
        })
    }
}
