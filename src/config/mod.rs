//! Configuration module for the travel console.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;

/// Base URL used when `TRAVEL_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://travel-app-backend-u2tw.vercel.app/api";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the catalog REST backend
    pub api_url: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Currency code used when formatting prices
    pub price_currency: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = env::var("TRAVEL_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let log_level = env::var("TRAVEL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let price_currency =
            env::var("TRAVEL_PRICE_CURRENCY").unwrap_or_else(|_| "USD".to_string());

        Self {
            api_url,
            log_level,
            price_currency,
        }
    }

    /// Configuration pointing at an explicit backend, with defaults elsewhere.
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            log_level: "info".to_string(),
            price_currency: "USD".to_string(),
        }
    }
}
