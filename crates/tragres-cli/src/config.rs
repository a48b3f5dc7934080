//! Configuration management for the Tragres CLI
//!
//! Settings come from the environment (optionally seeded from a `.env`
//! file) and can be overridden by command-line flags.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// CLI Configuration Constants
// ============================================================================

/// API base URL used when `TRAGRES_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the student API, without a trailing slash
    pub api_url: String,

    /// Per-request timeout; `None` waits for as long as the server takes
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: normalize_url(api_url.into()),
            timeout_secs: None,
        }
    }

    /// Load config from environment variables
    ///
    /// - `TRAGRES_API_URL`: API base URL
    /// - `TRAGRES_API_TIMEOUT_SECS`: optional request timeout in seconds
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var("TRAGRES_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let mut config = Self::new(api_url);

        if let Ok(raw) = std::env::var("TRAGRES_API_TIMEOUT_SECS") {
            config.timeout_secs = Some(parse_timeout(&raw)?);
        }

        Ok(config)
    }

    /// Replace the API URL, e.g. with a command-line flag
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = normalize_url(api_url.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

fn normalize_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_timeout(raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(CliError::config(format!(
            "TRAGRES_API_TIMEOUT_SECS must be a positive number of seconds, got '{}'",
            raw
        ))),
    }
}
