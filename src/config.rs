//! Connector configuration
//!
//! `ConnectorConfig` is the externally-supplied configuration surface shared
//! by every connector: base address, optional credential, rate-limit quota,
//! retry cap, and request timeout.

use crate::error::{Error, Result};
use crate::types::OptionStringExt;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

fn default_rate_limit_calls() -> u32 {
    60
}

fn default_rate_limit_period() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    3
}

fn default_timeout() -> u64 {
    30
}

/// Configuration for a connector
///
/// Recognized options and their defaults:
///
/// | field               | default | meaning                          |
/// |---------------------|---------|----------------------------------|
/// | `base_url`          | —       | required, prefix for endpoints   |
/// | `api_key`           | none    | presence enables auth injection  |
/// | `rate_limit_calls`  | 60      | calls allowed per period         |
/// | `rate_limit_period` | 60      | sliding window length in seconds |
/// | `max_retries`       | 3       | total attempts per request       |
/// | `timeout`           | 30      | per-request timeout in seconds   |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// Base URL for all requests
    pub base_url: String,

    /// Optional API credential
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Calls allowed within one rate-limit period
    #[serde(default = "default_rate_limit_calls")]
    pub rate_limit_calls: u32,

    /// Rate-limit window length in seconds
    #[serde(default = "default_rate_limit_period")]
    pub rate_limit_period: u64,

    /// Attempt cap per request, the first attempt included
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl ConnectorConfig {
    /// Create a config for the given base URL with default limits
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            rate_limit_calls: default_rate_limit_calls(),
            rate_limit_period: default_rate_limit_period(),
            max_retries: default_max_retries(),
            timeout: default_timeout(),
        }
    }

    /// Set the API credential
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the rate-limit quota: `calls` per `period_seconds`
    #[must_use]
    pub fn with_rate_limit(mut self, calls: u32, period_seconds: u64) -> Self {
        self.rate_limit_calls = calls;
        self.rate_limit_period = period_seconds;
        self
    }

    /// Set the retry cap
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the per-request timeout in seconds
    #[must_use]
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout = timeout_seconds;
        self
    }

    /// Validate the configuration
    ///
    /// Invariants: the base URL parses, quota >= 1, window > 0, timeout > 0.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url)?;
        if self.rate_limit_calls < 1 {
            return Err(Error::invalid_value(
                "rate_limit_calls",
                "must be at least 1",
            ));
        }
        if self.rate_limit_period == 0 {
            return Err(Error::invalid_value(
                "rate_limit_period",
                "must be greater than zero",
            ));
        }
        if self.timeout == 0 {
            return Err(Error::invalid_value("timeout", "must be greater than zero"));
        }
        Ok(())
    }

    /// The configured credential, treating an empty string as absent
    pub fn auth_key(&self) -> Option<String> {
        self.api_key.clone().none_if_empty()
    }

    /// Rate-limit window length as a Duration
    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_period)
    }

    /// Per-request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
