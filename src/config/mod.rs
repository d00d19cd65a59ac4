//! Configuration management for the comment downloader
//!
//! This module handles loading and validating configuration from environment variables,
//! files, and command-line arguments.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::utils::retry::RetryConfig;

/// Default site root
pub const DEFAULT_BASE_URL: &str = "https://www.youtube.com";

/// Default client version reported to the pagination endpoint
pub const DEFAULT_CLIENT_VERSION: &str = "2.20201202.06.01";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Downloader configuration
    #[serde(default)]
    pub downloader: DownloaderConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Downloader-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloaderConfig {
    /// Site root for both the watch page and the pagination endpoint
    pub base_url: String,

    /// Cookie domain used when accepting the consent interstitial
    pub consent_domain: String,

    /// User agent string (a browser agent is picked when unset)
    pub user_agent: Option<String>,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Idle delay between pagination requests in milliseconds
    pub page_delay_ms: u64,

    /// Total attempts per pagination request
    pub max_attempts: u32,

    /// Fixed delay between attempts in milliseconds
    pub retry_delay_ms: u64,

    /// Client version header value
    pub client_version: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            consent_domain: String::from(".youtube.com"),
            user_agent: None,
            request_timeout_secs: 30,
            page_delay_ms: 100,
            max_attempts: 5,
            retry_delay_ms: 20_000,
            client_version: String::from(DEFAULT_CLIENT_VERSION),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse::<T>().ok())
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = DownloaderConfig::default();

        let base_url = std::env::var("YTC_BASE_URL").unwrap_or(defaults.base_url);

        let consent_domain =
            std::env::var("YTC_CONSENT_DOMAIN").unwrap_or(defaults.consent_domain);

        let user_agent = std::env::var("YTC_USER_AGENT").ok();

        let request_timeout_secs =
            env_parse("YTC_REQUEST_TIMEOUT").unwrap_or(defaults.request_timeout_secs);

        let page_delay_ms = env_parse("YTC_PAGE_DELAY_MS").unwrap_or(defaults.page_delay_ms);

        let max_attempts = env_parse("YTC_MAX_ATTEMPTS").unwrap_or(defaults.max_attempts);

        let retry_delay_ms = env_parse("YTC_RETRY_DELAY_MS").unwrap_or(defaults.retry_delay_ms);

        let client_version =
            std::env::var("YTC_CLIENT_VERSION").unwrap_or(defaults.client_version);

        let log_level = std::env::var("YTC_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let log_format = std::env::var("YTC_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            downloader: DownloaderConfig {
                base_url,
                consent_domain,
                user_agent,
                request_timeout_secs,
                page_delay_ms,
                max_attempts,
                retry_delay_ms,
                client_version,
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.downloader.max_attempts == 0 {
            anyhow::bail!("max_attempts must be greater than 0");
        }

        if self.downloader.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        Url::parse(&self.downloader.base_url)
            .with_context(|| format!("Invalid base_url: {}", self.downloader.base_url))?;

        if self.downloader.client_version.trim().is_empty() {
            anyhow::bail!("client_version must not be empty");
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.downloader.request_timeout_secs)
    }

    /// Get inter-page delay as Duration
    #[must_use]
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.downloader.page_delay_ms)
    }

    /// Retry policy for pagination requests
    #[must_use]
    pub fn retry(&self) -> RetryConfig {
        RetryConfig::with_delay(self.downloader.max_attempts, self.downloader.retry_delay_ms)
    }
}
