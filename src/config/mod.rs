//! Configuration management for tubescout
//!
//! This module handles loading and validating configuration from environment variables
//! (including a `.env` file) and TOML files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::SearchOrder;

/// Placeholder API key shipped in the sample `.env`
pub const PLACEHOLDER_API_KEY: &str = "YOUR_ACTUAL_API_KEY_HERE";

/// Default YouTube Data API endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// YouTube API configuration
    pub api: ApiConfig,

    /// Collection configuration
    pub crawler: CrawlerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// YouTube Data API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API key (YOUTUBE_API_KEY)
    #[serde(default)]
    pub api_key: String,

    /// API base URL
    pub base_url: String,

    /// Rate limit (requests per second)
    pub rate_limit: u32,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Collection-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// New channels to collect per keyword
    pub target_per_keyword: usize,

    /// Keep only Korean channels
    pub domestic_only: bool,

    /// Keep only channels with contact information
    pub contactable_only: bool,

    /// Search order (relevance, date, viewCount)
    pub order: String,

    /// Append to the existing catalog instead of starting fresh
    pub update_mode: bool,

    /// Pause between keywords in seconds
    pub keyword_delay_secs: u64,

    /// Keyword list file
    pub keywords_file: PathBuf,

    /// Directory catalog files are written to
    pub output_dir: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let api_key = std::env::var("YOUTUBE_API_KEY").unwrap_or_default();

        let base_url = std::env::var("TUBESCOUT_API_BASE_URL")
            .unwrap_or_else(|_| String::from(DEFAULT_API_BASE_URL));

        let rate_limit = std::env::var("TUBESCOUT_RATE_LIMIT")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.api.rate_limit);

        let request_timeout_secs = std::env::var("TUBESCOUT_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.api.request_timeout_secs);

        let target_per_keyword = std::env::var("TUBESCOUT_TARGET")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.crawler.target_per_keyword);

        let order =
            std::env::var("TUBESCOUT_ORDER").unwrap_or_else(|_| defaults.crawler.order.clone());

        let output_dir = std::env::var("TUBESCOUT_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| defaults.crawler.output_dir.clone());

        let log_level =
            std::env::var("TUBESCOUT_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let log_format =
            std::env::var("TUBESCOUT_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            api: ApiConfig {
                api_key,
                base_url,
                rate_limit,
                request_timeout_secs,
            },
            crawler: CrawlerConfig {
                target_per_keyword,
                order,
                output_dir,
                ..defaults.crawler
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    ///
    /// An empty `api_key` in the file is filled from `YOUTUBE_API_KEY`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        if config.api.api_key.is_empty() {
            let _ = dotenvy::dotenv();
            config.api.api_key = std::env::var("YOUTUBE_API_KEY").unwrap_or_default();
        }

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let key = self.api.api_key.trim();
        if key.is_empty() || key == PLACEHOLDER_API_KEY {
            anyhow::bail!(
                "YOUTUBE_API_KEY is not set; add YOUTUBE_API_KEY=<your key> to the .env file"
            );
        }

        if self.api.rate_limit == 0 {
            anyhow::bail!("rate_limit must be greater than 0");
        }

        if self.crawler.target_per_keyword == 0 {
            anyhow::bail!("target_per_keyword must be greater than 0");
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    /// Get inter-keyword delay as Duration
    #[must_use]
    pub fn keyword_delay(&self) -> Duration {
        Duration::from_secs(self.crawler.keyword_delay_secs)
    }

    /// Parsed search order
    #[must_use]
    pub fn search_order(&self) -> SearchOrder {
        SearchOrder::parse(&self.crawler.order)
    }
}

impl LoggingConfig {
    /// `EnvFilter` directives for the configured level
    ///
    /// Dependencies log at `warn`, or at `info` when the crate itself is at
    /// `debug` or `trace`.
    pub fn filter_directives(&self) -> String {
        let level = self.level.trim().to_lowercase();
        let others = if level == "debug" || level == "trace" {
            "info"
        } else {
            "warn"
        };
        format!("tubescout={level},{others}")
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                api_key: String::new(),
                base_url: String::from(DEFAULT_API_BASE_URL),
                rate_limit: 5,
                request_timeout_secs: 30,
            },
            crawler: CrawlerConfig {
                target_per_keyword: 50,
                domestic_only: true,
                contactable_only: true,
                order: String::from("relevance"),
                update_mode: true,
                keyword_delay_secs: 2,
                keywords_file: PathBuf::from("keywords.txt"),
                output_dir: PathBuf::from("."),
            },
            logging: LoggingConfig::default(),
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

#[cfg(test)]
mod tests {
    use super::*;

    fn with_key(key: &str) -> Config {
        let mut config = Config::default();
        config.api.api_key = key.to_string();
        config
    }

    #[test]
    fn test_configured_key_is_valid() {
        assert!(with_key("AIzaSyTestKey").validate().is_ok());
    }

    #[test]
    fn test_missing_key_rejected() {
        assert!(Config::default().validate().is_err());
        assert!(with_key("   ").validate().is_err());
    }

    #[test]
    fn test_placeholder_key_rejected() {
        assert!(with_key(PLACEHOLDER_API_KEY).validate().is_err());
    }

    #[test]
    fn test_zero_target_rejected() {
        let mut config = with_key("AIzaSyTestKey");
        config.crawler.target_per_keyword = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_durations() {
        let config = Config::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.keyword_delay(), Duration::from_secs(2));
        assert_eq!(config.search_order(), SearchOrder::Relevance);
    }

    #[test]
    fn test_logging_directives() {
        let mut logging = Config::default().logging;
        assert_eq!(logging.filter_directives(), "tubescout=info,warn");
        assert!(!logging.is_json());

        logging.level = String::from("DEBUG");
        logging.format = String::from("json");
        assert_eq!(logging.filter_directives(), "tubescout=debug,info");
        assert!(logging.is_json());
    }

    #[test]
    fn test_logging_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tubescout.toml");
        let mut config = with_key("AIzaFromFile");
        config.logging.level = String::from("trace");
        config.logging.format = String::from("json");
        std::fs::write(&path, toml::to_string(&config).unwrap()).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.logging.filter_directives(), "tubescout=trace,info");
        assert!(loaded.logging.is_json());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tubescout.toml");
        let text = toml::to_string(&with_key("AIzaFromFile")).unwrap();
        std::fs::write(&path, text).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.api.api_key, "AIzaFromFile");
        assert_eq!(loaded.crawler.target_per_keyword, 50);
        assert!(loaded.validate().is_ok());
    }
}
