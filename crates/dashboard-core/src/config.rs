//! Configuration for dashboard operations

use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for dashboard operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// NewsAPI key (required for the news feed, unused by the prediction flow)
    pub news_api_key: Option<String>,

    /// Request timeout duration for HTTP clients
    pub request_timeout: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            news_api_key: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl DashboardConfig {
    /// Create a new configuration builder
    pub fn builder() -> DashboardConfigBuilder {
        DashboardConfigBuilder::default()
    }

    /// Load configuration from the process environment.
    ///
    /// Reads `NEWS_API_KEY`, after loading a local `.env` file if one exists.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        if let Ok(key) = std::env::var("NEWS_API_KEY") {
            config.news_api_key = Some(key);
        }
        config
    }

    /// Get the news API key, failing fast when it is not configured.
    ///
    /// Callers must invoke this before building a news request so a missing
    /// credential surfaces as a configuration error, not a request failure.
    pub fn news_api_key(&self) -> Result<&str> {
        self.news_api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                DashboardError::ConfigError(
                    "NEWS_API_KEY is not set; the news feed requires a NewsAPI key".to_string(),
                )
            })
    }
}

/// Builder for DashboardConfig
#[derive(Debug, Default)]
pub struct DashboardConfigBuilder {
    news_api_key: Option<String>,
    request_timeout: Option<Duration>,
}

impl DashboardConfigBuilder {
    /// Set the news API key
    pub fn news_api_key(mut self, key: impl Into<String>) -> Self {
        self.news_api_key = Some(key.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Build the configuration
    pub fn build(self) -> DashboardConfig {
        let defaults = DashboardConfig::default();

        DashboardConfig {
            news_api_key: self.news_api_key,
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
        }
    }
}
