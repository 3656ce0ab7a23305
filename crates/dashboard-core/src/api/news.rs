//! NewsAPI client for ticker headlines

use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const BASE_URL: &str = "https://newsapi.org/v2/everything";

/// Source attribution on a news article
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsSource {
    #[serde(default)]
    pub name: String,
}

/// One news article. Every field is defaulted so a payload with missing
/// fields parses rather than failing the whole response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsArticle {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "publishedAt")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source: NewsSource,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<NewsArticle>,
}

/// NewsAPI client for the `/v2/everything` search endpoint
#[derive(Debug, Clone)]
pub struct NewsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NewsClient {
    /// Create a new client from configuration.
    ///
    /// Fails fast with a configuration error when no API key is set, before
    /// any request is attempted.
    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        let api_key = config.news_api_key()?.to_string();
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(DashboardError::NetworkError)?;

        Ok(Self {
            client,
            api_key,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Search articles mentioning `query` (typically the raw symbol string).
    ///
    /// No pagination: a single page of results is returned as-is.
    pub async fn everything(&self, query: &str) -> Result<Vec<NewsArticle>> {
        let mut params = HashMap::new();
        params.insert("q", query);
        params.insert("apiKey", self.api_key.as_str());

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| DashboardError::ApiError(format!("News request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DashboardError::ApiError(format!(
                "News API error {status}: {body}"
            )));
        }

        let parsed: NewsResponse = response
            .json()
            .await
            .map_err(|e| DashboardError::ApiError(format!("Failed to parse news response: {e}")))?;

        Ok(parsed.articles)
    }
}
