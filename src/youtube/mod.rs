//! YouTube Data API v3 client
//!
//! Implements [`ChannelSearch`] and [`ChannelDirectory`] over HTTP with
//! rate limiting. Failed calls are not retried; the crawl loop decides what
//! a failure means.

pub mod types;

use async_trait::async_trait;
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::time::Duration;
use url::Url;

use crate::config::Config;
use crate::crawler::source::{ChannelDirectory, ChannelSearch, SearchPage, SearchQuery};
use crate::models::ChannelSnapshot;
use crate::utils::error::ApiError;
use types::{ChannelListResponse, SearchListResponse, SearchResult};

/// Resource parts requested from `channels.list`
const CHANNEL_PARTS: &str = "snippet,statistics";

/// YouTube Data API client
pub struct YouTubeClient {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// API key sent with every request
    api_key: String,

    /// API base URL, overridable for mock servers
    base_url: String,

    /// Rate limiter to control request frequency
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl YouTubeClient {
    /// Create a client against the default endpoint
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be created
    pub fn new(api_key: &str, requests_per_second: u32) -> Result<Self, ApiError> {
        Self::with_config(
            crate::config::DEFAULT_API_BASE_URL,
            api_key,
            requests_per_second,
            Duration::from_secs(30),
        )
    }

    /// Create a client from the application configuration
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be created
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::with_config(
            &config.api.base_url,
            &config.api.api_key,
            config.api.rate_limit,
            config.request_timeout(),
        )
    }

    /// Create a client with a custom base URL, e.g. for testing
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be created
    pub fn with_base_url(
        base_url: &str,
        api_key: &str,
        requests_per_second: u32,
    ) -> Result<Self, ApiError> {
        Self::with_config(base_url, api_key, requests_per_second, Duration::from_secs(30))
    }

    /// Create a client with full control over endpoint and limits
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be created
    pub fn with_config(
        base_url: &str,
        api_key: &str,
        requests_per_second: u32,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(format!("tubescout/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .gzip(true)
            .build()?;

        let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(rate));

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            rate_limiter,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a GET against an API resource and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let raw_url = format!("{}/{resource}", self.base_url);
        let url = Url::parse(&raw_url).map_err(|_| ApiError::InvalidUrl(raw_url.clone()))?;

        self.rate_limiter.until_ready().await;

        tracing::debug!(resource, "Calling YouTube API");

        let response = self
            .client
            .get(url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ApiError::Timeout
                } else {
                    ApiError::Http(e)
                }
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ChannelSearch for YouTubeClient {
    async fn search_channels(&self, query: &SearchQuery) -> Result<SearchPage, ApiError> {
        let mut params = vec![
            ("part", "id,snippet".to_string()),
            ("type", "channel".to_string()),
            ("q", query.query.clone()),
            ("maxResults", query.page_size.to_string()),
            ("order", query.order.as_str().to_string()),
        ];
        if let Some(token) = &query.page_token {
            params.push(("pageToken", token.clone()));
        }

        let response: SearchListResponse = self.get_json("search", &params).await?;

        Ok(SearchPage {
            candidates: response
                .items
                .into_iter()
                .filter_map(SearchResult::into_candidate)
                .collect(),
            next_page_token: response.next_page_token.filter(|t| !t.is_empty()),
        })
    }
}

#[async_trait]
impl ChannelDirectory for YouTubeClient {
    async fn channel_details(&self, id: &str) -> Result<Option<ChannelSnapshot>, ApiError> {
        let params = [("part", CHANNEL_PARTS.to_string()), ("id", id.to_string())];

        let response: ChannelListResponse = self.get_json("channels", &params).await?;

        Ok(response.items.into_iter().next().map(ChannelSnapshot::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = YouTubeClient::new("AIzaTest", 5);
        assert!(client.is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = YouTubeClient::with_base_url("http://localhost:8080/", "k", 5).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_zero_rate_falls_back_to_one() {
        assert!(YouTubeClient::with_base_url("http://localhost:8080", "k", 0).is_ok());
    }
}
