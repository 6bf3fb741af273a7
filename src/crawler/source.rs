//! External collaborators the crawl depends on
//!
//! [`ChannelSearch`] answers paged keyword queries and [`ChannelDirectory`]
//! resolves a channel ID to its metadata. The production implementation of
//! both is [`crate::youtube::YouTubeClient`]; tests plug in scripted ones.

use async_trait::async_trait;
use std::sync::Arc;

use crate::models::{Candidate, ChannelSnapshot, SearchOrder};
use crate::utils::error::ApiError;

/// One paged channel search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub page_size: usize,
    pub order: SearchOrder,
    pub page_token: Option<String>,
}

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub candidates: Vec<Candidate>,
    pub next_page_token: Option<String>,
}

/// Paged channel search
#[async_trait]
pub trait ChannelSearch: Send + Sync {
    async fn search_channels(&self, query: &SearchQuery) -> Result<SearchPage, ApiError>;
}

/// Channel metadata lookup; `Ok(None)` when the ID no longer resolves
#[async_trait]
pub trait ChannelDirectory: Send + Sync {
    async fn channel_details(&self, id: &str) -> Result<Option<ChannelSnapshot>, ApiError>;
}

#[async_trait]
impl<T: ChannelSearch + ?Sized> ChannelSearch for Arc<T> {
    async fn search_channels(&self, query: &SearchQuery) -> Result<SearchPage, ApiError> {
        (**self).search_channels(query).await
    }
}

#[async_trait]
impl<T: ChannelDirectory + ?Sized> ChannelDirectory for Arc<T> {
    async fn channel_details(&self, id: &str) -> Result<Option<ChannelSnapshot>, ApiError> {
        (**self).channel_details(id).await
    }
}
