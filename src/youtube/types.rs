//! Wire types for the YouTube Data API v3 responses we consume

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::{Candidate, ChannelSnapshot, Statistic};

/// `search.list` response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub id: SearchResultId,
    #[serde(default)]
    pub snippet: SearchSnippet,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultId {
    pub channel_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnippet {
    pub channel_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl SearchResult {
    /// Convert to a candidate; results without a channel ID are dropped
    pub fn into_candidate(self) -> Option<Candidate> {
        let id = self.id.channel_id.or(self.snippet.channel_id)?;
        Some(Candidate {
            id,
            title: self.snippet.title,
            short_description: self.snippet.description,
        })
    }
}

/// `channels.list` response
#[derive(Debug, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelResource>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelResource {
    pub id: String,
    #[serde(default)]
    pub snippet: ChannelSnippet,
    pub statistics: Option<ChannelStatistics>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub custom_url: Option<String>,
    #[serde(default, deserialize_with = "crate::models::timestamp::deserialize")]
    pub published_at: Option<DateTime<Utc>>,
    pub country: Option<String>,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
pub struct Thumbnails {
    pub high: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

/// Counts arrive as decimal strings and may be absent
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    pub subscriber_count: Option<String>,
    pub video_count: Option<String>,
    pub view_count: Option<String>,
    #[serde(default)]
    pub hidden_subscriber_count: bool,
}

impl From<ChannelResource> for ChannelSnapshot {
    fn from(resource: ChannelResource) -> Self {
        let stats = resource.statistics.unwrap_or_default();
        let subscriber_count = if stats.hidden_subscriber_count {
            Statistic::Unknown
        } else {
            Statistic::parse(stats.subscriber_count.as_deref())
        };

        Self {
            id: resource.id,
            title: resource.snippet.title,
            description: resource.snippet.description,
            custom_url: resource.snippet.custom_url.filter(|u| !u.is_empty()),
            published_at: resource.snippet.published_at,
            country: resource.snippet.country.filter(|c| !c.is_empty()),
            subscriber_count,
            video_count: Statistic::parse(stats.video_count.as_deref()),
            view_count: Statistic::parse(stats.view_count.as_deref()),
            thumbnail_url: resource.snippet.thumbnails.high.map(|t| t.url),
        }
    }
}
