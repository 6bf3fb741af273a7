//! Common test utilities: scripted collaborators and channel fixtures

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tubescout::crawler::{
    ChannelDirectory, ChannelSearch, CrawlEvent, CrawlObserver, SearchPage, SearchQuery,
};
use tubescout::error::ApiError;
use tubescout::models::{Candidate, ChannelSnapshot, Statistic};

/// Create a search candidate
pub fn candidate(id: &str) -> Candidate {
    Candidate {
        id: id.to_string(),
        title: format!("Channel {id}"),
        short_description: String::new(),
    }
}

/// Create a page of candidates
pub fn page(ids: &[&str], next_page_token: Option<&str>) -> SearchPage {
    SearchPage {
        candidates: ids.iter().map(|id| candidate(id)).collect(),
        next_page_token: next_page_token.map(String::from),
    }
}

/// Create channel metadata
pub fn snapshot(id: &str, country: Option<&str>, title: &str, description: &str) -> ChannelSnapshot {
    ChannelSnapshot {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        custom_url: Some(format!("@{}", id.to_lowercase())),
        published_at: None,
        country: country.map(String::from),
        subscriber_count: Statistic::Count(1000),
        video_count: Statistic::Count(10),
        view_count: Statistic::Unknown,
        thumbnail_url: None,
    }
}

/// Korean channel with an email address in its description
pub fn contactable_korean(id: &str) -> ChannelSnapshot {
    snapshot(
        id,
        Some("KR"),
        "집밥 요리",
        &format!("협찬 문의 {}@example.com", id.to_lowercase()),
    )
}

/// The four channels of the cooking scenario:
/// A (Korean, email), B (foreign), C (Korean, no contact), D (Korean, phone)
pub fn cooking_directory() -> MapDirectory {
    MapDirectory::new(vec![
        snapshot("A", Some("KR"), "백종원 요리", "문의: chef.a@example.com"),
        snapshot("B", Some("US"), "Cooking with Bob", "hello, I cook pasta"),
        snapshot("C", Some("KR"), "요리하는 C", "맛있는 요리를 만듭니다"),
        snapshot("D", None, "D의 부엌", "연락처 010-1234-5678"),
    ])
}

/// Serves a fixed sequence of pages, then empty pages
#[derive(Default)]
pub struct ScriptedSearch {
    pages: Vec<SearchPage>,
    pub requests: Mutex<Vec<SearchQuery>>,
}

impl ScriptedSearch {
    pub fn new(pages: Vec<SearchPage>) -> Self {
        Self {
            pages,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<SearchQuery> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChannelSearch for ScriptedSearch {
    async fn search_channels(&self, query: &SearchQuery) -> Result<SearchPage, ApiError> {
        let mut requests = self.requests.lock().unwrap();
        let index = requests.len();
        requests.push(query.clone());
        Ok(self.pages.get(index).cloned().unwrap_or_default())
    }
}

/// Returns `page_size` never-seen candidates on every call
#[derive(Default)]
pub struct UnlimitedSearch {
    next_id: AtomicUsize,
    pub calls: AtomicUsize,
}

#[async_trait]
impl ChannelSearch for UnlimitedSearch {
    async fn search_channels(&self, query: &SearchQuery) -> Result<SearchPage, ApiError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let start = self.next_id.fetch_add(query.page_size, Ordering::SeqCst);
        Ok(SearchPage {
            candidates: (start..start + query.page_size)
                .map(|n| candidate(&format!("UC{n:06}")))
                .collect(),
            next_page_token: Some(format!("page-{}", call + 2)),
        })
    }
}

/// Always fails
pub struct FailingSearch;

#[async_trait]
impl ChannelSearch for FailingSearch {
    async fn search_channels(&self, _query: &SearchQuery) -> Result<SearchPage, ApiError> {
        Err(ApiError::QuotaExceeded)
    }
}

/// Looks channels up in a fixed map; unknown IDs resolve to nothing
pub struct MapDirectory {
    channels: HashMap<String, ChannelSnapshot>,
    pub lookups: Mutex<Vec<String>>,
}

impl MapDirectory {
    pub fn new(channels: Vec<ChannelSnapshot>) -> Self {
        Self {
            channels: channels.into_iter().map(|c| (c.id.clone(), c)).collect(),
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChannelDirectory for MapDirectory {
    async fn channel_details(&self, id: &str) -> Result<Option<ChannelSnapshot>, ApiError> {
        self.lookups.lock().unwrap().push(id.to_string());
        Ok(self.channels.get(id).cloned())
    }
}

/// Makes up metadata for any ID
pub struct GeneratedDirectory {
    pub domestic: bool,
}

#[async_trait]
impl ChannelDirectory for GeneratedDirectory {
    async fn channel_details(&self, id: &str) -> Result<Option<ChannelSnapshot>, ApiError> {
        Ok(Some(if self.domestic {
            contactable_korean(id)
        } else {
            snapshot(id, Some("US"), "Foreign", "contact: foreign@example.com")
        }))
    }
}

/// Keeps a short label for every event
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl CrawlObserver for RecordingObserver {
    fn on_event(&self, event: &CrawlEvent<'_>) {
        let label = match event {
            CrawlEvent::Started { .. } => "started".to_string(),
            CrawlEvent::SearchAttempt { attempt, .. } => format!("search:{attempt}"),
            CrawlEvent::PageFetched { candidates, .. } => format!("page:{candidates}"),
            CrawlEvent::Duplicate { candidate } => format!("duplicate:{}", candidate.id),
            CrawlEvent::DetailUnavailable { candidate } => format!("unavailable:{}", candidate.id),
            CrawlEvent::Filtered { record, reason } => {
                format!("filtered:{}:{}", record.id, reason.as_str())
            }
            CrawlEvent::Accepted { record, .. } => format!("accepted:{}", record.id),
            CrawlEvent::Finished { report } => format!("finished:{}", report.stop_reason.as_str()),
        };
        self.events.lock().unwrap().push(label);
    }
}
