//! Paged channel search
//!
//! Wraps a [`ChannelSearch`] collaborator. A failed search is logged and
//! reported as an empty page with no continuation token, which the crawl
//! loop reads as "no more results".

use crate::crawler::source::{ChannelSearch, SearchPage, SearchQuery};
use crate::models::SearchOrder;

/// Largest page the search endpoint accepts
pub const MAX_PAGE_SIZE: usize = 50;

/// Issues paged search queries
pub struct SearchPaginator<S> {
    source: S,
}

impl<S: ChannelSearch> SearchPaginator<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch one page of channel candidates.
    ///
    /// `page_size` is clamped to [`MAX_PAGE_SIZE`].
    pub async fn search(
        &self,
        query: &str,
        page_size: usize,
        order: &SearchOrder,
        page_token: Option<&str>,
    ) -> SearchPage {
        let request = SearchQuery {
            query: query.to_string(),
            page_size: page_size.min(MAX_PAGE_SIZE),
            order: order.clone(),
            page_token: page_token.map(String::from),
        };

        match self.source.search_channels(&request).await {
            Ok(page) => {
                tracing::debug!(
                    query,
                    order = order.korean_label(),
                    found = page.candidates.len(),
                    continued = page_token.is_some(),
                    "Channel search returned"
                );
                page
            }
            Err(e) => {
                tracing::warn!(
                    query,
                    error = %e,
                    kind = e.korean_desc(),
                    recoverable = e.is_recoverable(),
                    "Channel search failed"
                );
                SearchPage::default()
            }
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Candidate;
    use crate::utils::error::ApiError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSearch {
        fail: bool,
        requests: Mutex<Vec<SearchQuery>>,
    }

    #[async_trait]
    impl ChannelSearch for RecordingSearch {
        async fn search_channels(&self, query: &SearchQuery) -> Result<SearchPage, ApiError> {
            self.requests.lock().unwrap().push(query.clone());
            if self.fail {
                return Err(ApiError::ServerError(500));
            }
            Ok(SearchPage {
                candidates: vec![Candidate {
                    id: "UC1".to_string(),
                    title: "one".to_string(),
                    short_description: String::new(),
                }],
                next_page_token: Some("next".to_string()),
            })
        }
    }

    #[tokio::test]
    async fn test_page_size_clamped() {
        let paginator = SearchPaginator::new(RecordingSearch::default());
        paginator
            .search("요리", 120, &SearchOrder::Relevance, None)
            .await;
        paginator.search("요리", 8, &SearchOrder::Date, Some("tok")).await;

        let requests = paginator.source().requests.lock().unwrap();
        assert_eq!(requests[0].page_size, MAX_PAGE_SIZE);
        assert_eq!(requests[1].page_size, 8);
        assert_eq!(requests[1].page_token.as_deref(), Some("tok"));
        assert_eq!(requests[1].order, SearchOrder::Date);
    }

    #[tokio::test]
    async fn test_unknown_order_passed_through() {
        let paginator = SearchPaginator::new(RecordingSearch::default());
        paginator
            .search("요리", 10, &SearchOrder::parse("rating"), None)
            .await;

        let requests = paginator.source().requests.lock().unwrap();
        assert_eq!(requests[0].order.as_str(), "rating");
    }

    #[tokio::test]
    async fn test_failure_is_end_of_results() {
        let paginator = SearchPaginator::new(RecordingSearch {
            fail: true,
            ..Default::default()
        });
        let page = paginator
            .search("요리", 10, &SearchOrder::Relevance, Some("tok"))
            .await;

        assert!(page.candidates.is_empty());
        assert!(page.next_page_token.is_none());
    }
}
