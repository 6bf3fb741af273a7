//! Quota-seeking collection loop
//!
//! Repeatedly searches, skips known channels, enriches the rest and keeps
//! the ones that pass the locale and contact filters until the target count
//! is met or the search runs dry.
//!
//! Each attempt requests twice the remaining need (capped at the page
//! maximum) to absorb attrition from duplicates and filters. The loop stops
//! on the first of: target reached, [`MAX_SEARCH_ATTEMPTS`] used, an empty
//! page, or a page without a continuation token. Falling short of the target
//! is reported, not an error.
//!
//! All calls are awaited one at a time; candidates are processed in the
//! order the search returned them.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;

use crate::crawler::detail::DetailFetcher;
use crate::crawler::events::{CrawlEvent, CrawlObserver, FilterReason, TracingObserver};
use crate::crawler::paginator::{SearchPaginator, MAX_PAGE_SIZE};
use crate::crawler::source::{ChannelDirectory, ChannelSearch};
use crate::models::{ChannelRecord, SearchOrder};
use crate::storage::ChannelCatalog;

/// Maximum search rounds per crawl
pub const MAX_SEARCH_ATTEMPTS: u32 = 10;

/// Requested page size as a multiple of the remaining need
pub const OVERFETCH_FACTOR: usize = 2;

/// Parameters of one crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    pub query: String,
    /// Number of new channels to collect
    pub target: usize,
    pub domestic_only: bool,
    pub contactable_only: bool,
    pub order: SearchOrder,
}

impl CrawlRequest {
    /// Request with both filters on and relevance order
    pub fn new(query: impl Into<String>, target: usize) -> Self {
        Self {
            query: query.into(),
            target,
            domestic_only: true,
            contactable_only: true,
            order: SearchOrder::Relevance,
        }
    }

    #[must_use]
    pub fn with_order(mut self, order: SearchOrder) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn domestic_only(mut self, enabled: bool) -> Self {
        self.domestic_only = enabled;
        self
    }

    #[must_use]
    pub fn contactable_only(mut self, enabled: bool) -> Self {
        self.contactable_only = enabled;
        self
    }
}

/// Why the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    TargetReached,
    AttemptsExhausted,
    /// A search page came back empty (or the search failed)
    NoResults,
    /// The last page had no continuation token
    NoMorePages,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TargetReached => "target_reached",
            Self::AttemptsExhausted => "attempts_exhausted",
            Self::NoResults => "no_results",
            Self::NoMorePages => "no_more_pages",
        }
    }
}

/// Counters kept during a crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionStats {
    /// Candidates already in the catalog or collected earlier in this run
    pub duplicates: usize,
    pub locale_filtered: usize,
    pub contact_filtered: usize,
    /// Candidates whose details could not be fetched
    pub unavailable: usize,
    /// Search rounds issued
    pub attempts: u32,
    /// Candidates examined
    pub examined: usize,
}

/// Outcome of one crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub query: String,
    pub target: usize,
    /// Newly collected channels, in acceptance order
    pub records: Vec<ChannelRecord>,
    pub stats: CollectionStats,
    pub stop_reason: StopReason,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// How many channels short of the target the crawl ended
    pub fn shortfall(&self) -> usize {
        self.target.saturating_sub(self.records.len())
    }

    pub fn is_complete(&self) -> bool {
        self.shortfall() == 0
    }
}

/// Transient per-crawl state
struct CollectionState {
    target: usize,
    accumulated: Vec<ChannelRecord>,
    accepted_ids: HashSet<String>,
    stats: CollectionStats,
    page_token: Option<String>,
}

impl CollectionState {
    fn new(target: usize) -> Self {
        Self {
            target,
            accumulated: Vec::with_capacity(target),
            accepted_ids: HashSet::with_capacity(target),
            stats: CollectionStats::default(),
            page_token: None,
        }
    }

    fn target_reached(&self) -> bool {
        self.accumulated.len() >= self.target
    }

    fn remaining(&self) -> usize {
        self.target.saturating_sub(self.accumulated.len())
    }

    fn accept(&mut self, candidate_id: &str, record: ChannelRecord) {
        self.accepted_ids.insert(candidate_id.to_string());
        self.accepted_ids.insert(record.id.clone());
        self.accumulated.push(record);
    }
}

/// Drives search, dedup, enrichment and filtering
pub struct CrawlOrchestrator<S, D> {
    paginator: SearchPaginator<S>,
    fetcher: DetailFetcher<D>,
    observer: Arc<dyn CrawlObserver>,
}

impl<S: ChannelSearch, D: ChannelDirectory> CrawlOrchestrator<S, D> {
    /// Create an orchestrator that reports through [`TracingObserver`]
    pub fn new(search: S, directory: D) -> Self {
        Self {
            paginator: SearchPaginator::new(search),
            fetcher: DetailFetcher::new(directory),
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the progress observer
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn CrawlObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Collect up to `request.target` channels not already in `catalog`
    pub async fn crawl(&self, request: &CrawlRequest, catalog: &ChannelCatalog) -> CrawlReport {
        let started_at = Utc::now();
        let mut state = CollectionState::new(request.target);

        self.emit(CrawlEvent::Started {
            query: &request.query,
            target: request.target,
            order: &request.order,
            known: catalog.len(),
        });

        let stop_reason = loop {
            if state.target_reached() {
                break StopReason::TargetReached;
            }
            if state.stats.attempts >= MAX_SEARCH_ATTEMPTS {
                break StopReason::AttemptsExhausted;
            }
            state.stats.attempts += 1;

            let page_size = (state.remaining() * OVERFETCH_FACTOR).min(MAX_PAGE_SIZE);
            self.emit(CrawlEvent::SearchAttempt {
                attempt: state.stats.attempts,
                page_size,
                collected: state.accumulated.len(),
            });

            let page = self
                .paginator
                .search(
                    &request.query,
                    page_size,
                    &request.order,
                    state.page_token.as_deref(),
                )
                .await;

            if page.candidates.is_empty() {
                break StopReason::NoResults;
            }

            self.emit(CrawlEvent::PageFetched {
                attempt: state.stats.attempts,
                candidates: page.candidates.len(),
                has_next_page: page.next_page_token.is_some(),
            });
            state.page_token = page.next_page_token;

            for candidate in &page.candidates {
                if state.target_reached() {
                    break;
                }
                state.stats.examined += 1;

                if catalog.contains(&candidate.id) || state.accepted_ids.contains(&candidate.id) {
                    state.stats.duplicates += 1;
                    self.emit(CrawlEvent::Duplicate { candidate });
                    continue;
                }

                let Some(record) = self.fetcher.fetch_detail(&candidate.id).await else {
                    state.stats.unavailable += 1;
                    self.emit(CrawlEvent::DetailUnavailable { candidate });
                    continue;
                };

                if request.domestic_only && !record.is_domestic {
                    state.stats.locale_filtered += 1;
                    self.emit(CrawlEvent::Filtered {
                        record: &record,
                        reason: FilterReason::NotDomestic,
                    });
                    continue;
                }

                if request.contactable_only && !record.has_contact {
                    state.stats.contact_filtered += 1;
                    self.emit(CrawlEvent::Filtered {
                        record: &record,
                        reason: FilterReason::NoContact,
                    });
                    continue;
                }

                state.accept(&candidate.id, record);
                if let Some(accepted) = state.accumulated.last() {
                    self.emit(CrawlEvent::Accepted {
                        record: accepted,
                        collected: state.accumulated.len(),
                        target: state.target,
                    });
                }
            }

            if state.target_reached() {
                break StopReason::TargetReached;
            }
            if state.page_token.is_none() {
                break StopReason::NoMorePages;
            }
        };

        let report = CrawlReport {
            query: request.query.clone(),
            target: request.target,
            records: state.accumulated,
            stats: state.stats,
            stop_reason,
            started_at,
            finished_at: Utc::now(),
        };
        self.emit(CrawlEvent::Finished { report: &report });
        report
    }

    fn emit(&self, event: CrawlEvent<'_>) {
        self.observer.on_event(&event);
    }
}
