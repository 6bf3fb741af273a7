//! Channel collection
//!
//! - [`source`] - search and detail collaborator traits
//! - [`paginator`] - paged search that degrades failures to "no results"
//! - [`detail`] - per-channel enrichment with contact and locale heuristics
//! - [`orchestrator`] - the quota-seeking crawl loop
//! - [`events`] - progress events and observers

pub mod detail;
pub mod events;
pub mod orchestrator;
pub mod paginator;
pub mod source;

pub use detail::DetailFetcher;
pub use events::{CrawlEvent, CrawlObserver, FilterReason, TracingObserver};
pub use orchestrator::{
    CollectionStats, CrawlOrchestrator, CrawlReport, CrawlRequest, StopReason,
    MAX_SEARCH_ATTEMPTS,
};
pub use paginator::{SearchPaginator, MAX_PAGE_SIZE};
pub use source::{ChannelDirectory, ChannelSearch, SearchPage, SearchQuery};
