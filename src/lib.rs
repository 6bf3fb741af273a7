//! tubescout - YouTube channel collector
//!
//! Finds channels by keyword, pulls contact details out of their
//! descriptions, keeps Korean channels with at least one contact channel and
//! accumulates them into a deduplicated JSON catalog.
//!
//! # Architecture
//!
//! - [`config`] - Configuration management and settings
//! - [`crawler`] - Search pagination, detail enrichment and the crawl loop
//! - [`extract`] - Contact extraction and locale classification
//! - [`models`] - Core data structures and types
//! - [`storage`] - Catalog persistence and deduplication
//! - [`youtube`] - YouTube Data API client
//! - [`keywords`] - Keyword list reading and catalog naming
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tubescout::config::Config;
//! use tubescout::crawler::{CrawlOrchestrator, CrawlRequest};
//! use tubescout::storage::ChannelCatalog;
//! use tubescout::youtube::YouTubeClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     config.validate()?;
//!
//!     let client = Arc::new(YouTubeClient::from_config(&config)?);
//!     let orchestrator = CrawlOrchestrator::new(client.clone(), client);
//!
//!     let path = std::path::Path::new("youtube_channels_요리.json");
//!     let catalog = ChannelCatalog::load(path);
//!     let report = orchestrator.crawl(&CrawlRequest::new("요리", 10), &catalog).await;
//!     ChannelCatalog::save(path, &catalog.merge(report.records))?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crawler;
pub mod error;
pub mod extract;
pub mod keywords;
pub mod models;
pub mod storage;
pub mod utils;
pub mod youtube;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::crawler::{CrawlOrchestrator, CrawlReport, CrawlRequest, StopReason};
    pub use crate::error::{Error, ErrorCategory, Result, TubescoutErrorTrait};
    pub use crate::models::{Candidate, ChannelRecord, ContactInfo, SearchOrder, Statistic};
    pub use crate::storage::ChannelCatalog;
    pub use crate::youtube::YouTubeClient;
}

// Direct re-exports for convenience
pub use models::{Candidate, ChannelRecord, ContactInfo, SearchOrder};
