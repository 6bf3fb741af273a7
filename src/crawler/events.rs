//! Crawl progress events
//!
//! The crawl loop reports what it does through a [`CrawlObserver`] instead
//! of printing. [`TracingObserver`] is the default and turns every event
//! into a structured `tracing` record.

use crate::crawler::orchestrator::CrawlReport;
use crate::models::{Candidate, ChannelRecord, SearchOrder};

/// Why a fetched channel was not kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterReason {
    /// Not classified as a Korean channel
    NotDomestic,
    /// No contact channel found in the description
    NoContact,
}

impl FilterReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotDomestic => "not_domestic",
            Self::NoContact => "no_contact",
        }
    }
}

/// Something the crawl loop did
#[derive(Debug)]
pub enum CrawlEvent<'a> {
    Started {
        query: &'a str,
        target: usize,
        order: &'a SearchOrder,
        known: usize,
    },
    SearchAttempt {
        attempt: u32,
        page_size: usize,
        collected: usize,
    },
    PageFetched {
        attempt: u32,
        candidates: usize,
        has_next_page: bool,
    },
    Duplicate {
        candidate: &'a Candidate,
    },
    DetailUnavailable {
        candidate: &'a Candidate,
    },
    Filtered {
        record: &'a ChannelRecord,
        reason: FilterReason,
    },
    Accepted {
        record: &'a ChannelRecord,
        collected: usize,
        target: usize,
    },
    Finished {
        report: &'a CrawlReport,
    },
}

/// Receives crawl events
pub trait CrawlObserver: Send + Sync {
    fn on_event(&self, event: &CrawlEvent<'_>);
}

/// Logs crawl events through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CrawlObserver for TracingObserver {
    fn on_event(&self, event: &CrawlEvent<'_>) {
        match event {
            CrawlEvent::Started {
                query,
                target,
                order,
                known,
            } => {
                tracing::info!(
                    query,
                    target,
                    order = order.korean_label(),
                    known,
                    "Starting channel crawl"
                );
            }
            CrawlEvent::SearchAttempt {
                attempt,
                page_size,
                collected,
            } => {
                if *attempt > 1 {
                    tracing::info!(attempt, page_size, collected, "Searching for more channels");
                } else {
                    tracing::debug!(attempt, page_size, "Searching channels");
                }
            }
            CrawlEvent::PageFetched {
                attempt,
                candidates,
                has_next_page,
            } => {
                tracing::info!(attempt, candidates, has_next_page, "Search page fetched");
            }
            CrawlEvent::Duplicate { candidate } => {
                tracing::debug!(channel_id = %candidate.id, title = %candidate.title, "Skipping known channel");
            }
            CrawlEvent::DetailUnavailable { candidate } => {
                tracing::debug!(channel_id = %candidate.id, "Channel details unavailable");
            }
            CrawlEvent::Filtered { record, reason } => {
                tracing::debug!(
                    channel_id = %record.id,
                    title = %record.title,
                    reason = reason.as_str(),
                    "Channel filtered out"
                );
            }
            CrawlEvent::Accepted {
                record,
                collected,
                target,
            } => {
                tracing::info!(
                    channel_id = %record.id,
                    title = %record.title,
                    subscribers = %record.subscriber_count,
                    videos = %record.video_count,
                    contact = %record.contact().summary().join(", "),
                    collected,
                    target,
                    "Channel collected"
                );
            }
            CrawlEvent::Finished { report } => {
                let stats = &report.stats;
                tracing::info!(
                    query = %report.query,
                    collected = report.records.len(),
                    target = report.target,
                    duplicates = stats.duplicates,
                    locale_filtered = stats.locale_filtered,
                    contact_filtered = stats.contact_filtered,
                    unavailable = stats.unavailable,
                    attempts = stats.attempts,
                    stop_reason = report.stop_reason.as_str(),
                    "Channel crawl finished"
                );
                if report.shortfall() > 0 {
                    tracing::warn!(
                        query = %report.query,
                        shortfall = report.shortfall(),
                        "Target not reached"
                    );
                }
            }
        }
    }
}
