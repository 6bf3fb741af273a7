//! Channel detail enrichment

use crate::crawler::source::ChannelDirectory;
use crate::extract::{contact, locale};
use crate::models::{ChannelRecord, ChannelSnapshot};

/// Resolves candidate IDs into full channel records
pub struct DetailFetcher<D> {
    directory: D,
}

impl<D: ChannelDirectory> DetailFetcher<D> {
    #[must_use]
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Fetch and enrich one channel.
    ///
    /// Returns `None` when the channel no longer exists or the lookup
    /// failed; both are logged here and the caller just skips the channel.
    pub async fn fetch_detail(&self, id: &str) -> Option<ChannelRecord> {
        match self.directory.channel_details(id).await {
            Ok(Some(snapshot)) => Some(enrich(snapshot)),
            Ok(None) => {
                tracing::warn!(channel_id = %id, "Channel not found");
                None
            }
            Err(e) => {
                tracing::warn!(
                    channel_id = %id,
                    error = %e,
                    kind = e.korean_desc(),
                    recoverable = e.is_recoverable(),
                    "Failed to fetch channel details"
                );
                None
            }
        }
    }
}

/// Attach extracted contact info and the locale classification
pub fn enrich(snapshot: ChannelSnapshot) -> ChannelRecord {
    let contact = contact::extract(&snapshot.description);
    let is_domestic = locale::is_domestic(
        snapshot.country.as_deref(),
        &snapshot.description,
        &snapshot.title,
    );
    ChannelRecord::compose(snapshot, contact, is_domestic)
}
