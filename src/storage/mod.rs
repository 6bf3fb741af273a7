//! Channel catalog persistence and deduplication
//!
//! A catalog file is a JSON array of channel objects. In memory it is a map
//! keyed by channel ID, plus the first-seen order of those IDs so the
//! rewritten file keeps existing entries where they were.
//!
//! Only `channel_id` is required of a stored object. Fields that do not fit
//! [`ChannelRecord`] are left at their defaults for in-memory use, and the
//! object itself is kept so that saving writes it back exactly as it was read,
//! unknown keys included.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use tubescout::storage::ChannelCatalog;
//!
//! # fn example() -> tubescout::error::Result<()> {
//! let path = Path::new("youtube_channels_요리.json");
//! let catalog = ChannelCatalog::load(path);
//! let merged = catalog.merge(Vec::new());
//! ChannelCatalog::save(path, &merged)?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::ops::Deref;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::ChannelRecord;

/// Key every stored object must carry
const ID_KEY: &str = "channel_id";

/// One catalog element
///
/// Entries read from a file remember the object they came from and
/// serialize back to it unchanged; new entries serialize from the record.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    record: ChannelRecord,
    stored: Option<Map<String, Value>>,
}

impl CatalogEntry {
    pub fn record(&self) -> &ChannelRecord {
        &self.record
    }

    /// Whether this entry was read from a catalog file
    pub fn is_stored(&self) -> bool {
        self.stored.is_some()
    }

    /// Parse a stored object. `None` if it has no string `channel_id`.
    fn from_stored(object: Map<String, Value>) -> Option<Self> {
        let id = object
            .get(ID_KEY)
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())?
            .to_string();

        let record = match ChannelRecord::deserialize(&Value::Object(object.clone())) {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(channel_id = %id, error = %e, "Stored channel has unexpected fields");
                tolerant_record(id, &object)?
            }
        };

        Some(Self {
            record,
            stored: Some(object),
        })
    }
}

/// Build a record from the fields of `object` that parse; the rest default
fn tolerant_record(id: String, object: &Map<String, Value>) -> Option<ChannelRecord> {
    let mut usable = Map::new();
    usable.insert(ID_KEY.to_string(), Value::String(id));

    for (key, value) in object.iter().filter(|(key, _)| key.as_str() != ID_KEY) {
        usable.insert(key.clone(), value.clone());
        if ChannelRecord::deserialize(&Value::Object(usable.clone())).is_err() {
            usable.remove(key);
        }
    }

    ChannelRecord::deserialize(&Value::Object(usable)).ok()
}

impl From<ChannelRecord> for CatalogEntry {
    fn from(record: ChannelRecord) -> Self {
        Self {
            record,
            stored: None,
        }
    }
}

impl Deref for CatalogEntry {
    type Target = ChannelRecord;

    fn deref(&self) -> &ChannelRecord {
        &self.record
    }
}

impl AsRef<ChannelRecord> for CatalogEntry {
    fn as_ref(&self) -> &ChannelRecord {
        &self.record
    }
}

impl Serialize for CatalogEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match &self.stored {
            Some(object) => object.serialize(serializer),
            None => self.record.serialize(serializer),
        }
    }
}

/// Previously persisted channels, keyed by channel ID
#[derive(Debug, Clone, Default)]
pub struct ChannelCatalog {
    entries: HashMap<String, CatalogEntry>,
    order: Vec<String>,
}

/// Summary counts over a set of records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub total: usize,
    pub contactable: usize,
    pub domestic: usize,
    pub with_email: usize,
    pub with_phone: usize,
    pub with_messaging: usize,
    pub with_links: usize,
}

impl CatalogStats {
    /// Count over records or catalog entries
    pub fn from_records<R: AsRef<ChannelRecord>>(records: impl IntoIterator<Item = R>) -> Self {
        records
            .into_iter()
            .fold(Self::default(), |mut stats, record| {
                let record = record.as_ref();
                stats.total += 1;
                stats.contactable += usize::from(record.has_contact);
                stats.domestic += usize::from(record.is_domestic);
                stats.with_email += usize::from(record.email.is_some());
                stats.with_phone += usize::from(record.phone.is_some());
                stats.with_messaging += usize::from(record.messaging_handle.is_some());
                stats.with_links += usize::from(!record.auxiliary_links.is_empty());
                stats
            })
    }

    /// Contactable share, 0.0 ..= 1.0
    pub fn contactable_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.contactable as f64 / self.total as f64
    }
}

impl ChannelCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from records. A repeated ID replaces the earlier
    /// record but keeps the earlier position.
    pub fn from_records(records: impl IntoIterator<Item = ChannelRecord>) -> Self {
        let mut catalog = Self::new();
        for record in records {
            catalog.insert(CatalogEntry::from(record));
        }
        catalog
    }

    fn insert(&mut self, entry: CatalogEntry) {
        if !self.entries.contains_key(&entry.id) {
            self.order.push(entry.id.clone());
        }
        self.entries.insert(entry.id.clone(), entry);
    }

    /// Load a catalog file.
    ///
    /// A missing, unreadable or non-array file yields an empty catalog; a
    /// fresh run is a valid state. Elements without a `channel_id` are
    /// skipped, every other element is kept.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!(path = %path.display(), "No existing catalog, starting fresh");
            return Self::new();
        }

        match Self::read(path) {
            Ok(catalog) => {
                tracing::info!(
                    path = %path.display(),
                    channels = catalog.len(),
                    "Loaded existing catalog"
                );
                catalog
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to load catalog, starting fresh");
                Self::new()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let elements: Vec<Value> = serde_json::from_reader(BufReader::new(file))?;

        let mut catalog = Self::new();
        let mut skipped = 0usize;
        for element in elements {
            let entry = match element {
                Value::Object(object) => CatalogEntry::from_stored(object),
                _ => None,
            };
            match entry {
                Some(entry) => catalog.insert(entry),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::warn!(path = %path.display(), skipped, "Skipped catalog entries without channel_id");
        }
        Ok(catalog)
    }

    /// Check if a channel ID is already persisted
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Get a persisted record
    pub fn get(&self, id: &str) -> Option<&ChannelRecord> {
        self.entries.get(id).map(CatalogEntry::record)
    }

    /// Number of persisted channels
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Persisted entries in catalog order
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    /// Persisted records in catalog order
    pub fn records(&self) -> impl Iterator<Item = &ChannelRecord> {
        self.entries().map(CatalogEntry::record)
    }

    /// Existing entries followed by the new records, in that order.
    ///
    /// New records are appended as given. The crawl loop never accepts an ID
    /// twice, so a repeat here is only reported.
    pub fn merge(&self, new_records: Vec<ChannelRecord>) -> Vec<CatalogEntry> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(new_records.len());
        for record in &new_records {
            if self.contains(&record.id) || !seen.insert(record.id.as_str()) {
                tracing::warn!(channel_id = %record.id, "Duplicate channel ID in merged catalog");
            }
        }

        let mut merged: Vec<CatalogEntry> = self.entries().cloned().collect();
        merged.extend(new_records.into_iter().map(CatalogEntry::from));
        merged
    }

    /// Write entries (or plain records) to a catalog file, replacing it.
    ///
    /// Writes to a temp file first, then renames over the target.
    pub fn save<E: Serialize>(path: &Path, entries: &[E]) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = Path::new(&temp_name);

        let file = File::create(temp_path).map_err(|e| {
            Error::storage(format!("Failed to create {}", temp_path.display()), e)
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, entries)?;
        writer.flush()?;

        fs::rename(temp_path, path).map_err(|e| {
            Error::storage(format!("Failed to replace {}", path.display()), e)
        })?;

        tracing::info!(path = %path.display(), channels = entries.len(), "Catalog saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChannelSnapshot, ContactInfo};

    fn record(id: &str, title: &str) -> ChannelRecord {
        let snapshot = ChannelSnapshot {
            id: id.to_string(),
            title: title.to_string(),
            ..Default::default()
        };
        ChannelRecord::compose(snapshot, ContactInfo::default(), true)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = ChannelCatalog::load(&dir.path().join("none.json"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_malformed_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(ChannelCatalog::load(&path).is_empty());

        fs::write(&path, r#"{"channel_id": "UC1"}"#).unwrap();
        assert!(ChannelCatalog::load(&path).is_empty());
    }

    #[test]
    fn test_entries_without_id_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(
            &path,
            r#"[{"channel_id": "UC1"}, {"title": "no id"}, {"channel_id": 7}, "text"]"#,
        )
        .unwrap();

        let catalog = ChannelCatalog::load(&path);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("UC1"));
    }

    #[test]
    fn test_odd_fields_keep_the_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("odd.json");
        fs::write(
            &path,
            r#"[
                {"channel_id": "OLD1", "title": "kept", "note": "user field"},
                {"channel_id": "OLD2", "title": null, "subscriber_count": 1.5,
                 "published_at": 1588291200, "email": "old@chef.kr", "contactable": true}
            ]"#,
        )
        .unwrap();

        let catalog = ChannelCatalog::load(&path);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("OLD1").unwrap().title, "kept");

        let old2 = catalog.get("OLD2").unwrap();
        assert_eq!(old2.title, "");
        assert_eq!(old2.published_at, None);
        assert_eq!(old2.email.as_deref(), Some("old@chef.kr"));
        assert!(old2.has_contact);
        assert!(catalog.entries().all(CatalogEntry::is_stored));
    }

    #[test]
    fn test_stored_entries_are_written_back_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.json");
        let original = serde_json::json!([
            {"channel_id": "OLD1", "title": "kept", "note": "user field"},
            {"channel_id": "OLD2", "title": null, "subscriber_count": "1.2만"}
        ]);
        fs::write(&path, original.to_string()).unwrap();

        let catalog = ChannelCatalog::load(&path);
        let merged = catalog.merge(vec![record("UC9", "new")]);
        ChannelCatalog::save(&path, &merged).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written[0], original[0]);
        assert_eq!(written[1], original[1]);
        assert_eq!(written[2]["channel_id"], "UC9");
        assert_eq!(written[2]["email"], "N/A");
    }

    #[test]
    fn test_duplicate_id_overwrites_in_place() {
        let catalog = ChannelCatalog::from_records(vec![
            record("UC1", "first"),
            record("UC2", "second"),
            record("UC1", "replaced"),
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("UC1").unwrap().title, "replaced");
        let ids: Vec<&str> = catalog.records().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["UC1", "UC2"]);
    }

    #[test]
    fn test_merge_keeps_existing_then_new() {
        let catalog = ChannelCatalog::from_records(vec![record("UC1", "a"), record("UC2", "b")]);
        let merged = catalog.merge(vec![record("UC3", "c"), record("UC4", "d")]);

        let ids: Vec<&str> = merged.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["UC1", "UC2", "UC3", "UC4"]);
    }

    #[test]
    fn test_merge_does_not_dedup_new_records() {
        let catalog = ChannelCatalog::new();
        let merged = catalog.merge(vec![record("UC9", "x"), record("UC9", "x")]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("youtube_channels_test.json");

        let records = vec![record("UC1", "요리왕"), record("UC2", "게임왕")];
        ChannelCatalog::save(&path, &records).unwrap();

        let catalog = ChannelCatalog::load(&path);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("UC1"));
        assert_eq!(catalog.get("UC2").unwrap().title, "게임왕");

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("요리왕"), "non-ASCII text is written unescaped");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_catalog_stats() {
        let mut with_email = record("UC1", "a");
        with_email.email = Some("a@b.kr".to_string());
        with_email.has_contact = true;
        let mut foreign = record("UC2", "b");
        foreign.is_domestic = false;

        let stats = CatalogStats::from_records(&[with_email, foreign]);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.contactable, 1);
        assert_eq!(stats.domestic, 1);
        assert_eq!(stats.with_email, 1);
        assert!((stats.contactable_rate() - 0.5).abs() < f64::EPSILON);
    }
}
