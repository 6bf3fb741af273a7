// Core data structures for tubescout

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Placeholder written to the catalog for values the platform did not provide
pub const NOT_AVAILABLE: &str = "N/A";

/// Base URL for canonical and alias channel links
pub const CHANNEL_BASE_URL: &str = "https://www.youtube.com";

/// Lightweight search-result stub, consumed before detail enrichment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub title: String,
    pub short_description: String,
}

/// Contact channels pulled out of a channel description
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    /// KakaoTalk ID
    pub messaging_handle: Option<String>,
    /// At most three non-platform links, in order of appearance
    pub auxiliary_links: Vec<String>,
}

impl ContactInfo {
    /// True if at least one contact channel was found
    pub fn has_contact(&self) -> bool {
        self.email.is_some()
            || self.phone.is_some()
            || self.messaging_handle.is_some()
            || !self.auxiliary_links.is_empty()
    }

    /// Human-readable list of the found contact channels
    pub fn summary(&self) -> Vec<String> {
        let mut methods = Vec::new();
        if let Some(email) = &self.email {
            methods.push(format!("이메일: {email}"));
        }
        if let Some(phone) = &self.phone {
            methods.push(format!("전화: {phone}"));
        }
        if let Some(handle) = &self.messaging_handle {
            methods.push(format!("카톡: {handle}"));
        }
        if !self.auxiliary_links.is_empty() {
            methods.push(format!("링크: {}", self.auxiliary_links.join(", ")));
        }
        methods
    }
}

/// A channel statistic the platform may withhold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Statistic {
    Count(u64),
    #[default]
    Unknown,
}

impl Statistic {
    /// Parse the decimal string form the API uses
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|v| v.trim().parse::<u64>().ok())
            .map_or(Self::Unknown, Self::Count)
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Unknown => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for Statistic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Statistic {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Number(n)) => Self::Count(n),
            Some(Raw::Text(text)) => Self::parse(Some(&text)),
            None => Self::Unknown,
        })
    }
}

/// Sort order for channel search
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchOrder {
    #[default]
    Relevance,
    /// Most recent first
    Date,
    /// Most viewed first
    ViewCount,
    /// Passed to the API verbatim
    Other(String),
}

impl SearchOrder {
    /// Parse an order name; unknown names are kept as-is
    pub fn parse(s: &str) -> Self {
        match s {
            "relevance" => Self::Relevance,
            "date" | "recency" => Self::Date,
            "viewCount" | "popularity" => Self::ViewCount,
            other => Self::Other(other.to_string()),
        }
    }

    /// Value of the API `order` parameter
    pub fn as_str(&self) -> &str {
        match self {
            Self::Relevance => "relevance",
            Self::Date => "date",
            Self::ViewCount => "viewCount",
            Self::Other(raw) => raw,
        }
    }

    /// Get Korean label
    pub fn korean_label(&self) -> &str {
        match self {
            Self::Relevance => "관련성순",
            Self::Date => "최신순",
            Self::ViewCount => "조회수순",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for SearchOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw channel metadata as returned by the detail collaborator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelSnapshot {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Handle such as `@cookingkim`
    pub custom_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub country: Option<String>,
    pub subscriber_count: Statistic,
    pub video_count: Statistic,
    pub view_count: Statistic,
    pub thumbnail_url: Option<String>,
}

/// Persisted channel entry
///
/// Field names follow the catalog files written by earlier versions of the
/// collector, so existing catalogs load unchanged. Only `channel_id` is
/// required when reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRecord {
    #[serde(rename = "channel_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub custom_url: String,
    #[serde(default, with = "timestamp")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, with = "not_available")]
    pub country: Option<String>,
    #[serde(default, rename = "is_korean")]
    pub is_domestic: bool,

    #[serde(default)]
    pub subscriber_count: Statistic,
    #[serde(default)]
    pub video_count: Statistic,
    #[serde(default)]
    pub view_count: Statistic,

    #[serde(default)]
    pub channel_url: String,
    #[serde(default)]
    pub custom_channel_url: String,

    #[serde(default, with = "not_available")]
    pub email: Option<String>,
    #[serde(default, with = "not_available")]
    pub phone: Option<String>,
    #[serde(default, rename = "kakao", with = "not_available")]
    pub messaging_handle: Option<String>,
    #[serde(default, rename = "other_links", with = "joined_links")]
    pub auxiliary_links: Vec<String>,
    #[serde(default, rename = "contactable")]
    pub has_contact: bool,

    #[serde(default, rename = "thumbnail")]
    pub thumbnail_url: String,
}

impl ChannelRecord {
    /// Compose a record from raw metadata and the derived fields
    pub fn compose(snapshot: ChannelSnapshot, contact: ContactInfo, is_domestic: bool) -> Self {
        let has_contact = contact.has_contact();
        let custom_url = snapshot.custom_url.unwrap_or_default();
        let custom_channel_url = if custom_url.is_empty() {
            String::new()
        } else {
            format!("{CHANNEL_BASE_URL}/{custom_url}")
        };

        Self {
            channel_url: format!("{CHANNEL_BASE_URL}/channel/{}", snapshot.id),
            id: snapshot.id,
            title: snapshot.title,
            description: snapshot.description,
            custom_url,
            published_at: snapshot.published_at,
            country: snapshot.country,
            is_domestic,
            subscriber_count: snapshot.subscriber_count,
            video_count: snapshot.video_count,
            view_count: snapshot.view_count,
            custom_channel_url,
            email: contact.email,
            phone: contact.phone,
            messaging_handle: contact.messaging_handle,
            auxiliary_links: contact.auxiliary_links,
            has_contact,
            thumbnail_url: snapshot.thumbnail_url.unwrap_or_default(),
        }
    }

    /// Contact fields of this record
    pub fn contact(&self) -> ContactInfo {
        ContactInfo {
            email: self.email.clone(),
            phone: self.phone.clone(),
            messaging_handle: self.messaging_handle.clone(),
            auxiliary_links: self.auxiliary_links.clone(),
        }
    }
}

impl AsRef<ChannelRecord> for ChannelRecord {
    fn as_ref(&self) -> &ChannelRecord {
        self
    }
}

/// `Option<String>` stored as the value or `"N/A"`
mod not_available {
    use super::NOT_AVAILABLE;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(NOT_AVAILABLE))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.filter(|v| !v.is_empty() && v != NOT_AVAILABLE))
    }
}

/// Link list stored as a `", "`-joined string or `"N/A"`
mod joined_links {
    use super::NOT_AVAILABLE;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(links: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        if links.is_empty() {
            serializer.serialize_str(NOT_AVAILABLE)
        } else {
            serializer.serialize_str(&links.join(", "))
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Joined(String),
            List(Vec<String>),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Joined(text)) if text != NOT_AVAILABLE => text
                .split(", ")
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            Some(Raw::List(list)) => list,
            _ => Vec::new(),
        })
    }
}

/// RFC 3339 timestamp; missing, non-string or unparseable values load as `None`
pub(crate) mod timestamp {
    use super::{SecondsFormat, NOT_AVAILABLE};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            None => serializer.serialize_str(NOT_AVAILABLE),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(raw.as_ref().and_then(serde_json::Value::as_str).and_then(|v| {
            DateTime::parse_from_rfc3339(v)
                .ok()
                .map(|ts| ts.with_timezone(&Utc))
        }))
    }
}
