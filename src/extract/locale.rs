//! Korean locale classification

/// Country code treated as domestic
pub const DOMESTIC_COUNTRY: &str = "KR";

/// Check if text contains a precomposed Hangul syllable (U+AC00..=U+D7A3)
pub fn contains_hangul(text: &str) -> bool {
    text.chars().any(|c| ('\u{AC00}'..='\u{D7A3}').contains(&c))
}

/// Classify a channel as domestic.
///
/// True if the declared country is [`DOMESTIC_COUNTRY`], or the description
/// or title contains Hangul.
pub fn is_domestic(declared_country: Option<&str>, description: &str, title: &str) -> bool {
    declared_country == Some(DOMESTIC_COUNTRY)
        || contains_hangul(description)
        || contains_hangul(title)
}
