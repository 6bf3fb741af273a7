//! Contact information extraction from channel descriptions
//!
//! Extraction is driven by an ordered table of `(field, pattern)` rules.
//! Rules are evaluated top to bottom and the first rule that matches fills its
//! field; later rules for an already-filled field are skipped. Only the first
//! match of the winning rule is kept.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::ContactInfo;

/// Maximum number of auxiliary links kept per channel
pub const MAX_AUXILIARY_LINKS: usize = 3;

/// Domains of the hosting platform and major social networks
pub const EXCLUDED_LINK_DOMAINS: &[&str] = &[
    "youtube.com",
    "youtu.be",
    "instagram.com",
    "twitter.com",
    "facebook.com",
    "x.com",
];

/// Contact field a rule fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Email,
    Phone,
    MessagingHandle,
}

/// Extraction rules in priority order.
///
/// Phone: standard 010 mobile, other 01x mobile prefixes, +82 form.
/// Messaging: Korean label, then English label. A capture group, when
/// present, is the extracted value.
const CONTACT_RULES: &[(ContactField, &str)] = &[
    (
        ContactField::Email,
        r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}",
    ),
    (ContactField::Phone, r"010[-\s]?\d{4}[-\s]?\d{4}"),
    (ContactField::Phone, r"01[016789][-\s]?\d{3,4}[-\s]?\d{4}"),
    (ContactField::Phone, r"\+82[-\s]?10[-\s]?\d{4}[-\s]?\d{4}"),
    (
        ContactField::MessagingHandle,
        r"(?i)카카오톡?[:\s]+([a-zA-Z0-9_-]+)",
    ),
    (
        ContactField::MessagingHandle,
        r"(?i)kakao(?:talk)?[:\s]+([a-zA-Z0-9_-]+)",
    ),
];

const LINK_PATTERN: &str = r#"https?://[^\s<>"\)]+|www\.[^\s<>"\)]+"#;

fn compiled_rules() -> &'static [(ContactField, Regex)] {
    static RULES: OnceLock<Vec<(ContactField, Regex)>> = OnceLock::new();

    RULES.get_or_init(|| {
        CONTACT_RULES
            .iter()
            .map(|(field, pattern)| {
                (*field, Regex::new(pattern).expect("Invalid contact pattern"))
            })
            .collect()
    })
}

fn link_regex() -> &'static Regex {
    static LINK_RE: OnceLock<Regex> = OnceLock::new();

    LINK_RE.get_or_init(|| Regex::new(LINK_PATTERN).expect("Invalid regex pattern"))
}

/// Extract contact channels from free text.
///
/// Empty input yields an empty [`ContactInfo`].
pub fn extract(text: &str) -> ContactInfo {
    let mut info = ContactInfo::default();
    if text.is_empty() {
        return info;
    }

    for (field, regex) in compiled_rules() {
        let slot = match field {
            ContactField::Email => &mut info.email,
            ContactField::Phone => &mut info.phone,
            ContactField::MessagingHandle => &mut info.messaging_handle,
        };
        if slot.is_some() {
            continue;
        }

        if let Some(caps) = regex.captures(text) {
            let value = caps.get(1).or_else(|| caps.get(0));
            *slot = value.map(|m| m.as_str().to_string());
        }
    }

    info.auxiliary_links = extract_links(text);
    info
}

/// Same as [`extract`], treating `None` as empty text
pub fn extract_optional(text: Option<&str>) -> ContactInfo {
    extract(text.unwrap_or_default())
}

/// Collect up to [`MAX_AUXILIARY_LINKS`] non-platform URLs
fn extract_links(text: &str) -> Vec<String> {
    link_regex()
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|link| !is_excluded_link(link))
        .take(MAX_AUXILIARY_LINKS)
        .map(String::from)
        .collect()
}

/// Whether a link mentions the platform itself or a major social network
/// anywhere in it (host, path or query). Matching is case-insensitive.
pub fn is_excluded_link(link: &str) -> bool {
    let lowered = link.to_lowercase();
    EXCLUDED_LINK_DOMAINS
        .iter()
        .any(|domain| lowered.contains(domain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let info = extract("");
        assert_eq!(info, ContactInfo::default());
        assert!(!info.has_contact());

        assert_eq!(extract_optional(None), ContactInfo::default());
    }

    #[test]
    fn test_first_email_wins() {
        let info = extract("비즈니스 문의 biz@cook.kr 또는 second@cook.kr");
        assert_eq!(info.email.as_deref(), Some("biz@cook.kr"));
    }

    #[test]
    fn test_standard_mobile_beats_international() {
        let info = extract("해외: +82 10 9999 8888 / 국내: 010-1234-5678");
        assert_eq!(info.phone.as_deref(), Some("010-1234-5678"));
    }

    #[test]
    fn test_other_mobile_prefix() {
        let info = extract("연락처 011-234-5678");
        assert_eq!(info.phone.as_deref(), Some("011-234-5678"));
    }

    #[test]
    fn test_international_form_when_alone() {
        let info = extract("call +82-10-1234-5678");
        assert_eq!(info.phone.as_deref(), Some("+82-10-1234-5678"));
    }

    #[test]
    fn test_kakao_korean_label() {
        let info = extract("카카오톡: cook_kim");
        assert_eq!(info.messaging_handle.as_deref(), Some("cook_kim"));
    }

    #[test]
    fn test_kakao_english_label_case_insensitive() {
        let info = extract("KakaoTalk: chef-lee");
        assert_eq!(info.messaging_handle.as_deref(), Some("chef-lee"));

        let info = extract("KAKAO cheflee");
        assert_eq!(info.messaging_handle.as_deref(), Some("cheflee"));
    }

    #[test]
    fn test_korean_label_has_priority() {
        let info = extract("kakao: english_id 카카오 korean_id");
        assert_eq!(info.messaging_handle.as_deref(), Some("korean_id"));
    }

    #[test]
    fn test_link_exclusion() {
        let info = extract(
            "구독 https://www.youtube.com/@chef 블로그 https://blog.naver.com/chef",
        );
        assert_eq!(info.auxiliary_links, vec!["https://blog.naver.com/chef"]);
    }

    #[test]
    fn test_links_limited_to_three_in_order() {
        let info = extract(
            "https://a.kr https://instagram.com/me www.b.kr https://c.kr https://d.kr",
        );
        assert_eq!(
            info.auxiliary_links,
            vec!["https://a.kr", "www.b.kr", "https://c.kr"]
        );
    }

    #[test]
    fn test_link_stops_at_delimiters() {
        let info = extract(r#"(https://shop.kr/item) <a href="https://blog.kr">"#);
        assert_eq!(info.auxiliary_links, vec!["https://shop.kr/item", "https://blog.kr"]);
    }

    #[test]
    fn test_excluded_domains() {
        assert!(is_excluded_link("https://youtu.be/abc"));
        assert!(is_excluded_link("https://m.facebook.com/page"));
        assert!(is_excluded_link("www.instagram.com/me"));
        assert!(is_excluded_link("https://x.com/me"));
        assert!(is_excluded_link("HTTPS://WWW.YOUTUBE.COM/@Chef"));
        assert!(!is_excluded_link("https://smartstore.naver.com/shop"));
    }

    #[test]
    fn test_domain_anywhere_in_link_is_excluded() {
        assert!(is_excluded_link("https://linktr.ee/chef?ref=youtube.com"));
        // Any host ending in x.com contains the domain too
        assert!(is_excluded_link("https://netflix.com/title"));

        let info = extract(
            "https://linktr.ee/chef?ref=youtube.com https://netflix.com/title https://blog.kr",
        );
        assert_eq!(info.auxiliary_links, vec!["https://blog.kr"]);
        assert!(info.has_contact());
    }

    #[test]
    fn test_fields_are_independent() {
        let info = extract("mail: a@b.co, phone 010 1111 2222, kakao: abc, site www.abc.kr");
        assert_eq!(info.email.as_deref(), Some("a@b.co"));
        assert_eq!(info.phone.as_deref(), Some("010 1111 2222"));
        assert_eq!(info.messaging_handle.as_deref(), Some("abc"));
        assert_eq!(info.auxiliary_links, vec!["www.abc.kr"]);
    }
}
