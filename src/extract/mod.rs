//! Text heuristics that decide filter outcomes
//!
//! - [`contact`] - email, phone, KakaoTalk ID and link extraction
//! - [`locale`] - Korean channel classification

pub mod contact;
pub mod locale;

pub use contact::{extract, ContactField};
pub use locale::{contains_hangul, is_domestic, DOMESTIC_COUNTRY};
