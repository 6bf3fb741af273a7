//! Keyword list reading and per-keyword catalog naming

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::utils::sanitize_filename;

/// Catalog filename prefix
pub const CATALOG_PREFIX: &str = "youtube_channels_";

/// Catalog filename suffix
pub const CATALOG_SUFFIX: &str = ".json";

/// Maximum characters of the keyword kept in a filename
pub const MAX_KEYWORD_CHARS: usize = 50;

/// Written when the keyword file does not exist yet
pub const SAMPLE_KEYWORDS: &str = "파이썬\n요리\n게임\n";

/// Read keywords, one per line; blank lines are skipped and lines trimmed
pub fn read_keywords(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::storage(format!("Failed to read {}", path.display()), e))?;

    Ok(parse_keywords(&content))
}

/// Split keyword text into trimmed, non-empty lines
pub fn parse_keywords(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Write a sample keyword file so the user has something to edit
pub fn write_sample(path: &Path) -> Result<()> {
    fs::write(path, SAMPLE_KEYWORDS)?;
    tracing::info!(path = %path.display(), "Wrote sample keyword file");
    Ok(())
}

/// Catalog filename for a keyword.
///
/// Path-unsafe characters are stripped, spaces become underscores and the
/// result is cut to [`MAX_KEYWORD_CHARS`] characters.
pub fn catalog_filename(keyword: &str) -> String {
    let safe: String = sanitize_filename(keyword)
        .replace(' ', "_")
        .chars()
        .take(MAX_KEYWORD_CHARS)
        .collect();

    format!("{CATALOG_PREFIX}{safe}{CATALOG_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keywords() {
        let keywords = parse_keywords("파이썬\n\n  요리  \n\t\n게임");
        assert_eq!(keywords, vec!["파이썬", "요리", "게임"]);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_keywords(&dir.path().join("keywords.txt")).is_err());
    }

    #[test]
    fn test_sample_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keywords.txt");
        write_sample(&path).unwrap();
        assert_eq!(read_keywords(&path).unwrap(), vec!["파이썬", "요리", "게임"]);
    }

    #[test]
    fn test_catalog_filename() {
        assert_eq!(catalog_filename("요리"), "youtube_channels_요리.json");
        assert_eq!(
            catalog_filename("korean cooking: tips?"),
            "youtube_channels_korean_cooking_tips.json"
        );
    }

    #[test]
    fn test_catalog_filename_truncates_by_chars() {
        let long = "가".repeat(80);
        let name = catalog_filename(&long);
        let keyword = name
            .trim_start_matches(CATALOG_PREFIX)
            .trim_end_matches(CATALOG_SUFFIX);
        assert_eq!(keyword.chars().count(), MAX_KEYWORD_CHARS);
    }
}
