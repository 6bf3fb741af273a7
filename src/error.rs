//! Unified error handling for the tubescout crate
//!
//! Domain-specific errors are wrapped in a single [`Error`] enum so they can
//! cross module boundaries while keeping their detail.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tubescout::error::{Error, TubescoutErrorTrait};
//!
//! fn handle_error(err: Error) {
//!     tracing::error!(
//!         category = err.category().as_str(),
//!         recoverable = err.is_recoverable(),
//!         "{}",
//!         err.korean_desc()
//!     );
//! }
//! ```

use std::io;
use thiserror::Error;

pub use crate::utils::error::ApiError;

/// Common trait for all tubescout error types
pub trait TubescoutErrorTrait: std::error::Error {
    /// Check if this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Korean description for user-facing messages
    fn korean_desc(&self) -> String;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout, quota)
    Network,
    /// Response or catalog decoding errors
    Parsing,
    /// File system errors
    Storage,
}

impl ErrorCategory {
    /// Get Korean description for the category
    pub fn korean_desc(&self) -> &'static str {
        match self {
            Self::Network => "네트워크 오류",
            Self::Parsing => "파싱 오류",
            Self::Storage => "저장소 오류",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Parsing => "parsing",
            Self::Storage => "storage",
        }
    }
}

/// Unified error type for the tubescout crate
#[derive(Error, Debug)]
pub enum Error {
    /// YouTube API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File operation failed on a known path
    #[error("{context}")]
    Storage {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl TubescoutErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Api(e) => e.is_recoverable(),
            Self::Io(_) | Self::Storage { .. } => true, // I/O errors are often transient
            Self::Json(_) => false,
        }
    }

    fn korean_desc(&self) -> String {
        match self {
            Self::Api(e) => e.korean_desc().to_string(),
            Self::Io(e) => format!("입출력 오류: {e}"),
            Self::Json(e) => format!("JSON 오류: {e}"),
            Self::Storage { context, source } => format!("파일 오류: {context} ({source})"),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Api(ApiError::Decode(_)) | Self::Json(_) => ErrorCategory::Parsing,
            Self::Api(_) => ErrorCategory::Network,
            Self::Io(_) | Self::Storage { .. } => ErrorCategory::Storage,
        }
    }
}

impl Error {
    /// Create a file error that names the path involved
    pub fn storage(context: impl Into<String>, source: io::Error) -> Self {
        Self::Storage {
            context: context.into(),
            source,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
