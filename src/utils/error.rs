//! Error types for the YouTube collaborators
//!
//! These errors never abort a crawl: the paginator and detail fetcher
//! log them and degrade to an empty result.

use thiserror::Error;

/// Errors that can occur while talking to the YouTube Data API
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Daily quota for the API key is used up
    #[error("API quota exceeded")]
    QuotaExceeded,

    /// Too many requests in a short period
    #[error("Rate limited by API")]
    RateLimited,

    /// Server error with status code
    #[error("Server error: {0}")]
    ServerError(u16),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Response body did not match the expected shape
    #[error("Decoding error: {0}")]
    Decode(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Map a non-success HTTP status (and its body) to an error
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            403 if body.contains("quotaExceeded") || body.contains("dailyLimitExceeded") => {
                Self::QuotaExceeded
            }
            429 => Self::RateLimited,
            _ => Self::ServerError(status),
        }
    }

    /// Whether a later call has a chance of succeeding
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::RateLimited | Self::Timeout => true,
            Self::ServerError(status) => *status >= 500,
            Self::QuotaExceeded | Self::Decode(_) | Self::InvalidUrl(_) => false,
        }
    }

    /// Korean description for user-facing messages
    pub fn korean_desc(&self) -> &'static str {
        match self {
            Self::Http(_) => "HTTP 요청 실패",
            Self::QuotaExceeded => "API 할당량 초과",
            Self::RateLimited => "요청 한도 초과",
            Self::ServerError(_) => "서버 오류",
            Self::Timeout => "요청 시간 초과",
            Self::Decode(_) => "응답 해석 실패",
            Self::InvalidUrl(_) => "잘못된 URL",
        }
    }
}
