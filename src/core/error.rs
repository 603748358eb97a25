use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("detection error: {0}")]
    Detection(String),
    #[error("upstream error: {0}")]
    Upstream(#[from] FetchError),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("write error: {0}")]
    Write(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn configuration(message: String) -> Self {
        Self::Configuration(message)
    }

    pub fn detection(message: String) -> Self {
        Self::Detection(message)
    }

    pub fn serialization(message: String) -> Self {
        Self::Serialization(message)
    }

    pub fn write(message: String) -> Self {
        Self::Write(message)
    }

    pub fn internal(message: String) -> Self {
        Self::Internal(message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FetchFailure {
    Status(u16),
    Network(String),
}

impl FetchFailure {
    /// 5xx, 429 and network-level failures are worth another attempt; other
    /// statuses are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Status(code) => *code >= 500 || *code == 429,
            Self::Network(_) => true,
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code) => write!(f, "HTTP status {code}"),
            Self::Network(cause) => write!(f, "network error: {cause}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("request to {url} failed after {attempts_made} attempt(s): {failure}")]
pub struct FetchError {
    pub url: String,
    pub failure: FetchFailure,
    pub attempts_made: u32,
}
