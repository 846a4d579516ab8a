//! Error handling for archive reads, report publishing and configuration.
//!
//! Query-execution failures are fatal for a reporting cycle. Missing rows are
//! not errors at all: the reader turns them into sentinel values and logs a
//! warning. Publishing failures carry enough context for the retry loop to
//! decide whether another attempt makes sense.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    /// A query against the archive could not be executed
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A local calendar day whose midnight cannot be resolved in the zone
    #[error("Invalid date: {message}")]
    InvalidDate { message: String },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The request never produced an HTTP response
    #[error("{platform} request failed: {message}")]
    Http {
        platform: String,
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// The platform answered with a non-2xx status
    #[error("{platform} rejected request with HTTP {status}: {body}")]
    PublishRejected {
        platform: String,
        status: u16,
        body: String,
    },

    #[error("NOAA report error: {message}")]
    NoaaReport { message: String },

    #[error("Interrupted: {reason}")]
    Interrupted { reason: String },
}

impl DigestError {
    pub fn database(message: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Database {
            message: message.into(),
            source,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn http(
        platform: impl Into<String>,
        message: impl Into<String>,
        source: reqwest::Error,
    ) -> Self {
        Self::Http {
            platform: platform.into(),
            message: message.into(),
            source,
        }
    }

    pub fn publish_rejected(
        platform: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        Self::PublishRejected {
            platform: platform.into(),
            status,
            body: body.into(),
        }
    }

    pub fn noaa_report(message: impl Into<String>) -> Self {
        Self::NoaaReport {
            message: message.into(),
        }
    }

    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted {
            reason: reason.into(),
        }
    }

    /// Whether another publish attempt could succeed.
    ///
    /// Transport failures and server-side statuses are transient. Client-side
    /// statuses mean the request itself is wrong (bad credentials, unknown
    /// community) and repeating it only burns the retry budget, except for
    /// request timeouts and rate limiting.
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Http { .. } => true,
            Self::PublishRejected { status, .. } => {
                !(400..500).contains(status) || *status == 408 || *status == 429
            }
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, DigestError>;
