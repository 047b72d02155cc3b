//! Error types for rmmp-fetch.

use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

/// Boxed source error carried by transport failures.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS, body read or deadline failure for a single request.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to parse {what}: {reason}")]
    Parse { what: &'static str, reason: String },

    /// The mirror directory answered, but reported an application-level error.
    #[error("mirror directory returned code {code}: {message}")]
    Directory { code: i64, message: String },

    #[error("no mirrors available")]
    EmptyCatalog,

    #[error("all {attempts} download attempts failed")]
    AllAttemptsExhausted {
        attempts: usize,
        #[source]
        last: Option<Box<FetchError>>,
    },

    /// Writing the catalog snapshot failed. Never fatal for a lookup.
    #[error("failed to persist mirror cache at {}: {source}", path.display())]
    CachePersist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid repository {0:?}, expected owner/repo")]
    InvalidRepo(String),

    #[error("file I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub(crate) fn transport(url: &str, source: impl Into<BoxError>) -> Self {
        FetchError::Transport {
            url: url.to_string(),
            source: source.into(),
        }
    }

    pub(crate) fn parse(what: &'static str, reason: impl ToString) -> Self {
        FetchError::Parse {
            what,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FetchError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_url_and_code() {
        let err = FetchError::Status {
            url: "https://github.com/a/b".into(),
            status: 404,
        };
        assert_eq!(err.to_string(), "https://github.com/a/b answered with HTTP 404");
    }

    #[test]
    fn exhausted_error_exposes_last_failure_as_source() {
        let err = FetchError::AllAttemptsExhausted {
            attempts: 11,
            last: Some(Box::new(FetchError::Status {
                url: "u".into(),
                status: 502,
            })),
        };
        assert_eq!(err.to_string(), "all 11 download attempts failed");
        assert!(err.source().is_some());
    }
}
