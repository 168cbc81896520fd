//! Error types for Folio search
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! | Type | Raised by | Caller action |
//! |------|-----------|---------------|
//! | `SearchError::Validation` | query/pagination/filter checks | fix the input, never retry |
//! | `SearchError::IndexBuild` | initialize/refresh | report; queries keep serving the last good index |
//! | `SearchError::Config` | config loading | fix the config file |
//! | `SourceError` | data access providers | converted into `IndexBuild` |
//! | `SearchWarning` | queries | non-fatal, attached to successful results |

use serde::Serialize;
use thiserror::Error;

/// Result type alias for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Errors surfaced by the search subsystem
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Malformed query, pagination or filter input
    #[error("invalid search request: {reason}")]
    Validation {
        /// Violated constraint
        reason: String,
    },

    /// The data provider failed during a build or refresh
    #[error("index build failed: {reason}")]
    IndexBuild {
        /// Provider-reported cause
        reason: String,
    },

    /// Invalid search configuration
    #[error("invalid search configuration: {reason}")]
    Config {
        /// Offending setting
        reason: String,
    },
}

impl SearchError {
    /// Validation failure with the given reason
    pub fn validation(reason: impl Into<String>) -> Self {
        SearchError::Validation {
            reason: reason.into(),
        }
    }

    /// Build failure with the given reason
    pub fn index_build(reason: impl Into<String>) -> Self {
        SearchError::IndexBuild {
            reason: reason.into(),
        }
    }

    /// Configuration failure with the given reason
    pub fn config(reason: impl Into<String>) -> Self {
        SearchError::Config {
            reason: reason.into(),
        }
    }

    /// True for input errors the caller must fix
    pub fn is_validation(&self) -> bool {
        matches!(self, SearchError::Validation { .. })
    }
}

/// Errors reported by an [`ArticleSource`](crate::ArticleSource)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Store unreachable (connection refused, pool exhausted, ...)
    #[error("data source unavailable: {0}")]
    Unavailable(String),

    /// Fetch exceeded the provider's deadline
    #[error("data source timed out after {millis}ms")]
    Timeout {
        /// Deadline that was exceeded
        millis: u64,
    },

    /// Records could not be decoded
    #[error("malformed article data: {0}")]
    Malformed(String),
}

impl From<SourceError> for SearchError {
    fn from(e: SourceError) -> Self {
        SearchError::index_build(e.to_string())
    }
}

/// Non-fatal conditions attached to otherwise successful results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchWarning {
    /// The index has never been built; results are empty
    IndexUninitialized,
    /// The last build or refresh failed; results come from an older index
    IndexStale,
}

impl std::fmt::Display for SearchWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchWarning::IndexUninitialized => write!(f, "search index has not been built yet"),
            SearchWarning::IndexStale => write!(f, "search index may be out of date"),
        }
    }
}
