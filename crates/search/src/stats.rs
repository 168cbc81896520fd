//! Index lifecycle state and statistics

use folio_core::{SearchWarning, Timestamp};
use serde::Serialize;
use std::fmt;

/// Lifecycle of the search index
///
/// ```text
/// Uninitialized ──build──▶ Building ──ok──▶ Ready ──invalidate / age──▶ Stale
///       ▲                     │                ▲                          │
///       └──fail (no index)────┤                └──────────build───────────┘
///                             └──fail (index kept)──▶ Stale
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IndexState {
    /// Never built; queries return empty results
    #[default]
    Uninitialized,
    /// A build or refresh is running; queries use the previous snapshot
    Building,
    /// Snapshot is current
    Ready,
    /// Snapshot is served but may be out of date
    Stale,
}

impl IndexState {
    /// State name
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexState::Uninitialized => "uninitialized",
            IndexState::Building => "building",
            IndexState::Ready => "ready",
            IndexState::Stale => "stale",
        }
    }
}

impl fmt::Display for IndexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Warning to attach to a query served in the given condition
pub(crate) fn warning_for(state: IndexState, built: bool) -> Option<SearchWarning> {
    if !built {
        Some(SearchWarning::IndexUninitialized)
    } else if state == IndexState::Stale {
        Some(SearchWarning::IndexStale)
    } else {
        None
    }
}

/// Index size figures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSize {
    /// Indexed documents
    pub documents: usize,
    /// Distinct tokens
    pub unique_terms: usize,
    /// Rough heap footprint in bytes
    pub approx_bytes: usize,
}

/// Snapshot of index health for dashboards
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    /// Indexed articles
    pub total_articles: usize,
    /// Completion time of the last successful build or refresh
    pub last_index_update: Option<Timestamp>,
    /// Size figures
    pub index_size: IndexSize,
    /// Lifecycle state
    pub status: IndexState,
    /// Build counter of the served snapshot
    pub generation: u64,
    /// Successful builds and refreshes
    pub builds_completed: u64,
    /// Failed builds and refreshes
    pub builds_failed: u64,
    /// Reason of the most recent failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}
