//! Search service facade
//!
//! `SearchService` owns one index and everything needed to keep it current:
//! the data provider, configuration, scorer, lifecycle state and counters.
//! Instances are independent; an application creates one and shares it
//! behind an `Arc`.
//!
//! # Concurrency
//!
//! - The served snapshot lives behind `RwLock<Arc<IndexSnapshot>>`. Readers
//!   clone the `Arc` under a short read lock and then work lock-free.
//! - Builds and refreshes run under a build lock and publish their result
//!   with a single write-locked assignment.
//! - Build requests that queue behind a build which started after they were
//!   made reuse that build's outcome instead of rebuilding.

use crate::config::SearchConfig;
use crate::index::IndexSnapshot;
use crate::query::{execute, QueryRequest, QueryResult};
use crate::scorer::{FieldWeightedScorer, Scorer};
use crate::stats::{warning_for, IndexSize, IndexState, IndexStats};
use crate::suggest::{self, TermCount};
use folio_core::{ArticleSource, SearchError, SearchResult, Timestamp};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Popular terms returned when the caller omits a count
pub const DEFAULT_POPULAR_TERMS: usize = 10;

/// Outcome of a successful full build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport {
    /// Documents in the new snapshot
    pub documents: usize,
    /// Ineligible records skipped
    pub skipped: usize,
    /// Duplicate ids collapsed
    pub duplicates: usize,
    /// Generation of the new snapshot
    pub generation: u64,
    /// Build wall time
    pub elapsed_micros: u64,
}

#[derive(Debug, Default)]
struct Lifecycle {
    state: IndexState,
    builds_completed: u64,
    builds_failed: u64,
    last_error: Option<String>,
}

/// Search subsystem entry point
pub struct SearchService {
    source: Arc<dyn ArticleSource>,
    config: SearchConfig,
    scorer: Arc<dyn Scorer>,

    /// Served snapshot
    snapshot: RwLock<Arc<IndexSnapshot>>,
    lifecycle: RwLock<Lifecycle>,

    /// Serializes builds; holds the outcome of the last full build
    build_lock: Mutex<Option<SearchResult<BuildReport>>>,
    /// Full builds started so far
    builds_started: AtomicU64,
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("source", &self.source.name())
            .field("scorer", &self.scorer.name())
            .field("state", &self.state())
            .field("generation", &self.snapshot().generation())
            .finish()
    }
}

impl SearchService {
    /// Create a service with the default configuration
    pub fn new(source: Arc<dyn ArticleSource>) -> Self {
        Self::build_unchecked(source, SearchConfig::default())
    }

    /// Create a service with a custom configuration
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Config` if the configuration is inconsistent.
    pub fn with_config(source: Arc<dyn ArticleSource>, config: SearchConfig) -> SearchResult<Self> {
        config.validate()?;
        Ok(Self::build_unchecked(source, config))
    }

    fn build_unchecked(source: Arc<dyn ArticleSource>, config: SearchConfig) -> Self {
        let scorer = Arc::new(FieldWeightedScorer::from_config(&config));
        SearchService {
            source,
            config,
            scorer,
            snapshot: RwLock::new(Arc::new(IndexSnapshot::empty())),
            lifecycle: RwLock::new(Lifecycle::default()),
            build_lock: Mutex::new(None),
            builds_started: AtomicU64::new(0),
        }
    }

    /// Builder: replace the scorer
    pub fn with_scorer(mut self, scorer: Arc<dyn Scorer>) -> Self {
        self.scorer = scorer;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Currently served snapshot
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        Arc::clone(&self.snapshot.read())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Ranked, filtered, paginated search
    ///
    /// Served in every state. Results from a never-built index are empty and
    /// carry `SearchWarning::IndexUninitialized`; results from a stale index
    /// carry `SearchWarning::IndexStale`.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Validation` for malformed requests, before any
    /// build or scoring work.
    pub fn search(&self, request: &QueryRequest) -> SearchResult<QueryResult> {
        let query = request.validate(&self.config)?;

        if self.config.build_on_first_query && self.state() == IndexState::Uninitialized {
            if let Err(e) = self.initialize_index() {
                debug!(target: "folio::query", error = %e, "Lazy index build failed");
            }
        }

        let snapshot = self.snapshot();
        let state = self.state();
        let result = execute(&snapshot, &query, &self.config, self.scorer.as_ref())
            .with_warning(warning_for(state, snapshot.is_built()));

        debug!(
            target: "folio::query",
            query = %query.text,
            terms = query.terms.unique_len(),
            total = result.total,
            returned = result.results.len(),
            candidates = result.stats.candidates_considered,
            elapsed_micros = result.stats.elapsed_micros,
            "Query executed"
        );
        Ok(result)
    }

    /// Autocomplete for a typed prefix
    ///
    /// `limit` defaults to `default_suggestions` and is capped at
    /// `max_suggestions`.
    pub fn suggest(&self, prefix: &str, limit: Option<usize>) -> Vec<String> {
        let limit = limit
            .unwrap_or(self.config.default_suggestions)
            .min(self.config.max_suggestions);
        suggest::suggest(&self.snapshot(), prefix, limit)
    }

    /// Most frequent indexed tokens
    ///
    /// `limit` defaults to 10 and is capped at `max_limit`.
    pub fn popular_terms(&self, limit: Option<usize>) -> Vec<TermCount> {
        let limit = limit
            .unwrap_or(DEFAULT_POPULAR_TERMS)
            .min(self.config.max_limit);
        suggest::popular_terms(&self.snapshot(), limit)
    }

    // ========================================================================
    // Builds
    // ========================================================================

    /// Build a fresh index from every eligible article and swap it in
    ///
    /// # Errors
    ///
    /// Returns `SearchError::IndexBuild` if the provider fails. The previous
    /// snapshot stays in service.
    pub fn initialize_index(&self) -> SearchResult<BuildReport> {
        let observed = self.builds_started.load(Ordering::Acquire);
        let mut last = self.build_lock.lock();

        if self.builds_started.load(Ordering::Acquire) > observed {
            if let Some(outcome) = last.as_ref() {
                debug!(target: "folio::index", "Joining build started while waiting");
                return outcome.clone();
            }
        }

        let outcome = self.run_full_build();
        *last = Some(outcome.clone());
        outcome
    }

    /// Apply changes made after `since` to the served index
    ///
    /// Returns the number of documents inserted, replaced or removed. On a
    /// never-built index this performs a full build and returns its document
    /// count.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::IndexBuild` if the provider fails. The previous
    /// snapshot stays in service.
    pub fn refresh_index(&self, since: Timestamp) -> SearchResult<usize> {
        let mut last = self.build_lock.lock();
        let current = self.snapshot();

        if !current.is_built() {
            let outcome = self.run_full_build();
            *last = Some(outcome.clone());
            return outcome.map(|report| report.documents);
        }

        let started = Instant::now();
        self.set_state(IndexState::Building);

        let changes = self
            .source
            .fetch_modified_since(since)
            .map_err(|e| self.record_failure(e.into()))?;
        let fetched = changes.len();

        let (next, summary) =
            current.apply_changes(changes, Timestamp::now(), current.generation() + 1);
        let generation = next.generation();
        self.publish(next);

        info!(
            target: "folio::index",
            since = %since,
            fetched,
            inserted = summary.inserted,
            replaced = summary.replaced,
            removed = summary.removed,
            generation,
            elapsed_micros = started.elapsed().as_micros() as u64,
            "Index refreshed"
        );
        Ok(summary.updated())
    }

    /// Mark the served index as out of date
    ///
    /// Only a `Ready` index changes state.
    pub fn invalidate(&self) {
        let mut lifecycle = self.lifecycle.write();
        if lifecycle.state == IndexState::Ready {
            lifecycle.state = IndexState::Stale;
            debug!(target: "folio::index", "Index invalidated");
        }
    }

    fn run_full_build(&self) -> SearchResult<BuildReport> {
        let started = Instant::now();
        self.builds_started.fetch_add(1, Ordering::AcqRel);
        self.set_state(IndexState::Building);
        debug!(target: "folio::index", source = self.source.name(), "Index build started");

        let articles = self
            .source
            .fetch_eligible()
            .map_err(|e| self.record_failure(e.into()))?;

        let generation = self.snapshot().generation() + 1;
        let (snapshot, summary) = IndexSnapshot::build(articles, Timestamp::now(), generation);
        self.publish(snapshot);

        let report = BuildReport {
            documents: summary.indexed,
            skipped: summary.skipped,
            duplicates: summary.duplicates,
            generation,
            elapsed_micros: started.elapsed().as_micros() as u64,
        };
        info!(
            target: "folio::index",
            documents = report.documents,
            skipped = report.skipped,
            duplicates = report.duplicates,
            generation,
            elapsed_micros = report.elapsed_micros,
            "Index built"
        );
        Ok(report)
    }

    fn publish(&self, snapshot: IndexSnapshot) {
        *self.snapshot.write() = Arc::new(snapshot);
        let mut lifecycle = self.lifecycle.write();
        lifecycle.state = IndexState::Ready;
        lifecycle.builds_completed += 1;
    }

    fn record_failure(&self, err: SearchError) -> SearchError {
        let built = self.snapshot().is_built();
        let mut lifecycle = self.lifecycle.write();
        lifecycle.state = if built {
            IndexState::Stale
        } else {
            IndexState::Uninitialized
        };
        lifecycle.builds_failed += 1;
        lifecycle.last_error = Some(err.to_string());
        warn!(
            target: "folio::index",
            source = self.source.name(),
            error = %err,
            serving_previous = built,
            "Index build failed"
        );
        err
    }

    fn set_state(&self, state: IndexState) {
        self.lifecycle.write().state = state;
    }

    // ========================================================================
    // State & stats
    // ========================================================================

    /// Current lifecycle state
    ///
    /// A `Ready` index older than `max_index_age_secs` reports `Stale`.
    pub fn state(&self) -> IndexState {
        let state = self.lifecycle.read().state;
        if state == IndexState::Ready && self.is_expired() {
            IndexState::Stale
        } else {
            state
        }
    }

    fn is_expired(&self) -> bool {
        match (self.config.max_index_age(), self.snapshot().built_at()) {
            (Some(max_age), Some(built_at)) => Timestamp::now()
                .duration_since(built_at)
                .is_some_and(|age| age > max_age),
            _ => false,
        }
    }

    /// Index health figures; never triggers a build
    pub fn get_stats(&self) -> IndexStats {
        let snapshot = self.snapshot();
        let status = self.state();
        let lifecycle = self.lifecycle.read();
        IndexStats {
            total_articles: snapshot.len(),
            last_index_update: snapshot.built_at(),
            index_size: IndexSize {
                documents: snapshot.len(),
                unique_terms: snapshot.unique_terms(),
                approx_bytes: snapshot.approx_bytes(),
            },
            status,
            generation: snapshot.generation(),
            builds_completed: lifecycle.builds_completed,
            builds_failed: lifecycle.builds_failed,
            last_error: lifecycle.last_error.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
