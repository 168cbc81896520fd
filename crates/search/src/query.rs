//! Query validation and execution
//!
//! This module provides:
//! - QueryRequest / SearchFilters: the caller-facing request shape
//! - ValidatedQuery: a request that passed every boundary check
//! - execute(): score, filter, rank and paginate against a snapshot
//!
//! # Ranking
//!
//! Matches are ordered by score descending, then `published_at` descending
//! (newer first), then article id ascending so that equal results have a
//! stable order across calls.

use crate::config::SearchConfig;
use crate::document::IndexedDocument;
use crate::index::IndexSnapshot;
use crate::scorer::{QueryTerms, Scorer};
use crate::snippet::{build_snippet, SnippetStyle};
use crate::tags::normalize_tag;
use folio_core::{
    ArticleId, AuthorId, DivisionId, SearchError, SearchResult, SearchWarning, Timestamp,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

// ============================================================================
// Request
// ============================================================================

/// Inclusive publish-date range; either end may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Earliest publish time
    #[serde(default)]
    pub start: Option<Timestamp>,
    /// Latest publish time
    #[serde(default)]
    pub end: Option<Timestamp>,
}

impl DateRange {
    /// Range between two instants
    pub fn between(start: Timestamp, end: Timestamp) -> Self {
        DateRange {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Whether `ts` falls inside the range
    pub fn contains(&self, ts: Timestamp) -> bool {
        self.start.map_or(true, |s| !ts.is_before(s)) && self.end.map_or(true, |e| !ts.is_after(e))
    }
}

/// Result filters
///
/// Dimensions combine with AND. An empty dimension does not filter. A document
/// passes the author or tag dimension if any of its values is listed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchFilters {
    /// Allowed divisions
    pub divisions: Vec<DivisionId>,
    /// Allowed authors
    pub authors: Vec<AuthorId>,
    /// Allowed tags, matched after normalization
    pub tags: Vec<String>,
    /// Allowed publish dates
    pub date_range: Option<DateRange>,
}

impl SearchFilters {
    /// True when no dimension is set
    pub fn is_empty(&self) -> bool {
        self.divisions.is_empty()
            && self.authors.is_empty()
            && self.tags.is_empty()
            && self.date_range.is_none()
    }
}

/// A search request as received from the API layer
///
/// `limit` and `offset` are kept as signed integers so that out-of-range
/// values are rejected instead of silently clamped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    /// Free-text query
    pub query: String,
    /// Page size
    #[serde(default)]
    pub limit: Option<i64>,
    /// Results to skip
    #[serde(default)]
    pub offset: Option<i64>,
    /// Result filters
    #[serde(default)]
    pub filters: SearchFilters,
}

impl QueryRequest {
    /// Request for `query` with default paging and no filters
    pub fn new(query: impl Into<String>) -> Self {
        QueryRequest {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Builder: set page size
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Builder: set offset
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Builder: restrict to a division
    pub fn with_division(mut self, id: impl Into<DivisionId>) -> Self {
        self.filters.divisions.push(id.into());
        self
    }

    /// Builder: restrict to an author
    pub fn with_author(mut self, id: impl Into<AuthorId>) -> Self {
        self.filters.authors.push(id.into());
        self
    }

    /// Builder: restrict to a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.filters.tags.push(tag.into());
        self
    }

    /// Builder: restrict publish dates
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.filters.date_range = Some(range);
        self
    }

    /// Check the request against configured bounds
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Validation` for an empty or overlong query, a
    /// limit outside `1..=max_limit`, a negative offset, or an inverted date
    /// range.
    pub fn validate(&self, config: &SearchConfig) -> SearchResult<ValidatedQuery> {
        let text = self.query.trim();
        if text.is_empty() {
            return Err(SearchError::validation("query must not be empty"));
        }
        let len = text.chars().count();
        if len > config.max_query_len {
            return Err(SearchError::validation(format!(
                "query is {} characters, maximum is {}",
                len, config.max_query_len
            )));
        }

        let limit = match self.limit {
            None => config.default_limit,
            Some(l) if l >= 1 && l <= config.max_limit as i64 => l as usize,
            Some(l) => {
                return Err(SearchError::validation(format!(
                    "limit must be between 1 and {} (got {})",
                    config.max_limit, l
                )))
            }
        };

        let offset = match self.offset {
            None => 0,
            Some(o) if o >= 0 => usize::try_from(o)
                .map_err(|_| SearchError::validation(format!("offset {} is too large", o)))?,
            Some(o) => {
                return Err(SearchError::validation(format!(
                    "offset must not be negative (got {})",
                    o
                )))
            }
        };

        let filters = &self.filters;
        if let Some(DateRange {
            start: Some(start),
            end: Some(end),
        }) = filters.date_range
        {
            if start.is_after(end) {
                return Err(SearchError::validation(
                    "date range start must not be after its end",
                ));
            }
        }

        Ok(ValidatedQuery {
            text: text.to_string(),
            terms: QueryTerms::parse(text),
            limit,
            offset,
            divisions: filters.divisions.iter().cloned().collect(),
            authors: filters.authors.iter().cloned().collect(),
            tags: filters.tags.iter().filter_map(|t| normalize_tag(t)).collect(),
            date_range: filters.date_range,
        })
    }
}

/// A request that passed validation
#[derive(Debug, Clone)]
pub struct ValidatedQuery {
    /// Trimmed query text
    pub text: String,
    /// Query tokens
    pub terms: QueryTerms,
    /// Page size
    pub limit: usize,
    /// Results to skip
    pub offset: usize,
    divisions: BTreeSet<DivisionId>,
    authors: BTreeSet<AuthorId>,
    tags: BTreeSet<String>,
    date_range: Option<DateRange>,
}

impl ValidatedQuery {
    /// Whether a document passes every filter dimension
    pub fn accepts(&self, doc: &IndexedDocument) -> bool {
        if !self.divisions.is_empty()
            && !doc
                .division_id
                .as_ref()
                .is_some_and(|d| self.divisions.contains(d))
        {
            return false;
        }
        if !self.authors.is_empty() && !doc.author_ids.iter().any(|a| self.authors.contains(a)) {
            return false;
        }
        if !self.tags.is_empty() && self.tags.is_disjoint(&doc.tags) {
            return false;
        }
        self.date_range
            .map_or(true, |range| range.contains(doc.published_at))
    }
}

// ============================================================================
// Response
// ============================================================================

/// One ranked match
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    /// Article id
    pub id: ArticleId,
    /// URL slug
    pub slug: String,
    /// Headline
    pub title: String,
    /// Abstract
    pub summary: String,
    /// Owning division
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division_id: Option<DivisionId>,
    /// Division display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division_name: Option<String>,
    /// Author display names in byline order
    pub author_names: Vec<String>,
    /// Normalized tags
    pub tags: Vec<String>,
    /// Publish time
    pub published_at: Timestamp,
    /// Relevance score
    pub score: f32,
    /// Highlighted excerpt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl SearchHit {
    fn from_document(doc: &IndexedDocument, score: f32, snippet: Option<String>) -> Self {
        SearchHit {
            id: doc.id.clone(),
            slug: doc.raw.slug.clone(),
            title: doc.raw.title.clone(),
            summary: doc.raw.summary.clone(),
            division_id: doc.division_id.clone(),
            division_name: doc.raw.division_name.clone(),
            author_names: doc.raw.author_names.clone(),
            tags: doc.tags.iter().cloned().collect(),
            published_at: doc.published_at,
            score,
            snippet,
        }
    }
}

/// Execution counters for one query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryStats {
    /// Wall time spent scoring and ranking
    pub elapsed_micros: u64,
    /// Documents scored
    pub candidates_considered: usize,
}

/// A page of ranked matches
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// Matches on this page, best first
    pub results: Vec<SearchHit>,
    /// Matches across all pages
    pub total: usize,
    /// Whether a later page exists
    pub has_more: bool,
    /// Index condition the caller should surface
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<SearchWarning>,
    /// Execution counters
    pub stats: QueryStats,
}

impl QueryResult {
    /// A result with no matches
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builder: attach a warning
    pub fn with_warning(mut self, warning: Option<SearchWarning>) -> Self {
        self.warning = warning;
        self
    }

    /// Ids on this page, in rank order
    pub fn ids(&self) -> Vec<&ArticleId> {
        self.results.iter().map(|h| &h.id).collect()
    }
}

// ============================================================================
// Execution
// ============================================================================

/// Rank a validated query against a snapshot
pub fn execute(
    snapshot: &IndexSnapshot,
    query: &ValidatedQuery,
    config: &SearchConfig,
    scorer: &dyn Scorer,
) -> QueryResult {
    let started = Instant::now();
    if query.terms.is_empty() {
        return QueryResult::empty();
    }

    let mut matches: Vec<(f32, &Arc<IndexedDocument>)> = snapshot
        .documents()
        .filter_map(|doc| {
            let score = scorer.score(doc, &query.terms);
            (score > 0.0).then_some((score, doc))
        })
        .filter(|(_, doc)| query.accepts(doc))
        .collect();
    matches.sort_by(|a, b| rank_order(a, b));

    let total = matches.len();
    let style = SnippetStyle::from_config(config);
    let results = matches
        .iter()
        .skip(query.offset)
        .take(query.limit)
        .map(|(score, doc)| {
            SearchHit::from_document(doc, *score, build_snippet(doc, &query.terms, style))
        })
        .collect();

    QueryResult {
        results,
        total,
        has_more: query.offset.saturating_add(query.limit) < total,
        warning: None,
        stats: QueryStats {
            elapsed_micros: started.elapsed().as_micros() as u64,
            candidates_considered: snapshot.len(),
        },
    }
}

fn rank_order(a: &(f32, &Arc<IndexedDocument>), b: &(f32, &Arc<IndexedDocument>)) -> Ordering {
    b.0.total_cmp(&a.0)
        .then_with(|| b.1.published_at.cmp(&a.1.published_at))
        .then_with(|| a.1.id.cmp(&b.1.id))
}

// ============================================================================
// Tests
// ============================================================================
