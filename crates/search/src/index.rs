//! In-memory search index
//!
//! This module provides:
//! - IndexSnapshot: immutable id → document map plus a term frequency table
//! - Full builds from the eligible article set
//! - Incremental patches from "modified since" change sets
//!
//! # Snapshot Model
//!
//! A snapshot is never mutated after construction. Builds and refreshes produce
//! a new snapshot which the service publishes with a single pointer swap, so a
//! reader holding an `Arc<IndexSnapshot>` always sees one consistent version.
//! Documents are shared between generations through `Arc`, which keeps a
//! refresh proportional to the number of changed articles.

use crate::document::IndexedDocument;
use folio_core::{ArticleId, SourceArticle, Timestamp};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

// ============================================================================
// Build summaries
// ============================================================================

/// Outcome of a full build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Documents in the new snapshot
    pub indexed: usize,
    /// Records dropped as ineligible
    pub skipped: usize,
    /// Records sharing an id with an earlier record (last one wins)
    pub duplicates: usize,
}

/// Outcome of an incremental patch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    /// New documents
    pub inserted: usize,
    /// Existing documents replaced
    pub replaced: usize,
    /// Documents dropped because their article became ineligible
    pub removed: usize,
    /// Ineligible records that were not indexed anyway
    pub ignored: usize,
}

impl RefreshSummary {
    /// Documents inserted, replaced or removed
    pub fn updated(&self) -> usize {
        self.inserted + self.replaced + self.removed
    }
}

// ============================================================================
// IndexSnapshot
// ============================================================================

/// Immutable search index
#[derive(Debug, Clone, Default)]
pub struct IndexSnapshot {
    /// Article id -> document
    documents: FxHashMap<ArticleId, Arc<IndexedDocument>>,

    /// Token -> occurrences across all fields of all documents
    ///
    /// Ordered so prefix lookups for autocomplete are a range scan.
    term_freqs: BTreeMap<String, usize>,

    /// When this snapshot was produced; `None` for the never-built index
    built_at: Option<Timestamp>,

    /// Monotonic build counter
    generation: u64,
}

impl IndexSnapshot {
    /// The never-built index
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from a full article set
    ///
    /// Ineligible records are skipped. Duplicate ids keep the last record.
    pub fn build(articles: Vec<SourceArticle>, now: Timestamp, generation: u64) -> (Self, BuildSummary) {
        let mut summary = BuildSummary::default();
        let mut documents: FxHashMap<ArticleId, Arc<IndexedDocument>> = FxHashMap::default();
        documents.reserve(articles.len());

        for article in &articles {
            if !article.is_eligible(now) {
                summary.skipped += 1;
                continue;
            }
            let doc = Arc::new(IndexedDocument::from_article(article));
            if documents.insert(doc.id.clone(), doc).is_some() {
                summary.duplicates += 1;
                warn!(target: "folio::index", id = %article.id, "Duplicate article id in build input");
            }
        }

        let mut term_freqs = BTreeMap::new();
        for doc in documents.values() {
            add_terms(&mut term_freqs, doc);
        }
        summary.indexed = documents.len();

        let snapshot = IndexSnapshot {
            documents,
            term_freqs,
            built_at: Some(now),
            generation,
        };
        (snapshot, summary)
    }

    /// Derive a new snapshot with a change set applied
    ///
    /// Eligible records are inserted or replace the document with the same id;
    /// ineligible records remove it.
    pub fn apply_changes(
        &self,
        changes: Vec<SourceArticle>,
        now: Timestamp,
        generation: u64,
    ) -> (Self, RefreshSummary) {
        let mut summary = RefreshSummary::default();
        let mut documents = self.documents.clone();
        let mut term_freqs = self.term_freqs.clone();

        for article in &changes {
            if article.is_eligible(now) {
                let doc = Arc::new(IndexedDocument::from_article(article));
                add_terms(&mut term_freqs, &doc);
                match documents.insert(doc.id.clone(), doc) {
                    Some(old) => {
                        remove_terms(&mut term_freqs, &old);
                        summary.replaced += 1;
                    }
                    None => summary.inserted += 1,
                }
            } else {
                match documents.remove(&article.id) {
                    Some(old) => {
                        remove_terms(&mut term_freqs, &old);
                        summary.removed += 1;
                    }
                    None => summary.ignored += 1,
                }
            }
        }

        let snapshot = IndexSnapshot {
            documents,
            term_freqs,
            built_at: Some(now),
            generation,
        };
        (snapshot, summary)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when no documents are indexed
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// True once a build has completed
    pub fn is_built(&self) -> bool {
        self.built_at.is_some()
    }

    /// Document by id
    pub fn get(&self, id: &ArticleId) -> Option<&Arc<IndexedDocument>> {
        self.documents.get(id)
    }

    /// Whether an id is indexed
    pub fn contains(&self, id: &ArticleId) -> bool {
        self.documents.contains_key(id)
    }

    /// All documents, in no particular order
    pub fn documents(&self) -> impl Iterator<Item = &Arc<IndexedDocument>> {
        self.documents.values()
    }

    /// Occurrences of a token across the index
    pub fn term_freq(&self, term: &str) -> usize {
        self.term_freqs.get(term).copied().unwrap_or(0)
    }

    /// Tokens starting with `prefix`, in lexical order, with their counts
    pub fn terms_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, usize)> + 'a {
        self.term_freqs
            .range::<str, _>((std::ops::Bound::Included(prefix), std::ops::Bound::Unbounded))
            .take_while(move |(term, _)| term.starts_with(prefix))
            .map(|(term, count)| (term.as_str(), *count))
    }

    /// All tokens with their counts
    pub fn terms(&self) -> impl Iterator<Item = (&str, usize)> {
        self.term_freqs.iter().map(|(t, c)| (t.as_str(), *c))
    }

    /// Number of distinct tokens
    pub fn unique_terms(&self) -> usize {
        self.term_freqs.len()
    }

    /// Build time, `None` if never built
    pub fn built_at(&self) -> Option<Timestamp> {
        self.built_at
    }

    /// Build counter
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Rough heap footprint in bytes
    pub fn approx_bytes(&self) -> usize {
        let docs: usize = self.documents.values().map(|d| d.approx_bytes()).sum();
        let terms: usize = self
            .term_freqs
            .keys()
            .map(|t| t.len() + 2 * std::mem::size_of::<usize>() + 24)
            .sum();
        docs + terms
    }
}

fn add_terms(freqs: &mut BTreeMap<String, usize>, doc: &IndexedDocument) {
    for token in doc.fields.all_tokens() {
        match freqs.get_mut(token.as_str()) {
            Some(count) => *count += 1,
            None => {
                freqs.insert(token.clone(), 1);
            }
        }
    }
}

fn remove_terms(freqs: &mut BTreeMap<String, usize>, doc: &IndexedDocument) {
    for token in doc.fields.all_tokens() {
        if let Some(count) = freqs.get_mut(token.as_str()) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                freqs.remove(token.as_str());
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
