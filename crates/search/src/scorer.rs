//! Relevance scoring
//!
//! This module provides:
//! - QueryTerms: a parsed query (ordered tokens plus a lookup set)
//! - Scorer trait for pluggable scoring algorithms
//! - FieldWeightedScorer default implementation
//!
//! # Scoring Model
//!
//! For each field, every token that equals a query token contributes the
//! field's weight. When the query has two or more tokens and the complete
//! token sequence appears contiguously in one field, a flat phrase bonus is
//! added on top. Each tag is its own run, so a phrase never spans two tags. Scores are only compared within one query.

use crate::config::{FieldWeights, SearchConfig};
use crate::document::{Field, IndexedDocument};
use crate::tokenizer::tokenize;
use rustc_hash::FxHashSet;

// ============================================================================
// QueryTerms
// ============================================================================

/// Tokenized query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryTerms {
    /// Tokens in query order, duplicates kept
    tokens: Vec<String>,

    /// Distinct tokens for membership tests
    unique: FxHashSet<String>,
}

impl QueryTerms {
    /// Tokenize query text
    pub fn parse(query: &str) -> Self {
        let tokens = tokenize(query);
        let unique = tokens.iter().cloned().collect();
        QueryTerms { tokens, unique }
    }

    /// Tokens in query order
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Whether `token` is one of the query's tokens
    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.unique.contains(token)
    }

    /// Number of distinct tokens
    pub fn unique_len(&self) -> usize {
        self.unique.len()
    }

    /// True when the query produced no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether the full token sequence occurs contiguously in `field`
    pub fn is_phrase_in(&self, field: &[String]) -> bool {
        let n = self.tokens.len();
        n > 0 && field.len() >= n && field.windows(n).any(|w| w == self.tokens.as_slice())
    }
}

// ============================================================================
// Scorer Trait
// ============================================================================

/// Pluggable scoring interface
///
/// Scorers take a document and a parsed query and return a relevance score.
/// A score of zero means the document does not match and is excluded from
/// results.
///
/// # Thread Safety
///
/// Scorers must be Send + Sync; queries run concurrently against shared
/// snapshots.
pub trait Scorer: Send + Sync {
    /// Score a document against a query
    ///
    /// Returns a non-negative score where higher = more relevant.
    fn score(&self, doc: &IndexedDocument, query: &QueryTerms) -> f32;

    /// Name for debugging and logging
    fn name(&self) -> &str;
}

// ============================================================================
// FieldWeightedScorer
// ============================================================================

/// Weighted term-occurrence scorer
///
/// ```text
/// score = Σ_field weight(field) × |{ tokens in field that are query tokens }|
///       + phrase_bonus   if ≥ 2 query tokens and the query is a phrase in a field
/// ```
#[derive(Debug, Clone)]
pub struct FieldWeightedScorer {
    weights: FieldWeights,
    phrase_bonus: f32,
}

impl Default for FieldWeightedScorer {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

impl FieldWeightedScorer {
    /// Create a scorer with explicit weights
    pub fn new(weights: FieldWeights, phrase_bonus: f32) -> Self {
        FieldWeightedScorer {
            weights,
            phrase_bonus,
        }
    }

    /// Create a scorer from the configured weights
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.weights, config.phrase_bonus)
    }

    /// Weight of one field
    pub fn weight(&self, field: Field) -> f32 {
        match field {
            Field::Title => self.weights.title,
            Field::Tags => self.weights.tags,
            Field::Summary => self.weights.summary,
            Field::Content => self.weights.content,
        }
    }
}

impl Scorer for FieldWeightedScorer {
    fn score(&self, doc: &IndexedDocument, query: &QueryTerms) -> f32 {
        if query.is_empty() {
            return 0.0;
        }

        let mut score = 0.0;
        let mut phrase = false;
        for (field, tokens) in doc.fields.iter() {
            let hits = tokens.iter().filter(|t| query.contains(t)).count();
            if hits == 0 {
                continue;
            }
            score += self.weight(field) * hits as f32;
            if !phrase && query.tokens().len() >= 2 {
                phrase = doc.fields.phrase_spans(field).any(|span| query.is_phrase_in(span));
            }
        }

        if phrase {
            score += self.phrase_bonus;
        }
        score
    }

    fn name(&self) -> &str {
        "field-weighted"
    }
}

// ============================================================================
// Tests
// ============================================================================
