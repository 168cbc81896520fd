//! Autocomplete and popular terms
//!
//! Suggestions come from two pools:
//! - titles that have a word starting with the typed prefix
//! - indexed tokens starting with the prefix (single-word prefixes only)
//!
//! Titles rank before tokens; within a pool, candidates with a more frequent
//! underlying token rank first, then alphabetically.

use crate::index::IndexSnapshot;
use crate::tokenizer::normalize_word;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::cmp::Ordering;
use unicode_segmentation::UnicodeSegmentation;

/// A token and its occurrence count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCount {
    /// Normalized token
    pub term: String,
    /// Occurrences across all indexed fields
    pub count: usize,
}

#[derive(Debug)]
struct Candidate<'a> {
    text: &'a str,
    from_title: bool,
    freq: usize,
}

impl Candidate<'_> {
    fn rank(&self, other: &Self) -> Ordering {
        other
            .from_title
            .cmp(&self.from_title)
            .then_with(|| other.freq.cmp(&self.freq))
            .then_with(|| self.text.cmp(other.text))
    }
}

/// Trim, lowercase and collapse inner whitespace
pub fn normalize_prefix(prefix: &str) -> String {
    prefix
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Up to `limit` completions for `prefix`
pub fn suggest(snapshot: &IndexSnapshot, prefix: &str, limit: usize) -> Vec<String> {
    let prefix = normalize_prefix(prefix);
    if prefix.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<Candidate<'_>> = snapshot
        .documents()
        .filter_map(|doc| {
            title_match(&doc.raw.title, &prefix).map(|word| Candidate {
                text: doc.raw.title.as_str(),
                from_title: true,
                freq: normalize_word(word).map_or(0, |t| snapshot.term_freq(&t)),
            })
        })
        .collect();

    if !prefix.contains(' ') {
        candidates.extend(snapshot.terms_with_prefix(&prefix).map(|(term, freq)| Candidate {
            text: term,
            from_title: false,
            freq,
        }));
    }

    candidates.sort_by(|a, b| a.rank(b));

    let mut seen = FxHashSet::default();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.text.to_lowercase()))
        .take(limit)
        .map(|c| c.text.to_string())
        .collect()
}

/// The word of `title` where `prefix` starts, if any
///
/// Matching is case-insensitive and may run across word boundaries, so a
/// multi-word prefix matches a title containing that phrase.
fn title_match<'t>(title: &'t str, prefix: &str) -> Option<&'t str> {
    title.unicode_word_indices().find_map(|(i, word)| {
        let rest = &title[i..];
        let head: String = rest
            .chars()
            .flat_map(char::to_lowercase)
            .take(prefix.chars().count())
            .collect();
        let collapsed = normalize_prefix(&head);
        (collapsed == prefix || head == prefix).then_some(word)
    })
}

/// The `limit` most frequent tokens, count desc then term asc
pub fn popular_terms(snapshot: &IndexSnapshot, limit: usize) -> Vec<TermCount> {
    let mut terms: Vec<(&str, usize)> = snapshot.terms().collect();
    terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    terms
        .into_iter()
        .take(limit)
        .map(|(term, count)| TermCount {
            term: term.to_string(),
            count,
        })
        .collect()
}
