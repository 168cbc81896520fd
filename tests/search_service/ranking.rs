//! Ranking: field weights, phrase bonus, tie-breaks

use super::test_utils::*;
use folio::{FieldWeights, MemorySource, QueryRequest, SearchConfig, SearchService, SourceArticle};
use std::sync::Arc;

// ============================================================================
// Field Weights
// ============================================================================

/// A title match beats an equal-frequency body match
#[test]
fn test_title_outranks_content() {
    let (service, _) = service_with(vec![
        SourceArticle::published("content", "Notes", at(500)).with_content("irrigation"),
        SourceArticle::published("title", "Irrigation", at(100)),
    ]);

    let result = search(&service, QueryRequest::new("irrigation"));
    assert_eq!(ids(&result), vec!["title", "content"]);
}

/// title > tags > summary > content for a single occurrence
#[test]
fn test_field_order() {
    let (service, _) = service_with(vec![
        SourceArticle::published("content", "One", at(100)).with_content("drought"),
        SourceArticle::published("summary", "Two", at(100)).with_summary("drought"),
        SourceArticle::published("tags", "Three", at(100)).with_tags(["Drought"]),
        SourceArticle::published("title", "Drought", at(100)),
    ]);

    let result = search(&service, QueryRequest::new("drought"));
    assert_eq!(ids(&result), vec!["title", "tags", "summary", "content"]);
}

/// Custom weights from config are applied
#[test]
fn test_configured_weights() {
    let config = SearchConfig {
        weights: FieldWeights {
            title: 100.0,
            tags: 3.0,
            summary: 2.0,
            content: 1.0,
        },
        ..SearchConfig::default()
    };
    let source = Arc::new(MemorySource::new(vec![
        SourceArticle::published("title", "Drought", at(100)),
    ]));
    let service = SearchService::with_config(source, config).unwrap();
    service.initialize_index().unwrap();

    let result = search(&service, QueryRequest::new("drought"));
    assert_eq!(result.results[0].score, 100.0);
}

/// With a small but valid weight set, a title match still beats a content phrase
#[test]
fn test_title_beats_content_phrase_with_narrow_weights() {
    let config = SearchConfig {
        weights: FieldWeights {
            title: 4.0,
            tags: 3.0,
            summary: 2.0,
            content: 1.0,
        },
        phrase_bonus: 5.0,
        ..SearchConfig::default()
    };
    let source = Arc::new(MemorySource::new(vec![
        SourceArticle::published("title", "Credit for rural areas", at(100)),
        SourceArticle::published("content", "Notes", at(900)).with_content("rural credit"),
    ]));
    let service = SearchService::with_config(source, config).unwrap();
    service.initialize_index().unwrap();

    let result = search(&service, QueryRequest::new("rural credit"));
    assert_eq!(ids(&result), vec!["title", "content"]);
    assert_eq!(result.results[0].score, 8.0);
    assert_eq!(result.results[1].score, 7.0);
}

/// Weights that let the phrase bonus overturn field order are refused
#[test]
fn test_oversized_phrase_bonus_rejected() {
    let config = SearchConfig {
        weights: FieldWeights {
            title: 4.0,
            tags: 3.0,
            summary: 2.0,
            content: 1.0,
        },
        ..SearchConfig::default()
    };
    let source = Arc::new(MemorySource::new(Vec::new()));
    assert!(SearchService::with_config(source, config).is_err());
}

// ============================================================================
// Phrase Bonus
// ============================================================================

/// An exact phrase beats the same terms scattered
#[test]
fn test_phrase_outranks_scattered() {
    let (service, _) = service_with(vec![
        SourceArticle::published("scattered", "Notes", at(900))
            .with_content("credit is scarce in rural districts"),
        SourceArticle::published("phrase", "Notes", at(100))
            .with_content("rural credit is scarce"),
    ]);

    let result = search(&service, QueryRequest::new("rural credit"));
    assert_eq!(ids(&result), vec!["phrase", "scattered"]);
    assert!(result.results[0].score > result.results[1].score);
}

/// Stopwords do not break phrase adjacency
#[test]
fn test_phrase_ignores_stopwords() {
    let (service, _) = service_with(vec![
        SourceArticle::published("phrase", "Notes", at(100)).with_content("the cost of the water"),
        SourceArticle::published("scattered", "Notes", at(100)).with_content("water has a cost"),
    ]);

    let result = search(&service, QueryRequest::new("cost of water"));
    assert_eq!(ids(&result), vec!["phrase", "scattered"]);
}

// ============================================================================
// Tie-breaks
// ============================================================================

/// Equal scores: newest first, then id
#[test]
fn test_equal_scores_order_by_date_then_id() {
    let (service, _) = service_with(vec![
        SourceArticle::published("b", "Fisheries", at(100)),
        SourceArticle::published("old", "Fisheries", at(50)),
        SourceArticle::published("a", "Fisheries", at(100)),
        SourceArticle::published("new", "Fisheries", at(500)),
    ]);

    let result = search(&service, QueryRequest::new("fisheries"));
    assert_eq!(ids(&result), vec!["new", "a", "b", "old"]);
}

/// Repeated occurrences raise the score
#[test]
fn test_occurrences_accumulate() {
    let (service, _) = service_with(policy_corpus(5));
    let result = search(&service, QueryRequest::new("policy"));

    // p004 mentions "policy" five times, p000 once
    assert_eq!(ids(&result)[0], "p004");
    assert_eq!(ids(&result)[4], "p000");
}

/// Markup and attributes are not searchable
#[test]
fn test_markup_not_indexed() {
    let (service, _) = service_with(vec![SourceArticle::published("a", "Notes", at(100))
        .with_content(r#"<a href="https://example.org/hidden">visible</a><script>secret()</script>"#)]);

    assert_eq!(search(&service, QueryRequest::new("visible")).total, 1);
    assert_eq!(search(&service, QueryRequest::new("hidden")).total, 0);
    assert_eq!(search(&service, QueryRequest::new("secret")).total, 0);
}
