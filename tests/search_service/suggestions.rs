//! Autocomplete suggestions and popular terms

use super::test_utils::*;
use folio::{MemorySource, SearchConfig, SearchService, SourceArticle};
use std::sync::Arc;

#[test]
fn test_empty_prefix_returns_nothing() {
    let (service, _) = service_with(reference_articles());
    assert!(service.suggest("", None).is_empty());
    assert!(service.suggest("   ", Some(5)).is_empty());
}

#[test]
fn test_unmatched_prefix_returns_nothing() {
    let (service, _) = service_with(reference_articles());
    assert!(service.suggest("zzzq", None).is_empty());
}

#[test]
fn test_titles_then_terms() {
    let (service, _) = service_with(reference_articles());
    assert_eq!(
        service.suggest("agri", None),
        vec!["Agriculture policy in the Sahel", "agriculture"]
    );
}

#[test]
fn test_prefix_matches_inner_title_words() {
    let (service, _) = service_with(reference_articles());
    let suggestions = service.suggest("CRED", None);
    assert_eq!(suggestions, vec!["Rural credit markets", "credit"]);
}

#[test]
fn test_default_and_max_limits() {
    let articles: Vec<SourceArticle> = (0..30)
        .map(|i| SourceArticle::published(format!("w{}", i), format!("Water report {}", i), at(100)))
        .collect();
    let (service, _) = service_with(articles);

    assert_eq!(service.suggest("water", None).len(), 5);
    assert_eq!(service.suggest("water", Some(8)).len(), 8);
    assert_eq!(service.suggest("water", Some(500)).len(), 20);
    assert!(service.suggest("water", Some(0)).is_empty());
}

#[test]
fn test_configured_suggestion_limits() {
    let config = SearchConfig {
        default_suggestions: 2,
        max_suggestions: 3,
        ..SearchConfig::default()
    };
    let articles: Vec<SourceArticle> = (0..10)
        .map(|i| SourceArticle::published(format!("w{}", i), format!("Water report {}", i), at(100)))
        .collect();
    let service = SearchService::with_config(Arc::new(MemorySource::new(articles)), config).unwrap();
    service.initialize_index().unwrap();

    assert_eq!(service.suggest("wat", None).len(), 2);
    assert_eq!(service.suggest("wat", Some(10)).len(), 3);
}

#[test]
fn test_popular_terms_order() {
    let (service, _) = service_with(vec![
        SourceArticle::published("a", "Water water", at(100)).with_content("drought water"),
        SourceArticle::published("b", "Drought", at(100)).with_content("policy"),
    ]);

    let terms = service.popular_terms(None);
    let pairs: Vec<(&str, usize)> = terms.iter().map(|t| (t.term.as_str(), t.count)).collect();
    assert_eq!(pairs, vec![("water", 3), ("drought", 2), ("policy", 1)]);

    assert_eq!(service.popular_terms(Some(1)).len(), 1);
}

#[test]
fn test_popular_terms_limit_capped() {
    let (service, _) = service_with(policy_corpus(5));
    let capped = service.popular_terms(Some(10_000));
    assert!(capped.len() <= service.config().max_limit);
}
