//! Index lifecycle: state machine, refresh and failure handling

use super::test_utils::*;
use folio::{
    ArticleId, ArticleStatus, IndexState, MemorySource, QueryRequest, SearchConfig, SearchError,
    SearchService, SearchWarning, SourceArticle, Timestamp,
};
use std::sync::Arc;

// ============================================================================
// State Machine
// ============================================================================

#[test]
fn test_uninitialized_serves_empty_with_warning() {
    let service = SearchService::new(Arc::new(MemorySource::new(reference_articles())));

    let result = search(&service, QueryRequest::new("agriculture"));
    assert_eq!(result.total, 0);
    assert_eq!(result.warning, Some(SearchWarning::IndexUninitialized));
    assert!(service.suggest("agr", None).is_empty());
    assert!(service.popular_terms(None).is_empty());
    assert_eq!(service.get_stats().status, IndexState::Uninitialized);
}

#[test]
fn test_build_transitions_to_ready() {
    let service = SearchService::new(Arc::new(MemorySource::new(reference_articles())));
    let report = service.initialize_index().unwrap();

    assert_eq!(report.documents, 3);
    assert_eq!(service.state(), IndexState::Ready);
    let stats = service.get_stats();
    assert_eq!(stats.total_articles, 3);
    assert_eq!(stats.builds_completed, 1);
    assert!(stats.last_index_update.is_some());
}

#[test]
fn test_ineligible_articles_never_indexed() {
    let future = Timestamp::now().saturating_add(std::time::Duration::from_secs(86_400));
    let mut articles = reference_articles();
    articles.push(SourceArticle::published("draft", "Agriculture draft", at(10)).with_status(ArticleStatus::Draft));
    articles.push(SourceArticle::published("archived", "Agriculture archive", at(10)).with_status(ArticleStatus::Archived));
    articles.push(SourceArticle::published("scheduled", "Agriculture tomorrow", future));

    let (service, _) = service_with(articles);
    assert_eq!(ids(&search(&service, QueryRequest::new("agriculture"))), vec!["A", "B"]);
    assert_eq!(service.get_stats().total_articles, 3);
}

#[test]
fn test_provider_failure_keeps_last_good_index() {
    let (service, source) = service_with(reference_articles());
    source.set_available(false);

    let err = service.initialize_index().unwrap_err();
    assert!(matches!(err, SearchError::IndexBuild { .. }));
    assert_eq!(service.state(), IndexState::Stale);

    let result = search(&service, QueryRequest::new("agriculture"));
    assert_eq!(ids(&result), vec!["A", "B"]);
    assert_eq!(result.warning, Some(SearchWarning::IndexStale));

    let stats = service.get_stats();
    assert_eq!(stats.builds_failed, 1);
    assert!(stats.last_error.as_deref().unwrap().contains("unavailable"));

    source.set_available(true);
    service.initialize_index().unwrap();
    assert_eq!(service.state(), IndexState::Ready);
    assert!(search(&service, QueryRequest::new("agriculture")).warning.is_none());
}

#[test]
fn test_failed_refresh_marks_stale() {
    let (service, source) = service_with(reference_articles());
    source.set_available(false);
    assert!(service.refresh_index(Timestamp::EPOCH).is_err());
    assert_eq!(service.state(), IndexState::Stale);
    assert_eq!(service.get_stats().total_articles, 3);
}

#[test]
fn test_invalidate_marks_stale_until_rebuild() {
    let (service, _) = service_with(reference_articles());
    service.invalidate();
    assert_eq!(service.state(), IndexState::Stale);
    assert_eq!(
        search(&service, QueryRequest::new("agriculture")).warning,
        Some(SearchWarning::IndexStale)
    );

    service.initialize_index().unwrap();
    assert_eq!(service.state(), IndexState::Ready);
}

#[test]
fn test_lazy_build_on_first_query() {
    let config = SearchConfig {
        build_on_first_query: true,
        ..SearchConfig::default()
    };
    let source = Arc::new(MemorySource::new(reference_articles()));
    let service = SearchService::with_config(source, config).unwrap();

    let result = search(&service, QueryRequest::new("agriculture"));
    assert_eq!(result.total, 2);
    assert!(result.warning.is_none());
    assert_eq!(service.get_stats().builds_completed, 1);

    search(&service, QueryRequest::new("agriculture"));
    assert_eq!(service.get_stats().builds_completed, 1);
}

#[test]
fn test_lazy_build_failure_degrades_to_warning() {
    let config = SearchConfig {
        build_on_first_query: true,
        ..SearchConfig::default()
    };
    let source = Arc::new(MemorySource::new(reference_articles()));
    source.set_available(false);
    let service = SearchService::with_config(source, config).unwrap();

    let result = search(&service, QueryRequest::new("agriculture"));
    assert_eq!(result.total, 0);
    assert_eq!(result.warning, Some(SearchWarning::IndexUninitialized));
}

#[test]
fn test_instances_are_isolated() {
    let (first, _) = service_with(reference_articles());
    let second = SearchService::new(Arc::new(MemorySource::new(Vec::new())));

    assert_eq!(first.get_stats().total_articles, 3);
    assert_eq!(second.get_stats().total_articles, 0);
    assert_eq!(second.state(), IndexState::Uninitialized);
}

// ============================================================================
// Refresh
// ============================================================================

#[test]
fn test_refresh_drops_unpublished_article() {
    let (service, source) = service_with(reference_articles());
    let checkpoint = at(5_000);

    let mut unpublished = reference_articles().remove(0);
    unpublished.status = ArticleStatus::Draft;
    unpublished.updated_at = at(6_000);
    source.upsert(unpublished);

    let updated = service.refresh_index(checkpoint).unwrap();
    assert_eq!(updated, 1);

    let result = search(&service, QueryRequest::new("agriculture"));
    assert_eq!(ids(&result), vec!["B"]);
    assert!(!service.snapshot().contains(&ArticleId::from("A")));
}

#[test]
fn test_refresh_drops_deleted_article() {
    let (service, source) = service_with(reference_articles());
    assert!(source.delete(&ArticleId::from("B"), at(6_000)));

    service.refresh_index(at(5_000)).unwrap();
    assert_eq!(ids(&search(&service, QueryRequest::new("agriculture"))), vec!["A"]);
}

#[test]
fn test_refresh_indexes_new_and_edited_articles() {
    let (service, source) = service_with(reference_articles());

    source.upsert(
        SourceArticle::published("D", "Agriculture and trade", at(4_000)).with_updated_at(at(6_000)),
    );
    source.upsert(
        SourceArticle::published("C", "Maritime agriculture", at(3_000)).with_updated_at(at(6_000)),
    );

    assert_eq!(service.refresh_index(at(5_000)).unwrap(), 2);

    let result = search(&service, QueryRequest::new("agriculture"));
    assert_eq!(result.total, 4);
    assert_eq!(service.get_stats().generation, 2);
    assert!(service.suggest("maritime", None).contains(&"Maritime agriculture".to_string()));
    assert!(!service.suggest("shipping", None).contains(&"shipping".to_string()));
}

#[test]
fn test_refresh_ignores_changes_before_checkpoint() {
    let (service, _) = service_with(reference_articles());
    assert_eq!(service.refresh_index(at(100_000)).unwrap(), 0);
    assert_eq!(service.get_stats().total_articles, 3);
}
