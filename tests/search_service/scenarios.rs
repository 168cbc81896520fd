//! Reference scenarios
//!
//! End-to-end cases with exact expected output.

use super::test_utils::*;
use folio::{QueryRequest, SourceArticle};

/// Title + tag match outranks a single body mention; unrelated article absent
#[test]
fn test_agriculture_scenario() {
    let (service, _) = service_with(reference_articles());

    let result = search(&service, QueryRequest::new("agriculture").with_limit(10));

    assert_eq!(ids(&result), vec!["A", "B"]);
    assert_eq!(result.total, 2);
    assert!(!result.has_more);
    assert!(result.warning.is_none());
    assert!(result.results[0].score > result.results[1].score);
}

/// A query matching nothing yields an empty page, not an error
#[test]
fn test_nonexistent_term_scenario() {
    let (service, _) = service_with(reference_articles());

    let result = search(&service, QueryRequest::new("zzz-nonexistent-term"));

    assert!(result.results.is_empty());
    assert_eq!(result.total, 0);
    assert!(!result.has_more);
}

/// The division filter wins over relevance
#[test]
fn test_division_filter_scenario() {
    let (service, _) = service_with(vec![
        SourceArticle::published("top", "Policy policy policy", at(100))
            .with_summary("policy")
            .with_division("d2", "Politics"),
        SourceArticle::published("mid", "Fiscal policy", at(100)).with_division("d1", "Economics"),
        SourceArticle::published("low", "Notes", at(100))
            .with_content("a policy note")
            .with_division("d1", "Economics"),
    ]);

    let unfiltered = search(&service, QueryRequest::new("policy"));
    assert_eq!(ids(&unfiltered)[0], "top");

    let filtered = search(&service, QueryRequest::new("policy").with_division("d1"));
    assert_eq!(ids(&filtered), vec!["mid", "low"]);
    assert_eq!(filtered.total, 2);
    assert!(filtered
        .results
        .iter()
        .all(|h| h.division_id.as_ref().map(|d| d.as_str()) == Some("d1")));
}

/// Result entries carry the denormalized display data and a highlighted snippet
#[test]
fn test_result_entry_contents() {
    let (service, _) = service_with(reference_articles());

    let result = search(&service, QueryRequest::new("lending"));
    let hit = &result.results[0];

    assert_eq!(hit.id.as_str(), "B");
    assert_eq!(hit.title, "Rural credit markets");
    assert_eq!(hit.division_name.as_deref(), Some("Finance"));
    assert_eq!(hit.published_at, at(2_000));
    assert_eq!(
        hit.snippet.as_deref(),
        Some("<mark>Lending</mark> has a long history in agriculture.")
    );
}
