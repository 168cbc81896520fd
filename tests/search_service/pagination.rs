//! Pagination: totals, page boundaries and property tests

use super::test_utils::*;
use folio::QueryRequest;
use proptest::prelude::*;

#[test]
fn test_default_limit_is_twenty() {
    let (service, _) = service_with(policy_corpus(30));
    let result = search(&service, QueryRequest::new("policy"));
    assert_eq!(result.results.len(), 20);
    assert_eq!(result.total, 30);
    assert!(result.has_more);
}

#[test]
fn test_last_page() {
    let (service, _) = service_with(policy_corpus(30));
    let result = search(&service, QueryRequest::new("policy").with_limit(20).with_offset(20));
    assert_eq!(result.results.len(), 10);
    assert!(!result.has_more);
}

#[test]
fn test_exact_boundary_has_no_more() {
    let (service, _) = service_with(policy_corpus(10));
    let result = search(&service, QueryRequest::new("policy").with_limit(5).with_offset(5));
    assert_eq!(result.results.len(), 5);
    assert!(!result.has_more);
}

#[test]
fn test_offset_past_end() {
    let (service, _) = service_with(policy_corpus(10));
    let result = search(&service, QueryRequest::new("policy").with_offset(500));
    assert!(result.results.is_empty());
    assert_eq!(result.total, 10);
    assert!(!result.has_more);
}

#[test]
fn test_limit_bounds() {
    let (service, _) = service_with(policy_corpus(3));
    assert!(service.search(&QueryRequest::new("policy").with_limit(0)).is_err());
    assert!(service.search(&QueryRequest::new("policy").with_limit(101)).is_err());
    assert!(service.search(&QueryRequest::new("policy").with_limit(100)).is_ok());
    assert!(service.search(&QueryRequest::new("policy").with_offset(-1)).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// total counts every filtered match regardless of the page requested
    #[test]
    fn prop_total_independent_of_pagination(
        count in 1usize..60,
        limit in 1i64..=100,
        offset in 0i64..80,
    ) {
        let (service, _) = service_with(policy_corpus(count));
        let page = search(&service, QueryRequest::new("policy").with_limit(limit).with_offset(offset));

        prop_assert_eq!(page.total, count);
        let expected_len = (count as i64 - offset).clamp(0, limit) as usize;
        prop_assert_eq!(page.results.len(), expected_len);
        prop_assert_eq!(page.has_more, offset + limit < count as i64);
    }

    /// Two consecutive pages are disjoint and equal the first 2N ranked results
    #[test]
    fn prop_consecutive_pages_disjoint(count in 1usize..60, n in 1i64..=30) {
        let (service, _) = service_with(policy_corpus(count));
        let all = ids(&search(&service, QueryRequest::new("policy").with_limit(100)));
        let first = ids(&search(&service, QueryRequest::new("policy").with_limit(n)));
        let second = ids(&search(&service, QueryRequest::new("policy").with_limit(n).with_offset(n)));

        prop_assert!(first.iter().all(|id| !second.contains(id)));
        let mut joined = first;
        joined.extend(second);
        let expected: Vec<String> = all.into_iter().take(2 * n as usize).collect();
        prop_assert_eq!(joined, expected);
    }

    /// Scores are non-increasing; equal scores are ordered newest first
    #[test]
    fn prop_ranking_monotonic(count in 1usize..60, division in 0usize..4) {
        let (service, _) = service_with(policy_corpus(count));
        let mut request = QueryRequest::new("policy").with_limit(100);
        if division < 3 {
            request = request.with_division(format!("d{}", division));
        }
        let result = search(&service, request);

        for pair in result.results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].published_at >= pair[1].published_at);
            }
        }
    }
}
