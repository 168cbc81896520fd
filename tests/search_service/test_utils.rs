//! Test utilities for the search service suite

use folio::{
    ArticleSource, MemorySource, QueryRequest, QueryResult, SearchService, SourceArticle,
    SourceError, Timestamp,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Timestamp from Unix seconds
pub fn at(secs: u64) -> Timestamp {
    Timestamp::from_secs(secs)
}

/// The three-article reference corpus
///
/// - A: "agriculture policy" in the title, tagged agriculture
/// - B: mentions agriculture once in the body
/// - C: unrelated
pub fn reference_articles() -> Vec<SourceArticle> {
    vec![
        SourceArticle::published("A", "Agriculture policy in the Sahel", at(1_000))
            .with_summary("Irrigation and land reform")
            .with_tags(["agriculture"])
            .with_division("d1", "Economics"),
        SourceArticle::published("B", "Rural credit markets", at(2_000))
            .with_content("<p>Lending has a long history in agriculture.</p>")
            .with_division("d2", "Finance"),
        SourceArticle::published("C", "Maritime shipping lanes", at(3_000))
            .with_content("Container traffic and port congestion.")
            .with_division("d3", "Logistics"),
    ]
}

/// A ready service over `articles`
pub fn service_with(articles: Vec<SourceArticle>) -> (SearchService, Arc<MemorySource>) {
    let source = Arc::new(MemorySource::new(articles));
    let service = SearchService::new(source.clone());
    service
        .initialize_index()
        .expect("Failed to build test index");
    (service, source)
}

/// Run a query that must validate
pub fn search(service: &SearchService, request: QueryRequest) -> QueryResult {
    service.search(&request).expect("search should succeed")
}

/// Ids of a result page, in rank order
pub fn ids(result: &QueryResult) -> Vec<String> {
    result.results.iter().map(|h| h.id.to_string()).collect()
}

/// Generate `count` articles about policy with varied relevance and dates
pub fn policy_corpus(count: usize) -> Vec<SourceArticle> {
    (0..count)
        .map(|i| {
            let body = "policy ".repeat(i % 5 + 1);
            SourceArticle::published(
                format!("p{:03}", i),
                format!("Brief {}", i),
                at(10_000 + (i as u64 % 13) * 60),
            )
            .with_content(body)
            .with_division(format!("d{}", i % 3), "Division")
            .with_author(format!("au{}", i % 4), "Author")
        })
        .collect()
}

/// Provider that blocks each fetch for a fixed delay and counts calls
pub struct SlowSource {
    inner: MemorySource,
    delay: Duration,
    fetches: AtomicUsize,
    log: Mutex<Vec<&'static str>>,
}

impl SlowSource {
    pub fn new(articles: Vec<SourceArticle>, delay: Duration) -> Self {
        SlowSource {
            inner: MemorySource::new(articles),
            delay,
            fetches: AtomicUsize::new(0),
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &MemorySource {
        &self.inner
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.log.lock().clone()
    }
}

impl ArticleSource for SlowSource {
    fn fetch_eligible(&self) -> Result<Vec<SourceArticle>, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.log.lock().push("eligible");
        std::thread::sleep(self.delay);
        self.inner.fetch_eligible()
    }

    fn fetch_modified_since(&self, since: Timestamp) -> Result<Vec<SourceArticle>, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.log.lock().push("modified_since");
        std::thread::sleep(self.delay);
        self.inner.fetch_modified_since(since)
    }

    fn name(&self) -> &str {
        "slow"
    }
}
