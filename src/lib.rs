//! Folio - ranked full-text search for a research publication site
//!
//! Folio indexes published articles (title, tags, summary, body) pulled from a
//! data access provider and answers ranked, filtered, paginated queries with
//! highlighted snippets, autocomplete suggestions, popular terms and index
//! statistics.
//!
//! # Quick Start
//!
//! ```
//! use folio::{MemorySource, QueryRequest, SearchService, SourceArticle, Timestamp};
//! use std::sync::Arc;
//!
//! let source = Arc::new(MemorySource::new(vec![
//!     SourceArticle::published("a1", "Agriculture policy review", Timestamp::from_secs(1))
//!         .with_tags(["agriculture"]),
//! ]));
//!
//! let service = SearchService::new(source);
//! service.initialize_index().unwrap();
//!
//! let page = service.search(&QueryRequest::new("agriculture").with_limit(10)).unwrap();
//! assert_eq!(page.total, 1);
//! assert_eq!(service.suggest("agr", None)[0], "Agriculture policy review");
//! ```
//!
//! # Architecture
//!
//! - `folio-core`: article records, identifiers, timestamps, the provider
//!   trait and the error taxonomy
//! - `folio-search`: tokenizer, index snapshots, scoring, queries,
//!   suggestions and the [`SearchService`] facade
//!
//! The index itself is internal to [`SearchService`]; applications interact
//! with the service operations only.

pub use folio_core::{
    ArticleId, ArticleSource, ArticleStatus, AuthorId, AuthorRef, DivisionId, DivisionRef,
    MemorySource, SearchError, SearchResult, SearchWarning, SourceArticle, SourceError, Timestamp,
};
pub use folio_search::{
    BuildReport, DateRange, FieldWeights, IndexSize, IndexState, IndexStats, QueryRequest,
    QueryResult, QueryStats, Scorer, SearchConfig, SearchFilters, SearchHit, SearchService,
    TermCount,
};
