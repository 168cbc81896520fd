//! Full-text search for the Folio research site
//!
//! This crate provides:
//! - Tokenizer and tag parsing
//! - IndexSnapshot: immutable in-memory index with incremental patching
//! - Scorer trait with the FieldWeightedScorer default
//! - Query validation, filtering, ranking, pagination and snippets
//! - Autocomplete suggestions and popular terms
//! - SearchService: the facade owning the index lifecycle
//!
//! # Usage
//!
//! ```
//! use folio_core::{MemorySource, SourceArticle, Timestamp};
//! use folio_search::{QueryRequest, SearchService};
//! use std::sync::Arc;
//!
//! let source = Arc::new(MemorySource::new(vec![SourceArticle::published(
//!     "a1",
//!     "Agriculture policy review",
//!     Timestamp::from_secs(1),
//! )]));
//! let service = SearchService::new(source);
//! service.initialize_index().unwrap();
//!
//! let result = service.search(&QueryRequest::new("agriculture")).unwrap();
//! assert_eq!(result.total, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod document;
pub mod index;
pub mod query;
pub mod scorer;
pub mod service;
pub mod snippet;
pub mod stats;
pub mod suggest;
pub mod tags;
pub mod tokenizer;

// Re-export commonly used types
pub use config::{FieldWeights, SearchConfig, CONFIG_FILE_NAME};
pub use document::{Field, IndexedDocument};
pub use index::{BuildSummary, IndexSnapshot, RefreshSummary};
pub use query::{DateRange, QueryRequest, QueryResult, QueryStats, SearchFilters, SearchHit};
pub use scorer::{FieldWeightedScorer, QueryTerms, Scorer};
pub use service::{BuildReport, SearchService};
pub use stats::{IndexSize, IndexState, IndexStats};
pub use suggest::TermCount;
pub use tokenizer::tokenize;
