//! Core types for Folio search
//!
//! This crate defines the foundational types shared by the search crates:
//! - ArticleId / DivisionId / AuthorId: typed string identifiers
//! - Timestamp: microsecond-precision time
//! - SourceArticle: article record handed over by the content store
//! - ArticleSource: data access provider trait (+ MemorySource)
//! - SearchError / SourceError / SearchWarning: error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod article;
pub mod error;
pub mod ids;
pub mod source;
pub mod timestamp;

pub use article::{ArticleStatus, AuthorRef, DivisionRef, SourceArticle};
pub use error::{SearchError, SearchResult, SearchWarning, SourceError};
pub use ids::{ArticleId, AuthorId, DivisionId};
pub use source::{ArticleSource, MemorySource};
pub use timestamp::Timestamp;
