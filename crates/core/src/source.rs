//! Data access provider interface
//!
//! The search subsystem never talks to the article store directly. It pulls
//! records through [`ArticleSource`], which the hosting application
//! implements over its ORM. [`MemorySource`] is a ready-made in-process
//! implementation used by tests and by the CLI's file loader.

use crate::article::{ArticleStatus, SourceArticle};
use crate::error::SourceError;
use crate::ids::ArticleId;
use crate::timestamp::Timestamp;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// Provider of article records for indexing
///
/// # Thread Safety
///
/// Providers must be Send + Sync; builds may be triggered from any thread.
///
/// # Contract
///
/// - `fetch_eligible` returns every article that is published and not
///   future-dated, with division/author/tag metadata attached.
/// - `fetch_modified_since` returns every article whose `updated_at` is after
///   `since`, *including* articles that became ineligible (unpublished,
///   archived, deleted) so the index can drop them.
///
/// Timeouts, retries and connection handling belong to the implementation.
pub trait ArticleSource: Send + Sync {
    /// All currently eligible articles
    fn fetch_eligible(&self) -> Result<Vec<SourceArticle>, SourceError>;

    /// Articles modified strictly after `since`
    fn fetch_modified_since(&self, since: Timestamp) -> Result<Vec<SourceArticle>, SourceError>;

    /// Name for logging
    fn name(&self) -> &str {
        "article-source"
    }
}

/// In-memory article provider
///
/// Holds a mutable article table. `set_available(false)` simulates a store
/// outage: every fetch then fails with `SourceError::Unavailable`.
#[derive(Debug, Default)]
pub struct MemorySource {
    articles: RwLock<Vec<SourceArticle>>,
    unavailable: AtomicBool,
}

impl MemorySource {
    /// Create a provider over the given articles
    pub fn new(articles: Vec<SourceArticle>) -> Self {
        MemorySource {
            articles: RwLock::new(articles),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Insert or replace an article by id
    pub fn upsert(&self, article: SourceArticle) {
        let mut articles = self.articles.write();
        match articles.iter_mut().find(|a| a.id == article.id) {
            Some(existing) => *existing = article,
            None => articles.push(article),
        }
    }

    /// Mark an article deleted, leaving a tombstone stamped `at`
    ///
    /// Returns false if the id is unknown.
    pub fn delete(&self, id: &ArticleId, at: Timestamp) -> bool {
        let mut articles = self.articles.write();
        match articles.iter_mut().find(|a| &a.id == id) {
            Some(article) => {
                article.status = ArticleStatus::Deleted;
                article.updated_at = at;
                true
            }
            None => false,
        }
    }

    /// Toggle simulated availability
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::Release);
    }

    /// Number of stored records, eligible or not
    pub fn len(&self) -> usize {
        self.articles.read().len()
    }

    /// True when no records are stored
    pub fn is_empty(&self) -> bool {
        self.articles.read().is_empty()
    }

    fn check_available(&self) -> Result<(), SourceError> {
        if self.unavailable.load(Ordering::Acquire) {
            return Err(SourceError::Unavailable("memory source offline".into()));
        }
        Ok(())
    }
}

impl ArticleSource for MemorySource {
    fn fetch_eligible(&self) -> Result<Vec<SourceArticle>, SourceError> {
        self.check_available()?;
        let now = Timestamp::now();
        Ok(self
            .articles
            .read()
            .iter()
            .filter(|a| a.is_eligible(now))
            .cloned()
            .collect())
    }

    fn fetch_modified_since(&self, since: Timestamp) -> Result<Vec<SourceArticle>, SourceError> {
        self.check_available()?;
        Ok(self
            .articles
            .read()
            .iter()
            .filter(|a| a.updated_at.is_after(since))
            .cloned()
            .collect())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
