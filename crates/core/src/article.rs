//! Source article records
//!
//! `SourceArticle` is the read-only shape the content store hands to the
//! search subsystem: one article with its division and authors already
//! denormalized. Tags arrive exactly as the CMS stores them (a loosely typed
//! JSON value); the index builder parses them once into a typed set.

use crate::ids::{ArticleId, AuthorId, DivisionId};
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// Editorial lifecycle of an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    /// Not yet visible on the site
    #[default]
    Draft,
    /// Publicly visible once `published_at` has passed
    Published,
    /// Withdrawn from listings
    Archived,
    /// Tombstone for a hard-deleted article
    Deleted,
}

/// Division an article belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionRef {
    /// Division id
    pub id: DivisionId,
    /// Display name
    pub name: String,
}

/// One credited author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    /// Author id
    pub id: AuthorId,
    /// Display name
    pub name: String,
}

/// Article as returned by the data access provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceArticle {
    /// Unique article id
    pub id: ArticleId,
    /// URL slug
    #[serde(default)]
    pub slug: String,
    /// Headline
    pub title: String,
    /// Body, possibly containing HTML markup
    #[serde(default)]
    pub content: String,
    /// Short abstract
    #[serde(default)]
    pub summary: String,
    /// Raw tag payload as stored by the CMS
    #[serde(default)]
    pub tags: serde_json::Value,
    /// Editorial status
    #[serde(default)]
    pub status: ArticleStatus,
    /// Publish time; unset for drafts
    #[serde(default)]
    pub published_at: Option<Timestamp>,
    /// Last modification time
    #[serde(default)]
    pub updated_at: Timestamp,
    /// Owning division
    #[serde(default)]
    pub division: Option<DivisionRef>,
    /// Credited authors in byline order
    #[serde(default)]
    pub authors: Vec<AuthorRef>,
}

impl SourceArticle {
    /// Create a published article with the given id, title and publish time
    ///
    /// Remaining fields start empty; use the `with_*` builders to fill them.
    pub fn published(id: impl Into<ArticleId>, title: impl Into<String>, at: Timestamp) -> Self {
        SourceArticle {
            id: id.into(),
            slug: String::new(),
            title: title.into(),
            content: String::new(),
            summary: String::new(),
            tags: serde_json::Value::Null,
            status: ArticleStatus::Published,
            published_at: Some(at),
            updated_at: at,
            division: None,
            authors: Vec::new(),
        }
    }

    /// Builder: set slug
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Builder: set body
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Builder: set summary
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Builder: set tags from a list of names
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = serde_json::Value::Array(
            tags.into_iter()
                .map(|t| serde_json::Value::String(t.into()))
                .collect(),
        );
        self
    }

    /// Builder: set the raw tag payload
    pub fn with_raw_tags(mut self, tags: serde_json::Value) -> Self {
        self.tags = tags;
        self
    }

    /// Builder: set division
    pub fn with_division(mut self, id: impl Into<DivisionId>, name: impl Into<String>) -> Self {
        self.division = Some(DivisionRef {
            id: id.into(),
            name: name.into(),
        });
        self
    }

    /// Builder: append an author
    pub fn with_author(mut self, id: impl Into<AuthorId>, name: impl Into<String>) -> Self {
        self.authors.push(AuthorRef {
            id: id.into(),
            name: name.into(),
        });
        self
    }

    /// Builder: set status
    pub fn with_status(mut self, status: ArticleStatus) -> Self {
        self.status = status;
        self
    }

    /// Builder: set last modification time
    pub fn with_updated_at(mut self, at: Timestamp) -> Self {
        self.updated_at = at;
        self
    }

    /// Whether the article may appear in search results at `now`
    ///
    /// Only published articles whose publish time is not in the future are
    /// eligible.
    pub fn is_eligible(&self, now: Timestamp) -> bool {
        self.status == ArticleStatus::Published
            && self.published_at.is_some_and(|at| !at.is_after(now))
    }
}
