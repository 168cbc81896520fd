//! Indexed document representation
//!
//! An `IndexedDocument` is built once per article per build and never mutated
//! afterwards; refreshes replace the whole document.

use crate::tags::parse_tags;
use crate::tokenizer::{strip_markup, tokenize, tokenize_plain};
use folio_core::{ArticleId, AuthorId, DivisionId, SourceArticle, Timestamp};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeSet;

/// Searchable fields, in decreasing weight order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Headline
    Title,
    /// Tag names
    Tags,
    /// Abstract
    Summary,
    /// Body
    Content,
}

impl Field {
    /// All fields, highest weight first
    pub const ALL: [Field; 4] = [Field::Title, Field::Tags, Field::Summary, Field::Content];

    /// Field name
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Tags => "tags",
            Field::Summary => "summary",
            Field::Content => "content",
        }
    }
}

/// Normalized token sequences per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFields {
    /// Title tokens
    pub title: Vec<String>,
    /// Tag tokens, tags in sorted order
    pub tags: Vec<String>,
    /// End offset in `tags` of each tag's tokens
    pub tag_ends: Vec<usize>,
    /// Summary tokens
    pub summary: Vec<String>,
    /// Content tokens
    pub content: Vec<String>,
}

impl DocumentFields {
    /// Tokens of one field
    pub fn get(&self, field: Field) -> &[String] {
        match field {
            Field::Title => &self.title,
            Field::Tags => &self.tags,
            Field::Summary => &self.summary,
            Field::Content => &self.content,
        }
    }

    /// Fields with their tokens, highest weight first
    pub fn iter(&self) -> impl Iterator<Item = (Field, &[String])> {
        Field::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Runs of tokens a phrase may match within
    ///
    /// One run per tag for `Field::Tags`, the whole token sequence otherwise.
    pub fn phrase_spans(&self, field: Field) -> impl Iterator<Item = &[String]> {
        let tokens = self.get(field);
        let ends: &[usize] = match field {
            Field::Tags => &self.tag_ends,
            _ => &[],
        };
        let whole = ends.is_empty().then_some(tokens);
        let per_tag = ends.iter().scan(0, move |start, &end| {
            let span = &tokens[*start..end];
            *start = end;
            Some(span)
        });
        whole.into_iter().chain(per_tag)
    }

    /// Every token of every field
    pub fn all_tokens(&self) -> impl Iterator<Item = &String> {
        self.title
            .iter()
            .chain(&self.tags)
            .chain(&self.summary)
            .chain(&self.content)
    }

    /// Total tokens across fields
    pub fn token_count(&self) -> usize {
        self.title.len() + self.tags.len() + self.summary.len() + self.content.len()
    }
}

/// Untokenized text kept for result display and snippets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSource {
    /// Headline as published
    pub title: String,
    /// Abstract as published
    pub summary: String,
    /// URL slug
    pub slug: String,
    /// Division display name
    pub division_name: Option<String>,
    /// Author display names in byline order
    pub author_names: Vec<String>,
    /// Body with markup stripped
    pub content_text: String,
}

/// Tokenized, denormalized article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedDocument {
    /// Article id (unique in the index)
    pub id: ArticleId,
    /// Field tokens
    pub fields: DocumentFields,
    /// Owning division, for filtering
    pub division_id: Option<DivisionId>,
    /// Credited authors, for filtering
    pub author_ids: Vec<AuthorId>,
    /// Normalized tag names, for filtering and display
    pub tags: BTreeSet<String>,
    /// Publish time, for filtering and tie-breaks
    pub published_at: Timestamp,
    /// Display text
    pub raw: DocumentSource,
}

impl IndexedDocument {
    /// Tokenize an article
    ///
    /// Tags are parsed from the raw payload here and nowhere else.
    pub fn from_article(article: &SourceArticle) -> Self {
        let tags = parse_tags(&article.tags);
        let content_text = strip_markup(&article.content);

        let mut tag_tokens = Vec::new();
        let mut tag_ends = Vec::with_capacity(tags.len());
        for tag in &tags {
            tag_tokens.extend(tokenize_plain(tag));
            tag_ends.push(tag_tokens.len());
        }

        let fields = DocumentFields {
            title: tokenize(&article.title),
            tags: tag_tokens,
            tag_ends,
            summary: tokenize(&article.summary),
            content: tokenize_plain(&content_text),
        };

        IndexedDocument {
            id: article.id.clone(),
            fields,
            division_id: article.division.as_ref().map(|d| d.id.clone()),
            author_ids: article.authors.iter().map(|a| a.id.clone()).collect(),
            tags,
            published_at: article.published_at.unwrap_or(article.updated_at),
            raw: DocumentSource {
                title: article.title.clone(),
                summary: article.summary.clone(),
                slug: article.slug.clone(),
                division_name: article.division.as_ref().map(|d| d.name.clone()),
                author_names: article.authors.iter().map(|a| a.name.clone()).collect(),
                content_text,
            },
        }
    }

    /// Original text of a field
    ///
    /// Tags are rendered as a comma-separated list.
    pub fn field_text(&self, field: Field) -> Cow<'_, str> {
        match field {
            Field::Title => Cow::Borrowed(&self.raw.title),
            Field::Tags => Cow::Owned(
                self.tags.iter().map(String::as_str).collect::<Vec<_>>().join(", "),
            ),
            Field::Summary => Cow::Borrowed(&self.raw.summary),
            Field::Content => Cow::Borrowed(&self.raw.content_text),
        }
    }

    /// Rough heap footprint in bytes
    pub fn approx_bytes(&self) -> usize {
        let tokens: usize = self.fields.all_tokens().map(|t| t.len() + 24).sum();
        let raw = self.raw.title.len()
            + self.raw.summary.len()
            + self.raw.slug.len()
            + self.raw.content_text.len()
            + self.raw.division_name.as_ref().map_or(0, String::len)
            + self.raw.author_names.iter().map(String::len).sum::<usize>();
        let tags: usize = self.tags.iter().map(|t| t.len() + 24).sum();
        std::mem::size_of::<Self>() + self.id.as_str().len() + tokens + raw + tags
    }
}
