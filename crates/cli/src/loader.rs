//! Article export loading.
//!
//! Accepts either a bare JSON array of articles or an object with an
//! `articles` array, the two shapes the CMS export tool produces.

use std::path::Path;

use anyhow::Context;
use folio_core::{MemorySource, SourceArticle};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Export {
    Bare(Vec<SourceArticle>),
    Wrapped { articles: Vec<SourceArticle> },
}

/// Parse an export document.
pub fn parse_articles(content: &str) -> anyhow::Result<Vec<SourceArticle>> {
    let export: Export =
        serde_json::from_str(content).context("export is not an article array or {\"articles\": [...]}")?;
    Ok(match export {
        Export::Bare(articles) | Export::Wrapped { articles } => articles,
    })
}

/// Load an export file into an in-memory provider.
pub fn load_articles(path: &Path) -> anyhow::Result<MemorySource> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read article export '{}'", path.display()))?;
    let articles = parse_articles(&content)
        .with_context(|| format!("failed to parse article export '{}'", path.display()))?;
    tracing::debug!(target: "folio::cli", path = %path.display(), records = articles.len(), "Loaded article export");
    Ok(MemorySource::new(articles))
}
