//! Search configuration via `folio-search.toml`
//!
//! Every key is optional; missing keys take the defaults below. Field weights
//! are fixed when the service is constructed and read by the scorer at query
//! time. Their ordering (title > tags > summary > content) is a ranking
//! contract, so `validate()` rejects configurations that break it, including
//! a phrase bonus large enough to lift a content phrase over a title match.

use folio_core::{SearchError, SearchResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "folio-search.toml";

/// Per-field score multipliers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    /// Weight of a title token match
    pub title: f32,
    /// Weight of a tag token match
    pub tags: f32,
    /// Weight of a summary token match
    pub summary: f32,
    /// Weight of a content token match
    pub content: f32,
}

impl Default for FieldWeights {
    fn default() -> Self {
        FieldWeights {
            title: 10.0,
            tags: 6.0,
            summary: 3.0,
            content: 1.0,
        }
    }
}

/// Search subsystem configuration
///
/// # Example
///
/// ```toml
/// default_limit = 20
/// max_limit = 100
/// phrase_bonus = 15.0
///
/// [weights]
/// title = 10.0
/// tags = 6.0
/// summary = 3.0
/// content = 1.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Page size when the request omits `limit`
    pub default_limit: usize,
    /// Largest accepted `limit`
    pub max_limit: usize,
    /// Longest accepted query, in characters
    pub max_query_len: usize,
    /// Suggestions returned when the caller omits a count
    pub default_suggestions: usize,
    /// Upper bound on suggestions per call
    pub max_suggestions: usize,
    /// Snippet length in characters
    pub snippet_window: usize,
    /// Marker inserted before a highlighted term
    pub highlight_pre: String,
    /// Marker inserted after a highlighted term
    pub highlight_post: String,
    /// Added when the full query appears as a contiguous phrase in a field
    pub phrase_bonus: f32,
    /// Build the index on the first query if it was never built
    pub build_on_first_query: bool,
    /// Report the index as stale once it is older than this many seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_index_age_secs: Option<u64>,
    /// Field weights
    pub weights: FieldWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            default_limit: 20,
            max_limit: 100,
            max_query_len: 256,
            default_suggestions: 5,
            max_suggestions: 20,
            snippet_window: 160,
            highlight_pre: "<mark>".to_string(),
            highlight_post: "</mark>".to_string(),
            phrase_bonus: 15.0,
            build_on_first_query: false,
            max_index_age_secs: None,
            weights: FieldWeights::default(),
        }
    }
}

impl SearchConfig {
    /// Maximum index age as a duration
    pub fn max_index_age(&self) -> Option<Duration> {
        self.max_index_age_secs.map(Duration::from_secs)
    }

    /// Check internal consistency
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Config` naming the first offending setting.
    pub fn validate(&self) -> SearchResult<()> {
        let w = &self.weights;
        if !(w.content > 0.0 && w.summary > w.content && w.tags > w.summary && w.title > w.tags) {
            return Err(SearchError::config(format!(
                "weights must satisfy title > tags > summary > content > 0 (got {} / {} / {} / {})",
                w.title, w.tags, w.summary, w.content
            )));
        }
        if self.phrase_bonus < 0.0 || !self.phrase_bonus.is_finite() {
            return Err(SearchError::config("phrase_bonus must be a non-negative number"));
        }
        // A two-token phrase in content must stay below the same two tokens in the title
        let bonus_ceiling = 2.0 * (w.title - w.content);
        if self.phrase_bonus >= bonus_ceiling {
            return Err(SearchError::config(format!(
                "phrase_bonus must be below 2 x (title - content) = {} (got {})",
                bonus_ceiling, self.phrase_bonus
            )));
        }
        if self.default_limit == 0 || self.default_limit > self.max_limit {
            return Err(SearchError::config(format!(
                "default_limit must be between 1 and max_limit ({})",
                self.max_limit
            )));
        }
        if self.max_query_len == 0 {
            return Err(SearchError::config("max_query_len must be positive"));
        }
        if self.default_suggestions > self.max_suggestions {
            return Err(SearchError::config(
                "default_suggestions must not exceed max_suggestions",
            ));
        }
        if self.snippet_window < 20 {
            return Err(SearchError::config("snippet_window must be at least 20"));
        }
        if self.highlight_pre.is_empty() || self.highlight_post.is_empty() {
            return Err(SearchError::config("highlight markers must not be empty"));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Folio search configuration

# Pagination
default_limit = 20
max_limit = 100
max_query_len = 256

# Autocomplete
default_suggestions = 5
max_suggestions = 20

# Result snippets
snippet_window = 160
highlight_pre = "<mark>"
highlight_post = "</mark>"

# Bonus added when the whole query appears as a phrase in one field;
# must stay below 2 x (weights.title - weights.content)
phrase_bonus = 15.0

# Build the index on the first query instead of waiting for initialize
build_on_first_query = false

# Report the index as stale after this many seconds (unset = never)
# max_index_age_secs = 3600

# Field weights; must satisfy title > tags > summary > content
[weights]
title = 10.0
tags = 6.0
summary = 3.0
content = 1.0
"#
    }

    /// Parse and validate config from TOML text
    pub fn from_toml_str(content: &str) -> SearchResult<Self> {
        let config: SearchConfig = toml::from_str(content)
            .map_err(|e| SearchError::config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> SearchResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SearchError::config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(target: "folio::config", path = %path.display(), "Loaded search config");
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> SearchResult<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                SearchError::config(format!(
                    "failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}
