//! Result → human/json string formatting.
//!
//! Two modes:
//! - **Human** (default): numbered result list, aligned tables
//! - **JSON** (`--json`): `serde_json::to_string_pretty` of the service types

use folio_search::{IndexStats, QueryResult, TermCount};
use serde::Serialize;

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"serialization failed: {}\"}}", e))
}

/// Format an error.
pub fn format_error(err: &anyhow::Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(&serde_json::json!({ "error": format!("{:#}", err) })),
        OutputMode::Human => format!("(error) {:#}", err),
    }
}

/// Format a search result page.
pub fn format_search(result: &QueryResult, offset: usize, mode: OutputMode) -> String {
    if mode == OutputMode::Json {
        return to_json(result);
    }

    let mut lines = Vec::new();
    if let Some(warning) = result.warning {
        lines.push(format!("(warning) {}", warning));
    }
    if result.results.is_empty() {
        lines.push(format!("(no results, total {})", result.total));
        return lines.join("\n");
    }

    for (i, hit) in result.results.iter().enumerate() {
        lines.push(format!(
            "{}) {}  [{}]  score {:.1}",
            offset + i + 1,
            hit.title,
            hit.id,
            hit.score
        ));

        let mut meta = Vec::new();
        if let Some(division) = &hit.division_name {
            meta.push(division.clone());
        }
        if !hit.author_names.is_empty() {
            meta.push(hit.author_names.join(", "));
        }
        meta.push(format!("published {}", hit.published_at.as_secs()));
        if !hit.tags.is_empty() {
            meta.push(format!("tags: {}", hit.tags.join(", ")));
        }
        lines.push(format!("   {}", meta.join(" | ")));

        if let Some(snippet) = &hit.snippet {
            lines.push(format!("   {}", snippet));
        }
    }

    let first = offset + 1;
    let last = offset + result.results.len();
    lines.push(format!(
        "({}-{} of {}{})",
        first,
        last,
        result.total,
        if result.has_more { ", more available" } else { "" }
    ));
    lines.join("\n")
}

/// Format autocomplete suggestions.
pub fn format_suggestions(suggestions: &[String], mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(suggestions),
        OutputMode::Human if suggestions.is_empty() => "(empty list)".to_string(),
        OutputMode::Human => suggestions
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}) {}", i + 1, s))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Format popular terms as a two-column table.
pub fn format_terms(terms: &[TermCount], mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(terms),
        OutputMode::Human if terms.is_empty() => "(empty list)".to_string(),
        OutputMode::Human => {
            let width = terms.iter().map(|t| t.term.chars().count()).max().unwrap_or(0);
            terms
                .iter()
                .map(|t| format!("{:<width$}  {}", t.term, t.count, width = width))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

/// Format index statistics.
pub fn format_stats(stats: &IndexStats, mode: OutputMode) -> String {
    if mode == OutputMode::Json {
        return to_json(stats);
    }

    let mut lines = vec![
        format!("status:            {}", stats.status),
        format!("articles:          {}", stats.total_articles),
        format!("unique terms:      {}", stats.index_size.unique_terms),
        format!("approx bytes:      {}", stats.index_size.approx_bytes),
        format!("generation:        {}", stats.generation),
        format!(
            "last update:       {}",
            stats
                .last_index_update
                .map_or_else(|| "(never)".to_string(), |ts| ts.as_secs().to_string())
        ),
        format!(
            "builds:            {} ok, {} failed",
            stats.builds_completed, stats.builds_failed
        ),
    ];
    if let Some(err) = &stats.last_error {
        lines.push(format!("last error:        {}", err));
    }
    lines.join("\n")
}
