//! Tag payload parsing
//!
//! The CMS stores tags as a loosely typed JSON blob. Depending on the article's
//! age it is an array of names, an array of `{name, slug}` objects, a string
//! holding an encoded array, or a comma-separated string. Everything is parsed
//! once here, at index-build time, into a normalized set.

use serde_json::Value;
use std::collections::BTreeSet;
use tracing::debug;

/// Normalize one tag name: trim, lowercase, collapse inner whitespace.
///
/// Returns `None` for blank names.
pub fn normalize_tag(raw: &str) -> Option<String> {
    let tag = raw
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");
    if tag.is_empty() {
        None
    } else {
        Some(tag)
    }
}

/// Parse a raw tag payload into a normalized, de-duplicated set
pub fn parse_tags(raw: &Value) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();
    collect(raw, &mut tags, true);
    tags
}

fn collect(value: &Value, tags: &mut BTreeSet<String>, top_level: bool) {
    match value {
        Value::Null => {}
        Value::String(s) => {
            let trimmed = s.trim();
            if top_level && trimmed.starts_with('[') {
                // JSON array stored as text
                match serde_json::from_str::<Value>(trimmed) {
                    Ok(inner @ Value::Array(_)) => collect(&inner, tags, false),
                    _ => debug!(target: "folio::index", raw = %trimmed, "Unparseable tag string"),
                }
            } else if top_level {
                tags.extend(trimmed.split(',').filter_map(normalize_tag));
            } else {
                tags.extend(normalize_tag(trimmed));
            }
        }
        Value::Array(items) => {
            for item in items {
                collect(item, tags, false);
            }
        }
        Value::Object(map) => {
            let name = map
                .get("name")
                .or_else(|| map.get("slug"))
                .and_then(Value::as_str);
            match name {
                Some(name) => tags.extend(normalize_tag(name)),
                None => debug!(target: "folio::index", "Tag object without name or slug"),
            }
        }
        other => debug!(target: "folio::index", raw = %other, "Ignoring non-text tag value"),
    }
}
