//! Result snippets with highlighted matches
//!
//! The snippet is taken from the first field, in weight order, that contains a
//! query token. Within that field's original text a window of
//! `snippet_window` characters is cut around the first match, its edges moved
//! to word boundaries, and every matching word wrapped in the configured
//! highlight markers.

use crate::config::SearchConfig;
use crate::document::{Field, IndexedDocument};
use crate::scorer::QueryTerms;
use crate::tokenizer::normalize_word;
use unicode_segmentation::UnicodeSegmentation;

/// Marker for text cut at a window edge
pub const ELLIPSIS: &str = "...";

/// Window and markers used when rendering a snippet
#[derive(Debug, Clone, Copy)]
pub struct SnippetStyle<'a> {
    /// Window length in characters
    pub window: usize,
    /// Inserted before a match
    pub pre: &'a str,
    /// Inserted after a match
    pub post: &'a str,
}

impl<'a> SnippetStyle<'a> {
    /// Style from the search configuration
    pub fn from_config(config: &'a SearchConfig) -> Self {
        SnippetStyle {
            window: config.snippet_window,
            pre: &config.highlight_pre,
            post: &config.highlight_post,
        }
    }
}

/// Snippet for a matched document, or `None` if no field contains a query token
pub fn build_snippet(doc: &IndexedDocument, query: &QueryTerms, style: SnippetStyle<'_>) -> Option<String> {
    let field = Field::ALL
        .into_iter()
        .find(|&f| doc.fields.get(f).iter().any(|t| query.contains(t)))?;
    highlight(&doc.field_text(field), query, style)
}

/// Cut a window around the first match in `text` and mark every match inside it
pub fn highlight(text: &str, query: &QueryTerms, style: SnippetStyle<'_>) -> Option<String> {
    let spans: Vec<(usize, usize)> = text
        .unicode_word_indices()
        .filter(|(_, word)| normalize_word(word).is_some_and(|t| query.contains(&t)))
        .map(|(i, word)| (i, i + word.len()))
        .collect();
    let &(first_start, first_end) = spans.first()?;

    let (start, end) = window_bounds(text, first_start, first_end, style.window);

    let mut out = String::with_capacity(end - start + spans.len() * (style.pre.len() + style.post.len()) + 6);
    if start > 0 {
        out.push_str(ELLIPSIS);
    }
    let mut cursor = start;
    for &(s, e) in spans.iter().filter(|&&(s, e)| s >= start && e <= end) {
        out.push_str(&text[cursor..s]);
        out.push_str(style.pre);
        out.push_str(&text[s..e]);
        out.push_str(style.post);
        cursor = e;
    }
    out.push_str(&text[cursor..end]);
    if end < text.len() {
        out.push_str(ELLIPSIS);
    }
    Some(out)
}

/// Byte bounds of the snippet window
///
/// The window opens a quarter of its length before the first match and always
/// contains that match in full.
fn window_bounds(text: &str, match_start: usize, match_end: usize, window: usize) -> (usize, usize) {
    let total_chars = text.chars().count();
    if total_chars <= window {
        return (0, text.len());
    }

    let match_char = text[..match_start].chars().count();
    let mut start_char = match_char.saturating_sub(window / 4);
    let end_char = (start_char + window).min(total_chars);
    if end_char - start_char < window {
        start_char = end_char.saturating_sub(window);
    }

    let mut start = byte_offset(text, start_char);
    let mut end = byte_offset(text, end_char);

    // Move the start forward past a partial word, never beyond the match
    if start > 0 && !text[..start].ends_with(char::is_whitespace) {
        if let Some(ws) = text[start..match_start].find(char::is_whitespace) {
            start += ws;
        }
    }
    start += text[start..match_start].len() - text[start..match_start].trim_start().len();

    // Move the end back to the last whitespace, keeping the match
    if end < match_end {
        end = match_end;
    } else if end < text.len() && !text[end..].starts_with(char::is_whitespace) {
        if let Some(ws) = text[match_end..end].rfind(char::is_whitespace) {
            end = match_end + ws;
        }
    }
    end -= text[start..end].len() - text[start..end].trim_end().len();

    (start, end)
}

fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices().nth(char_idx).map_or(text.len(), |(i, _)| i)
}
