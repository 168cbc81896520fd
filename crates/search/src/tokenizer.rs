//! Text tokenizer for indexing and queries
//!
//! Pipeline: strip HTML markup → UAX#29 word boundaries → strip possessives
//!           → keep alphanumerics → lowercase → drop short tokens → drop stopwords
//!
//! No stemming: "policies" and "policy" are different tokens. Documents and
//! queries go through the same pipeline so that matching is symmetric.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use unicode_segmentation::UnicodeSegmentation;

/// English stopwords: articles, conjunctions, prepositions, pronouns and
/// common auxiliary verbs.
const STOPWORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "am", "an", "and", "any", "are", "as", "at", "be",
    "been", "being", "but", "by", "can", "could", "did", "do", "does", "for", "from", "had",
    "has", "have", "he", "her", "his", "how", "if", "in", "into", "is", "it", "its", "may",
    "might", "must", "no", "nor", "not", "of", "on", "or", "our", "shall", "she", "should", "so",
    "such", "than", "that", "the", "their", "them", "then", "there", "these", "they", "this",
    "those", "to", "was", "we", "were", "what", "when", "which", "while", "who", "will", "with",
    "would", "yet", "you", "your",
];

static STOPWORD_SET: Lazy<FxHashSet<&'static str>> =
    Lazy::new(|| STOPWORDS.iter().copied().collect());

/// Minimum token length in characters
pub const MIN_TOKEN_CHARS: usize = 2;

/// Check if a normalized token is a stopword
#[inline]
pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

/// Strip English possessive suffix (`'s` / `\u{2019}s`).
#[inline]
fn strip_possessive(word: &str) -> &str {
    word.strip_suffix("'s")
        .or_else(|| word.strip_suffix("\u{2019}s"))
        .unwrap_or(word)
}

/// Normalize a single word as produced by UAX#29 segmentation
///
/// Returns `None` when the word is dropped (too short or a stopword).
pub fn normalize_word(word: &str) -> Option<String> {
    let token: String = strip_possessive(word)
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    if token.chars().count() < MIN_TOKEN_CHARS || is_stopword(&token) {
        return None;
    }
    Some(token)
}

/// Tokenize plain text (no markup handling)
pub fn tokenize_plain(text: &str) -> Vec<String> {
    text.unicode_words().filter_map(normalize_word).collect()
}

/// Tokenize text into searchable terms.
///
/// # Example
///
/// ```
/// use folio_search::tokenizer::tokenize;
///
/// let tokens = tokenize("<p>The <b>Agriculture</b> Policy's reach</p>");
/// assert_eq!(tokens, vec!["agriculture", "policy", "reach"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    if text.contains('<') || text.contains('&') {
        tokenize_plain(&strip_markup(text))
    } else {
        tokenize_plain(text)
    }
}

/// Remove HTML markup and decode common entities
///
/// Tags become word separators, `<script>`/`<style>` bodies are dropped, and
/// runs of whitespace collapse to a single space. A `<` that does not open a
/// tag (`a < b`) is kept as text.
pub fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(['<', '&']) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        if rest.starts_with('<') {
            let opens_tag = rest[1..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!');
            match rest.find('>') {
                Some(end) if opens_tag => {
                    let tag = &rest[1..end];
                    rest = &rest[end + 1..];
                    if !tag.starts_with('/') {
                        let name = tag_name(tag);
                        if name.eq_ignore_ascii_case("script") || name.eq_ignore_ascii_case("style")
                        {
                            rest = skip_past_closing(rest, name);
                        }
                    }
                    out.push(' ');
                }
                _ => {
                    out.push('<');
                    rest = &rest[1..];
                }
            }
        } else {
            match decode_entity(rest) {
                Some((ch, len)) => {
                    out.push(ch);
                    rest = &rest[len..];
                }
                None => {
                    out.push('&');
                    rest = &rest[1..];
                }
            }
        }
    }
    out.push_str(rest);

    collapse_whitespace(&out)
}

/// Collapse whitespace runs into single spaces and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn tag_name(tag: &str) -> &str {
    let tag = tag.trim_start_matches('/');
    let end = tag
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(tag.len());
    &tag[..end]
}

fn skip_past_closing<'a>(rest: &'a str, name: &str) -> &'a str {
    // ASCII lowercasing keeps byte offsets aligned with `rest`
    let lower = rest.to_ascii_lowercase();
    let closing = format!("</{}", name.to_ascii_lowercase());
    match lower.find(&closing) {
        Some(start) => match rest[start..].find('>') {
            Some(end) => &rest[start + end + 1..],
            None => "",
        },
        None => "",
    }
}

fn decode_entity(s: &str) -> Option<(char, usize)> {
    let semi = s.char_indices().take(12).find(|&(_, c)| c == ';')?.0;
    let name = &s[1..semi];
    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse::<u32>().ok()?,
            };
            char::from_u32(value)?
        }
    };
    Some((ch, semi + 1))
}
