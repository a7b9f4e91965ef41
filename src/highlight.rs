//! Result normalization: escaping, highlight wrapping, snippet extraction.
//!
//! Every raw match, whatever its source, funnels through [`into_result`] so
//! the presentation layer only ever sees one shape.
//!
//! Escaping always happens before highlighting. Highlighting injects
//! `<mark>` tags, so running the escaper afterwards would mangle them, and
//! highlighting unescaped text would let content smuggle markup into the
//! result list.

use crate::types::{GlobalSearchResult, ResultBehavior, ResultType};
use regex::RegexBuilder;

/// Keywords shorter than this highlight nothing; single-character marks are
/// noise.
const MIN_HIGHLIGHT_LEN: usize = 2;

/// Snippet window: characters kept before the first keyword occurrence.
const SNIPPET_BEFORE: usize = 40;
/// Snippet window: characters kept after the occurrence (plus the keyword).
const SNIPPET_AFTER: usize = 60;
/// Fallback snippet length when the keyword is absent from the content.
const SNIPPET_FALLBACK: usize = 140;

/// Escape the five HTML metacharacters.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// HTML-escape `text`, then wrap every case-insensitive occurrence of the
/// keyword in `<mark>` tags.
///
/// The keyword is regex-escaped, so query punctuation is matched literally.
pub fn highlight_text(text: &str, keyword: &str) -> String {
    let safe_text = escape_html(text);
    let trimmed = keyword.trim();
    if trimmed.chars().count() < MIN_HIGHLIGHT_LEN {
        return safe_text;
    }

    let pattern = match RegexBuilder::new(&regex::escape(trimmed))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        // regex::escape output always compiles; degrade to no highlight if not.
        Err(_) => return safe_text,
    };

    pattern
        .replace_all(&safe_text, "<mark>$0</mark>")
        .into_owned()
}

/// Lowercase a string character-by-character, preserving character count.
///
/// `str::to_lowercase` can change the number of characters (ß → ss), which
/// would break index arithmetic between the lowered and original text.
fn lower_chars(text: &str) -> Vec<char> {
    text.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

/// Index of the first case-insensitive occurrence of `needle` in `haystack`,
/// in characters.
fn find_case_insensitive(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&i| haystack[i..i + needle.len()] == *needle)
}

/// Extract a display snippet around the first occurrence of the keyword.
///
/// The window runs from [`SNIPPET_BEFORE`] characters before the match to
/// the keyword length plus [`SNIPPET_AFTER`] after it, with an ellipsis on
/// any clipped edge. When the keyword does not occur, the first
/// [`SNIPPET_FALLBACK`] characters are used instead.
///
/// All arithmetic is in characters, not bytes.
pub fn build_snippet(content: &str, keyword: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let content_chars: Vec<char> = content.chars().collect();
    let lower_content = lower_chars(content);
    let lower_keyword = lower_chars(keyword);

    let Some(index) = find_case_insensitive(&lower_content, &lower_keyword) else {
        if content_chars.len() > SNIPPET_FALLBACK {
            let head: String = content_chars[..SNIPPET_FALLBACK].iter().collect();
            return format!("{head}...");
        }
        return content.to_string();
    };

    let start = index.saturating_sub(SNIPPET_BEFORE);
    let end = (index + lower_keyword.len() + SNIPPET_AFTER).min(content_chars.len());

    let mut snippet: String = content_chars[start..end].iter().collect();
    if start > 0 {
        snippet = format!("...{snippet}");
    }
    if end < content_chars.len() {
        snippet = format!("{snippet}...");
    }
    snippet
}

/// Everything a source knows about one raw match.
#[derive(Debug, Clone)]
pub struct ResultPayload {
    pub id: String,
    pub kind: ResultType,
    pub behavior: ResultBehavior,
    pub document_title: String,
    pub section_title: String,
    pub snippet: String,
    pub score: f64,
    pub icon: Option<String>,
}

/// Normalize a raw match into the uniform result record, producing the
/// highlighted HTML variants of its text fields.
pub fn into_result(payload: ResultPayload, keyword: &str) -> GlobalSearchResult {
    GlobalSearchResult {
        document_title_html: highlight_text(&payload.document_title, keyword),
        section_title_html: highlight_text(&payload.section_title, keyword),
        snippet_html: highlight_text(&payload.snippet, keyword),
        id: payload.id,
        kind: payload.kind,
        behavior: payload.behavior,
        document_title: payload.document_title,
        section_title: payload.section_title,
        snippet: payload.snippet,
        score: payload.score,
        icon: payload.icon,
    }
}
