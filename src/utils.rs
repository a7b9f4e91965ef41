//! String and path utilities shared across the search subsystem.

use unicode_normalization::UnicodeNormalization;

/// Normalize a string for indexing and matching: lowercase, strip diacritics,
/// and collapse whitespace.
///
/// This lets queries match accented content and vice versa:
/// - "café" → "cafe"
/// - "naïve" → "naive"
///
/// # Algorithm
///
/// 1. NFD normalize (decompose characters into base + combining marks)
/// 2. Filter out combining marks (category Mn = Mark, Nonspacing)
/// 3. Lowercase
/// 4. Collapse whitespace
pub fn normalize(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check if a character is a combining mark (diacritic).
///
/// Combining marks have Unicode category "Mn" (Mark, Nonspacing).
/// Examples: ́ (acute), ̄ (macron), ̣ (dot below)
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{0C00}'..='\u{0C7F}' |  // Telugu (some combining marks)
        '\u{0900}'..='\u{097F}' |  // Devanagari (some combining marks)
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

/// Normalize a route path: always a leading `/`, never a trailing `/`
/// (except the root path itself, which stays `/`).
///
/// Empty input normalizes to the root path.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() || trimmed == "/" {
        return "/".to_string();
    }

    let mut normalized = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };
    while normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

/// Derive the document path from a section id by stripping the `#<anchor>`
/// fragment and normalizing the remainder.
///
/// Section ids are `<documentPath>#<anchorSlug>`, or a bare `<documentPath>`
/// for a document's lead section.
pub fn document_path(section_id: &str) -> String {
    let without_fragment = section_id.split('#').next().unwrap_or("");
    normalize_path(without_fragment)
}
