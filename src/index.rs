//! The lexical index over content sections.
//!
//! # Architecture
//!
//! One [`SectionIndex`] per (collection, locale) key, built lazily on first
//! `prepare()` and superseded, never mutated, if the section list changes.
//! It combines:
//!
//! 1. **Inverted index**: term → posting list (O(1) exact word lookup)
//! 2. **Sorted vocabulary**: prefix search via binary search, fuzzy search
//!    via a bounded-Levenshtein scan
//!
//! At blog scale (tens to low hundreds of sections, a few thousand unique
//! terms) the fuzzy scan over the whole vocabulary is microseconds; nothing
//! fancier is warranted.
//!
//! # Scoring
//!
//! Field weights dominate match-kind weights: a fuzzy title hit still beats
//! an exact content hit.
//!
//! ```text
//! score(term, section) = max over fields (field_weight) × match_weight
//! Title (100) > Ancestry (10) > Content (1)
//! Exact (1.0) > Prefix (0.5) > Fuzzy (0.3)
//! ```
//!
//! Multi-word queries are AND semantics: a section must match every term,
//! and its per-term scores are summed.
//!
//! # Invariants
//!
//! - Every posting's `section_idx` is a valid index into `sections`.
//! - `vocabulary` is sorted and contains exactly the keys of `terms`.
//! - `build_index(&[])` yields a valid empty index; searching it returns
//!   nothing and never fails.

use crate::fuzzy::levenshtein_within;
use crate::types::SearchableSection;
use crate::utils::normalize;
use std::collections::HashMap;

/// Fraction of a query term's length allowed to differ under fuzzy matching.
pub const FUZZY_TOLERANCE: f64 = 0.2;

const WEIGHT_TITLE: f64 = 100.0;
const WEIGHT_ANCESTRY: f64 = 10.0;
const WEIGHT_CONTENT: f64 = 1.0;

const MATCH_EXACT: f64 = 1.0;
const MATCH_PREFIX: f64 = 0.5;
const MATCH_FUZZY: f64 = 0.3;

/// Which indexed field a posting came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    /// The section's own heading text.
    Title,
    /// The heading hierarchy above the section (`titles`).
    Ancestry,
    /// The section body.
    Content,
}

impl FieldKind {
    fn weight(self) -> f64 {
        match self {
            FieldKind::Title => WEIGHT_TITLE,
            FieldKind::Ancestry => WEIGHT_ANCESTRY,
            FieldKind::Content => WEIGHT_CONTENT,
        }
    }
}

/// One term occurrence, reduced to the section it occurred in and the best
/// field weight it achieved there.
#[derive(Debug, Clone)]
struct Posting {
    section_idx: u32,
    weight: f64,
}

/// A section matched by a query, with its relevance score attached.
#[derive(Debug, Clone)]
pub struct SectionHit {
    pub section: SearchableSection,
    pub score: f64,
}

/// A prefix- and fuzzy-searchable index over a list of sections.
///
/// Opaque and immutable once built; rebuilds produce a fresh instance.
#[derive(Debug, Clone, Default)]
pub struct SectionIndex {
    sections: Vec<SearchableSection>,
    terms: HashMap<String, Vec<Posting>>,
    /// Sorted unique terms, for prefix ranges and fuzzy scans.
    vocabulary: Vec<String>,
}

/// Split normalized text into indexable terms.
fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Maximum edit distance for a fuzzy match on a term of the given length.
fn fuzzy_budget(term_len: usize) -> usize {
    (term_len as f64 * FUZZY_TOLERANCE).round() as usize
}

/// Build a [`SectionIndex`] from a section list.
///
/// Pure and infallible: an empty list yields a valid, queryable, empty
/// index.
pub fn build_index(sections: &[SearchableSection]) -> SectionIndex {
    // term → (section_idx → best field weight seen)
    let mut accumulator: HashMap<String, HashMap<u32, f64>> = HashMap::new();

    let mut index_field = |text: &str, field: FieldKind, section_idx: u32| {
        for term in tokenize(text) {
            let per_section = accumulator.entry(term).or_default();
            let entry = per_section.entry(section_idx).or_insert(0.0);
            *entry = entry.max(field.weight());
        }
    };

    for (idx, section) in sections.iter().enumerate() {
        let section_idx = idx as u32;
        index_field(&section.title, FieldKind::Title, section_idx);
        for ancestor_title in &section.titles {
            index_field(ancestor_title, FieldKind::Ancestry, section_idx);
        }
        index_field(&section.content, FieldKind::Content, section_idx);
    }

    let mut terms: HashMap<String, Vec<Posting>> = HashMap::with_capacity(accumulator.len());
    for (term, per_section) in accumulator {
        let mut postings: Vec<Posting> = per_section
            .into_iter()
            .map(|(section_idx, weight)| Posting {
                section_idx,
                weight,
            })
            .collect();
        postings.sort_by_key(|p| p.section_idx);
        terms.insert(term, postings);
    }

    let mut vocabulary: Vec<String> = terms.keys().cloned().collect();
    vocabulary.sort();

    tracing::debug!(
        sections = sections.len(),
        terms = vocabulary.len(),
        "built section index"
    );

    SectionIndex {
        sections: sections.to_vec(),
        terms,
        vocabulary,
    }
}

impl SectionIndex {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Search for sections matching the query.
    ///
    /// Returns hits ranked by descending score. Empty or whitespace-only
    /// queries return nothing rather than erroring.
    pub fn search(&self, query: &str) -> Vec<SectionHit> {
        let parts = tokenize(query);
        if parts.is_empty() || self.sections.is_empty() {
            return Vec::new();
        }

        // Score each query term independently.
        let score_sets: Vec<HashMap<u32, f64>> =
            parts.iter().map(|term| self.score_term(term)).collect();

        // AND semantics: keep sections matching every term, summing scores.
        let mut combined = score_sets[0].clone();
        for term_scores in &score_sets[1..] {
            combined.retain(|section_idx, score| {
                if let Some(additional) = term_scores.get(section_idx) {
                    *score += additional;
                    true
                } else {
                    false
                }
            });
            if combined.is_empty() {
                return Vec::new();
            }
        }

        let mut hits: Vec<SectionHit> = combined
            .into_iter()
            .map(|(section_idx, score)| SectionHit {
                section: self.sections[section_idx as usize].clone(),
                score,
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits
    }

    /// Score one query term across exact, prefix, and fuzzy expansions,
    /// max-combining per section.
    fn score_term(&self, term: &str) -> HashMap<u32, f64> {
        let mut scores: HashMap<u32, f64> = HashMap::new();

        let mut absorb = |postings: &[Posting], match_weight: f64| {
            for posting in postings {
                let score = posting.weight * match_weight;
                let entry = scores.entry(posting.section_idx).or_insert(0.0);
                *entry = entry.max(score);
            }
        };

        if let Some(postings) = self.terms.get(term) {
            absorb(postings, MATCH_EXACT);
        }

        // Prefix expansion over the sorted vocabulary.
        let start = self.vocabulary.partition_point(|v| v.as_str() < term);
        for candidate in &self.vocabulary[start..] {
            if !candidate.starts_with(term) {
                break;
            }
            if candidate == term {
                continue;
            }
            if let Some(postings) = self.terms.get(candidate) {
                absorb(postings, MATCH_PREFIX);
            }
        }

        // Fuzzy expansion, budgeted by term length.
        let budget = fuzzy_budget(term.chars().count());
        if budget > 0 {
            for candidate in &self.vocabulary {
                if candidate == term || candidate.starts_with(term) {
                    continue;
                }
                if levenshtein_within(term, candidate, budget) {
                    if let Some(postings) = self.terms.get(candidate) {
                        absorb(postings, MATCH_FUZZY);
                    }
                }
            }
        }

        scores
    }
}
