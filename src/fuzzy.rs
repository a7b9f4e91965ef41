//! Bounded edit distance for fuzzy term matching.
//!
//! Queries tolerate typos up to roughly 20% of the term length (see
//! [`crate::index::FUZZY_TOLERANCE`]). The check here is a classic
//! single-row Levenshtein DP with two early exits:
//!
//! 1. `|len(a) - len(b)|` is a lower bound on edit distance, so a length
//!    difference beyond the budget rejects without allocating.
//! 2. If the minimum value in a DP row already exceeds the budget, no later
//!    row can come back under it.

/// Are `a` and `b` within `max` edits of each other?
///
/// Operates on characters, not bytes, so multi-byte UTF-8 input counts as
/// one edit per character.
pub fn levenshtein_within(a: &str, b: &str, max: usize) -> bool {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    // Length difference is a lower bound on edit distance.
    if (a_len as isize - b_len as isize).unsigned_abs() > max {
        return false;
    }

    let mut row: Vec<usize> = (0..=b_len).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        let mut row_min = row[0];

        for (j, bc) in b.chars().enumerate() {
            let up = row[j + 1];
            let substitution_cost = usize::from(ac != bc);
            row[j + 1] = (up + 1).min(row[j] + 1).min(diagonal + substitution_cost);
            diagonal = up;
            row_min = row_min.min(row[j + 1]);
        }

        // Row minimum only grows from here; bail once it blows the budget.
        if row_min > max {
            return false;
        }
    }

    row[b_len] <= max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_is_zero_edits() {
        assert!(levenshtein_within("hello", "hello", 0));
    }

    #[test]
    fn single_edit_variants() {
        assert!(levenshtein_within("hello", "hallo", 1));
        assert!(levenshtein_within("hello", "hell", 1));
        assert!(levenshtein_within("hello", "helloo", 1));
        assert!(!levenshtein_within("hello", "help", 1));
    }

    #[test]
    fn length_gap_short_circuits() {
        assert!(!levenshtein_within("a", "abcdef", 2));
    }

    #[test]
    fn unicode_counts_characters_not_bytes() {
        assert!(levenshtein_within("café", "cafe", 1));
        assert!(!levenshtein_within("café", "cafe", 0));
    }

    #[test]
    fn empty_strings() {
        assert!(levenshtein_within("", "", 0));
        assert!(levenshtein_within("", "ab", 2));
        assert!(!levenshtein_within("", "abc", 2));
    }
}
