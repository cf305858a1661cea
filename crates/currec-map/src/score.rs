//! Edit-distance similarity scoring.
//!
//! Uses classic Levenshtein distance converted to a ratio. Subject and
//! topic names are short (well under 200 characters), so the quadratic
//! distance computation is not a concern.

use rapidfuzz::distance::levenshtein;

/// Minimum similarity for a fuzzy subject match to be accepted.
///
/// Fixed by design for parity with the original engine; not configurable
/// per call.
pub const SUBJECT_FUZZY_THRESHOLD: f64 = 0.90;

/// Similarity of two pre-normalized strings in `[0, 1]`.
///
/// `1 - distance / max(len)`, with two shortcuts: equal strings (including
/// two empties) score exactly 1.0, and exactly one empty string scores 0.0.
/// Symmetric in its arguments.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let distance = levenshtein::distance(a.chars(), b.chars());
    1.0 - distance as f64 / len_a.max(len_b) as f64
}

#[cfg(test)]
mod tests {
    use super::similarity;

    #[test]
    fn equal_strings_score_one() {
        assert_eq!(similarity("pharmacology", "pharmacology"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn one_empty_scores_zero() {
        assert_eq!(similarity("", "x"), 0.0);
        assert_eq!(similarity("x", ""), 0.0);
    }

    #[test]
    fn single_edit_ratio() {
        // one substitution over ten characters
        assert!((similarity("pharmacies", "pharmacist") - 0.8).abs() < 1e-9);
        assert!((similarity("abcd", "abcx") - 0.75).abs() < 1e-9);
    }

    #[test]
    fn symmetric() {
        let pairs = [("anatomy", "astronomy"), ("a", "abc"), ("", "xyz")];
        for (a, b) in pairs {
            assert_eq!(similarity(a, b), similarity(b, a));
        }
    }
}
