//! Property tests for the normalizer and similarity scorer.

use currec_map::{normalize, similarity};
use proptest::prelude::*;

proptest! {
    #[test]
    fn normalize_is_idempotent(s in ".*") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_never_leaves_edge_whitespace(s in ".*") {
        let out = normalize(&s);
        prop_assert_eq!(out.trim(), out.as_str());
    }

    #[test]
    fn similarity_of_identical_strings_is_one(s in ".*") {
        prop_assert_eq!(similarity(&s, &s), 1.0);
    }

    #[test]
    fn similarity_is_symmetric(a in ".*", b in ".*") {
        prop_assert_eq!(similarity(&a, &b), similarity(&b, &a));
    }

    #[test]
    fn similarity_stays_in_unit_interval(a in ".*", b in ".*") {
        let score = similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
    }
}
