//! Property tests for the distance engine and name normalization

use namefuzz_core::{distance, normalize_name, split_name_into_parts, EditDistance};
use proptest::prelude::*;

proptest! {
    #[test]
    fn distance_matches_dynamic_programming(a in "[abc]{0,150}", b in "[abc]{0,150}") {
        prop_assert_eq!(distance(&a, &b), strsim::levenshtein(&a, &b));
    }

    #[test]
    fn distance_matches_on_unicode(a in "\\PC{0,80}", b in "\\PC{0,80}") {
        prop_assert_eq!(distance(&a, &b), strsim::levenshtein(&a, &b));
    }

    #[test]
    fn distance_is_a_metric(a in "[a-e ]{0,90}", b in "[a-e ]{0,90}", c in "[a-e ]{0,90}") {
        prop_assert_eq!(distance(&a, &a), 0);
        prop_assert_eq!(distance(&a, &b), distance(&b, &a));
        prop_assert!(distance(&a, &c) <= distance(&a, &b) + distance(&b, &c));

        let (la, lb) = (a.chars().count(), b.chars().count());
        prop_assert!(distance(&a, &b) >= la.abs_diff(lb));
        prop_assert!(distance(&a, &b) <= la.max(lb));
    }

    #[test]
    fn engine_reuse_is_stateless(pairs in prop::collection::vec(("[a-z]{0,100}", "[a-z]{0,100}"), 1..8)) {
        let mut engine = EditDistance::new();
        for (a, b) in &pairs {
            prop_assert_eq!(engine.distance(a, b), strsim::levenshtein(a, b));
        }
    }

    #[test]
    fn normalize_is_idempotent(name in "\\PC{0,40}") {
        let once = normalize_name(&name);
        prop_assert_eq!(normalize_name(&once), once.clone());
        prop_assert!(once.chars().all(|c| c.is_ascii_lowercase() || c == ' '));
        prop_assert!(!once.starts_with(' ') && !once.ends_with(' ') && !once.contains("  "));
    }

    #[test]
    fn split_keeps_every_token(name in "[A-Za-z -]{0,40}") {
        let parts = split_name_into_parts(&name);
        let tokens: Vec<String> = normalize_name(&name).split(' ').filter(|t| !t.is_empty()).map(String::from).collect();

        let mut rebuilt = Vec::new();
        if !parts.first_name.is_empty() {
            rebuilt.push(parts.first_name.clone());
        }
        rebuilt.extend(parts.middle_names.iter().cloned());
        if !parts.last_name.is_empty() {
            rebuilt.push(parts.last_name.clone());
        }
        prop_assert_eq!(rebuilt, tokens);
    }
}
