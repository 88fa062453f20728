//! Per-part edit distance and the combined match metric

use serde::{Deserialize, Serialize};

use crate::distance::distance;
use crate::phonetic::{PhoneticOptions, PhoneticScorer};
use crate::split::split_name_into_parts;

/// Edit distance broken down by name part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevDistance {
    pub first_name: usize,
    pub last_name: usize,
    pub middle_name: usize,
    /// Always `first_name + last_name + middle_name`
    pub total: usize,
}

impl LevDistance {
    /// Arguments follow field order: first, last, middle.
    pub fn new(first_name: usize, last_name: usize, middle_name: usize) -> Self {
        Self {
            first_name,
            last_name,
            middle_name,
            total: first_name + last_name + middle_name,
        }
    }
}

/// Edit distance and phonetic similarity of a name pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetric {
    pub lev_distance: LevDistance,
    pub phonetics_metric: f64,
}

/// Levenshtein distance between two names, part by part.
///
/// Middle names are compared as one space-joined string, so reordered
/// middle names still cost edits.
///
/// ```rust
/// use namefuzz_core::{calculate_levenshtein_distance, LevDistance};
///
/// assert_eq!(calculate_levenshtein_distance("John Doe", "Jon Doe"), LevDistance::new(1, 0, 0));
/// ```
pub fn calculate_levenshtein_distance(query: &str, corpus: &str) -> LevDistance {
    let query = split_name_into_parts(query);
    let corpus = split_name_into_parts(corpus);

    LevDistance::new(
        distance(&query.first_name, &corpus.first_name),
        distance(&query.last_name, &corpus.last_name),
        distance(&query.middle_name(), &corpus.middle_name()),
    )
}

/// Both metrics for a name pair, with the phonetic part as a raw hit count.
pub fn calculate_match_metric(query: &str, corpus: &str) -> MatchMetric {
    match_metric_with(&PhoneticScorer::default(), query, corpus)
}

pub(crate) fn match_metric_with(scorer: &PhoneticScorer, query: &str, corpus: &str) -> MatchMetric {
    MatchMetric {
        lev_distance: calculate_levenshtein_distance(query, corpus),
        phonetics_metric: scorer.metric(query, corpus, PhoneticOptions::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lev(first: usize, last: usize, middle: usize) -> LevDistance {
        LevDistance::new(first, last, middle)
    }

    #[test]
    fn test_similar_names() {
        assert_eq!(calculate_levenshtein_distance("John Doe", "Jon Doe"), lev(1, 0, 0));
    }

    #[test]
    fn test_different_names() {
        let d = calculate_levenshtein_distance("Alice Smith", "Bob Johnson");
        assert_eq!(d, lev(5, 7, 0));
        assert_eq!(d.total, 12);
    }

    #[test]
    fn test_identical_names() {
        assert_eq!(calculate_levenshtein_distance("John Doe", "John Doe"), lev(0, 0, 0));
    }

    #[test]
    fn test_completely_different_names() {
        assert_eq!(calculate_levenshtein_distance("John Doe", "Jane Smith"), lev(3, 5, 0));
    }

    #[test]
    fn test_middle_names() {
        assert_eq!(calculate_levenshtein_distance("John A Doe", "John B Doe"), lev(0, 0, 1));
        assert_eq!(calculate_levenshtein_distance("John A B Doe", "John C D Doe"), lev(0, 0, 2));
        assert_eq!(calculate_levenshtein_distance("John A B Doe", "John B A Doe"), lev(0, 0, 2));
    }

    #[test]
    fn test_missing_parts() {
        assert_eq!(calculate_levenshtein_distance("John Doe", "John"), lev(0, 3, 0));
        assert_eq!(calculate_levenshtein_distance("John", "John Doe"), lev(0, 3, 0));
    }

    #[test]
    fn test_middle_against_none() {
        // "quincy" against the empty string
        assert_eq!(calculate_levenshtein_distance("John Quincy Doe", "John Doe"), lev(0, 0, 6));
    }

    #[test]
    fn test_new_follows_field_order() {
        let d = LevDistance::new(1, 2, 3);
        assert_eq!(
            d,
            LevDistance {
                first_name: 1,
                last_name: 2,
                middle_name: 3,
                total: 6,
            }
        );
        assert_eq!(calculate_levenshtein_distance("Ann Lee", "Ann Q Leigh").last_name, 3);
        assert_eq!(calculate_levenshtein_distance("Ann Lee", "Ann Q Leigh").middle_name, 1);
    }

    #[test]
    fn test_match_metric() {
        let metric = calculate_match_metric("John Doe", "Jon Doe");
        assert_eq!(metric.lev_distance.total, 1);
        assert!(metric.phonetics_metric > 0.0);

        let metric = calculate_match_metric("Alice Smith", "Bob Johnson");
        assert_eq!(metric.lev_distance.total, 12);
        assert_eq!(metric.phonetics_metric, 0.0);
    }

    #[test]
    fn test_serializes_camel_case() {
        let metric = MatchMetric {
            lev_distance: lev(1, 2, 0),
            phonetics_metric: 4.0,
        };
        assert_eq!(
            serde_json::to_value(metric).unwrap(),
            serde_json::json!({
                "levDistance": {"firstName": 1, "lastName": 2, "middleName": 0, "total": 3},
                "phoneticsMetric": 4.0,
            })
        );
    }
}
