//! namefuzz Core Engine
//!
//! Fuzzy matching of personal names. A query name is compared against a
//! list of candidates with two signals:
//!
//! - per-part Levenshtein distance (first, middle, last name), computed
//!   with a bit-parallel algorithm
//! - phonetic agreement under Soundex, Metaphone and Double Metaphone
//!
//! and the candidate with the most phonetic agreement, then the smallest
//! edit distance, wins.
//!
//! # Features
//!
//! - `parallel` - Parallel candidate scoring via rayon for large lists (default)
//!
//! # Example
//!
//! ```rust
//! use namefuzz_core::{calculate_match_metric, search, Options};
//! use serde_json::json;
//!
//! let metric = calculate_match_metric("John Doe", "Jon Doe");
//! assert_eq!(metric.lev_distance.total, 1);
//!
//! let people = vec![json!({"name": "Jane Smith"}), json!({"name": "John Doe"})];
//! let options = Options::default().with_match_path(["name"]);
//! assert_eq!(search("Jon Doe", &people, &options), Some(&people[1]));
//! ```

pub mod distance;
pub mod error;
pub mod json;
pub mod logging;
pub mod metric;
pub mod normalize;
pub mod phonetic;
pub mod search;
pub mod split;

// Re-export main types at crate root
pub use distance::{closest, distance, EditDistance};
pub use error::{MatchError, Result};
pub use json::{
    match_metric_json, run_match_metric, run_search, search_json, MetricInput, SearchInput,
    SearchOutput,
};
pub use metric::{calculate_levenshtein_distance, calculate_match_metric, LevDistance, MatchMetric};
pub use normalize::normalize_name;
pub use phonetic::{
    calculate_phonetic_metric, DoubleMetaphoneComparator, MetaphoneComparator, PhoneticComparator,
    PhoneticOptions, PhoneticScore, PhoneticScorer, SoundexComparator,
};
#[cfg(feature = "parallel")]
pub use search::{par_rank_candidates, par_rank_candidates_with, par_search, par_search_with};
pub use search::{
    best_match, best_match_with, rank_candidates, rank_candidates_with, search, search_with,
    Candidate, Options, PathSegment, ScoredCandidate, Threshold,
};
pub use split::{split_name_into_parts, NameParts};
