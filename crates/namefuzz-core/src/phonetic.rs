//! Phonetic scoring
//!
//! Names are compared part by part (first, joined middle names, last) with a
//! fixed set of phonetic comparators. Every comparator that considers a part
//! a match adds one point. A part only counts when both names have it.
//!
//! The encoders themselves come from `rphonetic`; this module only decides
//! which parts to compare and how to add the answers up.

use rphonetic::{DoubleMetaphone, Encoder, Metaphone, Soundex};
use serde::{Deserialize, Serialize};

use crate::normalize::normalize_name;
use crate::split::split_name_into_parts;

/// A pairwise phonetic comparison.
///
/// Implementations normalize both inputs before encoding them.
pub trait PhoneticComparator {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Whether `a` and `b` sound alike under this algorithm.
    fn compare(&self, a: &str, b: &str) -> bool;
}

/// Soundex codes are equal.
#[derive(Default)]
pub struct SoundexComparator {
    encoder: Soundex,
}

impl PhoneticComparator for SoundexComparator {
    fn name(&self) -> &'static str {
        "soundex"
    }

    fn compare(&self, a: &str, b: &str) -> bool {
        let (a, b) = (normalize_name(a), normalize_name(b));
        self.encoder.encode(&a) == self.encoder.encode(&b)
    }
}

/// Metaphone codes are equal, compared at full length.
pub struct MetaphoneComparator {
    encoder: Metaphone,
}

impl Default for MetaphoneComparator {
    fn default() -> Self {
        Self {
            encoder: Metaphone::new(None),
        }
    }
}

impl PhoneticComparator for MetaphoneComparator {
    fn name(&self) -> &'static str {
        "metaphone"
    }

    fn compare(&self, a: &str, b: &str) -> bool {
        let (a, b) = (normalize_name(a), normalize_name(b));
        self.encoder.encode(&a) == self.encoder.encode(&b)
    }
}

/// Double Metaphone: primary codes agree, or alternate codes agree.
/// Codes are not truncated.
pub struct DoubleMetaphoneComparator {
    encoder: DoubleMetaphone,
}

impl Default for DoubleMetaphoneComparator {
    fn default() -> Self {
        Self {
            encoder: DoubleMetaphone::new(None),
        }
    }
}

impl PhoneticComparator for DoubleMetaphoneComparator {
    fn name(&self) -> &'static str {
        "double_metaphone"
    }

    fn compare(&self, a: &str, b: &str) -> bool {
        let (a, b) = (normalize_name(a), normalize_name(b));
        let a = self.encoder.double_metaphone(&a);
        let b = self.encoder.double_metaphone(&b);
        a.primary() == b.primary() || a.alternate() == b.alternate()
    }
}

/// Raw counters behind a phonetic metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneticScore {
    /// Comparator hits summed over all checked parts
    pub matches: usize,
    /// Parts present on both sides (0..=3)
    pub checked_parts: usize,
    /// Comparators consulted per part
    pub comparators: usize,
}

impl PhoneticScore {
    /// Highest reachable `matches` for the parts that were checked.
    pub fn max_matches(&self) -> usize {
        self.checked_parts * self.comparators
    }

    /// Share of possible hits, in percent with two decimals.
    ///
    /// Zero when no part could be checked.
    pub fn percentage(&self) -> f64 {
        let max = self.max_matches();
        if max == 0 {
            return 0.0;
        }
        round_to_hundredths(self.matches as f64 / max as f64 * 100.0)
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Options for [`calculate_phonetic_metric`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhoneticOptions {
    /// Report a percentage instead of the raw hit count
    pub return_as_percentage: bool,
}

/// Scores name pairs with an ordered set of comparators.
pub struct PhoneticScorer {
    comparators: Vec<Box<dyn PhoneticComparator>>,
}

impl Default for PhoneticScorer {
    /// Soundex, Metaphone and Double Metaphone.
    fn default() -> Self {
        Self::with_comparators(vec![
            Box::new(SoundexComparator::default()),
            Box::new(MetaphoneComparator::default()),
            Box::new(DoubleMetaphoneComparator::default()),
        ])
    }
}

impl PhoneticScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comparators(comparators: Vec<Box<dyn PhoneticComparator>>) -> Self {
        Self { comparators }
    }

    pub fn comparators(&self) -> impl Iterator<Item = &dyn PhoneticComparator> {
        self.comparators.iter().map(|c| c.as_ref())
    }

    /// Compare two names part by part.
    pub fn score(&self, query: &str, corpus: &str) -> PhoneticScore {
        let query = split_name_into_parts(query);
        let corpus = split_name_into_parts(corpus);

        let parts = [
            (query.first_name, corpus.first_name),
            (query.middle_names.join(" "), corpus.middle_names.join(" ")),
            (query.last_name, corpus.last_name),
        ];

        let mut score = PhoneticScore {
            comparators: self.comparators.len(),
            ..Default::default()
        };

        for (query_part, corpus_part) in parts.iter() {
            if query_part.is_empty() || corpus_part.is_empty() {
                continue;
            }
            score.checked_parts += 1;
            score.matches += self
                .comparators
                .iter()
                .filter(|c| c.compare(corpus_part, query_part))
                .count();
        }

        score
    }

    /// Phonetic metric as a raw hit count or a percentage.
    pub fn metric(&self, query: &str, corpus: &str, options: PhoneticOptions) -> f64 {
        let score = self.score(query, corpus);
        if options.return_as_percentage {
            score.percentage()
        } else {
            score.matches as f64
        }
    }
}

/// Phonetic similarity of two names with the default comparators.
///
/// Without options the result is the number of comparator hits, between 0
/// and `3 * checked parts`.
///
/// ```rust
/// use namefuzz_core::{calculate_phonetic_metric, PhoneticOptions};
///
/// assert_eq!(calculate_phonetic_metric("John Doe", "John Doe", PhoneticOptions::default()), 6.0);
///
/// let pct = PhoneticOptions { return_as_percentage: true };
/// assert_eq!(calculate_phonetic_metric("John Doe", "John Doe", pct), 100.0);
/// ```
pub fn calculate_phonetic_metric(query: &str, corpus: &str, options: PhoneticOptions) -> f64 {
    PhoneticScorer::default().metric(query, corpus, options)
}
