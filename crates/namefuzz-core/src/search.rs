//! Candidate ranking
//!
//! Scores every candidate against the query, keeps those inside the
//! configured thresholds and returns the best one: most phonetic hits
//! first, smallest total edit distance second, input order last.
//!
//! Candidates can be plain strings, JSON records addressed with a
//! [`PathSegment`] path, or anything else through an extraction closure
//! ([`search_with`]).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{MatchError, Result};
use crate::metric::{match_metric_with, MatchMetric};
use crate::normalize::normalize_name;
use crate::phonetic::PhoneticScorer;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const DEFAULT_DISTANCE_THRESHOLD: f64 = 10.0;
const DEFAULT_PHONETICS_THRESHOLD: f64 = 0.0;
const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// One step of a path into a candidate record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl PathSegment {
    /// Step into `node`. Keys that look like integers index arrays and
    /// indices look up stringified keys in objects.
    fn step<'v>(&self, node: &'v Value) -> Option<&'v Value> {
        match (self, node) {
            (PathSegment::Key(key), Value::Object(map)) => map.get(key),
            (PathSegment::Key(key), Value::Array(items)) => {
                key.parse::<usize>().ok().and_then(|idx| items.get(idx))
            }
            (PathSegment::Index(idx), Value::Array(items)) => items.get(*idx),
            (PathSegment::Index(idx), Value::Object(map)) => map.get(&idx.to_string()),
            _ => None,
        }
    }
}

/// Admission limits for candidates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Threshold {
    /// Highest accepted total edit distance; fractional limits are allowed
    pub distance: f64,
    /// Lowest accepted phonetic metric
    pub phonetics: f64,
}

impl Default for Threshold {
    fn default() -> Self {
        Self {
            distance: DEFAULT_DISTANCE_THRESHOLD,
            phonetics: DEFAULT_PHONETICS_THRESHOLD,
        }
    }
}

impl Threshold {
    fn admits(&self, metric: &MatchMetric) -> bool {
        (metric.lev_distance.total as f64) <= self.distance
            && metric.phonetics_metric >= self.phonetics
    }
}

/// Search configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Path to the name inside each candidate; empty for string candidates
    pub match_path: Vec<PathSegment>,
    pub threshold: Threshold,
    /// Candidate count from which the `par_*` functions go parallel
    pub parallel_threshold: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            match_path: Vec::new(),
            threshold: Threshold::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_match_path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        self.match_path = path.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_distance_threshold(mut self, distance: impl Into<f64>) -> Self {
        self.threshold.distance = distance.into();
        self
    }

    pub fn with_phonetics_threshold(mut self, phonetics: f64) -> Self {
        self.threshold.phonetics = phonetics;
        self
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Reject options no candidate comparison can be made against.
    ///
    /// Negative or infinite thresholds are legal and simply admit nothing
    /// (or everything); only NaN thresholds are refused.
    pub fn validate(&self) -> Result<()> {
        if self.threshold.distance.is_nan() {
            return Err(MatchError::InvalidOptions(
                "distance threshold must be a number".to_string(),
            ));
        }
        if self.threshold.phonetics.is_nan() {
            return Err(MatchError::InvalidOptions(
                "phonetics threshold must be a number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Something a name can be read out of.
pub trait Candidate {
    /// The string at `path`, or `None` when the path does not lead to one.
    fn field(&self, path: &[PathSegment]) -> Option<&str>;
}

impl Candidate for str {
    fn field(&self, path: &[PathSegment]) -> Option<&str> {
        path.is_empty().then_some(self)
    }
}

impl Candidate for String {
    fn field(&self, path: &[PathSegment]) -> Option<&str> {
        self.as_str().field(path)
    }
}

impl<T: Candidate + ?Sized> Candidate for &T {
    fn field(&self, path: &[PathSegment]) -> Option<&str> {
        (**self).field(path)
    }
}

impl Candidate for Value {
    fn field(&self, path: &[PathSegment]) -> Option<&str> {
        path.iter()
            .try_fold(self, |node, segment| segment.step(node))?
            .as_str()
    }
}

/// A candidate with its metric, produced while ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate<'c, T> {
    /// Position in the input slice
    pub index: usize,
    pub corpus: &'c T,
    /// Normalized comparison string extracted from the candidate
    pub text: String,
    pub match_metric: MatchMetric,
}

fn score_candidate<'c, T, F>(
    query: &str,
    index: usize,
    candidate: &'c T,
    extract: &F,
    scorer: &PhoneticScorer,
) -> ScoredCandidate<'c, T>
where
    F: Fn(&T) -> Option<&str>,
{
    let text = match extract(candidate) {
        Some(raw) => normalize_name(raw),
        None => {
            trace!(index, "no name found in candidate; comparing against empty string");
            String::new()
        }
    };
    let match_metric = match_metric_with(scorer, query, &text);
    trace!(
        index,
        text = %text,
        distance = match_metric.lev_distance.total,
        phonetics = match_metric.phonetics_metric,
        "scored candidate"
    );

    ScoredCandidate {
        index,
        corpus: candidate,
        text,
        match_metric,
    }
}

/// Drop candidates outside the thresholds, then order the rest.
///
/// The sort is stable, so equal candidates keep their input order.
fn filter_and_order<'c, T>(
    scored: Vec<ScoredCandidate<'c, T>>,
    threshold: &Threshold,
) -> Vec<ScoredCandidate<'c, T>> {
    let mut survivors: Vec<_> = scored
        .into_iter()
        .filter(|s| threshold.admits(&s.match_metric))
        .collect();

    survivors.sort_by(|a, b| {
        let (a, b) = (&a.match_metric, &b.match_metric);
        b.phonetics_metric
            .partial_cmp(&a.phonetics_metric)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.lev_distance.total.cmp(&b.lev_distance.total))
    });
    survivors
}

/// First ranked candidate, unless it has no phonetic support at all.
fn pick_best<'c, T>(
    query: &str,
    total: usize,
    ranked: Vec<ScoredCandidate<'c, T>>,
) -> Option<ScoredCandidate<'c, T>> {
    let survivors = ranked.len();
    let Some(best) = ranked.into_iter().next() else {
        debug!(query, candidates = total, "no candidate within thresholds");
        return None;
    };

    if best.match_metric.phonetics_metric <= 0.0 {
        debug!(
            query,
            candidates = total,
            survivors,
            index = best.index,
            "best candidate has no phonetic support; rejecting"
        );
        return None;
    }

    debug!(
        query,
        candidates = total,
        survivors,
        index = best.index,
        distance = best.match_metric.lev_distance.total,
        phonetics = best.match_metric.phonetics_metric,
        "selected best candidate"
    );
    Some(best)
}

/// Score, filter and order candidates using an extraction closure.
pub fn rank_candidates_with<'c, T, F>(
    query: &str,
    candidates: &'c [T],
    options: &Options,
    extract: F,
) -> Vec<ScoredCandidate<'c, T>>
where
    F: Fn(&T) -> Option<&str>,
{
    let scorer = PhoneticScorer::default();
    let scored = candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| score_candidate(query, index, candidate, &extract, &scorer))
        .collect();
    filter_and_order(scored, &options.threshold)
}

/// Score, filter and order candidates, reading names at `options.match_path`.
pub fn rank_candidates<'c, T: Candidate>(
    query: &str,
    candidates: &'c [T],
    options: &Options,
) -> Vec<ScoredCandidate<'c, T>> {
    rank_candidates_with(query, candidates, options, |c| c.field(&options.match_path))
}

/// The winning candidate together with its metric, using an extraction
/// closure. See [`search`] for when there is no winner.
pub fn best_match_with<'c, T, F>(
    query: &str,
    candidates: &'c [T],
    options: &Options,
    extract: F,
) -> Option<ScoredCandidate<'c, T>>
where
    F: Fn(&T) -> Option<&str>,
{
    if candidates.is_empty() {
        return None;
    }
    let ranked = rank_candidates_with(query, candidates, options, extract);
    pick_best(query, candidates.len(), ranked)
}

/// The winning candidate together with its metric.
pub fn best_match<'c, T: Candidate>(
    query: &str,
    candidates: &'c [T],
    options: &Options,
) -> Option<ScoredCandidate<'c, T>> {
    best_match_with(query, candidates, options, |c| c.field(&options.match_path))
}

/// Best matching candidate using an extraction closure.
///
/// ```rust
/// use namefuzz_core::{search_with, Options};
///
/// struct Person {
///     name: String,
/// }
///
/// let people = vec![
///     Person { name: "John Doe".into() },
///     Person { name: "Jane Smith".into() },
/// ];
/// let best = search_with("Jon Doe", &people, &Options::default(), |p| Some(p.name.as_str()));
/// assert_eq!(best.map(|p| p.name.as_str()), Some("John Doe"));
/// ```
pub fn search_with<'c, T, F>(
    query: &str,
    candidates: &'c [T],
    options: &Options,
    extract: F,
) -> Option<&'c T>
where
    F: Fn(&T) -> Option<&str>,
{
    best_match_with(query, candidates, options, extract).map(|best| best.corpus)
}

/// Best matching candidate, reading names at `options.match_path`.
///
/// Returns `None` for an empty list, when no candidate is within the
/// thresholds, or when the best candidate has a phonetic metric of zero.
///
/// ```rust
/// use namefuzz_core::{search, Options};
/// use serde_json::json;
///
/// let people = vec![json!({"name": "John Doe"}), json!({"name": "Jane Smith"})];
/// let options = Options::default().with_match_path(["name"]);
/// assert_eq!(search("Jon Doe", &people, &options), Some(&json!({"name": "John Doe"})));
/// ```
pub fn search<'c, T: Candidate>(query: &str, candidates: &'c [T], options: &Options) -> Option<&'c T> {
    search_with(query, candidates, options, |c| c.field(&options.match_path))
}

/// Parallel [`rank_candidates_with`] for large candidate lists.
///
/// Lists shorter than `options.parallel_threshold` are ranked sequentially.
/// Each worker uses its own phonetic scorer and distance engine.
#[cfg(feature = "parallel")]
pub fn par_rank_candidates_with<'c, T, F>(
    query: &str,
    candidates: &'c [T],
    options: &Options,
    extract: F,
) -> Vec<ScoredCandidate<'c, T>>
where
    T: Sync,
    F: Fn(&T) -> Option<&str> + Sync,
{
    if candidates.len() < options.parallel_threshold {
        return rank_candidates_with(query, candidates, options, extract);
    }

    let scored = candidates
        .par_iter()
        .enumerate()
        .map_init(PhoneticScorer::default, |scorer, (index, candidate)| {
            score_candidate(query, index, candidate, &extract, scorer)
        })
        .collect();
    filter_and_order(scored, &options.threshold)
}

/// Parallel [`rank_candidates`].
#[cfg(feature = "parallel")]
pub fn par_rank_candidates<'c, T: Candidate + Sync>(
    query: &str,
    candidates: &'c [T],
    options: &Options,
) -> Vec<ScoredCandidate<'c, T>> {
    par_rank_candidates_with(query, candidates, options, |c| c.field(&options.match_path))
}

/// Parallel [`search_with`]; same result, including tie order.
#[cfg(feature = "parallel")]
pub fn par_search_with<'c, T, F>(
    query: &str,
    candidates: &'c [T],
    options: &Options,
    extract: F,
) -> Option<&'c T>
where
    T: Sync,
    F: Fn(&T) -> Option<&str> + Sync,
{
    if candidates.is_empty() {
        return None;
    }
    let ranked = par_rank_candidates_with(query, candidates, options, extract);
    pick_best(query, candidates.len(), ranked).map(|best| best.corpus)
}

/// Parallel [`search`]; same result, including tie order.
#[cfg(feature = "parallel")]
pub fn par_search<'c, T: Candidate + Sync>(
    query: &str,
    candidates: &'c [T],
    options: &Options,
) -> Option<&'c T> {
    par_search_with(query, candidates, options, |c| c.field(&options.match_path))
}
