//! JSON entry points for hosts that talk to the engine in strings
//! (FFI and WASM bindings, scripting bridges).
//!
//! Every `*_json` function takes one JSON document and returns one; failures
//! come back as `{"error": "..."}` instead of panicking.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::Result;
use crate::metric::{calculate_levenshtein_distance, MatchMetric};
use crate::phonetic::{calculate_phonetic_metric, PhoneticOptions};
use crate::search::{best_match, Options};

/// Input of [`search_json`].
#[derive(Debug, Clone, Deserialize)]
pub struct SearchInput {
    pub query: String,
    pub candidates: Vec<Value>,
    #[serde(default)]
    pub options: Options,
}

/// Output of [`search_json`]. All fields are `null` when nothing matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutput {
    #[serde(rename = "match")]
    pub best: Option<Value>,
    pub index: Option<usize>,
    pub match_metric: Option<MatchMetric>,
}

/// Input of [`match_metric_json`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricInput {
    pub query: String,
    pub corpus: String,
    #[serde(default)]
    pub return_as_percentage: bool,
}

/// Run a search request.
pub fn run_search(input: &SearchInput) -> Result<SearchOutput> {
    input.options.validate()?;

    Ok(match best_match(&input.query, &input.candidates, &input.options) {
        Some(best) => SearchOutput {
            best: Some(best.corpus.clone()),
            index: Some(best.index),
            match_metric: Some(best.match_metric),
        },
        None => SearchOutput {
            best: None,
            index: None,
            match_metric: None,
        },
    })
}

/// Compute the match metric of a name pair.
///
/// With `return_as_percentage` the phonetic part is reported in percent.
pub fn run_match_metric(input: &MetricInput) -> Result<MatchMetric> {
    let options = PhoneticOptions {
        return_as_percentage: input.return_as_percentage,
    };
    Ok(MatchMetric {
        lev_distance: calculate_levenshtein_distance(&input.query, &input.corpus),
        phonetics_metric: calculate_phonetic_metric(&input.query, &input.corpus, options),
    })
}

fn error_json(context: &str, err: impl std::fmt::Display) -> String {
    json!({ "error": format!("{}: {}", context, err) }).to_string()
}

fn respond<T: Serialize>(result: Result<T>) -> String {
    match result.and_then(|output| Ok(serde_json::to_string(&output)?)) {
        Ok(json) => json,
        Err(e) => error_json("request failed", e),
    }
}

/// JSON entry point: `{"query", "candidates", "options"?}` to
/// `{"match", "index", "matchMetric"}`.
pub fn search_json(input: &str) -> String {
    let parsed: SearchInput = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(e) => return error_json("invalid search input", e),
    };
    respond(run_search(&parsed))
}

/// JSON entry point: `{"query", "corpus", "returnAsPercentage"?}` to a
/// match metric object.
pub fn match_metric_json(input: &str) -> String {
    let parsed: MetricInput = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(e) => return error_json("invalid metric input", e),
    };
    respond(run_match_metric(&parsed))
}
