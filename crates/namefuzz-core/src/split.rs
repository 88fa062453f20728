//! Name decomposition into first, middle and last parts

use serde::{Deserialize, Serialize};

use crate::normalize::normalize_name;

/// A normalized name broken into its parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameParts {
    pub first_name: String,
    pub last_name: String,
    /// Interior tokens in input order, never empty strings
    pub middle_names: Vec<String>,
}

impl NameParts {
    /// Middle names joined by single spaces ("" when there are none).
    pub fn middle_name(&self) -> String {
        self.middle_names.join(" ")
    }
}

/// Split a name into first, middle and last parts.
///
/// The input is normalized first, so raw and normalized names give the same
/// result. A single token is treated as a first name; with three or more
/// tokens everything between the first and the last token is a middle name.
pub fn split_name_into_parts(name: &str) -> NameParts {
    let name = normalize_name(name);
    let tokens: Vec<&str> = name.split(' ').collect();

    match tokens.as_slice() {
        [] | [""] => NameParts::default(),
        [first] => NameParts {
            first_name: first.to_string(),
            ..Default::default()
        },
        [first, last] => NameParts {
            first_name: first.to_string(),
            last_name: last.to_string(),
            middle_names: Vec::new(),
        },
        [first, middle @ .., last] => NameParts {
            first_name: first.to_string(),
            last_name: last.to_string(),
            middle_names: middle
                .iter()
                .filter(|token| !token.trim().is_empty())
                .map(|token| token.to_string())
                .collect(),
        },
    }
}
