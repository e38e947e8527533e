use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Answer to a list-or-read request.
///
/// Serializes untagged so that callers see either `["a.md", ...]` (list mode)
/// or `{"a.md": "...", "missing.md": null}` (read mode).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Files {
    Names(Vec<String>),
    Contents(BTreeMap<String, Option<String>>),
}

impl Files {
    pub fn names(&self) -> Option<&[String]> {
        match self {
            Files::Names(names) => Some(names),
            Files::Contents(_) => None,
        }
    }

    pub fn contents(&self) -> Option<&BTreeMap<String, Option<String>>> {
        match self {
            Files::Names(_) => None,
            Files::Contents(contents) => Some(contents),
        }
    }
}
