// src/models/query.rs

//! Search request types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which side of the catalog a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Find chemicals by smell
    Odor,
    /// Find smells by chemical (name, CID, or SMILES)
    #[default]
    Chemical,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Odor => "odor",
            SearchMode::Chemical => "chemical",
        }
    }

    /// Interpret a `type` parameter. Anything other than `odor` is a chemical search.
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("odor") => SearchMode::Odor,
            _ => SearchMode::Chemical,
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "odor" => Ok(SearchMode::Odor),
            "chemical" | "chem" => Ok(SearchMode::Chemical),
            other => Err(format!("unknown search mode '{other}'")),
        }
    }
}

/// A search as issued by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub mode: SearchMode,
    pub query: String,
}

impl SearchRequest {
    pub fn new(mode: SearchMode, query: impl Into<String>) -> Self {
        Self {
            mode,
            query: query.into(),
        }
    }

    pub fn odor(query: impl Into<String>) -> Self {
        Self::new(SearchMode::Odor, query)
    }

    pub fn chemical(query: impl Into<String>) -> Self {
        Self::new(SearchMode::Chemical, query)
    }

    /// Parse a URL-style query string such as `type=odor&q=citrus%2C%20fresh`.
    ///
    /// A leading `?` is ignored. Missing `q` yields an empty query.
    pub fn from_query_string(qs: &str) -> Self {
        let qs = qs.trim_start_matches('?');
        let mut mode = None;
        let mut query = String::new();

        for (key, value) in url::form_urlencoded::parse(qs.as_bytes()) {
            match key.as_ref() {
                "type" => mode = Some(value.into_owned()),
                "q" => query = value.into_owned(),
                _ => {}
            }
        }

        Self::new(SearchMode::from_param(mode.as_deref()), query)
    }

    /// Encode back into the URL-style query string.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("type", self.mode.as_str())
            .append_pair("q", &self.query)
            .finish()
    }

    /// Odor terms: split on commas, trimmed, empty segments dropped.
    pub fn odor_terms(&self) -> Vec<String> {
        split_terms(&self.query)
    }
}

/// Split a comma separated odor query into terms.
pub fn split_terms(query: &str) -> Vec<String> {
    query
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
