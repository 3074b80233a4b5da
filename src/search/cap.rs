// src/search/cap.rs

//! Result capping policy.
//!
//! Large result lists are truncated before they reach the presentation
//! layer:
//!
//! > If a search matches more than **500** records, only the first 500 (in
//! > store order) are shown, together with an advisory carrying the true
//! > number of matches.
//!
//! Truncation is a display safeguard, not an error.

use std::fmt;

/// Default maximum number of results handed to the caller.
pub const DEFAULT_RESULT_CAP: usize = 500;

/// Non-fatal notice that a result list was truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advisory {
    /// Number of results kept
    pub shown: usize,
    /// Number of matches before truncation
    pub total: usize,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Showing first {} of {} results. Use specific search terms for better results.",
            self.shown, self.total
        )
    }
}

/// A result list after the cap has been applied.
#[derive(Debug, Clone)]
pub struct CappedResults<T> {
    pub items: Vec<T>,
    /// Number of matches before truncation
    pub total: usize,
    pub advisory: Option<Advisory>,
}

impl<T> CappedResults<T> {
    pub fn is_truncated(&self) -> bool {
        self.advisory.is_some()
    }
}

/// Cap applied by the orchestrating layer.
#[derive(Debug, Clone, Copy)]
pub struct CapPolicy {
    limit: usize,
}

impl CapPolicy {
    /// Create a policy with the default limit of 500.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_RESULT_CAP)
    }

    /// Create a policy with a custom limit.
    pub fn with_limit(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Keep at most `limit` items, attaching an advisory when truncating.
    pub fn apply<T>(&self, mut items: Vec<T>) -> CappedResults<T> {
        let total = items.len();
        if total <= self.limit {
            return CappedResults {
                items,
                total,
                advisory: None,
            };
        }

        items.truncate(self.limit);
        let advisory = Advisory {
            shown: items.len(),
            total,
        };
        log::info!("{advisory}");

        CappedResults {
            items,
            total,
            advisory: Some(advisory),
        }
    }
}

impl Default for CapPolicy {
    fn default() -> Self {
        Self::new()
    }
}
