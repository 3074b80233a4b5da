// src/models/history.rs

//! Session-local recent search history.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

use crate::models::SearchRequest;

/// A search issued during this session.
#[derive(Debug, Clone)]
pub struct RecentSearch {
    pub request: SearchRequest,
    pub timestamp: DateTime<Local>,
}

/// Bounded newest-first history of searches.
#[derive(Debug, Clone)]
pub struct RecentSearches {
    capacity: usize,
    entries: VecDeque<RecentSearch>,
}

impl RecentSearches {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Record a search at the front, evicting the oldest entry when full.
    pub fn record(&mut self, request: SearchRequest) {
        self.record_at(request, Local::now());
    }

    pub fn record_at(&mut self, request: SearchRequest, timestamp: DateTime<Local>) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_front(RecentSearch { request, timestamp });
        self.entries.truncate(self.capacity);
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecentSearch> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RecentSearches {
    fn default() -> Self {
        Self::new(10)
    }
}
