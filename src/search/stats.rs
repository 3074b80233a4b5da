// src/search/stats.rs

//! Descriptor frequency statistics.

use std::collections::HashMap;

use crate::storage::RecordStore;

/// Number of entries in the default top list.
pub const DEFAULT_TOP_DESCRIPTORS: usize = 20;

/// How often each descriptor occurs across the catalog.
///
/// Descriptors are counted verbatim (case-sensitive), once per occurrence.
#[derive(Debug, Clone, Default)]
pub struct DescriptorStats {
    counts: HashMap<String, usize>,
    /// Distinct descriptors in order of first appearance
    order: Vec<String>,
}

impl DescriptorStats {
    pub fn from_store(store: &RecordStore) -> Self {
        let mut stats = Self::default();
        for descriptor in store.records().iter().flat_map(|r| &r.descriptors) {
            match stats.counts.get_mut(descriptor) {
                Some(count) => *count += 1,
                None => {
                    stats.counts.insert(descriptor.clone(), 1);
                    stats.order.push(descriptor.clone());
                }
            }
        }
        stats
    }

    /// Number of distinct descriptors.
    pub fn total_descriptors(&self) -> usize {
        self.order.len()
    }

    pub fn count(&self, descriptor: &str) -> usize {
        self.counts.get(descriptor).copied().unwrap_or(0)
    }

    /// The `limit` most frequent descriptors; ties keep first-appearance order.
    pub fn top(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .order
            .iter()
            .map(|d| (d.as_str(), self.count(d)))
            .collect();
        // Stable sort keeps first-appearance order among equal counts
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }
}
