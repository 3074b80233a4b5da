// src/search/index.rs

//! Inverted descriptor index.
//!
//! Maps each distinct (lowercased) odor descriptor to the store positions of
//! the records carrying it:
//!
//! > Example: `{"citrus": [0, 4], "woody": [2]}`
//!
//! Descriptor search then scans the distinct descriptors instead of every
//! record. Matching stays substring based, so the result set and its order
//! are exactly those of a linear scan.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::models::ChemicalRecord;

/// Inverted index from descriptor to ascending record positions.
#[derive(Debug, Clone, Default)]
pub struct DescriptorIndex {
    /// Total number of indexed records
    record_count: usize,
    /// descriptor -> ascending positions
    postings: HashMap<String, Vec<usize>>,
}

impl DescriptorIndex {
    /// Build an index over records in store order.
    pub fn build(records: &[ChemicalRecord]) -> Self {
        let mut builder = IndexBuilder::new();
        builder.add_records(records);
        builder.build()
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Number of distinct descriptors.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Positions of records whose descriptors contain `term`.
    ///
    /// `term` must already be lowercased.
    pub fn positions_containing(&self, term: &str) -> BTreeSet<usize> {
        self.postings
            .iter()
            .filter(|(descriptor, _)| descriptor.contains(term))
            .flat_map(|(_, positions)| positions.iter().copied())
            .collect()
    }

    /// Positions of records matching every term, in ascending order.
    ///
    /// An empty term list matches nothing.
    pub fn matching_positions<S: AsRef<str>>(&self, terms: &[S]) -> Vec<usize> {
        let mut terms = terms.iter().map(|t| t.as_ref().to_lowercase());

        let Some(first) = terms.next() else {
            return Vec::new();
        };
        let mut matched = self.positions_containing(&first);

        for term in terms {
            if matched.is_empty() {
                break;
            }
            let candidates = self.positions_containing(&term);
            matched.retain(|position| candidates.contains(position));
        }

        matched.into_iter().collect()
    }
}

/// Builder for constructing a descriptor index.
pub struct IndexBuilder {
    index: HashMap<String, HashSet<usize>>,
    record_count: usize,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            record_count: 0,
        }
    }

    /// Add the record stored at `position`.
    pub fn add_record(&mut self, position: usize, record: &ChemicalRecord) {
        self.record_count += 1;
        for descriptor in &record.descriptors {
            self.index
                .entry(descriptor.to_lowercase())
                .or_default()
                .insert(position);
        }
    }

    /// Add records in store order.
    pub fn add_records(&mut self, records: &[ChemicalRecord]) {
        for (position, record) in records.iter().enumerate() {
            self.add_record(position, record);
        }
    }

    /// Build the final index.
    pub fn build(self) -> DescriptorIndex {
        let postings = self
            .index
            .into_iter()
            .map(|(descriptor, positions)| {
                let mut positions: Vec<_> = positions.into_iter().collect();
                positions.sort_unstable();
                (descriptor, positions)
            })
            .collect();

        DescriptorIndex {
            record_count: self.record_count,
            postings,
        }
    }
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, descriptors: &[&str]) -> ChemicalRecord {
        ChemicalRecord {
            id,
            name: format!("compound {id}"),
            structure: "C".to_string(),
            descriptors: descriptors.iter().map(|d| d.to_string()).collect(),
            sources: vec![],
        }
    }

    #[test]
    fn test_build_index() {
        let records = vec![
            record(1, &["Citrus", "fresh"]),
            record(2, &["woody"]),
            record(3, &["citrus", "citrus"]),
        ];
        let index = DescriptorIndex::build(&records);

        assert_eq!(index.record_count(), 3);
        // "Citrus" and "citrus" collapse into one descriptor
        assert_eq!(index.term_count(), 3);
        assert_eq!(
            index.positions_containing("citrus").into_iter().collect::<Vec<_>>(),
            vec![0, 2]
        );
    }

    #[test]
    fn test_substring_terms() {
        let records = vec![record(1, &["lemon peel"]), record(2, &["peely"])];
        let index = DescriptorIndex::build(&records);
        assert_eq!(index.matching_positions(&["peel"]), vec![0, 1]);
        assert_eq!(index.matching_positions(&["LEMON"]), vec![0]);
    }

    #[test]
    fn test_all_terms_required() {
        let records = vec![
            record(1, &["citrus", "sweet"]),
            record(2, &["citrus", "fresh", "zesty"]),
        ];
        let index = DescriptorIndex::build(&records);
        assert_eq!(index.matching_positions(&["citrus", "fresh"]), vec![1]);
    }

    #[test]
    fn test_empty_terms_match_nothing() {
        let index = DescriptorIndex::build(&[record(1, &["citrus"])]);
        let terms: [&str; 0] = [];
        assert!(index.matching_positions(&terms).is_empty());
    }
}
