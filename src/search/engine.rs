// src/search/engine.rs

//! Boolean search over the record store.
//!
//! Every function here is pure and returns records in store order. No result
//! cap is applied; see [`crate::search::cap`].

use crate::models::{ChemicalRecord, SearchMode, SearchRequest};
use crate::storage::RecordStore;

const CID_PREFIX: &str = "cid_";

/// Records carrying every term in at least one descriptor.
///
/// Terms are matched as case-insensitive substrings. No terms, no results.
pub fn search_by_descriptors<'a, S: AsRef<str>>(
    store: &'a RecordStore,
    terms: &[S],
) -> Vec<&'a ChemicalRecord> {
    let records = store.records();
    store
        .descriptor_index()
        .matching_positions(terms)
        .into_iter()
        .map(|position| &records[position])
        .collect()
}

/// Linear-scan equivalent of [`search_by_descriptors`].
pub fn scan_by_descriptors<'a, S: AsRef<str>>(
    store: &'a RecordStore,
    terms: &[S],
) -> Vec<&'a ChemicalRecord> {
    if terms.is_empty() {
        return Vec::new();
    }
    let terms: Vec<String> = terms.iter().map(|t| t.as_ref().to_lowercase()).collect();

    store
        .records()
        .iter()
        .filter(|record| {
            terms.iter().all(|term| {
                record
                    .descriptors
                    .iter()
                    .any(|d| d.to_lowercase().contains(term.as_str()))
            })
        })
        .collect()
}

/// Records whose id, name, SMILES or any descriptor contains the query.
///
/// The query is trimmed and lowercased; a blank query matches nothing. For
/// the id field a leading `cid_` is stripped first, so `CID_440917` finds
/// compound 440917.
pub fn search_by_chemical_query<'a>(store: &'a RecordStore, query: &str) -> Vec<&'a ChemicalRecord> {
    let normalized = query.trim().to_lowercase();
    if normalized.is_empty() {
        return Vec::new();
    }
    let id_needle = normalized.strip_prefix(CID_PREFIX).unwrap_or(&normalized);

    store
        .records()
        .iter()
        .filter(|record| matches_chemical_query(record, &normalized, id_needle))
        .collect()
}

/// Exact lookup by compound id.
pub fn lookup_by_id(store: &RecordStore, id: u64) -> Option<&ChemicalRecord> {
    store.get(id)
}

/// Dispatch a request to the matching search mode.
pub fn search<'a>(store: &'a RecordStore, request: &SearchRequest) -> Vec<&'a ChemicalRecord> {
    match request.mode {
        SearchMode::Odor => search_by_descriptors(store, &request.odor_terms()),
        SearchMode::Chemical => search_by_chemical_query(store, &request.query),
    }
}

fn matches_chemical_query(record: &ChemicalRecord, normalized: &str, id_needle: &str) -> bool {
    // An empty needle would match every id
    if !id_needle.is_empty() && record.id.to_string().contains(id_needle) {
        return true;
    }
    if record.name.to_lowercase().contains(normalized) {
        return true;
    }
    if record.structure.to_lowercase().contains(normalized) {
        return true;
    }
    record
        .descriptors
        .iter()
        .any(|d| d.to_lowercase().contains(normalized))
}
