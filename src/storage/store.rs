// src/storage/store.rs

//! Immutable in-memory record store.

use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::models::ChemicalRecord;
use crate::search::DescriptorIndex;

/// The full chemical collection, validated once at load and never mutated.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<ChemicalRecord>,
    positions: HashMap<u64, usize>,
    index: DescriptorIndex,
}

impl RecordStore {
    /// Parse and validate a JSON array of records.
    pub fn from_json_slice(source_name: &str, bytes: &[u8]) -> Result<Self> {
        let records: Vec<ChemicalRecord> = serde_json::from_slice(bytes)
            .map_err(|e| AppError::dataset(source_name, format!("malformed index: {e}")))?;
        Self::from_records(source_name, records)
    }

    /// Validate records and build the lookup structures.
    ///
    /// Any structural problem rejects the whole dataset.
    pub fn from_records(source_name: &str, records: Vec<ChemicalRecord>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(records.len());

        for (position, record) in records.iter().enumerate() {
            validate_record(record).map_err(|message| {
                AppError::dataset(source_name, format!("entry {position}: {message}"))
            })?;

            if let Some(first) = positions.insert(record.id, position) {
                return Err(AppError::dataset(
                    source_name,
                    format!(
                        "entry {position}: duplicate cid {} (first seen at entry {first})",
                        record.id
                    ),
                ));
            }
        }

        let index = DescriptorIndex::build(&records);
        log::debug!(
            "Indexed {} distinct descriptors across {} records from {}",
            index.term_count(),
            records.len(),
            source_name
        );

        Ok(Self {
            records,
            positions,
            index,
        })
    }

    /// All records in dataset order.
    pub fn records(&self) -> &[ChemicalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exact lookup by compound id.
    pub fn get(&self, id: u64) -> Option<&ChemicalRecord> {
        self.positions.get(&id).map(|&position| &self.records[position])
    }

    pub fn descriptor_index(&self) -> &DescriptorIndex {
        &self.index
    }
}

fn validate_record(record: &ChemicalRecord) -> std::result::Result<(), String> {
    if record.id == 0 {
        return Err("cid must be a positive integer".to_string());
    }
    if record.name.trim().is_empty() {
        return Err(format!("cid {} has an empty name", record.id));
    }
    if record.structure.trim().is_empty() {
        return Err(format!("cid {} has an empty smiles string", record.id));
    }
    if record.descriptors.iter().any(|d| d.trim().is_empty()) {
        return Err(format!("cid {} has a blank descriptor", record.id));
    }
    if record.sources.iter().any(|s| s.trim().is_empty()) {
        return Err(format!("cid {} has a blank source", record.id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"cid": 440917, "name": "(+)-Limonene", "smiles": "CC1=CCC(CC1)C(=C)C",
         "descriptors": ["citrus", "fresh", "orange"], "sources": ["Leffingwell"]},
        {"cid": 1183, "name": "Vanillin", "smiles": "COC1=C(C=CC(=C1)C=O)O",
         "descriptors": ["vanilla", "sweet"], "sources": ["GoodScents", "Arctander"]},
        {"cid": 7410, "name": "Acetophenone", "smiles": "CC(=O)C1=CC=CC=C1",
         "descriptors": [], "sources": []}
    ]"#;

    #[test]
    fn test_load_preserves_order() {
        let store = RecordStore::from_json_slice("sample", SAMPLE.as_bytes()).unwrap();
        let ids: Vec<u64> = store.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![440917, 1183, 7410]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_get_by_id() {
        let store = RecordStore::from_json_slice("sample", SAMPLE.as_bytes()).unwrap();
        assert_eq!(store.get(1183).map(|r| r.name.as_str()), Some("Vanillin"));
        assert!(store.get(42).is_none());
    }

    #[test]
    fn test_empty_sequences_are_allowed() {
        let store = RecordStore::from_json_slice("sample", SAMPLE.as_bytes()).unwrap();
        let record = store.get(7410).unwrap();
        assert!(record.descriptors.is_empty());
        assert!(record.sources.is_empty());
    }

    #[test]
    fn test_duplicate_id_fails() {
        let json = r#"[
            {"cid": 1, "name": "a", "smiles": "C", "descriptors": [], "sources": []},
            {"cid": 1, "name": "b", "smiles": "CC", "descriptors": [], "sources": []}
        ]"#;
        let err = RecordStore::from_json_slice("dup", json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("duplicate cid 1"));
    }

    #[test]
    fn test_missing_field_fails_fast() {
        let json = r#"[{"cid": 1, "name": "a", "descriptors": [], "sources": []}]"#;
        let err = RecordStore::from_json_slice("broken", json.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::Dataset { .. }));
        assert!(err.to_string().contains("smiles"));
    }

    #[test]
    fn test_zero_cid_fails() {
        let json = r#"[{"cid": 0, "name": "a", "smiles": "C", "descriptors": [], "sources": []}]"#;
        assert!(RecordStore::from_json_slice("zero", json.as_bytes()).is_err());
    }

    #[test]
    fn test_negative_cid_fails() {
        let json = r#"[{"cid": -3, "name": "a", "smiles": "C", "descriptors": [], "sources": []}]"#;
        assert!(RecordStore::from_json_slice("negative", json.as_bytes()).is_err());
    }

    #[test]
    fn test_blank_name_fails() {
        let json = r#"[{"cid": 5, "name": "  ", "smiles": "C", "descriptors": [], "sources": []}]"#;
        let err = RecordStore::from_json_slice("blank", json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("entry 0"));
    }

    #[test]
    fn test_not_an_array_fails() {
        let err = RecordStore::from_json_slice("object", br#"{"cid": 1}"#).unwrap_err();
        assert!(matches!(err, AppError::Dataset { .. }));
    }
}
