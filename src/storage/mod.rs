// src/storage/mod.rs

//! Dataset sources and the in-memory record store.
//!
//! The catalog is backed by a single static JSON document:
//!
//! ```json
//! [
//!   {
//!     "cid": 440917,
//!     "name": "(+)-Limonene",
//!     "smiles": "CC1=CCC(CC1)C(=C)C",
//!     "descriptors": ["citrus", "fresh"],
//!     "sources": ["Leffingwell"]
//!   }
//! ]
//! ```
//!
//! It is read once, validated as a whole, and kept as an immutable
//! [`RecordStore`] for the lifetime of the process.

pub mod local;
mod store;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use local::LocalDataset;
pub use store::RecordStore;

/// Trait for places the static dataset can be read from.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human-readable name used in logs and errors.
    fn name(&self) -> String;

    /// Read the raw JSON document.
    async fn read_dataset(&self) -> Result<Vec<u8>>;
}

/// Dataset already held in memory (bundled or generated in tests).
#[derive(Debug, Clone)]
pub struct MemoryDataset {
    name: String,
    bytes: Vec<u8>,
}

impl MemoryDataset {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl DatasetSource for MemoryDataset {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn read_dataset(&self) -> Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

/// Read and validate a dataset into a record store.
pub async fn load_store(source: &dyn DatasetSource) -> Result<RecordStore> {
    let name = source.name();
    let bytes = source.read_dataset().await?;
    let store = RecordStore::from_json_slice(&name, &bytes)?;
    log::info!("Loaded {} chemical records from {}", store.len(), name);
    Ok(store)
}
