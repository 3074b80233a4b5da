// src/storage/local.rs

//! Local filesystem dataset source.
//!
//! Reads the pre-built odor index shipped alongside the application:
//!
//! ```text
//! {root}/
//! ├── opensmell.toml                # Catalog configuration
//! └── data/
//!     └── odor_search_index.json    # Static chemical index
//! ```

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::storage::DatasetSource;

/// Dataset stored as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct LocalDataset {
    path: PathBuf,
}

impl LocalDataset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl DatasetSource for LocalDataset {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_dataset(&self) -> Result<Vec<u8>> {
        self.read_bytes()
            .await?
            .ok_or_else(|| AppError::dataset(self.name(), "file not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::load_store;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.json");
        tokio::fs::write(
            &path,
            r#"[{"cid": 8077, "name": "Eucalyptol", "smiles": "CC1(C)OC2(C)CCC1CC2",
                 "descriptors": ["camphor", "minty"], "sources": ["Arctander"]}]"#,
        )
        .await
        .unwrap();

        let store = load_store(&LocalDataset::new(&path)).await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(8077).unwrap().descriptors, vec!["camphor", "minty"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_dataset_error() {
        let tmp = TempDir::new().unwrap();
        let source = LocalDataset::new(tmp.path().join("nope.json"));

        let err = source.read_dataset().await.unwrap_err();
        assert!(matches!(err, AppError::Dataset { .. }));
        assert!(err.to_string().contains("file not found"));
    }

    #[tokio::test]
    async fn test_truncated_file_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.json");
        tokio::fs::write(&path, r#"[{"cid": 1, "name": "#).await.unwrap();

        assert!(load_store(&LocalDataset::new(&path)).await.is_err());
    }
}
