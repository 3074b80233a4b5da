// src/services/catalog.rs

//! Catalog service: search orchestration over a loaded record store.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{ChemicalRecord, SearchConfig, SearchRequest};
use crate::search::{self, Advisory, CapPolicy, CappedResults, DescriptorStats, Paginator};
use crate::storage::{self, DatasetSource, RecordStore};

/// Result of a single search, capped and ready to paginate.
#[derive(Debug, Clone)]
pub struct SearchOutcome<'a> {
    pub request: SearchRequest,
    pub results: CappedResults<&'a ChemicalRecord>,
    items_per_page: usize,
}

impl<'a> SearchOutcome<'a> {
    /// Number of matches before the cap.
    pub fn total(&self) -> usize {
        self.results.total
    }

    pub fn records(&self) -> &[&'a ChemicalRecord] {
        &self.results.items
    }

    pub fn advisory(&self) -> Option<Advisory> {
        self.results.advisory
    }

    pub fn is_empty(&self) -> bool {
        self.results.items.is_empty()
    }

    /// Fresh paginator over the capped list.
    pub fn paginate(&self) -> Paginator<&'a ChemicalRecord> {
        Paginator::new(self.results.items.clone(), self.items_per_page)
    }
}

/// Read-only catalog shared by every view of the application.
#[derive(Debug, Clone)]
pub struct Catalog {
    store: Arc<RecordStore>,
    cap: CapPolicy,
    items_per_page: usize,
}

impl Catalog {
    pub fn new(store: Arc<RecordStore>, config: &SearchConfig) -> Self {
        Self {
            store,
            cap: CapPolicy::with_limit(config.result_cap),
            items_per_page: config.items_per_page,
        }
    }

    /// Load the dataset and build a catalog over it.
    pub async fn open(source: &dyn DatasetSource, config: &SearchConfig) -> Result<Self> {
        let store = storage::load_store(source).await?;
        Ok(Self::new(Arc::new(store), config))
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Run a search and apply the result cap.
    pub fn search(&self, request: &SearchRequest) -> SearchOutcome<'_> {
        let matches = search::search(&self.store, request);
        log::debug!(
            "{} search '{}' matched {} records",
            request.mode,
            request.query,
            matches.len()
        );

        SearchOutcome {
            request: request.clone(),
            results: self.cap.apply(matches),
            items_per_page: self.items_per_page,
        }
    }

    pub fn lookup(&self, id: u64) -> Option<&ChemicalRecord> {
        search::lookup_by_id(&self.store, id)
    }

    pub fn stats(&self) -> DescriptorStats {
        DescriptorStats::from_store(&self.store)
    }
}
