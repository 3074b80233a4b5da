// src/models/mod.rs

//! Domain models for the catalog.
//!
//! This module contains the data structures shared by the store, the search
//! engine and the presentation layer.

pub mod chemical;
mod config;
mod history;
mod query;

// Re-export all public types
pub use chemical::{ChemicalRecord, DEFAULT_REFERENCE_URL, reference_url};
pub use config::{CatalogConfig, Config, LinksConfig, OutputConfig, RenderConfig, SearchConfig};
pub use history::{RecentSearch, RecentSearches};
pub use query::{SearchMode, SearchRequest, split_terms};
