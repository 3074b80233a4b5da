// src/search/mod.rs

//! Search, capping and pagination over the record store.
//!
//! - `engine`: descriptor and chemical-identity queries
//! - `index`: inverted descriptor index backing descriptor queries
//! - `cap`: truncation of oversized result lists
//! - `paginator`: batch reveal of a result list
//! - `stats`: descriptor frequencies

pub mod cap;
pub mod engine;
pub mod index;
pub mod paginator;
pub mod stats;

pub use cap::{Advisory, CapPolicy, CappedResults, DEFAULT_RESULT_CAP};
pub use engine::{
    lookup_by_id, scan_by_descriptors, search, search_by_chemical_query, search_by_descriptors,
};
pub use index::{DescriptorIndex, IndexBuilder};
pub use paginator::{DEFAULT_ITEMS_PER_PAGE, Paginator};
pub use stats::{DEFAULT_TOP_DESCRIPTORS, DescriptorStats};
