// src/services/mod.rs

//! Service layer for the catalog application.
//!
//! This module contains the business logic for:
//! - Search orchestration over the loaded dataset (`Catalog`)
//! - Lazily initialized structure depiction (`RendererHandle`)
//! - Per-view render state with stale-result discard (`RenderSession`)

mod catalog;
pub mod renderer;
mod render_session;

pub use catalog::{Catalog, SearchOutcome};
pub use render_session::{RenderCounts, RenderOutcome, RenderSession, RenderState};
pub use renderer::{
    Depiction, HttpRenderer, HttpRendererLoader, RendererHandle, RendererLoader,
    StructureRenderer,
};
