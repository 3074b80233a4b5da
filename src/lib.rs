// src/lib.rs

//! OpenSmell catalog library: odor descriptor and chemical structure search
//! over a static dataset of odorant compounds.

pub mod error;
pub mod models;
pub mod search;
pub mod services;
pub mod storage;
pub mod utils;
