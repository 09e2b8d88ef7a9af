//! Transformation stages.
//!
//! This module handles turning one input table into the profile's schema:
//! - Derive: columns computed from the input file name
//! - Header map: renames and blank columns
//! - Pipeline: load, derive, rename, project, sort, emit

pub mod derive;
pub mod header_map;
pub mod pipeline;

pub use derive::{FileNameRule, NO_MATCH};
pub use header_map::HeaderRule;
pub use pipeline::*;
