//! Rewrite engine infrastructure

mod dead_imports;
mod splice;

pub use dead_imports::dead_import_edits;
pub use splice::{apply_rewrites, splice};
