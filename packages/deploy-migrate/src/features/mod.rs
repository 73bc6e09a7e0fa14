//! Feature modules
//!
//! Consumed leaf-first:
//! parsing → block_resolution → call_classifier → rewrite_engine

pub mod block_resolution;
pub mod call_classifier;
pub mod parsing;
pub mod rewrite_engine;
