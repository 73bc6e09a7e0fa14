//! Rewrite engine application layer

mod engine;

pub use engine::RewriteEngine;
