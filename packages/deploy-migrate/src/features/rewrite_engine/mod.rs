//! Rewrite Engine Feature
//!
//! ## Architecture
//!
//! ```text
//! ParsedModule (tree-sitter)
//!       ↓
//! RewriteEngine (pre-order walk, module-scope bindings)
//!       ↓ per matching call
//! ClassifiedCall
//!       ↓
//! RewriteOutcome → apply_rewrites → updated source
//! ```
//!
//! ## Structure
//! - `domain/` - MigratedCall, RewriteOutcome, deprecated call shape
//! - `application/` - RewriteEngine
//! - `infrastructure/` - text splicing

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::RewriteEngine;
pub use domain::{is_deprecated_type, MigratedCall, RewriteOutcome};
pub use infrastructure::apply_rewrites;
