//! Parsing Feature
//!
//! Responsible for parsing Python scripts and lowering call arguments.
//!
//! ## Structure
//! - `domain/` - ParsedModule
//! - `ports/` - SourceParser trait
//! - `infrastructure/` - tree-sitter parser, expression lowering, import extraction

pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports
pub use domain::ParsedModule;
pub use infrastructure::{
    assignment_target, bound_identifiers, import_bindings, lower_expression, PythonParser,
};
pub use ports::SourceParser;
