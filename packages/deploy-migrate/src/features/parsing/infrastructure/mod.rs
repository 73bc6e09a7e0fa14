//! Parsing infrastructure - this is where the tree-sitter dependency lives.

mod bindings;
mod lowering;
mod python_parser;

pub use bindings::{assignment_target, bound_identifiers, import_bindings};
pub use lowering::{decode_string_literal, lower_expression};
pub use python_parser::PythonParser;
