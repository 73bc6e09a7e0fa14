//! Shared utilities

pub mod render;
pub mod tree_sitter;

pub use self::render::{quote, render_expr};
pub use self::tree_sitter::{
    find_child_by_kind, named_children, node_text, node_text_owned, node_to_span,
};
