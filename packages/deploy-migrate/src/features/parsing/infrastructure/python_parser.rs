//! Tree-sitter Python parser

use std::path::Path;

use tree_sitter::{Node, Parser as TSParser};

use crate::errors::{MigrateError, Result};
use crate::features::parsing::domain::ParsedModule;
use crate::features::parsing::ports::SourceParser;

/// Tree-sitter based Python parser
#[derive(Debug, Default, Clone, Copy)]
pub struct PythonParser;

impl PythonParser {
    pub fn new() -> Self {
        Self
    }

    /// First ERROR or MISSING node in document order
    fn first_error<'a>(node: Node<'a>) -> Option<Node<'a>> {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !node.has_error() {
            return None;
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'a>> = node.children(&mut cursor).collect();
        children.into_iter().find_map(Self::first_error)
    }
}

impl SourceParser for PythonParser {
    fn parse(&self, source: &str, file_path: &Path) -> Result<ParsedModule> {
        let file = file_path.display().to_string();

        let mut parser = TSParser::new();
        parser
            .set_language(&tree_sitter_python::language())
            .map_err(|e| MigrateError::parse(&file, format!("Failed to set language: {}", e)))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| MigrateError::parse(&file, "Failed to parse source code"))?;

        if let Some(bad) = Self::first_error(tree.root_node()) {
            let position = bad.start_position();
            let what = if bad.is_missing() {
                format!("missing {}", bad.kind())
            } else {
                "invalid syntax".to_string()
            };
            return Err(MigrateError::parse(
                &file,
                format!("{} at line {}, column {}", what, position.row + 1, position.column),
            ));
        }

        Ok(ParsedModule::new(
            source.to_string(),
            file_path.to_path_buf(),
            tree,
        ))
    }
}
