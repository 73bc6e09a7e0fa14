//! Parsed module representation
//!
//! Owns the source text next to the tree-sitter tree so nodes can be turned
//! back into text at any point of the rewrite.

use std::path::{Path, PathBuf};

use tree_sitter::{Node, Tree};

use crate::shared::utils::{find_child_by_kind, named_children, node_text};

/// Parsed Python module
#[derive(Debug, Clone)]
pub struct ParsedModule {
    source: String,
    file_path: PathBuf,
    tree: Tree,
}

impl ParsedModule {
    pub fn new(source: String, file_path: PathBuf, tree: Tree) -> Self {
        Self {
            source,
            file_path,
            tree,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// `module` node
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text for a node of this tree
    pub fn text(&self, node: &Node) -> &str {
        node_text(node, &self.source)
    }

    /// Byte offset where new import lines go: after a shebang and coding
    /// cookie, a module docstring and any `from __future__` imports.
    pub fn import_insertion_offset(&self) -> usize {
        let root = self.root();
        let header_end = self.header_end();
        let mut last_end = None;

        for (index, stmt) in named_children(&root).into_iter().enumerate() {
            let skip = match stmt.kind() {
                "expression_statement" if index == 0 => {
                    let children = named_children(&stmt);
                    children.len() == 1 && children[0].kind() == "string"
                }
                "future_import_statement" => true,
                "import_from_statement" => find_child_by_kind(&stmt, "dotted_name")
                    .map(|module| self.text(&module) == "__future__")
                    .unwrap_or(false),
                _ => false,
            };
            if !skip {
                break;
            }
            last_end = Some(stmt.end_byte());
        }

        let statements_end = match last_end {
            Some(end) => self.line_end(end),
            None => 0,
        };
        statements_end.max(header_end)
    }

    /// End of the leading `#!` line and `coding` cookie comments (lines 1 and 2)
    fn header_end(&self) -> usize {
        let mut offset = 0;
        for line_no in 0..2 {
            let rest = &self.source[offset..];
            let line = rest.split('\n').next().unwrap_or("");
            let is_header = (line_no == 0 && line.starts_with("#!"))
                || (line.trim_start().starts_with('#') && is_coding_cookie(line));
            if !is_header {
                break;
            }
            offset = self.line_end(offset);
        }
        offset
    }

    /// Offset just past the newline ending the line containing `offset`
    fn line_end(&self, offset: usize) -> usize {
        match self.source[offset..].find('\n') {
            Some(newline) => offset + newline + 1,
            None => self.source.len(),
        }
    }
}

/// PEP 263 `# -*- coding: utf-8 -*-` / `# vim: set fileencoding=utf-8 :`
fn is_coding_cookie(line: &str) -> bool {
    line.find("coding")
        .map(|at| matches!(line[at + "coding".len()..].chars().next(), Some(':') | Some('=')))
        .unwrap_or(false)
}
