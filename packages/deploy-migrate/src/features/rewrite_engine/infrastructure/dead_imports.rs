//! Removal of deprecated-type imports the rewrite left unused

use std::ops::Range;

use tree_sitter::Node;

use crate::features::parsing::ParsedModule;
use crate::features::rewrite_engine::domain::{RewriteOutcome, DEPRECATED_TYPE_PATHS};
use crate::shared::models::Span;
use crate::shared::utils::{named_children, node_text};

/// Edits dropping module-level `from ... import Deployment` names that nothing
/// references once the recorded calls are replaced.
///
/// A statement importing only dead names is deleted with its line; otherwise
/// it is rewritten with the remaining names.
pub fn dead_import_edits(module: &ParsedModule, outcome: &RewriteOutcome) -> Vec<(Range<usize>, String)> {
    let root = module.root();
    let replaced: Vec<Span> = outcome.calls().iter().map(|call| call.span()).collect();
    let replacements: Vec<String> = outcome.calls().iter().map(|call| call.replacement_text()).collect();
    let mut edits = Vec::new();

    for stmt in named_children(&root) {
        if stmt.kind() != "import_from_statement" {
            continue;
        }
        let Some(module_name) = stmt.child_by_field_name("module_name") else {
            continue;
        };
        let module_name = module.text(&module_name);

        let mut cursor = stmt.walk();
        let names: Vec<Node> = stmt.children_by_field_name("name", &mut cursor).collect();
        let (dead, kept): (Vec<Node>, Vec<Node>) = names.into_iter().partition(|name| {
            let Some((imported, bound)) = imported_name(*name, module) else {
                return false;
            };
            let qualified = format!("{}.{}", module_name, imported);
            DEPRECATED_TYPE_PATHS.contains(&qualified.as_str())
                && !is_referenced(root, bound, module, &replaced)
                && !replacements.iter().any(|text| mentions(text, bound))
        });
        if dead.is_empty() {
            continue;
        }

        let range = stmt.start_byte()..stmt.end_byte();
        if kept.is_empty() {
            let end = match module.source()[range.end..].find('\n') {
                Some(newline) => range.end + newline + 1,
                None => module.source().len(),
            };
            edits.push((range.start..end, String::new()));
        } else {
            let kept: Vec<&str> = kept.iter().map(|name| module.text(name)).collect();
            edits.push((range, format!("from {} import {}", module_name, kept.join(", "))));
        }
    }

    edits
}

/// (imported name, bound name) of a `dotted_name` / `aliased_import`
fn imported_name<'m>(node: Node, module: &'m ParsedModule) -> Option<(&'m str, &'m str)> {
    match node.kind() {
        "dotted_name" => {
            let name = node_text(&node, module.source());
            Some((name, name))
        }
        "aliased_import" => {
            let name = node_text(&node.child_by_field_name("name")?, module.source());
            let alias = node_text(&node.child_by_field_name("alias")?, module.source());
            Some((name, alias))
        }
        _ => None,
    }
}

/// Any identifier `name` outside imports and the replaced calls
fn is_referenced(node: Node, name: &str, module: &ParsedModule, replaced: &[Span]) -> bool {
    if matches!(node.kind(), "import_statement" | "import_from_statement") {
        return false;
    }
    let inside_replaced = replaced
        .iter()
        .any(|span| span.start_byte <= node.start_byte() && node.end_byte() <= span.end_byte);
    if inside_replaced {
        return false;
    }
    if node.kind() == "identifier" {
        return module.text(&node) == name;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.named_children(&mut cursor).collect();
    children
        .into_iter()
        .any(|child| is_referenced(child, name, module, replaced))
}

/// `name` appears as a whole identifier in rendered code
fn mentions(text: &str, name: &str) -> bool {
    text.split(|c: char| !(c == '_' || c.is_alphanumeric()))
        .any(|token| token == name)
}
