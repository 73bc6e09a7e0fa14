//! Import and assignment extraction

use tree_sitter::Node;

use crate::shared::models::ImportBinding;
use crate::shared::utils::node_text_owned;

/// Names bound by an `import` / `from ... import` statement.
/// Wildcard imports bind nothing we can name.
pub fn import_bindings(node: Node, source: &str) -> Vec<ImportBinding> {
    let mut bindings = Vec::new();
    let mut cursor = node.walk();

    match node.kind() {
        "import_statement" => {
            for name in node.children_by_field_name("name", &mut cursor) {
                if let Some((path, alias)) = split_alias(name, source) {
                    bindings.push(ImportBinding::module(path, alias));
                }
            }
        }
        "import_from_statement" => {
            let Some(module) = node.child_by_field_name("module_name") else {
                return bindings;
            };
            let module = node_text_owned(&module, source);
            for name in node.children_by_field_name("name", &mut cursor) {
                if let Some((path, alias)) = split_alias(name, source) {
                    bindings.push(ImportBinding::from_module(&module, path, alias));
                }
            }
        }
        _ => {}
    }

    bindings
}

/// `dotted_name` or `aliased_import` → (name, alias)
fn split_alias(node: Node, source: &str) -> Option<(String, Option<String>)> {
    match node.kind() {
        "dotted_name" => Some((node_text_owned(&node, source), None)),
        "aliased_import" => {
            let name = node.child_by_field_name("name")?;
            let alias = node
                .child_by_field_name("alias")
                .map(|alias| node_text_owned(&alias, source));
            Some((node_text_owned(&name, source), alias))
        }
        _ => None,
    }
}

/// `name = <value>` with a single plain-name target
pub fn assignment_target<'a>(node: Node<'a>, source: &str) -> Option<(String, Node<'a>)> {
    if node.kind() != "assignment" {
        return None;
    }
    let left = node.child_by_field_name("left")?;
    let right = node.child_by_field_name("right")?;
    if left.kind() != "identifier" || right.kind() == "assignment" {
        return None;
    }
    Some((node_text_owned(&left, source), right))
}

/// Plain names a binding target binds: `a`, `a, (b, *c)`, `[a, b]`.
/// Attribute and subscript targets bind nothing at module scope.
pub fn bound_identifiers(target: Node, source: &str) -> Vec<String> {
    match target.kind() {
        "identifier" => vec![node_text_owned(&target, source)],
        "attribute" | "subscript" => Vec::new(),
        "as_pattern_target" if target.named_child_count() == 0 => {
            vec![node_text_owned(&target, source)]
        }
        _ => {
            let mut cursor = target.walk();
            let children: Vec<Node> = target.named_children(&mut cursor).collect();
            children
                .into_iter()
                .flat_map(|child| bound_identifiers(child, source))
                .collect()
        }
    }
}
