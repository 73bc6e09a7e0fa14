//! tree-sitter Python → PyExpr lowering
//!
//! Only names, attributes, calls and plain string literals get structure.
//! Everything else is carried as verbatim source text.

use tree_sitter::Node;

use crate::shared::models::{Keyword, PyExpr, PyExprKind};
use crate::shared::utils::{named_children, node_text, node_text_owned, node_to_span};

/// Lower an expression node into an owned PyExpr
pub fn lower_expression(node: Node, source: &str) -> PyExpr {
    let span = node_to_span(&node);

    let expr = match node.kind() {
        "identifier" => PyExpr::name(node_text_owned(&node, source)),

        "attribute" => {
            match (
                node.child_by_field_name("object"),
                node.child_by_field_name("attribute"),
            ) {
                (Some(object), Some(attribute)) => PyExpr::attribute(
                    lower_expression(object, source),
                    node_text_owned(&attribute, source),
                ),
                _ => verbatim(&node, source),
            }
        }

        "call" => lower_call(node, source),

        "string" => {
            let text = node_text(&node, source);
            match decode_string_literal(text) {
                Some(value) => PyExpr::new(PyExprKind::Str {
                    value,
                    raw: Some(text.to_string()),
                }),
                None => verbatim(&node, source),
            }
        }

        // (expr) → expr
        "parenthesized_expression" => {
            let inner = named_children(&node);
            if inner.len() == 1 && !matches!(inner[0].kind(), "yield" | "list_splat") {
                return lower_expression(inner[0], source);
            }
            verbatim(&node, source)
        }

        _ => verbatim(&node, source),
    };

    expr.with_span(span)
}

fn lower_call(node: Node, source: &str) -> PyExpr {
    let Some(function) = node.child_by_field_name("function") else {
        return verbatim(&node, source);
    };
    let func = lower_expression(function, source);

    let mut args = Vec::new();
    let mut keywords = Vec::new();

    match node.child_by_field_name("arguments") {
        Some(arguments) if arguments.kind() == "argument_list" => {
            for arg in named_children(&arguments) {
                match arg.kind() {
                    "keyword_argument" => {
                        let name = arg.child_by_field_name("name");
                        let value = arg.child_by_field_name("value");
                        if let (Some(name), Some(value)) = (name, value) {
                            keywords.push(Keyword::new(
                                node_text_owned(&name, source),
                                lower_expression(value, source),
                            ));
                        }
                    }
                    "dictionary_splat" => match named_children(&arg).first() {
                        Some(inner) => keywords.push(Keyword::splat(lower_expression(*inner, source))),
                        None => keywords.push(Keyword::splat(verbatim(&arg, source))),
                    },
                    "list_splat" => {
                        args.push(
                            PyExpr::verbatim(node_text_owned(&arg, source), false)
                                .with_span(node_to_span(&arg)),
                        );
                    }
                    _ => args.push(lower_expression(arg, source)),
                }
            }
        }
        // f(x for x in xs)
        Some(generator) => args.push(verbatim(&generator, source)),
        None => {}
    }

    PyExpr::call(func, args, keywords)
}

fn verbatim(node: &Node, source: &str) -> PyExpr {
    PyExpr::verbatim(node_text_owned(node, source), is_atomic_kind(node.kind()))
        .with_span(node_to_span(node))
}

/// Node kinds usable as `<expr>.attr` without extra parentheses
fn is_atomic_kind(kind: &str) -> bool {
    matches!(
        kind,
        "identifier"
            | "attribute"
            | "call"
            | "subscript"
            | "string"
            | "concatenated_string"
            | "integer"
            | "float"
            | "true"
            | "false"
            | "none"
            | "ellipsis"
            | "list"
            | "tuple"
            | "dictionary"
            | "set"
            | "list_comprehension"
            | "dictionary_comprehension"
            | "set_comprehension"
            | "generator_expression"
            | "parenthesized_expression"
    )
}

/// Value of a plain, `u`- or `r`-prefixed string literal.
///
/// Raw literals keep their backslashes. Returns `None` for f- and b-strings
/// and for escapes other than the common single-character ones; those
/// literals stay verbatim.
pub fn decode_string_literal(text: &str) -> Option<String> {
    let quote_start = text.find(|c: char| c == '"' || c == '\'')?;
    let prefix = text[..quote_start].to_ascii_lowercase();
    let raw = match prefix.as_str() {
        "" | "u" => false,
        "r" | "ur" | "ru" => true,
        _ => return None,
    };

    let body = &text[quote_start..];
    let delimiter = ["\"\"\"", "'''", "\"", "'"]
        .into_iter()
        .find(|d| body.starts_with(d))?;
    if body.len() < delimiter.len() * 2 || !body.ends_with(delimiter) {
        return None;
    }
    let inner = &body[delimiter.len()..body.len() - delimiter.len()];
    if raw {
        return Some(inner.to_string());
    }

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next()? {
            '\\' => value.push('\\'),
            '\'' => value.push('\''),
            '"' => value.push('"'),
            'n' => value.push('\n'),
            't' => value.push('\t'),
            'r' => value.push('\r'),
            '\n' => {} // line continuation
            _ => return None,
        }
    }
    Some(value)
}
