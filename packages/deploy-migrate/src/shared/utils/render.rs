//! PyExpr → Python source
//!
//! Single-line output. Original literal and verbatim text is reproduced as
//! written; line wrapping is left to whatever formatter runs afterwards.

use crate::shared::models::{Keyword, PyExpr, PyExprKind};

/// Python source for an expression
pub fn render_expr(expr: &PyExpr) -> String {
    let mut out = String::new();
    write_expr(expr, &mut out);
    out
}

fn write_expr(expr: &PyExpr, out: &mut String) {
    match &expr.kind {
        PyExprKind::Name(id) => out.push_str(id),
        PyExprKind::Attribute { value, attr } => {
            write_receiver(value, out);
            out.push('.');
            out.push_str(attr);
        }
        PyExprKind::Call {
            func,
            args,
            keywords,
        } => {
            write_receiver(func, out);
            out.push('(');
            let mut first = true;
            for arg in args {
                if !first {
                    out.push_str(", ");
                }
                first = false;
                write_expr(arg, out);
            }
            for keyword in keywords {
                if !first {
                    out.push_str(", ");
                }
                first = false;
                write_keyword(keyword, out);
            }
            out.push(')');
        }
        PyExprKind::Str { value, raw } => match raw {
            Some(raw) => out.push_str(raw),
            None => out.push_str(&quote(value)),
        },
        PyExprKind::Verbatim { text, .. } => out.push_str(text),
    }
}

fn write_receiver(expr: &PyExpr, out: &mut String) {
    if expr.is_atomic() {
        write_expr(expr, out);
    } else {
        out.push('(');
        write_expr(expr, out);
        out.push(')');
    }
}

fn write_keyword(keyword: &Keyword, out: &mut String) {
    match &keyword.arg {
        Some(arg) => {
            out.push_str(arg);
            out.push('=');
        }
        None => out.push_str("**"),
    }
    write_expr(&keyword.value, out);
}

/// Double-quoted Python string literal
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
