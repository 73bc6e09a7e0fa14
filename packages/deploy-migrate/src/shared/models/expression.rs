//! Owned Python expression tree
//!
//! tree-sitter trees are immutable and borrow the source, so the parts of a
//! call the classifier reasons about are lowered into this model. Anything the
//! migration never inspects stays `Verbatim` source text.

use super::Span;

/// Python expression with an optional source location
///
/// Synthesized nodes carry the span of the call they replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PyExpr {
    pub kind: PyExprKind,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PyExprKind {
    /// Variable read: `x`
    Name(String),

    /// Field access: `obj.field`
    Attribute { value: Box<PyExpr>, attr: String },

    /// Call: `func(arg, key=value, *rest, **extra)`
    Call {
        func: Box<PyExpr>,
        args: Vec<PyExpr>,
        keywords: Vec<Keyword>,
    },

    /// String literal; `raw` keeps the original literal text when parsed
    Str { value: String, raw: Option<String> },

    /// Any other expression, kept as written.
    /// `atomic` is false when the text needs parentheses to be used as a receiver.
    Verbatim { text: String, atomic: bool },
}

/// Keyword argument; `arg == None` is a `**mapping` splat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub arg: Option<String>,
    pub value: PyExpr,
}

impl Keyword {
    pub fn new(arg: impl Into<String>, value: PyExpr) -> Self {
        Self {
            arg: Some(arg.into()),
            value,
        }
    }

    pub fn splat(value: PyExpr) -> Self {
        Self { arg: None, value }
    }
}

impl PyExpr {
    pub fn new(kind: PyExprKind) -> Self {
        Self { kind, span: None }
    }

    pub fn name(id: impl Into<String>) -> Self {
        Self::new(PyExprKind::Name(id.into()))
    }

    pub fn attribute(value: PyExpr, attr: impl Into<String>) -> Self {
        Self::new(PyExprKind::Attribute {
            value: Box::new(value),
            attr: attr.into(),
        })
    }

    pub fn call(func: PyExpr, args: Vec<PyExpr>, keywords: Vec<Keyword>) -> Self {
        Self::new(PyExprKind::Call {
            func: Box::new(func),
            args,
            keywords,
        })
    }

    /// Synthesized string literal
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(PyExprKind::Str {
            value: value.into(),
            raw: None,
        })
    }

    pub fn verbatim(text: impl Into<String>, atomic: bool) -> Self {
        Self::new(PyExprKind::Verbatim {
            text: text.into(),
            atomic,
        })
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// `self.method(**keywords)`
    pub fn method_call(self, method: &str, keywords: Vec<Keyword>) -> Self {
        Self::call(Self::attribute(self, method), Vec::new(), keywords)
    }

    /// Value of a string literal
    pub fn as_str_literal(&self) -> Option<&str> {
        match &self.kind {
            PyExprKind::Str { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match &self.kind {
            PyExprKind::Name(id) => Some(id),
            _ => None,
        }
    }

    /// `a.b.c` for a chain of names and attributes
    pub fn dotted_path(&self) -> Option<String> {
        match &self.kind {
            PyExprKind::Name(id) => Some(id.clone()),
            PyExprKind::Attribute { value, attr } => {
                value.dotted_path().map(|base| format!("{}.{}", base, attr))
            }
            _ => None,
        }
    }

    /// Last identifier of a name or attribute chain
    pub fn terminal_name(&self) -> Option<&str> {
        match &self.kind {
            PyExprKind::Name(id) => Some(id),
            PyExprKind::Attribute { attr, .. } => Some(attr),
            _ => None,
        }
    }

    /// Keyword argument value of a call
    pub fn keyword(&self, arg: &str) -> Option<&PyExpr> {
        match &self.kind {
            PyExprKind::Call { keywords, .. } => keywords
                .iter()
                .rev()
                .find(|kw| kw.arg.as_deref() == Some(arg))
                .map(|kw| &kw.value),
            _ => None,
        }
    }

    /// Can be used as a receiver (`<expr>.attr`) without parentheses
    pub fn is_atomic(&self) -> bool {
        match &self.kind {
            PyExprKind::Verbatim { atomic, .. } => *atomic,
            _ => true,
        }
    }
}
