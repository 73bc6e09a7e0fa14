//! Block references and entrypoints

use serde::Serialize;

use crate::config::LoadHelper;
use crate::shared::models::{PyExpr, Span};

/// `storage=` / `infrastructure=` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReference {
    /// String naming a stored block (`"github/my-repo"`), loaded at run time
    Slug {
        slug: String,
        span: Option<Span>,
    },
    /// Expression the script already built or loaded, passed through as is
    Bound(PyExpr),
}

impl BlockReference {
    pub fn from_expr(expr: &PyExpr) -> Self {
        match expr.as_str_literal() {
            Some(slug) => BlockReference::Slug {
                slug: slug.to_string(),
                span: expr.span,
            },
            None => BlockReference::Bound(expr.clone()),
        }
    }

    pub fn slug(&self) -> Option<&str> {
        match self {
            BlockReference::Slug { slug, .. } => Some(slug),
            BlockReference::Bound(_) => None,
        }
    }

    /// Expression the rewritten code uses for this block
    pub fn to_expr(&self, helper: &LoadHelper) -> PyExpr {
        match self {
            BlockReference::Slug { slug, span } => {
                let call = helper.load_call(slug);
                match span {
                    Some(span) => call.with_span(*span),
                    None => call,
                }
            }
            BlockReference::Bound(expr) => expr.clone(),
        }
    }
}

/// `infrastructure=` plus what resolving it told us
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionEnvironment {
    pub reference: BlockReference,
    /// `image` of the resolved document, when there was one
    pub resolved_image: Option<String>,
}

/// Where the entrypoint string came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrypointSource {
    /// `path` joined with `entrypoint`
    JoinedWithPath,
    /// `entrypoint` as written
    Explicit,
    /// `<file>:<flow>`
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entrypoint {
    pub value: PyExpr,
    pub source: EntrypointSource,
}
