//! Shared data models
//!
//! Used across all features:
//! - Span: source location (bytes + lines)
//! - PyExpr: owned Python expression tree
//! - ImportBinding / RequiredImport: import bookkeeping
//! - ReferenceRole: which block keyword a reference came from
//! - BindingScope: module-level imports and assignments

mod expression;
mod imports;
mod reference;
mod scope;
mod span;

pub use expression::{Keyword, PyExpr, PyExprKind};
pub use imports::{ImportBinding, RequiredImport};
pub use reference::ReferenceRole;
pub use scope::BindingScope;
pub use span::Span;
