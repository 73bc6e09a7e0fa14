//! Block resolution domain models

use serde_json::{Map, Value};

/// Stored block configuration (the block document's `data`)
pub type BlockDocument = Map<String, Value>;

/// Outcome of evaluating an already-bound reference without running it
#[derive(Debug, Clone, PartialEq)]
pub enum BoundResolution {
    Resolved(BlockDocument),
    /// Not statically knowable; callers carry on without the document
    NotResolvable,
}

impl BoundResolution {
    pub fn document(&self) -> Option<&BlockDocument> {
        match self {
            BoundResolution::Resolved(document) => Some(document),
            BoundResolution::NotResolvable => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, BoundResolution::Resolved(_))
    }
}

/// Container image configured on an infrastructure document.
/// Missing, null, empty and non-string values all count as unset.
pub fn image_of(document: &BlockDocument) -> Option<&str> {
    document
        .get("image")
        .and_then(Value::as_str)
        .filter(|image| !image.trim().is_empty())
}
