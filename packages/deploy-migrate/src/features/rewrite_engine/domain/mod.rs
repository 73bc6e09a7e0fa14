//! Rewrite engine domain models

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::features::call_classifier::{Advisory, ClassifiedCall};
use crate::shared::models::{BindingScope, PyExpr, RequiredImport, Span};
use crate::shared::utils::render_expr;

/// Method the migration looks for
pub const DEPRECATED_METHOD: &str = "build_from_flow";

/// Unqualified class name matched when the script does not say otherwise
pub const DEPRECATED_TYPE: &str = "Deployment";

/// Where the deprecated class lives
pub const DEPRECATED_TYPE_PATHS: &[&str] = &[
    "prefect.deployments.Deployment",
    "prefect.deployments.deployments.Deployment",
];

/// Does `receiver` (the `X` in `X.build_from_flow`) name the deprecated class?
///
/// A bare `Deployment` matches unless the module imported that name from
/// somewhere else. Other paths match once qualified through the imports.
pub fn is_deprecated_type(receiver: &PyExpr, scope: &BindingScope) -> bool {
    let Some(path) = receiver.dotted_path() else {
        return false;
    };
    match scope.qualify(&path) {
        Some(qualified) => DEPRECATED_TYPE_PATHS.contains(&qualified.as_str()),
        None => path == DEPRECATED_TYPE || DEPRECATED_TYPE_PATHS.contains(&path.as_str()),
    }
}

/// One rewritten call
#[derive(Debug, Clone, PartialEq)]
pub struct MigratedCall {
    original_text: String,
    classified: ClassifiedCall,
}

impl MigratedCall {
    pub fn new(original_text: impl Into<String>, classified: ClassifiedCall) -> Self {
        Self {
            original_text: original_text.into(),
            classified,
        }
    }

    pub fn original(&self) -> &PyExpr {
        self.classified.original()
    }

    /// Call as written in the script
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn replacement(&self) -> &PyExpr {
        self.classified.synthesized_replacement()
    }

    pub fn replacement_text(&self) -> String {
        render_expr(self.replacement())
    }

    pub fn span(&self) -> Span {
        self.classified.span()
    }

    pub fn classified(&self) -> &ClassifiedCall {
        &self.classified
    }
}

/// Everything one traversal found
#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    file_path: PathBuf,
    calls: Vec<MigratedCall>,
    scope: BindingScope,
}

impl RewriteOutcome {
    pub fn new(file_path: PathBuf, calls: Vec<MigratedCall>, scope: BindingScope) -> Self {
        Self {
            file_path,
            calls,
            scope,
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Rewritten calls in discovery order (pre-order, left to right)
    pub fn calls(&self) -> &[MigratedCall] {
        &self.calls
    }

    /// Each call's advisories in discovery order, duplicates kept
    pub fn advisories(&self) -> Vec<Advisory> {
        self.calls
            .iter()
            .flat_map(|call| call.classified().advisories().iter().cloned())
            .collect()
    }

    /// Union of the calls' required imports
    pub fn required_imports(&self) -> BTreeSet<RequiredImport> {
        self.calls
            .iter()
            .flat_map(|call| call.classified().required_imports().iter().cloned())
            .collect()
    }

    /// Required imports the script does not already have
    pub fn missing_imports(&self) -> Vec<RequiredImport> {
        self.required_imports()
            .into_iter()
            .filter(|required| !self.scope.satisfies(required))
            .collect()
    }

    /// Module-level bindings seen by the traversal
    pub fn scope(&self) -> &BindingScope {
        &self.scope
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }
}
