//! Module-level name bindings seen during a traversal

use rustc_hash::FxHashMap;

use super::{ImportBinding, PyExpr, RequiredImport};

/// Imports and single-name assignments at module scope, in the order met.
///
/// A later binding of the same name shadows an earlier one, whichever kind.
#[derive(Debug, Clone, Default)]
pub struct BindingScope {
    imports: Vec<ImportBinding>,
    assignments: FxHashMap<String, PyExpr>,
}

impl BindingScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_import(&mut self, binding: ImportBinding) {
        self.assignments.remove(binding.bound_name());
        self.imports.push(binding);
    }

    pub fn record_assignment(&mut self, name: impl Into<String>, value: PyExpr) {
        let name = name.into();
        self.imports.retain(|binding| binding.bound_name() != name);
        self.assignments.insert(name, value);
    }

    /// Any other rebinding (`for name in ...`, `a, name = ...`, `def name`):
    /// the value is unknown from here on.
    pub fn forget(&mut self, name: &str) {
        self.assignments.remove(name);
        self.imports.retain(|binding| binding.bound_name() != name);
    }

    pub fn imports(&self) -> &[ImportBinding] {
        &self.imports
    }

    pub fn assignment(&self, name: &str) -> Option<&PyExpr> {
        self.assignments.get(name)
    }

    /// Most recent import binding `name`
    pub fn import_for(&self, name: &str) -> Option<&ImportBinding> {
        self.imports
            .iter()
            .rev()
            .find(|binding| binding.bound_name() == name)
    }

    /// Expand the first segment of a dotted path through the imports:
    /// with `from prefect.deployments import Deployment as D`,
    /// `D` → `prefect.deployments.Deployment`.
    pub fn qualify(&self, dotted: &str) -> Option<String> {
        let (head, rest) = match dotted.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (dotted, None),
        };
        let base = self.import_for(head)?.qualified_name();
        Some(match rest {
            Some(rest) => format!("{}.{}", base, rest),
            None => base,
        })
    }

    /// True when the script already imports exactly this name
    pub fn satisfies(&self, required: &RequiredImport) -> bool {
        self.import_for(&required.name)
            .map(|binding| required.is_satisfied_by(binding))
            .unwrap_or(false)
    }
}
