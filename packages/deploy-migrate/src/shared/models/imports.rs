//! Import bookkeeping
//!
//! `ImportBinding` is what a script already imports; `RequiredImport` is what
//! the rewritten code needs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One name bound by a module-level import statement
///
/// - `import a.b`            → module `a.b`, binds `a`
/// - `import a.b as x`       → module `a.b`, binds `x`
/// - `from m import n as x`  → module `m`, name `n`, binds `x`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportBinding {
    pub module: String,
    pub name: Option<String>,
    pub alias: Option<String>,
}

impl ImportBinding {
    /// `import <module> [as <alias>]`
    pub fn module(module: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            module: module.into(),
            name: None,
            alias,
        }
    }

    /// `from <module> import <name> [as <alias>]`
    pub fn from_module(
        module: impl Into<String>,
        name: impl Into<String>,
        alias: Option<String>,
    ) -> Self {
        Self {
            module: module.into(),
            name: Some(name.into()),
            alias,
        }
    }

    /// Identifier this import introduces into the module namespace
    pub fn bound_name(&self) -> &str {
        if let Some(alias) = &self.alias {
            return alias;
        }
        match &self.name {
            Some(name) => name,
            None => self.module.split('.').next().unwrap_or(&self.module),
        }
    }

    /// Fully qualified path the bound name refers to
    pub fn qualified_name(&self) -> String {
        match (&self.name, &self.alias) {
            (Some(name), _) => format!("{}.{}", self.module, name),
            (None, Some(_)) => self.module.clone(),
            (None, None) => self.bound_name().to_string(),
        }
    }
}

/// Import declaration the rewritten code depends on
///
/// Ordered and deduplicated by module + name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequiredImport {
    pub module: String,
    pub name: String,
}

impl RequiredImport {
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }

    /// True when `binding` already brings this name into scope unaliased
    pub fn is_satisfied_by(&self, binding: &ImportBinding) -> bool {
        binding.module == self.module
            && binding.name.as_deref() == Some(self.name.as_str())
            && binding.bound_name() == self.name
    }
}

impl fmt::Display for RequiredImport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "from {} import {}", self.module, self.name)
    }
}
