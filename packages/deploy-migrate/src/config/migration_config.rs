//! MigrationConfig - settings for one migration run
//!
//! YAML schema v1:
//!
//! ```yaml
//! version: 1
//! default_image_prefixes: ["prefecthq/prefect"]
//! load_helper:
//!   module: prefect.blocks.core
//!   name: Block
//!   method: load
//! resolve_bound_references: true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use crate::shared::models::{Keyword, PyExpr, RequiredImport};

/// Schema versions this build understands
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

const DEFAULT_IMAGE_PREFIX: &str = "prefecthq/prefect";

/// Generic "load a block by slug" helper the rewritten code calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadHelper {
    /// Module the helper is imported from
    pub module: String,
    /// Class name imported from `module`
    pub name: String,
    /// Class method taking the slug
    pub method: String,
}

impl Default for LoadHelper {
    fn default() -> Self {
        Self {
            module: "prefect.blocks.core".to_string(),
            name: "Block".to_string(),
            method: "load".to_string(),
        }
    }
}

impl LoadHelper {
    /// `Block.load("<slug>")`
    pub fn load_call(&self, slug: &str) -> PyExpr {
        PyExpr::call(
            PyExpr::attribute(PyExpr::name(&self.name), &self.method),
            vec![PyExpr::string(slug)],
            Vec::<Keyword>::new(),
        )
    }

    pub fn required_import(&self) -> RequiredImport {
        RequiredImport::new(&self.module, &self.name)
    }
}

/// Validated migration settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MigrationConfig {
    pub version: u32,

    /// Images starting with one of these are what work pools use anyway,
    /// so no explicit `image=` argument is synthesized for them.
    pub default_image_prefixes: Vec<String>,

    pub load_helper: LoadHelper,

    /// Statically evaluate already-bound `infrastructure=` expressions
    /// (variables, `Cls.load("name")`, `Cls(image="...")`) to find an image.
    pub resolve_bound_references: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            version: 1,
            default_image_prefixes: vec![DEFAULT_IMAGE_PREFIX.to_string()],
            load_helper: LoadHelper::default(),
            resolve_bound_references: true,
        }
    }
}

/// On-disk representation; every field but `version` is optional
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFileV1 {
    version: Option<u32>,
    #[serde(default)]
    default_image_prefixes: Option<Vec<String>>,
    #[serde(default)]
    load_helper: Option<LoadHelper>,
    #[serde(default)]
    resolve_bound_references: Option<bool>,
}

impl MigrationConfig {
    /// Load and validate a YAML config file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(yaml)?;
        let version = file.version.ok_or(ConfigError::MissingVersion)?;

        let defaults = Self::default();
        let config = Self {
            version,
            default_image_prefixes: file
                .default_image_prefixes
                .unwrap_or(defaults.default_image_prefixes),
            load_helper: file.load_helper.unwrap_or(defaults.load_helper),
            resolve_bound_references: file
                .resolve_bound_references
                .unwrap_or(defaults.resolve_bound_references),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !SUPPORTED_VERSIONS.contains(&self.version) {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        if self.default_image_prefixes.is_empty() {
            return Err(ConfigError::invalid_field(
                "default_image_prefixes",
                "at least one prefix is required",
            ));
        }
        if self.default_image_prefixes.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::invalid_field(
                "default_image_prefixes",
                "prefixes must not be blank",
            ));
        }

        for (field, value) in [
            ("load_helper.module", &self.load_helper.module),
            ("load_helper.name", &self.load_helper.name),
            ("load_helper.method", &self.load_helper.method),
        ] {
            if !is_dotted_identifier(value) {
                return Err(ConfigError::invalid_field(
                    field,
                    format!("'{}' is not a Python identifier path", value),
                ));
            }
        }
        if self.load_helper.name.contains('.') || self.load_helper.method.contains('.') {
            return Err(ConfigError::invalid_field(
                "load_helper",
                "name and method must be plain identifiers",
            ));
        }

        Ok(())
    }

    /// True when `image` is one work pools already default to
    pub fn is_default_image(&self, image: &str) -> bool {
        self.default_image_prefixes
            .iter()
            .any(|prefix| image.starts_with(prefix.as_str()))
    }
}

fn is_dotted_identifier(value: &str) -> bool {
    !value.is_empty()
        && value.split('.').all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c == '_' || c.is_alphabetic())
                && chars.all(|c| c == '_' || c.is_alphanumeric())
        })
}
