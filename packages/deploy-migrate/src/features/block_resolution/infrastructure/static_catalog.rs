//! In-memory block catalog
//!
//! Holds block documents keyed by `"<block-type>/<name>"` slug, loaded from a
//! YAML/JSON export or built in code:
//!
//! ```yaml
//! blocks:
//!   kubernetes-job/my-job:
//!     image: my-image:latest
//!   github/my-repo:
//!     repository: https://github.com/acme/flows
//! ```
//!
//! Already-bound references are evaluated statically; nothing is executed.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::block_types::block_type_slug;
use crate::config::{ConfigError, ConfigResult, LoadHelper};
use crate::errors::Result;
use crate::features::block_resolution::domain::{BlockDocument, BoundResolution};
use crate::features::block_resolution::ports::BlockResolver;
use crate::shared::models::{BindingScope, PyExpr, PyExprKind};

/// How many variable hops a bound reference may take (`a = b`, `b = ...`)
const MAX_BINDING_DEPTH: usize = 8;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    blocks: BTreeMap<String, BlockDocument>,
}

/// Block catalog backed by a map
#[derive(Debug, Clone, Default)]
pub struct StaticBlockCatalog {
    blocks: BTreeMap<String, BlockDocument>,
    /// `Block.load("<type>/<name>")` takes a full slug rather than a block name
    load_helper: LoadHelper,
}

impl StaticBlockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with_block(mut self, slug: impl Into<String>, document: BlockDocument) -> Self {
        self.insert(slug, document);
        self
    }

    /// Helper whose `.load()` argument is already a full slug
    pub fn with_load_helper(mut self, load_helper: LoadHelper) -> Self {
        self.load_helper = load_helper;
        self
    }

    pub fn insert(&mut self, slug: impl Into<String>, document: BlockDocument) {
        self.blocks.insert(slug.into(), document);
    }

    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::from_file(file)
    }

    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    /// Load a catalog file; `.json` is read as JSON, anything else as YAML
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    fn from_file(file: CatalogFile) -> ConfigResult<Self> {
        for slug in file.blocks.keys() {
            let well_formed = matches!(
                slug.split_once('/'),
                Some((block_type, name)) if !block_type.is_empty() && !name.is_empty()
            );
            if !well_formed {
                return Err(ConfigError::invalid_field(
                    format!("blocks.{}", slug),
                    "block slugs look like '<block-type>/<name>'",
                ));
            }
        }
        Ok(Self {
            blocks: file.blocks,
            ..Self::default()
        })
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// `Block` imported from the helper's module, or used bare without an import
    fn is_load_helper(&self, path: &str, qualified: Option<&str>) -> bool {
        match qualified {
            Some(qualified) => {
                qualified == format!("{}.{}", self.load_helper.module, self.load_helper.name)
            }
            None => path == self.load_helper.name,
        }
    }

    fn evaluate(&self, expr: &PyExpr, scope: &BindingScope, depth: usize) -> BoundResolution {
        match &expr.kind {
            PyExprKind::Name(name) => {
                if depth >= MAX_BINDING_DEPTH {
                    debug!(name = %name, "binding chain too deep, giving up");
                    return BoundResolution::NotResolvable;
                }
                match scope.assignment(name) {
                    Some(value) => self.evaluate(value, scope, depth + 1),
                    None => BoundResolution::NotResolvable,
                }
            }
            PyExprKind::Call {
                func,
                args,
                keywords,
            } => match &func.kind {
                // KubernetesJob.load("my-job") or Block.load("kubernetes-job/my-job")
                PyExprKind::Attribute { value, attr }
                    if attr == "load" || *attr == self.load_helper.method =>
                {
                    let block_name = args
                        .first()
                        .or_else(|| expr.keyword("name"))
                        .and_then(PyExpr::as_str_literal);
                    let (Some(path), Some(block_name)) = (value.dotted_path(), block_name) else {
                        return BoundResolution::NotResolvable;
                    };
                    let qualified = scope.qualify(&path);
                    let slug = if *attr == self.load_helper.method
                        && self.is_load_helper(&path, qualified.as_deref())
                    {
                        block_name.to_string()
                    } else if attr == "load" {
                        let class_path = qualified.as_deref().unwrap_or(&path);
                        format!("{}/{}", block_type_slug(class_path), block_name)
                    } else {
                        return BoundResolution::NotResolvable;
                    };
                    match self.blocks.get(&slug) {
                        Some(document) => BoundResolution::Resolved(document.clone()),
                        None => {
                            debug!(slug = %slug, "bound block not in catalog");
                            BoundResolution::NotResolvable
                        }
                    }
                }
                // KubernetesJob(image="my-image:latest")
                PyExprKind::Name(_) | PyExprKind::Attribute { .. }
                    if func
                        .terminal_name()
                        .map_or(false, |name| name.starts_with(char::is_uppercase)) =>
                {
                    let mut document = BlockDocument::new();
                    for keyword in keywords {
                        let Some(arg) = &keyword.arg else { continue };
                        if let Some(value) = literal_value(&keyword.value) {
                            document.insert(arg.clone(), value);
                        }
                    }
                    BoundResolution::Resolved(document)
                }
                _ => BoundResolution::NotResolvable,
            },
            _ => BoundResolution::NotResolvable,
        }
    }
}

/// JSON value of a literal constant expression
fn literal_value(expr: &PyExpr) -> Option<Value> {
    match &expr.kind {
        PyExprKind::Str { value, .. } => Some(Value::String(value.clone())),
        PyExprKind::Verbatim { text, .. } => match text.as_str() {
            "True" => Some(Value::Bool(true)),
            "False" => Some(Value::Bool(false)),
            "None" => Some(Value::Null),
            other => other.parse::<i64>().ok().map(Value::from),
        },
        _ => None,
    }
}

impl BlockResolver for StaticBlockCatalog {
    fn load(&self, slug: &str) -> Result<Option<BlockDocument>> {
        Ok(self.blocks.get(slug).cloned())
    }

    fn resolve_bound(&self, expr: &PyExpr, scope: &BindingScope) -> BoundResolution {
        self.evaluate(expr, scope, 0)
    }
}
