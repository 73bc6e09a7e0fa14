//! Resolver port (interface)

use crate::errors::Result;
use crate::features::block_resolution::domain::{BlockDocument, BoundResolution};
use crate::shared::models::{BindingScope, PyExpr};

/// Looks up stored block configuration.
///
/// Implementations are reads of already-persisted state: calling them twice
/// with the same input must give the same answer.
pub trait BlockResolver {
    /// Document stored under `slug` (`"<block-type>/<name>"`).
    ///
    /// `Ok(None)` means no such block; `Err` means the store itself failed.
    fn load(&self, slug: &str) -> Result<Option<BlockDocument>>;

    /// Document an already-bound expression (`infra`, `KubernetesJob.load("x")`, ...)
    /// would evaluate to, using only what the script's module scope shows.
    fn resolve_bound(&self, _expr: &PyExpr, _scope: &BindingScope) -> BoundResolution {
        BoundResolution::NotResolvable
    }
}
