//! Call classifier domain models

mod advisory;
mod passthrough;
mod references;

pub use advisory::Advisory;
pub use passthrough::{PassthroughFields, PassthroughKey, INFRA_OVERRIDES, INTERNAL_KEYWORDS};
pub use references::{BlockReference, Entrypoint, EntrypointSource, ExecutionEnvironment};
