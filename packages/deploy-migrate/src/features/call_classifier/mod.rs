//! Call Classifier Feature
//!
//! Partitions one `Deployment.build_from_flow(...)` call into roles (flow,
//! storage, infrastructure, entrypoint, pass-through fields) and synthesizes
//! its `.serve()` / `.from_source().deploy()` replacement.
//!
//! ## Decision table
//!
//! | infrastructure | non-default image | replacement | advisories |
//! |---|---|---|---|
//! | no  | n/a | `.serve(...)`  | serve note |
//! | yes | no  | `.deploy(...)` | work pool note |
//! | yes | yes | `.deploy(..., image=...)` | work pool note, image note |
//!
//! ## Structure
//! - `domain/` - PassthroughKey, BlockReference, Advisory
//! - `application/` - ClassifiedCall

pub mod application;
pub mod domain;

pub use application::{CallSite, ClassifiedCall, ClassifyContext};
pub use domain::{
    Advisory, BlockReference, Entrypoint, EntrypointSource, ExecutionEnvironment,
    PassthroughFields, PassthroughKey,
};
