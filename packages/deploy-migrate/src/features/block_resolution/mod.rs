//! Block Resolution Feature
//!
//! The injected capability that turns block references into stored
//! configuration. Everything here is read-only: looking up a block never
//! changes it, and nothing in a script is ever executed.
//!
//! ## Structure
//! - `domain/` - BlockDocument, BoundResolution
//! - `ports/` - BlockResolver trait
//! - `infrastructure/` - StaticBlockCatalog, block type slugs

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{image_of, BlockDocument, BoundResolution};
pub use infrastructure::{block_type_slug, StaticBlockCatalog};
pub use ports::BlockResolver;
