//! Block resolution infrastructure

mod block_types;
mod static_catalog;

pub use block_types::block_type_slug;
pub use static_catalog::StaticBlockCatalog;
