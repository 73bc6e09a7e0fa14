//! Block resolution ports

mod resolver;

pub use resolver::BlockResolver;
