//! Pipeline orchestration

pub mod processor;
pub mod result;

pub use processor::{migrate_file, migrate_source};
pub use result::{CallReport, MigrationOutcome, MigrationReport};
