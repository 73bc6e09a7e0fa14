//! Migration Configuration
//!
//! Two ways to configure a run:
//! - `MigrationConfig::default()` - what almost everyone wants
//! - YAML (`version: 1`) - team-wide overrides checked into a repo
//!
//! # Examples
//!
//! ```rust,ignore
//! use deploy_migrate::config::MigrationConfig;
//!
//! let config = MigrationConfig::default();
//! let config = MigrationConfig::from_yaml("migrate.yaml")?;
//! ```

pub mod error;
pub mod migration_config;

pub use error::{ConfigError, ConfigResult};
pub use migration_config::{LoadHelper, MigrationConfig, SUPPORTED_VERSIONS};
