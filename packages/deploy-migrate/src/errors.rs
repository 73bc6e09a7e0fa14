//! Error types for deploy-migrate
//!
//! Every failure here aborts the run: a half-migrated script is worse than none.

use thiserror::Error;

use crate::config::ConfigError;
use crate::shared::models::ReferenceRole;

/// Main error type for migration operations
#[derive(Debug, Error)]
pub enum MigrateError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Script could not be parsed
    #[error("Parse error in {file}: {message}")]
    Parse { file: String, message: String },

    /// Deprecated call without a flow to deploy
    #[error("Malformed build_from_flow call at {file}:{line}:{column}: {reason}")]
    MalformedCall {
        file: String,
        line: u32,
        column: u32,
        reason: String,
    },

    /// Block slug the resolver does not know
    #[error("Unresolvable {role} identifier '{identifier}' at {file}:{line}")]
    UnresolvableIdentifier {
        identifier: String,
        role: ReferenceRole,
        file: String,
        line: u32,
    },

    /// Block store failure
    #[error("Block resolver error: {0}")]
    Resolver(String),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Report serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MigrateError {
    /// Create a parse error
    pub fn parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        MigrateError::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a resolver error
    pub fn resolver(message: impl Into<String>) -> Self {
        MigrateError::Resolver(message.into())
    }
}

/// Result type alias for migration operations
pub type Result<T> = std::result::Result<T, MigrateError>;
