//! Parser port (interface)
//!
//! Defines the contract for parsing a script into a syntax tree.

use std::path::Path;

use crate::errors::Result;
use crate::features::parsing::domain::ParsedModule;

/// Parser trait - abstraction over the parsing front end
pub trait SourceParser: Send + Sync {
    /// Parse source code into a ParsedModule.
    /// A script with syntax errors is an error, never a partial tree.
    fn parse(&self, source: &str, file_path: &Path) -> Result<ParsedModule>;
}
