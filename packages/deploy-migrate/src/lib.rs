/*
 * deploy-migrate - Deployment API migration engine
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (Span, PyExpr, imports)
 * - features/    : Vertical slices (parsing → block resolution → classifier → rewrite engine)
 * - pipeline/    : Source-in, report-out orchestration
 * - config/      : Versioned YAML configuration
 *
 * Scans a Python script for `Deployment.build_from_flow(...)` calls and rewrites
 * each one into `flow.serve(...)` or `flow.from_source(...).deploy(...)`, plus the
 * imports and migration notes the rewritten code needs.
 */

#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::upper_case_acronyms)]

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::MigrationConfig;
pub use errors::{MigrateError, Result};
pub use features::block_resolution::{
    BlockDocument, BlockResolver, BoundResolution, StaticBlockCatalog,
};
pub use features::call_classifier::{Advisory, ClassifiedCall};
pub use features::parsing::{ParsedModule, PythonParser, SourceParser};
pub use features::rewrite_engine::{MigratedCall, RewriteEngine, RewriteOutcome};
pub use pipeline::{migrate_file, migrate_source, CallReport, MigrationOutcome, MigrationReport};
pub use shared::models::{PyExpr, PyExprKind, RequiredImport, Span};
