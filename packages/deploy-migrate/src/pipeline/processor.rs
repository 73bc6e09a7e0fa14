//! Script migration entry points
//!
//! parse → rewrite traversal → splice → report

use std::path::Path;

use tracing::{info, warn};

use super::result::{CallReport, MigrationOutcome, MigrationReport};
use crate::config::MigrationConfig;
use crate::errors::Result;
use crate::features::block_resolution::BlockResolver;
use crate::features::parsing::{PythonParser, SourceParser};
use crate::features::rewrite_engine::{apply_rewrites, RewriteEngine};

/// Migrate script text. `file_path` names the script in entrypoints and errors.
pub fn migrate_source(
    source: &str,
    file_path: &Path,
    resolver: &dyn BlockResolver,
    config: &MigrationConfig,
) -> Result<MigrationOutcome> {
    config.validate()?;

    let module = PythonParser::new().parse(source, file_path)?;
    let outcome = RewriteEngine::new(resolver, config).run(&module)?;

    if outcome.is_empty() {
        info!(file = %file_path.display(), "nothing to migrate");
        return Ok(MigrationOutcome::NothingToMigrate);
    }

    let updated_source = apply_rewrites(&module, &outcome);
    if PythonParser::new().parse(&updated_source, file_path).is_err() {
        warn!(file = %file_path.display(), "rewritten script does not parse");
    }

    let calls = outcome
        .calls()
        .iter()
        .enumerate()
        .map(|(index, call)| CallReport::from_call(index + 1, call))
        .collect();

    let report = MigrationReport {
        file_path: file_path.display().to_string(),
        calls,
        advisories: outcome
            .advisories()
            .iter()
            .map(ToString::to_string)
            .collect(),
        required_imports: outcome
            .required_imports()
            .iter()
            .map(ToString::to_string)
            .collect(),
        updated_source,
    };

    info!(
        file = %report.file_path,
        calls = report.calls.len(),
        imports = report.required_imports.len(),
        "migrated script"
    );
    Ok(MigrationOutcome::Migrated(report))
}

/// Read a script from disk and migrate it
pub fn migrate_file(
    path: impl AsRef<Path>,
    resolver: &dyn BlockResolver,
    config: &MigrationConfig,
) -> Result<MigrationOutcome> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    migrate_source(&source, path, resolver, config)
}
