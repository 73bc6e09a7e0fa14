//! Pipeline result types

use serde::Serialize;

use crate::errors::Result;
use crate::features::call_classifier::Advisory;
use crate::features::rewrite_engine::MigratedCall;

/// Result of migrating one script
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MigrationOutcome {
    /// No `Deployment.build_from_flow` call in the script
    NothingToMigrate,
    Migrated(MigrationReport),
}

impl MigrationOutcome {
    pub fn report(&self) -> Option<&MigrationReport> {
        match self {
            MigrationOutcome::Migrated(report) => Some(report),
            MigrationOutcome::NothingToMigrate => None,
        }
    }

    pub fn into_report(self) -> Option<MigrationReport> {
        match self {
            MigrationOutcome::Migrated(report) => Some(report),
            MigrationOutcome::NothingToMigrate => None,
        }
    }

    pub fn is_nothing_to_migrate(&self) -> bool {
        matches!(self, MigrationOutcome::NothingToMigrate)
    }
}

/// Side-by-side view of one rewritten call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallReport {
    /// 1-based position in discovery order
    pub index: usize,
    /// `name=` as written, if the call had one
    pub deployment_name: Option<String>,
    pub line: u32,
    pub original_code: String,
    pub updated_code: String,
    pub advisories: Vec<Advisory>,
}

impl CallReport {
    pub fn from_call(index: usize, call: &MigratedCall) -> Self {
        Self {
            index,
            deployment_name: call.classified().deployment_name(),
            line: call.span().start_line,
            original_code: call.original_text().to_string(),
            updated_code: call.replacement_text(),
            advisories: call.classified().advisories().to_vec(),
        }
    }

    /// `Deployment "my-deployment"` or `Deployment #2`
    pub fn heading(&self) -> String {
        match &self.deployment_name {
            Some(name) => format!("Deployment {}", name),
            None => format!("Deployment #{}", self.index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MigrationReport {
    pub file_path: String,
    pub calls: Vec<CallReport>,
    /// Every call's advisory text in discovery order, duplicates kept
    pub advisories: Vec<String>,
    /// `from ... import ...` lines the rewritten code needs
    pub required_imports: Vec<String>,
    pub updated_source: String,
}

impl MigrationReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
