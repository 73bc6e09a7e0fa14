//! End-to-end migration of the fixture scripts
//!
//! Each `tests/fixtures/scripts/<case>/start.py` is migrated and compared with
//! the neighbouring `expected.py`.

#[path = "../common/mod.rs"]
mod common;

use std::path::Path;

use common::*;
use deploy_migrate::features::call_classifier::Advisory;
use deploy_migrate::{migrate_file, migrate_source, MigrationConfig, MigrationReport};
use pretty_assertions::assert_eq;

fn migrate_fixture(name: &str) -> MigrationReport {
    let (start, expected) = fixture_script(name);
    let outcome = migrate_source(
        &start,
        Path::new(SCRIPT_NAME),
        &fixture_catalog(),
        &MigrationConfig::default(),
    )
    .unwrap();
    let report = outcome.into_report().expect("fixture has a call to migrate");
    assert_eq!(report.updated_source, expected);
    report
}

fn advisory_kinds(report: &MigrationReport) -> Vec<&'static str> {
    report.calls[0]
        .advisories
        .iter()
        .map(|advisory| match advisory {
            Advisory::ServeMigration { .. } => "serve",
            Advisory::WorkPoolMigration => "work_pool",
            Advisory::ImageConfiguration { .. } => "image",
        })
        .collect()
}

#[test]
fn test_no_infra_no_storage() {
    let report = migrate_fixture("no_infra_no_storage");
    assert_eq!(advisory_kinds(&report), vec!["serve"]);
    assert!(report.required_imports.is_empty());
    assert!(report.advisories[0].contains("`friendly_flow.serve()`"));
    assert!(!report.updated_source.contains("from prefect.deployments import Deployment"));
}

#[test]
fn test_no_infra_storage() {
    let report = migrate_fixture("no_infra_storage");
    assert_eq!(advisory_kinds(&report), vec!["serve"]);
    assert!(report.required_imports.is_empty());
}

#[test]
fn test_infra_and_storage() {
    let report = migrate_fixture("infra_and_storage");
    assert_eq!(advisory_kinds(&report), vec!["work_pool"]);
    assert!(report.required_imports.is_empty());
}

#[test]
fn test_infra_var_and_storage_var() {
    let report = migrate_fixture("infra_var_and_storage_var");
    assert_eq!(advisory_kinds(&report), vec!["work_pool", "image"]);
    assert!(report.advisories[1].contains("my-image:latest"));
}

#[test]
fn test_infra_and_no_storage() {
    let report = migrate_fixture("infra_and_no_storage");
    assert_eq!(advisory_kinds(&report), vec!["work_pool"]);
}

#[test]
fn test_infra_slug_and_storage_slug() {
    let report = migrate_fixture("infra_slug_and_storage_slug");
    assert_eq!(advisory_kinds(&report), vec!["work_pool", "image"]);
    assert_eq!(
        report.required_imports,
        vec!["from prefect.blocks.core import Block".to_string()]
    );
}

#[test]
fn test_call_report_fields() {
    let report = migrate_fixture("no_infra_no_storage");
    let call = &report.calls[0];

    assert_eq!(call.index, 1);
    assert_eq!(call.line, 12);
    assert_eq!(call.deployment_name.as_deref(), Some("\"my-deployment\""));
    assert!(call.original_code.starts_with("Deployment.build_from_flow("));
    assert!(call.updated_code.starts_with("friendly_flow.serve("));
    assert_eq!(report.file_path, SCRIPT_NAME);
}

#[test]
fn test_migrate_file_reads_from_disk() {
    let path = scripts_dir().join("no_infra_no_storage/start.py");
    let (_, expected) = fixture_script("no_infra_no_storage");

    let outcome = migrate_file(&path, &fixture_catalog(), &MigrationConfig::default()).unwrap();
    let report = outcome.into_report().unwrap();
    assert_eq!(report.updated_source, expected);
    assert_eq!(report.file_path, path.display().to_string());
}

#[test]
fn test_report_json() {
    let report = migrate_fixture("infra_slug_and_storage_slug");
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(json["calls"][0]["advisories"][1]["kind"], "image_configuration");
    assert_eq!(json["calls"][0]["advisories"][1]["image"], "my-image:latest");
    assert_eq!(json["required_imports"][0], "from prefect.blocks.core import Block");
}
