//! Rewrite engine edge cases: imports, nesting, failures

#[path = "../common/mod.rs"]
mod common;

use std::path::Path;

use common::*;
use deploy_migrate::shared::models::{BindingScope, PyExpr, ReferenceRole};
use deploy_migrate::{
    migrate_source, BlockDocument, BlockResolver, BoundResolution, MigrateError,
    MigrationConfig, MigrationOutcome, PythonParser, RewriteEngine, SourceParser,
};
use pretty_assertions::assert_eq;

fn migrate(source: &str) -> Result<MigrationOutcome, MigrateError> {
    migrate_source(
        source,
        Path::new(SCRIPT_NAME),
        &fixture_catalog(),
        &MigrationConfig::default(),
    )
}

fn updated(source: &str) -> String {
    migrate(source)
        .unwrap()
        .into_report()
        .expect("script has a call to migrate")
        .updated_source
}

#[test]
fn test_zero_calls_is_nothing_to_migrate() {
    let outcome = migrate("from prefect import flow\n\n@flow\ndef f():\n    pass\n").unwrap();
    assert_eq!(outcome, MigrationOutcome::NothingToMigrate);
}

#[test]
fn test_aliased_import() {
    let source = "from prefect.deployments import Deployment as D\n\nD.build_from_flow(f, name=\"d\")\n";
    assert_eq!(updated(source), "\nf.serve(name=\"d\")\n");
}

#[test]
fn test_module_qualified_receiver() {
    let source = "import prefect.deployments\n\nprefect.deployments.Deployment.build_from_flow(f)\n";
    assert_eq!(updated(source), "import prefect.deployments\n\nf.serve()\n");
}

#[test]
fn test_unrelated_deployment_class_untouched() {
    let source = "from myapp.models import Deployment\n\nDeployment.build_from_flow(f)\n";
    assert!(migrate(source).unwrap().is_nothing_to_migrate());
}

#[test]
fn test_nested_comprehension() {
    let source = "deployments = [Deployment.build_from_flow(f, name=f.name) for f in flows]\n";
    assert_eq!(
        updated(source),
        "deployments = [f.serve(name=f.name) for f in flows]\n"
    );
}

#[test]
fn test_call_inside_other_call_arguments() {
    let source = "results.append(Deployment.build_from_flow(f))\n";
    assert_eq!(updated(source), "results.append(f.serve())\n");
}

#[test]
fn test_multiple_calls_keep_discovery_order() {
    let source = "\
a = Deployment.build_from_flow(first, infrastructure=\"kubernetes-job/my-job\")
b = Deployment.build_from_flow(second)
c = Deployment.build_from_flow(third, storage=\"github/my-repo\")
";
    let report = migrate(source).unwrap().into_report().unwrap();
    let lines: Vec<u32> = report.calls.iter().map(|call| call.line).collect();
    assert_eq!(lines, vec![1, 2, 3]);
    assert_eq!(report.advisories.len(), 4);
    assert_eq!(
        report.required_imports,
        vec!["from prefect.blocks.core import Block".to_string()]
    );
    assert!(report
        .updated_source
        .starts_with("from prefect.blocks.core import Block\na = first.deploy(image=\"my-image:latest\")\n"));
}

#[test]
fn test_duplicate_advisories_kept() {
    let source = "Deployment.build_from_flow(f)\nDeployment.build_from_flow(f)\n";
    let report = migrate(source).unwrap().into_report().unwrap();
    assert_eq!(report.advisories.len(), 2);
    assert_eq!(report.advisories[0], report.advisories[1]);
}

#[test]
fn test_existing_block_import_not_duplicated() {
    let source = "from prefect.blocks.core import Block\n\nDeployment.build_from_flow(f, storage=\"github/my-repo\")\n";
    assert_eq!(
        updated(source),
        "from prefect.blocks.core import Block\n\nf.from_source(source=Block.load(\"github/my-repo\"), entrypoint=\"my_flows.py:f\").serve()\n"
    );
}

#[test]
fn test_import_goes_after_docstring_and_future_imports() {
    let source = "\"\"\"Deploy.\"\"\"\nfrom __future__ import annotations\nDeployment.build_from_flow(f, infrastructure=\"kubernetes-job/my-job-no-image\")\n";
    assert_eq!(
        updated(source),
        "\"\"\"Deploy.\"\"\"\nfrom __future__ import annotations\nfrom prefect.blocks.core import Block\nf.deploy()\n"
    );
}

#[test]
fn test_missing_flow_aborts_with_location() {
    let source = "x = 1\n\nDeployment.build_from_flow(name=\"d\")\n";
    let err = migrate(source).unwrap_err();
    match err {
        MigrateError::MalformedCall { file, line, column, .. } => {
            assert_eq!(file, SCRIPT_NAME);
            assert_eq!((line, column), (3, 0));
        }
        other => panic!("expected MalformedCall, got {other:?}"),
    }
}

#[test]
fn test_unknown_infrastructure_slug_aborts() {
    let source = "Deployment.build_from_flow(f, infrastructure=\"kubernetes-job/nope\")\n";
    let err = migrate(source).unwrap_err();
    match err {
        MigrateError::UnresolvableIdentifier { identifier, role, .. } => {
            assert_eq!(identifier, "kubernetes-job/nope");
            assert_eq!(role, ReferenceRole::ExecutionEnvironment);
        }
        other => panic!("expected UnresolvableIdentifier, got {other:?}"),
    }
}

#[test]
fn test_syntax_error_is_parse_error() {
    let err = migrate("Deployment.build_from_flow(f,\n").unwrap_err();
    assert!(matches!(err, MigrateError::Parse { .. }));
}

#[test]
fn test_unresolvable_bound_infrastructure_is_not_fatal() {
    let source = "Deployment.build_from_flow(f, infrastructure=make_infra())\n";
    assert_eq!(updated(source), "f.deploy()\n");
}

#[test]
fn test_bound_resolution_can_be_disabled() {
    let source = "\
from prefect.infrastructure import KubernetesJob
Deployment.build_from_flow(f, infrastructure=KubernetesJob.load(\"my-job\"))
";
    let config = MigrationConfig {
        resolve_bound_references: false,
        ..MigrationConfig::default()
    };
    let module = PythonParser::new().parse(source, Path::new(SCRIPT_NAME)).unwrap();
    let catalog = fixture_catalog();
    let outcome = RewriteEngine::new(&catalog, &config).run(&module).unwrap();

    assert_eq!(
        outcome.calls()[0].replacement_text(),
        "f.deploy()"
    );
}

#[test]
fn test_fixture_builder_source_migrates() {
    let source = fixture_build_from_flow("f", &[("tags", "[\"a\"]"), ("name", "\"d\"")]);
    assert!(updated(&source).ends_with("f.serve(name=\"d\", tags=[\"a\"])\n"));
}

#[test]
fn test_import_goes_after_shebang_and_coding_line() {
    let source = "#!/usr/bin/env python\n# -*- coding: utf-8 -*-\nDeployment.build_from_flow(f, storage=\"github/my-repo\")\n";
    assert_eq!(
        updated(source),
        "#!/usr/bin/env python\n# -*- coding: utf-8 -*-\nfrom prefect.blocks.core import Block\nf.from_source(source=Block.load(\"github/my-repo\"), entrypoint=\"my_flows.py:f\").serve()\n"
    );
}

#[test]
fn test_bound_generic_block_load_resolves_image() {
    let source = "\
from prefect.blocks.core import Block
infra = Block.load(\"kubernetes-job/my-job\")
Deployment.build_from_flow(f, infrastructure=infra)
";
    let report = migrate(source).unwrap().into_report().unwrap();
    assert!(report
        .updated_source
        .ends_with("f.deploy(image=\"my-image:latest\")\n"));
    assert_eq!(report.calls[0].advisories.len(), 2);
    assert!(report.required_imports.is_empty());
}

#[test]
fn test_unknown_raw_string_slug_aborts() {
    let source = "Deployment.build_from_flow(f, storage=r\"github/does-not-exist\")\n";
    let err = migrate(source).unwrap_err();
    match err {
        MigrateError::UnresolvableIdentifier { identifier, role, .. } => {
            assert_eq!(identifier, "github/does-not-exist");
            assert_eq!(role, ReferenceRole::RemoteSource);
        }
        other => panic!("expected UnresolvableIdentifier, got {other:?}"),
    }
}

#[test]
fn test_raw_string_slug_is_loaded() {
    let source = "Deployment.build_from_flow(f, storage=r\"github/my-repo\")\n";
    assert_eq!(
        updated(source),
        "from prefect.blocks.core import Block\nf.from_source(source=Block.load(\"github/my-repo\"), entrypoint=\"my_flows.py:f\").serve()\n"
    );
}

#[test]
fn test_unpacking_rebinding_drops_stale_infrastructure() {
    let source = "\
from prefect.infrastructure import KubernetesJob
infra = KubernetesJob.load(\"my-job\")
infra, replicas = make_infra()
Deployment.build_from_flow(f, infrastructure=infra)
";
    assert!(updated(source).ends_with("f.deploy()\n"));
}

/// Store that is reachable at construction time but fails every lookup
struct OfflineStore;

impl BlockResolver for OfflineStore {
    fn load(&self, slug: &str) -> deploy_migrate::Result<Option<BlockDocument>> {
        Err(MigrateError::resolver(format!("block store offline while loading {slug}")))
    }

    fn resolve_bound(&self, _expr: &PyExpr, _scope: &BindingScope) -> BoundResolution {
        BoundResolution::NotResolvable
    }
}

#[test]
fn test_block_store_failure_aborts() {
    let source = "Deployment.build_from_flow(f, storage=\"github/my-repo\")\n";
    let err = migrate_source(
        source,
        Path::new(SCRIPT_NAME),
        &OfflineStore,
        &MigrationConfig::default(),
    )
    .unwrap_err();
    match err {
        MigrateError::Resolver(message) => assert!(message.contains("github/my-repo")),
        other => panic!("expected Resolver error, got {other:?}"),
    }
}

#[test]
fn test_block_store_not_consulted_without_slugs() {
    let outcome = migrate_source(
        "Deployment.build_from_flow(f, infrastructure=infra)\n",
        Path::new(SCRIPT_NAME),
        &OfflineStore,
        &MigrationConfig::default(),
    )
    .unwrap();
    assert_eq!(outcome.into_report().unwrap().updated_source, "f.deploy()\n");
}
