//! Test fixtures

use std::path::{Path, PathBuf};

use deploy_migrate::{BlockDocument, StaticBlockCatalog};
use serde_json::{json, Value};

/// File name every fixture script is migrated as
pub const SCRIPT_NAME: &str = "my_flows.py";

fn document(value: Value) -> BlockDocument {
    value.as_object().cloned().unwrap_or_default()
}

/// Blocks the fixture scripts refer to
pub fn fixture_catalog() -> StaticBlockCatalog {
    StaticBlockCatalog::new()
        .with_block(
            "github/my-repo",
            document(json!({"repository": "https://github.com/acme/flows", "reference": "main"})),
        )
        .with_block(
            "kubernetes-job/my-job",
            document(json!({"image": "my-image:latest", "namespace": "default"})),
        )
        .with_block(
            "kubernetes-job/my-job-default-image",
            document(json!({"image": "prefecthq/prefect:2-latest"})),
        )
        .with_block("kubernetes-job/my-job-no-image", document(json!({"image": null})))
}

pub fn scripts_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/scripts")
}

/// (start.py, expected.py) for a fixture directory
pub fn fixture_script(name: &str) -> (String, String) {
    let dir = scripts_dir().join(name);
    let read = |file: &str| {
        std::fs::read_to_string(dir.join(file))
            .unwrap_or_else(|e| panic!("missing fixture {}/{}: {}", name, file, e))
    };
    (read("start.py"), read("expected.py"))
}

/// `Deployment.build_from_flow(<flow>, <keywords>)` preceded by the usual import
pub fn fixture_build_from_flow(flow: &str, keywords: &[(&str, &str)]) -> String {
    let mut args = vec![flow.to_string()];
    args.extend(keywords.iter().map(|(key, value)| format!("{key}={value}")));
    format!(
        "from prefect.deployments import Deployment\n\nDeployment.build_from_flow({})\n",
        args.join(", ")
    )
}
