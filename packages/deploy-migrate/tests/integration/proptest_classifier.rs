//! Property-based tests for call classification
//!
//! Keyword order, allow-list filtering, serve/deploy key sets, entrypoint
//! precedence and default-image suppression over generated calls.

#[path = "../common/mod.rs"]
mod common;

use std::path::Path;

use common::*;
use deploy_migrate::features::call_classifier::PassthroughKey;
use deploy_migrate::{
    BlockDocument, MigrationConfig, PyExpr, PyExprKind, PythonParser, RewriteEngine,
    RewriteOutcome, SourceParser, StaticBlockCatalog,
};
use proptest::prelude::*;
use serde_json::json;

const PYTHON_KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
    "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield", "print",
    "exec", "match", "case", "type",
];

const HANDLED_KEYWORDS: &[&str] = &[
    "flow",
    "storage",
    "infrastructure",
    "entrypoint",
    "path",
    "infra_overrides",
];

fn run_with(source: &str, catalog: &StaticBlockCatalog) -> RewriteOutcome {
    let module = PythonParser::new()
        .parse(source, Path::new(SCRIPT_NAME))
        .unwrap();
    RewriteEngine::new(catalog, &MigrationConfig::default())
        .run(&module)
        .unwrap()
}

fn run(source: &str) -> RewriteOutcome {
    run_with(source, &fixture_catalog())
}

/// Keyword names of the outermost `.serve()` / `.deploy()` call
fn final_keywords(expr: &PyExpr) -> (String, Vec<String>) {
    let PyExprKind::Call { func, keywords, .. } = &expr.kind else {
        panic!("replacement is not a call: {expr:?}");
    };
    let method = func.terminal_name().unwrap_or_default().to_string();
    let names = keywords.iter().filter_map(|kw| kw.arg.clone()).collect();
    (method, names)
}

fn call_source(keywords: &[String]) -> String {
    let args: Vec<String> = std::iter::once("my_flow".to_string())
        .chain(
            keywords
                .iter()
                .enumerate()
                .map(|(i, key)| format!("{key}={i}")),
        )
        .collect();
    format!("Deployment.build_from_flow({})\n", args.join(", "))
}

// Strategy for a shuffled subset of the allow-list
fn allow_listed_keys() -> impl Strategy<Value = Vec<PassthroughKey>> {
    prop::sample::subsequence(PassthroughKey::ALL.to_vec(), 0..=PassthroughKey::ALL.len())
        .prop_shuffle()
}

// Strategy for keyword names outside the allow-list
fn unknown_keyword() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{2,12}".prop_filter("not a handled or reserved keyword", |name| {
        PassthroughKey::from_keyword(name).is_none()
            && !HANDLED_KEYWORDS.contains(&name.as_str())
            && !PYTHON_KEYWORDS.contains(&name.as_str())
    })
}

fn literal() -> impl Strategy<Value = String> {
    "[a-z_./:]{1,12}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_keywords_follow_canonical_order(keys in allow_listed_keys(), deploy in any::<bool>()) {
        let mut keywords: Vec<String> = keys.iter().map(|key| key.as_str().to_string()).collect();
        if deploy {
            keywords.push("infrastructure".to_string());
        }
        let outcome = run(&call_source(&keywords));
        let (_, names) = final_keywords(outcome.calls()[0].replacement());

        let positions: Vec<usize> = names
            .iter()
            .map(|name| {
                PassthroughKey::ALL
                    .iter()
                    .position(|key| key.as_str() == name)
                    .unwrap()
            })
            .collect();
        prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn prop_unknown_keywords_never_survive(
        unknown in prop::collection::hash_set(unknown_keyword(), 1..6),
        keys in allow_listed_keys(),
    ) {
        let mut keywords: Vec<String> = unknown.iter().cloned().collect();
        keywords.extend(keys.iter().map(|key| key.as_str().to_string()));
        let outcome = run(&call_source(&keywords));
        let (_, names) = final_keywords(outcome.calls()[0].replacement());

        for name in &names {
            prop_assert!(!unknown.contains(name), "{} leaked into {:?}", name, names);
        }
    }

    #[test]
    fn prop_serve_never_gets_deploy_only_keys(keys in allow_listed_keys(), deploy in any::<bool>()) {
        let mut keywords: Vec<String> = keys.iter().map(|key| key.as_str().to_string()).collect();
        if deploy {
            keywords.push("infrastructure".to_string());
        }
        let outcome = run(&call_source(&keywords));
        let (method, names) = final_keywords(outcome.calls()[0].replacement());

        if deploy {
            prop_assert_eq!(method, "deploy");
            prop_assert_eq!(names.len(), keys.len());
        } else {
            prop_assert_eq!(method, "serve");
            for name in &names {
                let key = PassthroughKey::from_keyword(name).unwrap();
                prop_assert!(!key.is_deploy_only(), "{} in a serve call", name);
            }
        }
    }

    #[test]
    fn prop_entrypoint_precedence(
        entrypoint in prop::option::of(literal()),
        prefix in prop::option::of(literal()),
    ) {
        let mut args = vec!["my_flow".to_string(), "storage=storage".to_string()];
        if let Some(entrypoint) = &entrypoint {
            args.push(format!("entrypoint=\"{entrypoint}\""));
        }
        if let Some(prefix) = &prefix {
            args.push(format!("path=\"{prefix}\""));
        }
        let source = format!("Deployment.build_from_flow({})\n", args.join(", "));
        let outcome = run(&source);
        let resolved = outcome.calls()[0]
            .classified()
            .entrypoint()
            .value
            .as_str_literal()
            .map(str::to_string);

        let expected = match (&entrypoint, &prefix) {
            (Some(entrypoint), Some(prefix)) => {
                Path::new(prefix).join(entrypoint).to_string_lossy().into_owned()
            }
            (Some(entrypoint), None) => entrypoint.clone(),
            (None, _) => format!("{SCRIPT_NAME}:my_flow"),
        };
        prop_assert_eq!(resolved, Some(expected));
    }

    #[test]
    fn prop_default_images_are_suppressed(
        image in prop_oneof![
            "prefecthq/prefect:[a-z0-9.-]{1,8}",
            "[a-z]{1,8}/[a-z]{1,8}:[a-z0-9]{1,5}",
        ]
    ) {
        let document: BlockDocument = json!({ "image": image.clone() })
            .as_object()
            .cloned()
            .unwrap();
        let catalog = StaticBlockCatalog::new().with_block("kubernetes-job/generated", document);
        let outcome = run_with(
            "Deployment.build_from_flow(my_flow, infrastructure=\"kubernetes-job/generated\")\n",
            &catalog,
        );
        let classified = outcome.calls()[0].classified();
        let injected = classified
            .passthrough_fields()
            .get(PassthroughKey::Image)
            .and_then(PyExpr::as_str_literal)
            .map(str::to_string);

        if image.starts_with("prefecthq/prefect") {
            prop_assert_eq!(injected, None);
            prop_assert_eq!(classified.advisories().len(), 1);
        } else {
            prop_assert_eq!(injected, Some(image));
            prop_assert_eq!(classified.advisories().len(), 2);
        }
    }

    #[test]
    fn prop_classification_is_repeatable(keys in allow_listed_keys(), deploy in any::<bool>()) {
        let mut keywords: Vec<String> = keys.iter().map(|key| key.as_str().to_string()).collect();
        if deploy {
            keywords.push("infrastructure".to_string());
        }
        let source = call_source(&keywords);
        let first = run(&source);
        let second = run(&source);

        prop_assert_eq!(first.calls(), second.calls());
        prop_assert_eq!(first.advisories(), second.advisories());
    }
}
