//! Single-pass rewrite of every deprecated call in a module

use tree_sitter::Node;
use tracing::{debug, info};

use crate::config::MigrationConfig;
use crate::errors::Result;
use crate::features::block_resolution::BlockResolver;
use crate::features::call_classifier::{CallSite, ClassifiedCall, ClassifyContext};
use crate::features::parsing::{
    assignment_target, bound_identifiers, import_bindings, lower_expression, ParsedModule,
};
use crate::features::rewrite_engine::domain::{
    is_deprecated_type, MigratedCall, RewriteOutcome, DEPRECATED_METHOD,
};
use crate::shared::models::BindingScope;
use crate::shared::utils::{node_text, node_text_owned, node_to_span};

/// Walk state threaded through one traversal
#[derive(Debug, Default)]
struct TraversalState {
    calls: Vec<MigratedCall>,
    scope: BindingScope,
    /// Function/class/lambda bodies entered; bindings are only recorded at 0
    nesting: usize,
}

/// Finds `Deployment.build_from_flow(...)` calls and classifies each one
pub struct RewriteEngine<'a> {
    resolver: &'a dyn BlockResolver,
    config: &'a MigrationConfig,
}

impl<'a> RewriteEngine<'a> {
    pub fn new(resolver: &'a dyn BlockResolver, config: &'a MigrationConfig) -> Self {
        Self { resolver, config }
    }

    /// Traverse the module once.
    ///
    /// The first call that cannot be classified aborts the run.
    pub fn run(&self, module: &ParsedModule) -> Result<RewriteOutcome> {
        let mut state = TraversalState::default();
        self.visit(module.root(), module, &mut state)?;

        info!(
            file = %module.file_path().display(),
            calls = state.calls.len(),
            "rewrite traversal complete"
        );

        Ok(RewriteOutcome::new(
            module.file_path().to_path_buf(),
            state.calls,
            state.scope,
        ))
    }

    fn visit(&self, node: Node, module: &ParsedModule, state: &mut TraversalState) -> Result<()> {
        let source = module.source();

        match node.kind() {
            "function_definition" | "class_definition" | "lambda" => {
                if state.nesting == 0 {
                    if let Some(name) = node.child_by_field_name("name") {
                        state.scope.forget(node_text(&name, source));
                    }
                }
                state.nesting += 1;
                let result = self.visit_children(node, module, state);
                state.nesting -= 1;
                return result;
            }
            "import_statement" | "import_from_statement" if state.nesting == 0 => {
                for binding in import_bindings(node, source) {
                    state.scope.record_import(binding);
                }
                return Ok(());
            }
            "assignment" if state.nesting == 0 => {
                // right-hand side sees the bindings from before the assignment
                self.visit_children(node, module, state)?;
                match assignment_target(node, source) {
                    Some((name, value)) => {
                        state.scope.record_assignment(name, lower_expression(value, source));
                    }
                    None => self.forget_target(node, "left", source, state),
                }
                return Ok(());
            }
            "augmented_assignment" if state.nesting == 0 => {
                self.visit_children(node, module, state)?;
                self.forget_target(node, "left", source, state);
                return Ok(());
            }
            "for_statement" if state.nesting == 0 => {
                self.forget_target(node, "left", source, state);
            }
            "as_pattern_target" | "named_expression" if state.nesting == 0 => {
                let target = if node.kind() == "named_expression" {
                    node.child_by_field_name("name")
                } else {
                    Some(node)
                };
                if let Some(target) = target {
                    for name in bound_identifiers(target, source) {
                        state.scope.forget(&name);
                    }
                }
            }
            "call" if self.is_deprecated_call(node, source, &state.scope) => {
                return self.migrate_call(node, module, state);
            }
            _ => {}
        }

        self.visit_children(node, module, state)
    }

    fn visit_children(
        &self,
        node: Node,
        module: &ParsedModule,
        state: &mut TraversalState,
    ) -> Result<()> {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.visit(child, module, state)?;
        }
        Ok(())
    }

    /// Unknown value from here on for every name bound by `node.<field>`
    fn forget_target(&self, node: Node, field: &str, source: &str, state: &mut TraversalState) {
        if let Some(target) = node.child_by_field_name(field) {
            for name in bound_identifiers(target, source) {
                debug!(name = %name, "module-level rebinding");
                state.scope.forget(&name);
            }
        }
    }

    fn is_deprecated_call(&self, node: Node, source: &str, scope: &BindingScope) -> bool {
        let Some(function) = node.child_by_field_name("function") else {
            return false;
        };
        if function.kind() != "attribute" {
            return false;
        }
        let method = function.child_by_field_name("attribute");
        let receiver = function.child_by_field_name("object");
        match (method, receiver) {
            (Some(method), Some(receiver)) if node_text(&method, source) == DEPRECATED_METHOD => {
                is_deprecated_type(&lower_expression(receiver, source), scope)
            }
            _ => false,
        }
    }

    /// Classify and record; the call's own arguments are not revisited
    fn migrate_call(
        &self,
        node: Node,
        module: &ParsedModule,
        state: &mut TraversalState,
    ) -> Result<()> {
        let source = module.source();
        let span = node_to_span(&node);
        let site = CallSite::new(lower_expression(node, source), span);

        let ctx = ClassifyContext {
            file_path: module.file_path(),
            scope: &state.scope,
            resolver: self.resolver,
            config: self.config,
        };
        let classified = ClassifiedCall::classify(&site, &ctx)?;

        debug!(
            line = span.start_line,
            index = state.calls.len(),
            "recorded build_from_flow call"
        );
        state
            .calls
            .push(MigratedCall::new(node_text_owned(&node, source), classified));
        Ok(())
    }
}
