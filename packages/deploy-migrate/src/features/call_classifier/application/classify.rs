//! Classification of one `Deployment.build_from_flow(...)` call

use std::collections::BTreeSet;
use std::path::Path;

use tracing::debug;

use crate::config::MigrationConfig;
use crate::errors::{MigrateError, Result};
use crate::features::block_resolution::{image_of, BlockDocument, BlockResolver};
use crate::features::call_classifier::domain::{
    Advisory, BlockReference, Entrypoint, EntrypointSource, ExecutionEnvironment,
    PassthroughFields, PassthroughKey,
};
use crate::shared::models::{
    BindingScope, Keyword, PyExpr, PyExprKind, ReferenceRole, RequiredImport, Span,
};
use crate::shared::utils::render_expr;

const FLOW: &str = "flow";
const ENTRYPOINT: &str = "entrypoint";
const PATH: &str = "path";

/// Keywords that map to roles rather than pass-through fields
const ROLE_KEYWORDS: &[&str] = &[
    FLOW,
    ENTRYPOINT,
    PATH,
    "storage",
    "infrastructure",
];

/// A located deprecated call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub call: PyExpr,
    pub span: Span,
}

impl CallSite {
    pub fn new(call: PyExpr, span: Span) -> Self {
        Self { call, span }
    }
}

/// What classification may consult besides the call itself
#[derive(Clone, Copy)]
pub struct ClassifyContext<'a> {
    pub file_path: &'a Path,
    pub scope: &'a BindingScope,
    pub resolver: &'a dyn BlockResolver,
    pub config: &'a MigrationConfig,
}

/// A deprecated call partitioned into roles, plus its replacement
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedCall {
    original: PyExpr,
    span: Span,
    subject: PyExpr,
    remote_source: Option<BlockReference>,
    execution_environment: Option<ExecutionEnvironment>,
    entrypoint: Entrypoint,
    passthrough: PassthroughFields,
    advisories: Vec<Advisory>,
    required_imports: BTreeSet<RequiredImport>,
    replacement: PyExpr,
}

impl ClassifiedCall {
    /// Classify a call site.
    ///
    /// Fails when there is no flow to deploy, when a block slug is unknown to
    /// the resolver, or when the resolver itself fails.
    pub fn classify(site: &CallSite, ctx: &ClassifyContext<'_>) -> Result<Self> {
        let PyExprKind::Call { args, keywords, .. } = &site.call.kind else {
            return Err(malformed(ctx, &site.span, "expected a call expression"));
        };

        let subject = site
            .call
            .keyword(FLOW)
            .or_else(|| args.first())
            .filter(|subject| !is_star_arg(subject))
            .cloned()
            .ok_or_else(|| {
                malformed(
                    ctx,
                    &site.span,
                    "no flow given; pass it as the first argument or as flow=",
                )
            })?;

        let mut passthrough = PassthroughFields::collect(keywords, ROLE_KEYWORDS);
        positional_extras(args, &mut passthrough);

        let mut required_imports = BTreeSet::new();

        let remote_source = match present_keyword(&site.call, ReferenceRole::RemoteSource.keyword()) {
            Some(expr) => {
                let reference = BlockReference::from_expr(expr);
                if let Some(slug) = reference.slug() {
                    load_slug(slug, ReferenceRole::RemoteSource, &site.span, ctx)?;
                    required_imports.insert(ctx.config.load_helper.required_import());
                }
                Some(reference)
            }
            None => None,
        };

        let execution_environment =
            match present_keyword(&site.call, ReferenceRole::ExecutionEnvironment.keyword()) {
                Some(expr) => {
                    let reference = BlockReference::from_expr(expr);
                    let resolved_image = match reference.slug() {
                        Some(slug) => {
                            let document =
                                load_slug(slug, ReferenceRole::ExecutionEnvironment, &site.span, ctx)?;
                            required_imports.insert(ctx.config.load_helper.required_import());
                            image_of(&document).map(str::to_string)
                        }
                        None if ctx.config.resolve_bound_references => ctx
                            .resolver
                            .resolve_bound(expr, ctx.scope)
                            .document()
                            .and_then(image_of)
                            .map(str::to_string),
                        None => None,
                    };
                    Some(ExecutionEnvironment {
                        reference,
                        resolved_image,
                    })
                }
                None => None,
            };

        let entrypoint = resolve_entrypoint(&site.call, &subject, ctx.file_path);

        let mut advisories = Vec::new();
        match &execution_environment {
            None => advisories.push(Advisory::ServeMigration {
                subject: subject_label(&subject),
            }),
            Some(environment) => {
                advisories.push(Advisory::WorkPoolMigration);
                if let Some(image) = environment
                    .resolved_image
                    .as_deref()
                    .filter(|image| !ctx.config.is_default_image(image))
                {
                    passthrough.insert(PassthroughKey::Image, PyExpr::string(image));
                    advisories.push(Advisory::ImageConfiguration {
                        image: image.to_string(),
                    });
                }
            }
        }

        let mut receiver = subject.clone();
        if let Some(source) = &remote_source {
            receiver = receiver.method_call(
                "from_source",
                vec![
                    Keyword::new("source", source.to_expr(&ctx.config.load_helper)),
                    Keyword::new(ENTRYPOINT, entrypoint.value.clone()),
                ],
            );
        }
        let replacement = match &execution_environment {
            None => receiver.method_call("serve", passthrough.without_deploy_only().to_keywords()),
            Some(_) => receiver.method_call("deploy", passthrough.to_keywords()),
        }
        .with_span(site.span);

        debug!(
            line = site.span.start_line,
            subject = %subject_label(&subject),
            storage = remote_source.is_some(),
            infrastructure = execution_environment.is_some(),
            "classified build_from_flow call"
        );

        Ok(Self {
            original: site.call.clone(),
            span: site.span,
            subject,
            remote_source,
            execution_environment,
            entrypoint,
            passthrough,
            advisories,
            required_imports,
            replacement,
        })
    }

    pub fn original(&self) -> &PyExpr {
        &self.original
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn subject(&self) -> &PyExpr {
        &self.subject
    }

    pub fn remote_source(&self) -> Option<&BlockReference> {
        self.remote_source.as_ref()
    }

    pub fn execution_environment(&self) -> Option<&ExecutionEnvironment> {
        self.execution_environment.as_ref()
    }

    pub fn entrypoint(&self) -> &Entrypoint {
        &self.entrypoint
    }

    /// Allow-listed fields in canonical order, `image` included when injected
    pub fn passthrough_fields(&self) -> &PassthroughFields {
        &self.passthrough
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    pub fn required_imports(&self) -> &BTreeSet<RequiredImport> {
        &self.required_imports
    }

    /// `<flow>[.from_source(...)].serve|deploy(...)`, carrying the original span
    pub fn synthesized_replacement(&self) -> &PyExpr {
        &self.replacement
    }

    /// `name` as written, for report headings
    pub fn deployment_name(&self) -> Option<String> {
        self.passthrough.get(PassthroughKey::Name).map(render_expr)
    }
}

/// Keyword value, treating an explicit `None` as absent
fn present_keyword<'e>(call: &'e PyExpr, arg: &str) -> Option<&'e PyExpr> {
    call.keyword(arg)
        .filter(|value| !matches!(&value.kind, PyExprKind::Verbatim { text, .. } if text == "None"))
}

fn is_star_arg(expr: &PyExpr) -> bool {
    matches!(&expr.kind, PyExprKind::Verbatim { text, .. } if text.starts_with('*'))
}

/// `build_from_flow(flow, name, ...)`: the second positional is the name
fn positional_extras(args: &[PyExpr], passthrough: &mut PassthroughFields) {
    for (index, arg) in args.iter().enumerate().skip(1) {
        if index == 1 && !is_star_arg(arg) && !passthrough.contains(PassthroughKey::Name) {
            passthrough.insert(PassthroughKey::Name, arg.clone());
        } else {
            debug!(position = index, "dropping positional argument");
        }
    }
}

fn resolve_entrypoint(call: &PyExpr, subject: &PyExpr, file_path: &Path) -> Entrypoint {
    let explicit = present_keyword(call, ENTRYPOINT);
    let prefix = present_keyword(call, PATH);

    match (explicit, prefix) {
        (Some(explicit), Some(prefix)) => {
            match (explicit.as_str_literal(), prefix.as_str_literal()) {
                (Some(entrypoint), Some(prefix)) => Entrypoint {
                    value: PyExpr::string(Path::new(prefix).join(entrypoint).to_string_lossy()),
                    source: EntrypointSource::JoinedWithPath,
                },
                _ => {
                    debug!("entrypoint or path is not a string literal, using entrypoint alone");
                    Entrypoint {
                        value: explicit.clone(),
                        source: EntrypointSource::Explicit,
                    }
                }
            }
        }
        (Some(explicit), None) => Entrypoint {
            value: explicit.clone(),
            source: EntrypointSource::Explicit,
        },
        (None, _) => Entrypoint {
            value: PyExpr::string(format!(
                "{}:{}",
                file_path.display(),
                subject_label(subject)
            )),
            source: EntrypointSource::Default,
        },
    }
}

/// Flow identifier used in entrypoints and notes
fn subject_label(subject: &PyExpr) -> String {
    match subject.terminal_name() {
        Some(name) => name.to_string(),
        None => render_expr(subject),
    }
}

fn load_slug(
    slug: &str,
    role: ReferenceRole,
    span: &Span,
    ctx: &ClassifyContext<'_>,
) -> Result<BlockDocument> {
    match ctx.resolver.load(slug)? {
        Some(document) => Ok(document),
        None => Err(MigrateError::UnresolvableIdentifier {
            identifier: slug.to_string(),
            role,
            file: ctx.file_path.display().to_string(),
            line: span.start_line,
        }),
    }
}

fn malformed(ctx: &ClassifyContext<'_>, span: &Span, reason: &str) -> MigrateError {
    MigrateError::MalformedCall {
        file: ctx.file_path.display().to_string(),
        line: span.start_line,
        column: span.start_col,
        reason: reason.to_string(),
    }
}
