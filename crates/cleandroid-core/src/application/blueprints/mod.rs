//! Blueprints: what each request generates.
//!
//! A blueprint is a pure function from a request and a
//! [`ContentAssembler`] to a [`GenerationPlan`]. Content is not rendered
//! here; each file carries a template and a shared context so the
//! materializer renders only what it actually writes.
//!
//! # Adding a New Request Kind
//!
//! 1. Add the request type and variant in `domain::entities::request`
//! 2. Add a module here exposing `plan(&Request, &ContentAssembler)`
//! 3. Dispatch it from [`plan`]

mod architecture;
mod datasource;
mod feature;
mod project;
pub mod templates;
mod usecase;
mod viewmodel;

use std::path::Path;
use std::sync::Arc;

use crate::application::assembler::{ContentAssembler, DiFragments, ModuleKind, indent_block};
use crate::domain::{
    ContentSource, DomainError, GenerationPlan, GenerationRequest, PackageName, RelativePath,
    RenderContext, WritePolicy,
    entities::request::{DEFAULT_COMPILE_SDK, DEFAULT_MIN_SDK},
    package::kotlin_source_dir,
};

/// Resource bundle holding the launcher icons.
pub const LAUNCHER_BUNDLE: &str = "launcher";

/// Shared detekt configuration every module's `detekt {}` block points at.
const DETEKT_CONFIG: &str = "config/detekt/detekt.yml";

/// Kotlin file in the app's base package listing the Koin modules loaded
/// at startup.
const KOIN_FEATURE_MODULES_FILE: &str = "FeatureModules.kt";

/// Plan the files and directories for `request`.
pub fn plan(
    request: &GenerationRequest,
    assembler: &ContentAssembler<'_>,
) -> Result<GenerationPlan, DomainError> {
    match request {
        GenerationRequest::Project(r) => project::plan(r, assembler),
        GenerationRequest::Architecture(r) => architecture::plan(r, assembler),
        GenerationRequest::Feature(r) => feature::plan(r, assembler),
        GenerationRequest::UseCase(r) => usecase::plan(r, assembler),
        GenerationRequest::ViewModel(r) => viewmodel::plan(r, assembler),
        GenerationRequest::DataSource(r) => datasource::plan(r, assembler),
    }
}

// ── Shared helpers ───────────────────────────────────────────────────────────

fn rel(path: impl AsRef<Path>) -> Result<RelativePath, DomainError> {
    RelativePath::try_new(path.as_ref())
}

/// `<module>/src/<set>/java/<package…>`
fn source_dir(module: &str, set: &str, package: &PackageName) -> Result<RelativePath, DomainError> {
    rel(kotlin_source_dir(module, set, package.segments()))
}

fn package_context(package: &PackageName) -> RenderContext {
    RenderContext::default().with_variable("PACKAGE", package.to_string())
}

fn with_di(ctx: RenderContext, di: &DiFragments) -> RenderContext {
    ctx.with_variable("DI_APPLICATION_IMPORTS", &di.application_imports)
        .with_variable("DI_APPLICATION_ANNOTATION", &di.application_annotation)
        .with_variable(
            "DI_APPLICATION_ENTRY",
            indent_block(&di.application_entry, 8),
        )
        .with_variable("DI_ACTIVITY_IMPORTS", &di.activity_imports)
        .with_variable("DI_ACTIVITY_ANNOTATION", &di.activity_annotation)
        .with_variable("DI_VIEWMODEL_IMPORTS", &di.viewmodel_imports)
        .with_variable("DI_VIEWMODEL_ANNOTATION", &di.viewmodel_annotation)
        .with_variable("DI_INJECT_CONSTRUCTOR", &di.inject_constructor)
        .with_variable("DI_INJECT_IMPORTS", &di.inject_imports)
        .with_variable("DI_MODULE_IMPORTS", &di.module_imports)
        .with_variable("DI_MODULE_REGISTRATION", &di.module_registration)
}

/// Context for a module's `build.gradle.kts`.
fn build_context(
    assembler: &ContentAssembler<'_>,
    module: ModuleKind,
    ctx: RenderContext,
) -> RenderContext {
    let lint = assembler.lint_blocks(0);
    let compose =
        matches!(module, ModuleKind::App | ModuleKind::Feature) && assembler.compose_enabled();

    ctx.with_variable("PLUGINS", assembler.plugin_lines(module, 4))
        .with_variable("DEPENDENCIES", assembler.dependency_lines(module, 4))
        .with_variable(
            "BUILD_FEATURES",
            if compose {
                templates::COMPOSE_BUILD_FEATURES
            } else {
                ""
            },
        )
        .with_variable(
            "LINT",
            if lint.is_empty() {
                String::new()
            } else {
                format!("\n{lint}")
            },
        )
}

/// Build file for a library module with default SDK levels.
fn add_library_module(
    plan: &mut GenerationPlan,
    assembler: &ContentAssembler<'_>,
    module_dir: &str,
    module: ModuleKind,
    namespace: &PackageName,
) -> Result<(), DomainError> {
    let ctx = package_context(namespace)
        .with_variable("MIN_SDK", DEFAULT_MIN_SDK.to_string())
        .with_variable("COMPILE_SDK", DEFAULT_COMPILE_SDK.to_string());
    let ctx = Arc::new(build_context(assembler, module, ctx));

    plan.add_directory(rel(module_dir)?);
    plan.add_file(
        rel(module_dir)?.join("build.gradle.kts")?,
        ContentSource::template(templates::LIBRARY_BUILD_GRADLE, &ctx),
        WritePolicy::CreateIfAbsent,
    );
    plan.add_include(module_dir);
    plan.require(assembler.required_dependencies(module));
    add_detekt_config(plan, assembler, WritePolicy::CreateIfAbsent)
}

/// Plan the detekt config once when detekt is on. Projects keep it in sync
/// with [`WritePolicy::OverwriteAlways`]; later requests only fill it in
/// when it is missing.
fn add_detekt_config(
    plan: &mut GenerationPlan,
    assembler: &ContentAssembler<'_>,
    policy: WritePolicy,
) -> Result<(), DomainError> {
    if !assembler.detekt_enabled() || plan.file(DETEKT_CONFIG).is_some() {
        return Ok(());
    }
    plan.add_directory(rel("config/detekt")?);
    plan.add_file(
        rel(DETEKT_CONFIG)?,
        ContentSource::Text(templates::DETEKT_YML.to_owned()),
        policy,
    );
    Ok(())
}

fn add_source(
    plan: &mut GenerationPlan,
    dir: &RelativePath,
    file_name: &str,
    template: &'static str,
    ctx: &Arc<RenderContext>,
) -> Result<(), DomainError> {
    plan.add_directory(dir.clone());
    plan.add_file(
        dir.join(file_name)?,
        ContentSource::template(template, ctx),
        WritePolicy::CreateIfAbsent,
    );
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::GeneratedFile;

    pub fn render(file: &GeneratedFile) -> String {
        String::from_utf8(file.content.produce()).unwrap()
    }
}
