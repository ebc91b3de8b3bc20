use std::sync::Arc;

use super::{
    KOIN_FEATURE_MODULES_FILE, add_library_module, add_source, package_context, rel, source_dir,
    templates, with_di,
};
use crate::application::assembler::{ContentAssembler, ModuleKind, koin_module_name};
use crate::domain::{DependencyInjection, DomainError, FeatureRequest, GenerationPlan};

/// Layer packages every feature module starts with.
const LAYERS: [&str; 4] = ["presentation", "domain/usecase", "data", "di"];

pub(super) fn plan(
    request: &FeatureRequest,
    assembler: &ContentAssembler<'_>,
) -> Result<GenerationPlan, DomainError> {
    let mut plan = GenerationPlan::new();
    let module = request.module_name();
    let package = request.feature_package();

    add_library_module(&mut plan, assembler, &module, ModuleKind::Feature, &package)?;

    let sources = source_dir(&module, "main", &package)?;
    for layer in LAYERS {
        plan.add_directory(sources.join(layer)?);
    }

    // applied only when the app module exists
    plan.append_line(
        rel("app/build.gradle.kts")?,
        format!("dependencies {{ implementation(project(\":{module}\")) }}"),
    );

    let di_kind = assembler.dependency_injection();
    if di_kind == DependencyInjection::Koin {
        let koin_module = koin_module_name(&request.name);
        plan.append_line(
            source_dir("app", "main", &request.package)?.join(KOIN_FEATURE_MODULES_FILE)?,
            format!(
                "@Suppress(\"unused\") private val {koin_module}Registered = featureModules.add({package}.di.{koin_module})"
            ),
        );
    }

    if di_kind != DependencyInjection::None {
        let di = assembler.di_fragments(&request.name, "");
        let ctx = Arc::new(with_di(package_context(&package.child("di")), &di));
        add_source(
            &mut plan,
            &sources.join("di")?,
            &format!("{}Module.kt", request.name.pascal()),
            templates::DI_MODULE,
            &ctx,
        )?;
    }

    Ok(plan)
}
