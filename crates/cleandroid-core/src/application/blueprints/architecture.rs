use std::sync::Arc;

use super::{add_library_module, add_source, package_context, source_dir, templates, with_di};
use crate::application::assembler::{ContentAssembler, ModuleKind};
use crate::domain::{ArchitectureRequest, DomainError, GenerationPlan, Name};

pub(super) fn plan(
    request: &ArchitectureRequest,
    assembler: &ContentAssembler<'_>,
) -> Result<GenerationPlan, DomainError> {
    let mut plan = GenerationPlan::new();
    let di = assembler.di_fragments(&Name::parse("name", "core")?, "");

    // core: dispatchers, shared by every other module
    let core = request.package.child("core");
    add_library_module(&mut plan, assembler, "core", ModuleKind::Core, &core)?;
    let ctx = Arc::new(with_di(package_context(&core), &di));
    add_source(
        &mut plan,
        &source_dir("core", "main", &core)?,
        "DispatcherProvider.kt",
        templates::DISPATCHER_PROVIDER,
        &ctx,
    )?;

    // domain: pure Kotlin abstractions
    let domain = request.package.child("domain");
    add_library_module(&mut plan, assembler, "domain", ModuleKind::Domain, &domain)?;
    let ctx = Arc::new(package_context(&domain));
    let dir = source_dir("domain", "main", &domain)?;
    add_source(&mut plan, &dir, "Result.kt", templates::RESULT_KT, &ctx)?;
    add_source(&mut plan, &dir, "UseCase.kt", templates::BASE_USE_CASE, &ctx)?;

    let data = request.package.child("data");
    add_library_module(&mut plan, assembler, "data", ModuleKind::Data, &data)?;
    let ctx = Arc::new(package_context(&data));
    add_source(
        &mut plan,
        &source_dir("data", "main", &data)?,
        "Repository.kt",
        templates::REPOSITORY_KT,
        &ctx,
    )?;

    Ok(plan)
}
