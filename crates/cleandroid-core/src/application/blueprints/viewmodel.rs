use std::sync::Arc;

use super::{add_source, package_context, source_dir, templates, with_di};
use crate::application::assembler::ContentAssembler;
use crate::domain::entities::request::{feature_module, feature_package};
use crate::domain::{DomainError, GenerationPlan, ViewModelRequest};

pub(super) fn plan(
    request: &ViewModelRequest,
    assembler: &ContentAssembler<'_>,
) -> Result<GenerationPlan, DomainError> {
    let mut plan = GenerationPlan::new();
    let package = feature_package(&request.package, &request.feature).child("presentation");
    let dir = source_dir(&feature_module(&request.feature), "main", &package)?;
    let name = request.name.pascal();

    let di = assembler.di_fragments(&request.feature, "");
    let ctx = Arc::new(with_di(package_context(&package), &di).with_variable("NAME", &name));

    add_source(
        &mut plan,
        &dir,
        &format!("{name}ViewModel.kt"),
        templates::VIEW_MODEL,
        &ctx,
    )?;
    add_source(&mut plan, &dir, &format!("{name}UiState.kt"), templates::UI_STATE, &ctx)?;
    if assembler.compose_enabled() {
        add_source(&mut plan, &dir, &format!("{name}Screen.kt"), templates::SCREEN, &ctx)?;
    }
    Ok(plan)
}
