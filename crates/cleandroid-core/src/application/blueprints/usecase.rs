use std::sync::Arc;

use super::{add_source, package_context, source_dir, templates, with_di};
use crate::application::assembler::ContentAssembler;
use crate::domain::entities::request::{feature_module, feature_package};
use crate::domain::{DomainError, GenerationPlan, UseCaseRequest};

pub(super) fn plan(
    request: &UseCaseRequest,
    assembler: &ContentAssembler<'_>,
) -> Result<GenerationPlan, DomainError> {
    let mut plan = GenerationPlan::new();
    let package = feature_package(&request.package, &request.feature)
        .child("domain")
        .child("usecase");
    let dir = source_dir(&feature_module(&request.feature), "main", &package)?;

    let di = assembler.di_fragments(&request.feature, "");
    let ctx = with_di(package_context(&package), &di).with_variable("NAME", request.name.pascal());

    add_source(
        &mut plan,
        &dir,
        &format!("{}UseCase.kt", request.name.pascal()),
        templates::USE_CASE,
        &Arc::new(ctx),
    )?;
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::render;
    use super::*;
    use crate::domain::{DependencyInjection, FeatureFlags, RequestBuilder, VersionCatalogReader};

    const PATH: &str =
        "feature-auth/src/main/java/com/acme/notes/feature/auth/domain/usecase/SignInUseCase.kt";

    fn request(flags: FeatureFlags) -> UseCaseRequest {
        RequestBuilder::new("/work/notes")
            .name("sign in")
            .feature("auth")
            .package("com.acme.notes")
            .flags(flags)
            .build_use_case()
            .unwrap()
    }

    #[test]
    fn lands_in_feature_usecase_package() {
        let reader = VersionCatalogReader::with_defaults();
        let assembler = ContentAssembler::new(&reader, FeatureFlags::default());
        let plan = plan(&request(FeatureFlags::default()), &assembler).unwrap();

        let use_case = render(plan.file(PATH).unwrap());
        assert!(use_case.starts_with("package com.acme.notes.feature.auth.domain.usecase\n"));
        assert!(use_case.contains("class SignInUseCase() {"), "{use_case}");
        assert!(plan.includes().is_empty());
    }

    #[test]
    fn hilt_adds_inject_constructor() {
        let reader = VersionCatalogReader::with_defaults();
        let flags = FeatureFlags::default().with_di(DependencyInjection::Hilt);
        let assembler = ContentAssembler::new(&reader, flags);
        let plan = plan(&request(flags), &assembler).unwrap();

        let use_case = render(plan.file(PATH).unwrap());
        assert!(use_case.contains("class SignInUseCase @Inject constructor() {"), "{use_case}");
    }
}
