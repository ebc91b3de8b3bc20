use crate::domain::{
    entities::{GenerationPlan, GenerationRequest},
    error::DomainError,
    package::PackageName,
};

/// Centralized domain validation.
///
/// Requests validate their fields on construction; this re-checks the
/// invariants that span more than one field.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_request(request: &GenerationRequest) -> Result<(), DomainError> {
        if request.destination().as_os_str().is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "destination",
            });
        }
        if let GenerationRequest::Project(project) = request
            && project.min_sdk > project.compile_sdk
        {
            return Err(DomainError::InvalidSdkRange {
                min_sdk: project.min_sdk,
                compile_sdk: project.compile_sdk,
            });
        }
        Ok(())
    }

    pub fn validate_namespace(namespace: &str) -> Result<PackageName, DomainError> {
        PackageName::parse(namespace)
    }

    pub fn validate_plan(plan: &GenerationPlan) -> Result<(), DomainError> {
        plan.validate()
    }
}
