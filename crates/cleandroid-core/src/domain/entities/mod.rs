pub mod common;
pub mod generated;
pub mod render;
pub mod request;

pub use crate::domain::DomainError;
pub use common::RelativePath;
pub use generated::{
    AppendedLine, ContentSource, DirectoryTarget, GeneratedFile, GenerationPlan, ResourceCopy,
    SettingsInclude, WritePolicy,
};
pub use render::RenderContext;
pub use request::{
    ArchitectureRequest, DataSourceRequest, FeatureRequest, GenerationRequest,
    ProjectTemplateRequest, RequestBuilder, UseCaseRequest, ViewModelRequest,
};
