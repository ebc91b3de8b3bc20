//! Core domain layer for Cleandroid.
//!
//! Pure logic with no I/O: the dependency registry and version catalog
//! model, package-to-path mapping, names and generation requests. Everything
//! that touches a filesystem goes through ports in the application layer.
//!
//! - **No I/O**: no filesystem, network or process calls
//! - **No logging**: diagnostics are returned as data (see
//!   [`catalog::SkippedLine`]) and logged by the caller
//! - **Immutable entities**: requests and plans are plain values

pub mod catalog;
pub mod entities;
pub mod error;
pub mod naming;
pub mod package;
pub mod value_objects;

mod validation;

pub use catalog::{
    Alias, AliasResolution, CatalogVariant, Coordinate, DependencyId, DependencyKind,
    LogicalDependency, OverrideFile, ProjectCatalog, SkippedLine, UserOverrides,
    VersionCatalogReader,
};
pub use entities::{
    AppendedLine, ArchitectureRequest, ContentSource, DataSourceRequest, DirectoryTarget,
    FeatureRequest, GeneratedFile, GenerationPlan, GenerationRequest, ProjectTemplateRequest,
    RelativePath, RenderContext, RequestBuilder, ResourceCopy, SettingsInclude, UseCaseRequest,
    ViewModelRequest, WritePolicy,
};
pub use error::{DomainError, ErrorCategory};
pub use naming::Name;
pub use package::PackageName;
pub use validation::DomainValidator;
pub use value_objects::{DataSourceFlavor, DependencyInjection, FeatureFlags, NetworkClient};
