//! Gradle version catalog model.
//!
//! - [`model`]: the static registry of known libraries and plugins
//! - [`alias`]: alias validity, synthesis and accessor rendering
//! - [`gradle`]: lenient reader for an existing `libs.versions.toml`
//! - [`overrides`]: user override files
//! - [`reader`]: the merged, queryable view used during generation

pub mod alias;
pub mod gradle;
pub mod model;
pub mod overrides;
pub mod reader;

use serde::Serialize;

pub use alias::Alias;
pub use gradle::{DeclaredEntry, ProjectCatalog, VersionSpec};
pub use model::{
    Coordinate, DEFAULT_VERSIONS, DEPENDENCY_REGISTRY, DependencyId, DependencyKind,
    LogicalDependency, default_version,
};
pub use overrides::{CatalogVariant, OverrideFile, UserOverrides};
pub use reader::{AliasResolution, VersionCatalogReader, VersionCatalogReaderBuilder};

/// A line a lenient parser could not use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based.
    pub line: usize,
    pub text: String,
    pub reason: String,
}
