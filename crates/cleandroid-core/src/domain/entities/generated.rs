use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::catalog::{DependencyId, VersionCatalogReader};
use crate::domain::entities::{common::RelativePath, render::RenderContext};
use crate::domain::error::DomainError;

/// What to do when a generated file already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WritePolicy {
    /// Hand-editable sources: never touch an existing file.
    #[default]
    CreateIfAbsent,
    /// Machine-owned config that tracks flags: rewrite unless identical.
    OverwriteAlways,
}

/// File content, produced only when the materializer decides to write.
#[derive(Clone)]
pub enum ContentSource {
    Text(String),
    Bytes(Vec<u8>),
    /// Rendered on demand.
    Template {
        template: &'static str,
        context: Arc<RenderContext>,
    },
    /// A complete `libs.versions.toml`, rendered on demand.
    Catalog(Arc<VersionCatalogReader>),
}

impl ContentSource {
    pub fn template(template: &'static str, context: &Arc<RenderContext>) -> Self {
        Self::Template {
            template,
            context: Arc::clone(context),
        }
    }

    pub fn produce(&self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.clone().into_bytes(),
            Self::Bytes(bytes) => bytes.clone(),
            Self::Template { template, context } => context.render(template).into_bytes(),
            Self::Catalog(reader) => reader.render_catalog().into_bytes(),
        }
    }
}

impl fmt::Debug for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(t) => write!(f, "Text({} bytes)", t.len()),
            Self::Bytes(b) => write!(f, "Bytes({} bytes)", b.len()),
            Self::Template { template, .. } => write!(f, "Template({} bytes)", template.len()),
            Self::Catalog(_) => f.write_str("Catalog"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: RelativePath,
    pub content: ContentSource,
    pub policy: WritePolicy,
}

/// A directory the materializer ensures exists. Never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DirectoryTarget {
    pub path: RelativePath,
}

/// A line that must appear once in `settings.gradle.kts`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SettingsInclude {
    pub module: String,
}

impl SettingsInclude {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
        }
    }

    /// `include(":feature-login")`
    pub fn line(&self) -> String {
        format!("include(\":{}\")", self.module)
    }
}

/// A line added once to a file another request generated. Missing files
/// are left missing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AppendedLine {
    pub path: RelativePath,
    pub line: String,
}

/// Copy every file of a named resource bundle into `target_dir`, skipping
/// files that already exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceCopy {
    pub bundle: String,
    pub target_dir: RelativePath,
}

/// Everything one request will materialize, relative to the destination.
#[derive(Debug, Clone, Default)]
pub struct GenerationPlan {
    directories: Vec<DirectoryTarget>,
    files: Vec<GeneratedFile>,
    includes: Vec<SettingsInclude>,
    appended: Vec<AppendedLine>,
    resources: Vec<ResourceCopy>,
    dependencies: Vec<DependencyId>,
}

impl GenerationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repeated directories are recorded once.
    pub fn add_directory(&mut self, path: RelativePath) {
        let target = DirectoryTarget { path };
        if !self.directories.contains(&target) {
            self.directories.push(target);
        }
    }

    pub fn add_file(&mut self, path: RelativePath, content: ContentSource, policy: WritePolicy) {
        self.files.push(GeneratedFile {
            path,
            content,
            policy,
        });
    }

    pub fn add_include(&mut self, module: impl Into<String>) {
        let include = SettingsInclude::new(module);
        if !self.includes.contains(&include) {
            self.includes.push(include);
        }
    }

    pub fn append_line(&mut self, path: RelativePath, line: impl Into<String>) {
        let appended = AppendedLine {
            path,
            line: line.into(),
        };
        if !self.appended.contains(&appended) {
            self.appended.push(appended);
        }
    }

    pub fn add_resources(&mut self, bundle: impl Into<String>, target_dir: RelativePath) {
        self.resources.push(ResourceCopy {
            bundle: bundle.into(),
            target_dir,
        });
    }

    /// Record catalog entries the generated build files reference.
    pub fn require(&mut self, ids: impl IntoIterator<Item = DependencyId>) {
        for id in ids {
            if !self.dependencies.contains(&id) {
                self.dependencies.push(id);
            }
        }
    }

    pub fn directories(&self) -> &[DirectoryTarget] {
        &self.directories
    }

    pub fn files(&self) -> &[GeneratedFile] {
        &self.files
    }

    pub fn includes(&self) -> &[SettingsInclude] {
        &self.includes
    }

    pub fn appended_lines(&self) -> &[AppendedLine] {
        &self.appended
    }

    pub fn resources(&self) -> &[ResourceCopy] {
        &self.resources
    }

    pub fn dependencies(&self) -> &[DependencyId] {
        &self.dependencies
    }

    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files
            .iter()
            .find(|f| f.path.as_path() == std::path::Path::new(path))
    }

    /// A plan must not write the same file twice.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for file in &self.files {
            if !seen.insert(&file.path) {
                return Err(DomainError::DuplicatePath {
                    path: file.path.to_string(),
                });
            }
        }
        Ok(())
    }
}
