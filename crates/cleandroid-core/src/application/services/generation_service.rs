//! Generation service - the one entry point the CLI drives.
//!
//! Workflow for every request:
//! 1. Validate the request
//! 2. Load the project's `gradle/libs.versions.toml`, if any
//! 3. Resolve the version catalog against defaults and user overrides
//! 4. Plan the files for the request
//! 5. Materialize the plan, continuing past individual failures

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        assembler::ContentAssembler,
        blueprints,
        materializer::{Materializer, Outcome},
        ports::{Filesystem, ResourceBundle},
    },
    domain::{
        DependencyId, DependencyKind, DomainValidator as validator, GenerationPlan,
        GenerationRequest, ProjectCatalog, UserOverrides, VersionCatalogReader, WritePolicy,
    },
    error::CleandroidResult,
};

/// Where Gradle looks for the version catalog, relative to the project root.
pub const CATALOG_PATH: &str = "gradle/libs.versions.toml";
const SETTINGS_PATH: &str = "settings.gradle.kts";

/// A path that could not be materialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedPath {
    pub path: PathBuf,
    pub reason: String,
}

/// Catalog lines the generated build files reference but the project's
/// catalog does not declare. Never written automatically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogAdditions {
    pub versions: Vec<String>,
    pub libraries: Vec<String>,
    pub plugins: Vec<String>,
}

impl CatalogAdditions {
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty() && self.libraries.is_empty() && self.plugins.is_empty()
    }

    /// TOML snippet with section headers, ready to paste.
    pub fn to_toml(&self) -> String {
        let mut out = String::new();
        for (title, lines) in [
            ("versions", &self.versions),
            ("libraries", &self.libraries),
            ("plugins", &self.plugins),
        ] {
            if lines.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("[{title}]\n"));
            for line in lines {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

/// What one `generate` call did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub directories: Vec<PathBuf>,
    pub created: Vec<PathBuf>,
    pub updated: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<FailedPath>,
    pub catalog_additions: CatalogAdditions,
}

impl GenerationReport {
    /// Files created or updated by this run.
    pub fn written(&self) -> impl Iterator<Item = &PathBuf> {
        self.created.iter().chain(&self.updated)
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// `Err(GenerationIncomplete)` when anything failed.
    pub fn ensure_complete(&self) -> CleandroidResult<()> {
        if self.is_complete() {
            return Ok(());
        }
        Err(ApplicationError::GenerationIncomplete {
            failed: self.failed.len(),
            total: self.failed.len() + self.created.len() + self.updated.len() + self.skipped.len(),
        }
        .into())
    }

    fn record(&mut self, path: PathBuf, result: CleandroidResult<Outcome>) {
        match result {
            Ok(Outcome::Created) => self.created.push(path),
            Ok(Outcome::Updated) => self.updated.push(path),
            Ok(Outcome::Skipped) => self.skipped.push(path),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to generate");
                self.failed.push(FailedPath {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }
}

/// Plans and materializes generation requests.
pub struct GenerationService {
    filesystem: Box<dyn Filesystem>,
    resources: Box<dyn ResourceBundle>,
    strict_catalog: bool,
}

impl GenerationService {
    pub fn new(filesystem: Box<dyn Filesystem>, resources: Box<dyn ResourceBundle>) -> Self {
        Self {
            filesystem,
            resources,
            strict_catalog: false,
        }
    }

    /// Only dependencies the project catalog declares count as available.
    pub fn strict_catalog(mut self, strict: bool) -> Self {
        self.strict_catalog = strict;
        self
    }

    /// Generate everything `request` describes under its destination.
    ///
    /// Validation errors abort before any I/O. Filesystem errors on
    /// individual paths are collected in the report; the rest of the plan
    /// is still attempted.
    #[instrument(
        skip_all,
        fields(kind = request.kind(), destination = %request.destination().display())
    )]
    pub fn generate(
        &self,
        request: &GenerationRequest,
        overrides: &UserOverrides,
    ) -> CleandroidResult<GenerationReport> {
        info!("Generating {}", request.kind());

        // 1. Validate
        validator::validate_request(request)?;
        let root = request.destination();

        // 2. Project catalog
        let catalog = self.load_catalog(root)?;

        // 3. Resolve
        let mut builder = VersionCatalogReader::builder()
            .project_catalog(catalog.as_ref())
            .overrides(overrides, request.catalog_variant());
        if self.strict_catalog {
            builder = builder.defaults(&[]);
        }
        let reader = builder.build();
        let assembler = ContentAssembler::new(&reader, request.flags());

        // 4. Plan
        let plan = blueprints::plan(request, &assembler)?;
        validator::validate_plan(&plan)?;
        debug!(
            directories = plan.directories().len(),
            files = plan.files().len(),
            "Plan ready"
        );

        // 5. Materialize
        let mut report = self.materialize(root, &plan);
        if reader.has_project_catalog() {
            report.catalog_additions =
                catalog_additions(&reader, catalog.as_ref(), plan.dependencies());
        }

        info!(
            created = report.created.len(),
            updated = report.updated.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "Generation finished"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn load_catalog(&self, root: &Path) -> CleandroidResult<Option<ProjectCatalog>> {
        let path = root.join(CATALOG_PATH);
        if !self.filesystem.exists(&path) {
            debug!(path = %path.display(), "No project catalog");
            return Ok(None);
        }

        let catalog = ProjectCatalog::parse(&self.filesystem.read_to_string(&path)?);
        for skipped in catalog.skipped() {
            warn!(
                path = %path.display(),
                line = skipped.line,
                text = %skipped.text,
                reason = %skipped.reason,
                "Skipped catalog line"
            );
        }
        Ok(Some(catalog))
    }

    fn materialize(&self, root: &Path, plan: &GenerationPlan) -> GenerationReport {
        let materializer = Materializer::new(self.filesystem.as_ref());
        let mut report = GenerationReport::default();

        for dir in plan.directories() {
            let path = dir.path.under(root);
            match materializer.ensure_directory(&path) {
                Ok(Outcome::Created) => report.directories.push(path),
                Ok(_) => {}
                Err(e) => report.record(path, Err(e)),
            }
        }

        for file in plan.files() {
            let path = file.path.under(root);
            let result = match file.policy {
                WritePolicy::CreateIfAbsent => {
                    materializer.create_if_absent(&path, || file.content.produce())
                }
                WritePolicy::OverwriteAlways => {
                    materializer.overwrite(&path, || file.content.produce())
                }
            };
            report.record(path, result);
        }

        for resource in plan.resources() {
            let target = resource.target_dir.under(root);
            match materializer.copy_binary_resource_if_absent(
                self.resources.as_ref(),
                &target,
                &resource.bundle,
            ) {
                Ok(results) => {
                    for (path, result) in results {
                        report.record(path, result);
                    }
                }
                Err(e) => report.record(target, Err(e)),
            }
        }

        let settings = root.join(SETTINGS_PATH);
        for include in plan.includes() {
            let result = materializer.ensure_line(&settings, &include.line());
            // the settings file may already be listed from the file pass
            match result {
                Ok(Outcome::Skipped) => {}
                other => report.record(settings.clone(), other),
            }
        }

        for appended in plan.appended_lines() {
            let path = appended.path.under(root);
            match materializer.append_line_if_present(&path, &appended.line) {
                Ok(Outcome::Skipped) => {}
                other => report.record(path, other),
            }
        }

        report
    }
}

fn catalog_additions(
    reader: &VersionCatalogReader,
    catalog: Option<&ProjectCatalog>,
    required: &[DependencyId],
) -> CatalogAdditions {
    let mut additions = CatalogAdditions::default();

    for id in reader.undeclared(required) {
        let dep = id.definition();
        if let Some(key) = dep.version_key
            && catalog.and_then(|c| c.version(key)).is_none()
            && let Some(version) = reader.merged_version(key)
        {
            let line = format!("{key} = \"{version}\"");
            if !additions.versions.contains(&line) {
                additions.versions.push(line);
            }
        }

        if let Some(line) = reader.render_entry(id) {
            match dep.kind() {
                DependencyKind::Library => additions.libraries.push(line),
                DependencyKind::Plugin => additions.plugins.push(line),
            }
        }
    }

    additions
}
