//! The generation subcommands: `project`, `architecture`, `feature`,
//! `usecase`, `viewmodel` and `datasource`.
//!
//! Responsibility: turn CLI arguments, settings and override files into a
//! [`GenerationRequest`], run the core service against the local
//! filesystem, and present the report. No generation logic lives here.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use cleandroid_adapters::{LocalFilesystem, OverrideFileLoader, resource_bundle};
use cleandroid_core::{
    application::{GenerationReport, GenerationService},
    domain::{FeatureFlags, GenerationRequest, Name, RequestBuilder, UserOverrides},
    error::CleandroidError,
};

use crate::{
    cli::{
        ArchitectureArgs, DataSourceArgs, FeatureArgs, FeatureItemArgs, GenerationArgs,
        OutputFormat, ProjectArgs,
    },
    config::AppConfig,
    error::{CliError, CliResult},
    git,
    output::OutputManager,
};

/// What the generation commands share once arguments are resolved.
struct Invocation<'a> {
    args: &'a GenerationArgs,
    config: &'a AppConfig,
    destination: PathBuf,
    overrides: UserOverrides,
}

impl<'a> Invocation<'a> {
    fn new(args: &'a GenerationArgs, config: &'a AppConfig, destination: PathBuf) -> CliResult<Self> {
        let overrides = override_loader(config).load(&destination)?;
        Ok(Self {
            args,
            config,
            destination,
            overrides,
        })
    }

    /// Builder seeded with destination, package and flags.
    fn builder(&self) -> CliResult<RequestBuilder> {
        let package = self
            .args
            .package
            .clone()
            .or_else(|| self.config.defaults.package.clone())
            .ok_or(CliError::MissingArgument {
                what: "package",
                flag: "--package",
            })?;

        Ok(RequestBuilder::new(self.destination.clone())
            .package(package)
            .flags(self.flags()?))
    }

    fn flags(&self) -> CliResult<FeatureFlags> {
        let di = match self.args.di {
            Some(di) => di.into(),
            None => self
                .overrides
                .default_dependency_injection()
                .map_err(|e| CliError::ConfigError {
                    message: format!("[dependencyInjection] default: {e}"),
                    source: Some(Box::new(e)),
                })?
                .unwrap_or_default(),
        };

        Ok(FeatureFlags::default()
            .with_compose(self.args.compose)
            .with_ktlint(self.args.ktlint)
            .with_detekt(self.args.detekt)
            .with_network(self.args.network.into())
            .with_di(di))
    }

    /// Generate, print the report, stage if asked, then fail on any
    /// path that could not be written.
    fn run(self, request: GenerationRequest, output: &OutputManager) -> CliResult<()> {
        debug!(kind = request.kind(), flags = ?request.flags(), "Request built");

        let service = GenerationService::new(
            Box::new(LocalFilesystem::new()),
            resource_bundle(self.config.resources_dir()),
        )
        .strict_catalog(self.args.strict_catalog);

        output.header(&format!(
            "Generating {} in {}",
            request.kind(),
            self.destination.display()
        ))?;
        let report = service.generate(&request, &self.overrides)?;
        output.report(&self.destination, &report)?;

        if self.args.stage || self.overrides.stage_written_files() {
            stage(&self.destination, &report, output)?;
        }

        report.ensure_complete()?;
        if output.format() != OutputFormat::Json {
            output.success(&summary(&report))?;
        }
        info!(kind = request.kind(), "Generation completed");
        Ok(())
    }
}

// ── entry points ─────────────────────────────────────────────────────────────

/// `cleandroid project NAME`
#[instrument(skip_all, fields(name = %args.name))]
pub fn project(args: ProjectArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let destination = match &args.generation.destination {
        Some(dir) => dir.clone(),
        None => project_directory(&args.name)?,
    };
    let invocation = Invocation::new(&args.generation, &config, destination)?;

    let mut builder = invocation.builder()?.name(&args.name);
    if let Some(min_sdk) = args.min_sdk.or(config.defaults.min_sdk) {
        builder = builder.min_sdk(min_sdk);
    }
    if let Some(compile_sdk) = args.compile_sdk.or(config.defaults.compile_sdk) {
        builder = builder.compile_sdk(compile_sdk);
    }
    let request = builder.build_project().map_err(CleandroidError::from)?;

    invocation.run(request.into(), &output)
}

/// `cleandroid architecture`
#[instrument(skip_all)]
pub fn architecture(
    args: ArchitectureArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let invocation = Invocation::new(&args.generation, &config, destination(&args.generation))?;
    let request = invocation
        .builder()?
        .build_architecture()
        .map_err(CleandroidError::from)?;
    invocation.run(request.into(), &output)
}

/// `cleandroid feature NAME`
#[instrument(skip_all, fields(name = %args.name))]
pub fn feature(args: FeatureArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let invocation = Invocation::new(&args.generation, &config, destination(&args.generation))?;
    let request = invocation
        .builder()?
        .name(&args.name)
        .build_feature()
        .map_err(CleandroidError::from)?;
    invocation.run(request.into(), &output)
}

/// `cleandroid usecase NAME --feature FEATURE`
#[instrument(skip_all, fields(name = %args.name, feature = %args.feature))]
pub fn use_case(args: FeatureItemArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let invocation = Invocation::new(&args.generation, &config, destination(&args.generation))?;
    let request = invocation
        .builder()?
        .name(&args.name)
        .feature(&args.feature)
        .build_use_case()
        .map_err(CleandroidError::from)?;
    invocation.run(request.into(), &output)
}

/// `cleandroid viewmodel NAME --feature FEATURE`
#[instrument(skip_all, fields(name = %args.name, feature = %args.feature))]
pub fn view_model(args: FeatureItemArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let invocation = Invocation::new(&args.generation, &config, destination(&args.generation))?;
    let request = invocation
        .builder()?
        .name(&args.name)
        .feature(&args.feature)
        .build_view_model()
        .map_err(CleandroidError::from)?;
    invocation.run(request.into(), &output)
}

/// `cleandroid datasource NAME --feature FEATURE --flavor local|remote`
#[instrument(skip_all, fields(name = %args.item.name, feature = %args.item.feature))]
pub fn data_source(args: DataSourceArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let item = &args.item;
    let invocation = Invocation::new(&item.generation, &config, destination(&item.generation))?;
    let request = invocation
        .builder()?
        .name(&item.name)
        .feature(&item.feature)
        .flavor(args.flavor.into())
        .build_data_source()
        .map_err(CleandroidError::from)?;
    invocation.run(request.into(), &output)
}

// ── helpers ───────────────────────────────────────────────────────────────────

pub(crate) fn override_loader(config: &AppConfig) -> OverrideFileLoader {
    match &config.overrides.home_file {
        Some(path) => OverrideFileLoader::with_home_file(path),
        None => OverrideFileLoader::new(),
    }
}

fn destination(args: &GenerationArgs) -> PathBuf {
    args.destination.clone().unwrap_or_else(|| PathBuf::from("."))
}

/// `./<kebab-name>` for a new project.
fn project_directory(name: &str) -> CliResult<PathBuf> {
    let name = Name::parse("name", name).map_err(CleandroidError::from)?;
    Ok(PathBuf::from(name.kebab()))
}

fn stage(root: &Path, report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    let written: Vec<PathBuf> = report.written().cloned().collect();
    match git::stage(root, &written) {
        Ok(()) => {
            if !written.is_empty() {
                output.info(&format!("Staged {} file(s)", written.len()))?;
            }
            Ok(())
        }
        // files are on disk either way
        Err(e) => {
            warn!(error = %e, "Staging failed");
            output.warning(&format!("Could not stage generated files: {e}"))?;
            Ok(())
        }
    }
}

fn summary(report: &GenerationReport) -> String {
    format!(
        "{} created, {} updated, {} unchanged",
        report.created.len(),
        report.updated.len(),
        report.skipped.len()
    )
}
