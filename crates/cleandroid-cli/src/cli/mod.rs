//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use cleandroid_core::domain::{DataSourceFlavor, DependencyInjection, NetworkClient};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "cleandroid",
    bin_name = "cleandroid",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Android Clean Architecture scaffolding",
    long_about = "Cleandroid generates Android projects, Clean Architecture modules \
                  and Kotlin sources wired to the project's Gradle version catalog.",
    after_help = "EXAMPLES:\n\
        \x20 cleandroid project \"Notes\" --package com.acme.notes --compose --di hilt\n\
        \x20 cleandroid feature login -d notes --package com.acme.notes\n\
        \x20 cleandroid datasource user --feature login --flavor remote --network retrofit -d notes -p com.acme.notes\n\
        \x20 cleandroid completions bash > /usr/share/bash-completion/completions/cleandroid",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new Android application project.
    #[command(
        visible_alias = "new",
        about = "Create a new Android project",
        after_help = "EXAMPLES:\n\
            \x20 cleandroid project Notes --package com.acme.notes\n\
            \x20 cleandroid project Notes -p com.acme.notes --compose --ktlint --detekt\n\
            \x20 cleandroid project Notes -p com.acme.notes --min-sdk 26 -d ~/src/notes"
    )]
    Project(ProjectArgs),

    /// Add the shared core, domain and data modules.
    #[command(
        visible_alias = "arch",
        about = "Add core/domain/data modules to a project"
    )]
    Architecture(ArchitectureArgs),

    /// Add a feature module.
    #[command(about = "Add a feature module")]
    Feature(FeatureArgs),

    /// Add a use case to a feature.
    #[command(visible_alias = "uc", about = "Add a use case to a feature")]
    Usecase(FeatureItemArgs),

    /// Add a view model (and screen with Compose) to a feature.
    #[command(visible_alias = "vm", about = "Add a view model to a feature")]
    Viewmodel(FeatureItemArgs),

    /// Add a local or remote data source to a feature.
    #[command(visible_alias = "ds", about = "Add a data source to a feature")]
    Datasource(DataSourceArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 cleandroid completions bash > ~/.local/share/bash-completion/completions/cleandroid\n\
            \x20 cleandroid completions zsh  > ~/.zfunc/_cleandroid\n\
            \x20 cleandroid completions fish > ~/.config/fish/completions/cleandroid.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect and initialise configuration files.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 cleandroid config path\n\
            \x20 cleandroid config list\n\
            \x20 cleandroid config init"
    )]
    Config(ConfigCommands),
}

// ── shared generation flags ──────────────────────────────────────────────────

/// Options every generation command accepts.
#[derive(Debug, Args)]
pub struct GenerationArgs {
    /// Root of the Android project.
    #[arg(
        short = 'd',
        long = "destination",
        value_name = "DIR",
        help = "Project root (default: current directory)"
    )]
    pub destination: Option<PathBuf>,

    /// Base package, e.g. `com.acme.notes`. Falls back to
    /// `defaults.package` in the settings file.
    #[arg(
        short = 'p',
        long = "package",
        value_name = "PACKAGE",
        help = "Base package of the application"
    )]
    pub package: Option<String>,

    /// Use Jetpack Compose for UI code.
    #[arg(long = "compose", help = "Generate Jetpack Compose UI")]
    pub compose: bool,

    /// Wire the ktlint Gradle plugin.
    #[arg(long = "ktlint", help = "Add ktlint")]
    pub ktlint: bool,

    /// Wire the detekt Gradle plugin.
    #[arg(long = "detekt", help = "Add detekt")]
    pub detekt: bool,

    /// HTTP client for remote data sources.
    #[arg(
        long = "network",
        value_enum,
        default_value = "none",
        help = "Network client"
    )]
    pub network: NetworkArg,

    /// Dependency-injection framework. Falls back to
    /// `[dependencyInjection] default` in the override files.
    #[arg(long = "di", value_enum, help = "Dependency injection framework")]
    pub di: Option<DiArg>,

    /// Only count dependencies the project catalog declares as available.
    #[arg(
        long = "strict-catalog",
        help = "Ignore built-in catalog defaults"
    )]
    pub strict_catalog: bool,

    /// Stage written files with `git add`.
    #[arg(long = "stage", help = "Stage generated files in git")]
    pub stage: bool,
}

// ── project ───────────────────────────────────────────────────────────────────

/// Arguments for `cleandroid project`.
#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// Application name. Also names the project directory unless
    /// `--destination` is given.
    #[arg(value_name = "NAME", help = "Application name")]
    pub name: String,

    #[arg(long = "min-sdk", value_name = "LEVEL", help = "minSdk (default: 24)")]
    pub min_sdk: Option<u32>,

    #[arg(
        long = "compile-sdk",
        value_name = "LEVEL",
        help = "compileSdk and targetSdk (default: 35)"
    )]
    pub compile_sdk: Option<u32>,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

/// Arguments for `cleandroid architecture`.
#[derive(Debug, Args)]
pub struct ArchitectureArgs {
    #[command(flatten)]
    pub generation: GenerationArgs,
}

/// Arguments for `cleandroid feature`.
#[derive(Debug, Args)]
pub struct FeatureArgs {
    /// Feature name, e.g. `login` or `"User Profile"`.
    #[arg(value_name = "NAME", help = "Feature name")]
    pub name: String,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

/// Arguments for commands that add one class to an existing feature.
#[derive(Debug, Args)]
pub struct FeatureItemArgs {
    #[arg(value_name = "NAME", help = "Class base name")]
    pub name: String,

    #[arg(
        short = 'f',
        long = "feature",
        value_name = "FEATURE",
        help = "Feature the class belongs to"
    )]
    pub feature: String,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

/// Arguments for `cleandroid datasource`.
#[derive(Debug, Args)]
pub struct DataSourceArgs {
    #[command(flatten)]
    pub item: FeatureItemArgs,

    #[arg(
        long = "flavor",
        value_enum,
        default_value = "local",
        help = "Data source flavor"
    )]
    pub flavor: FlavorArg,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `cleandroid completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `cleandroid config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the settings file and override files that are read.
    Path {
        /// Project whose `.cleandroid.ini` should be listed.
        #[arg(short = 'd', long = "destination", value_name = "DIR")]
        destination: Option<PathBuf>,
    },
    /// Print the effective settings.
    List,
    /// Write a commented override file to the user config directory.
    Init {
        /// Overwrite an existing file.
        #[arg(short = 'f', long = "force")]
        force: bool,

        /// Write the CLI settings file instead of the override file.
        #[arg(long = "settings")]
        settings: bool,
    },
}

// ── value enums ───────────────────────────────────────────────────────────────

/// `--di` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum DiArg {
    /// Also accepted as `dagger-hilt`.
    #[value(alias = "dagger-hilt")]
    Hilt,
    Koin,
    /// Also accepted as `manual`.
    #[value(alias = "manual")]
    None,
}

impl From<DiArg> for DependencyInjection {
    fn from(arg: DiArg) -> Self {
        match arg {
            DiArg::Hilt => Self::Hilt,
            DiArg::Koin => Self::Koin,
            DiArg::None => Self::None,
        }
    }
}

/// `--network` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum NetworkArg {
    None,
    Retrofit,
    Ktor,
}

impl From<NetworkArg> for NetworkClient {
    fn from(arg: NetworkArg) -> Self {
        match arg {
            NetworkArg::None => Self::None,
            NetworkArg::Retrofit => Self::Retrofit,
            NetworkArg::Ktor => Self::Ktor,
        }
    }
}

/// `--flavor` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FlavorArg {
    Local,
    Remote,
}

impl From<FlavorArg> for DataSourceFlavor {
    fn from(arg: FlavorArg) -> Self {
        match arg {
            FlavorArg::Local => Self::Local,
            FlavorArg::Remote => Self::Remote,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
