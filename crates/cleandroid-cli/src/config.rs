//! CLI settings.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns these settings; the core crate never sees them. Version
//! and dependency overrides are a separate concern handled by the override
//! INI files (see `cleandroid_adapters::overrides`).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `CLEANDROID_RESOURCES_DIR`, then `CLEANDROID_<SECTION>__<KEY>`
//! 3. Settings file (`--config`, or `config.toml` in the platform config dir)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "CLEANDROID";
pub const RESOURCES_DIR_ENV: &str = "CLEANDROID_RESOURCES_DIR";

/// CLI settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fallbacks for generation flags.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Where launcher resources come from.
    pub resources: ResourceConfig,
    /// Override file locations.
    pub overrides: OverridesConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Used when `--package` is omitted.
    pub package: Option<String>,
    pub min_sdk: Option<u32>,
    pub compile_sdk: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Directory bundle replacing the built-in launcher icons.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverridesConfig {
    /// Replaces `<config dir>/cleandroid/overrides.ini`.
    pub home_file: Option<PathBuf>,
}

impl AppConfig {
    /// Load settings from the defaults, the settings file and the
    /// environment.
    ///
    /// A file passed with `--config` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };

        let config = Config::builder()
            .add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option(
                "resources.dir",
                std::env::var(RESOURCES_DIR_ENV).ok().filter(|v| !v.is_empty()),
            )?
            .build()
            .with_context(|| format!("reading settings from {}", path.display()))?;

        config
            .try_deserialize()
            .with_context(|| format!("invalid settings in {}", path.display()))
    }

    /// Path to the default settings file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.cleandroid.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "cleandroid", "cleandroid")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".cleandroid.toml"))
    }

    pub fn resources_dir(&self) -> Option<&Path> {
        self.resources.dir.as_deref()
    }
}
