//! Override file discovery and loading.
//!
//! Two optional INI files feed [`UserOverrides`]:
//!
//! | File                                    | Scope       |
//! |-----------------------------------------|-------------|
//! | `<config dir>/cleandroid/overrides.ini` | every run   |
//! | `<destination>/.cleandroid.ini`         | one project |
//!
//! The project file wins per key. A missing file is not an error.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use cleandroid_core::{
    application::ApplicationError,
    domain::{OverrideFile, UserOverrides},
    error::CleandroidResult,
};

pub const HOME_FILE_NAME: &str = "overrides.ini";
pub const PROJECT_FILE_NAME: &str = ".cleandroid.ini";

/// Commented starting point written by `cleandroid config init`.
pub const OVERRIDES_TEMPLATE: &str = r#"# Cleandroid overrides.
# A `.cleandroid.ini` in a project overrides this file key by key.

# Versions used when generating a new project.
[new.versions]
# composeBom=2025.08.01

# Versions used when adding modules to an existing project.
[existing.versions]
# kotlin=2.0.21

[git]
# stage=true

[dependencyInjection]
# default=hilt

# Dependencies that must never be referenced, e.g. detekt=true
[disabled]
"#;

/// Where an override file lives and whether it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideLocation {
    pub path: PathBuf,
    pub exists: bool,
}

/// Finds and parses the home and project override files.
#[derive(Debug, Clone)]
pub struct OverrideFileLoader {
    home: Option<PathBuf>,
}

impl OverrideFileLoader {
    /// Home file under the platform config directory.
    pub fn new() -> Self {
        Self {
            home: default_home_file(),
        }
    }

    /// Use `path` as the home file instead of the platform default.
    pub fn with_home_file(path: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(path.into()),
        }
    }

    /// No home file at all.
    pub fn project_only() -> Self {
        Self { home: None }
    }

    pub fn home_file(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    pub fn project_file(destination: &Path) -> PathBuf {
        destination.join(PROJECT_FILE_NAME)
    }

    /// Both candidate files, home first.
    pub fn locations(&self, destination: &Path) -> Vec<OverrideLocation> {
        self.home
            .iter()
            .cloned()
            .chain(std::iter::once(Self::project_file(destination)))
            .map(|path| OverrideLocation {
                exists: path.is_file(),
                path,
            })
            .collect()
    }

    /// Merge the home file and the project file for `destination`.
    pub fn load(&self, destination: &Path) -> CleandroidResult<UserOverrides> {
        let home = match &self.home {
            Some(path) => read_file(path)?,
            None => None,
        };
        let project = read_file(&Self::project_file(destination))?;
        Ok(UserOverrides::merge(home.as_ref(), project.as_ref()))
    }

    /// Write [`OVERRIDES_TEMPLATE`] to the home file. Returns `false` when
    /// the file exists and `force` is not set.
    pub fn init_home_file(&self, force: bool) -> CleandroidResult<bool> {
        let Some(path) = &self.home else {
            return Err(ApplicationError::filesystem(
                PathBuf::from(HOME_FILE_NAME),
                "no config directory on this platform",
            )
            .into());
        };
        if path.exists() && !force {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ApplicationError::filesystem(parent, e.to_string()))?;
        }
        std::fs::write(path, OVERRIDES_TEMPLATE)
            .map_err(|e| ApplicationError::filesystem(path, e.to_string()))?;
        Ok(true)
    }
}

impl Default for OverrideFileLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn default_home_file() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| {
        dirs.config_dir()
            .join("cleandroid")
            .join(HOME_FILE_NAME)
    })
}

fn read_file(path: &Path) -> CleandroidResult<Option<OverrideFile>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No override file");
            return Ok(None);
        }
        Err(e) => return Err(ApplicationError::filesystem(path, e.to_string()).into()),
    };

    let file = OverrideFile::parse(&text);
    for skipped in file.skipped() {
        warn!(
            path = %path.display(),
            line = skipped.line,
            text = %skipped.text,
            reason = %skipped.reason,
            "Skipped override line"
        );
    }
    debug!(path = %path.display(), "Loaded override file");
    Ok(Some(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cleandroid_core::domain::{CatalogVariant, DependencyId};

    #[test]
    fn project_file_wins_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("home.ini");
        std::fs::write(&home, "[new.versions]\ncomposeBom=1\nkotlin=2\n").unwrap();
        let project = dir.path().join("app");
        std::fs::create_dir_all(&project).unwrap();
        std::fs::write(project.join(PROJECT_FILE_NAME), "[new.versions]\ncomposeBom=3\n").unwrap();

        let overrides = OverrideFileLoader::with_home_file(&home).load(&project).unwrap();
        let versions = overrides.versions(CatalogVariant::New);
        assert_eq!(versions.get("composeBom").map(String::as_str), Some("3"));
        assert_eq!(versions.get("kotlin").map(String::as_str), Some("2"));
    }

    #[test]
    fn missing_files_are_empty_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let loader = OverrideFileLoader::with_home_file(dir.path().join("nope.ini"));
        let overrides = loader.load(dir.path()).unwrap();
        assert_eq!(overrides, UserOverrides::default());
    }

    #[test]
    fn disabled_section_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PROJECT_FILE_NAME), "[disabled]\ndetekt=true\n").unwrap();

        let overrides = OverrideFileLoader::project_only().load(dir.path()).unwrap();
        assert!(overrides.disabled().contains(&DependencyId::Detekt));
    }

    #[test]
    fn init_writes_template_once() {
        let dir = tempfile::tempdir().unwrap();
        let loader = OverrideFileLoader::with_home_file(dir.path().join("cfg/overrides.ini"));

        assert!(loader.init_home_file(false).unwrap());
        assert!(!loader.init_home_file(false).unwrap());
        assert!(loader.init_home_file(true).unwrap());

        let overrides = loader.load(dir.path()).unwrap();
        assert_eq!(overrides, UserOverrides::default());
    }

    #[test]
    fn locations_report_existence() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PROJECT_FILE_NAME), "").unwrap();
        let loader = OverrideFileLoader::with_home_file(dir.path().join("missing.ini"));

        let locations = loader.locations(dir.path());
        assert_eq!(locations.len(), 2);
        assert!(!locations[0].exists);
        assert!(locations[1].exists);
    }
}
