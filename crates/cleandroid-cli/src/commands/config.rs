//! `cleandroid config`: show and initialise settings and override files.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{
    cli::{ConfigCommands, OutputFormat},
    commands::generate::override_loader,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct FileEntry {
    role: &'static str,
    path: PathBuf,
    exists: bool,
}

/// Dispatch to the correct config subcommand. `settings_path` is the file
/// the settings were loaded from (or would be).
pub fn execute(
    cmd: ConfigCommands,
    settings_path: PathBuf,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Path { destination } => {
            let destination = destination.unwrap_or_else(|| PathBuf::from("."));
            let entries = files(&settings_path, &config, &destination);
            if output.format() == OutputFormat::Json {
                output.json(&entries)?;
                return Ok(());
            }
            for entry in entries {
                let state = if entry.exists { "" } else { "  (not found)" };
                output.print(&format!(
                    "{:<18} {}{state}",
                    entry.role,
                    entry.path.display()
                ))?;
            }
        }

        ConfigCommands::List => {
            if output.format() == OutputFormat::Json {
                output.json(&config)?;
                return Ok(());
            }
            output.header("Current settings:")?;
            output.print(&to_toml(&config)?)?;
        }

        ConfigCommands::Init { force, settings } => {
            let (path, written) = if settings {
                (settings_path.clone(), init_settings(&settings_path, force)?)
            } else {
                let loader = override_loader(&config);
                let written = loader.init_home_file(force)?;
                let path = loader.home_file().map(Path::to_path_buf).unwrap_or_default();
                (path, written)
            };

            if written {
                output.success(&format!("Created {}", path.display()))?;
            } else {
                output.warning(&format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                ))?;
            }
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn files(settings_path: &Path, config: &AppConfig, destination: &Path) -> Vec<FileEntry> {
    let mut entries = vec![FileEntry {
        role: "settings",
        path: settings_path.to_path_buf(),
        exists: settings_path.is_file(),
    }];

    let locations = override_loader(config).locations(destination);
    let project_index = locations.len().saturating_sub(1);
    for (index, location) in locations.into_iter().enumerate() {
        entries.push(FileEntry {
            role: if index == project_index {
                "project overrides"
            } else {
                "user overrides"
            },
            path: location.path,
            exists: location.exists,
        });
    }

    if let Some(dir) = config.resources_dir() {
        entries.push(FileEntry {
            role: "resources",
            path: dir.to_path_buf(),
            exists: dir.is_dir(),
        });
    }
    entries
}

fn to_toml(config: &AppConfig) -> CliResult<String> {
    toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise settings: {e}"),
        source: Some(Box::new(e)),
    })
}

fn init_settings(path: &Path, force: bool) -> CliResult<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    let text = to_toml(&AppConfig::default())?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, text)
        .with_cli_context(|| format!("Failed to write '{}'", path.display()))?;
    Ok(true)
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_list_settings_then_overrides() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".cleandroid.ini"), "").unwrap();
        let mut config = AppConfig::default();
        config.overrides.home_file = Some(dir.path().join("home.ini"));

        let entries = files(&dir.path().join("settings.toml"), &config, dir.path());
        let roles: Vec<_> = entries.iter().map(|e| e.role).collect();
        assert_eq!(roles, ["settings", "user overrides", "project overrides"]);
        assert!(!entries[0].exists);
        assert!(!entries[1].exists);
        assert!(entries[2].exists);
    }

    #[test]
    fn init_settings_respects_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        assert!(init_settings(&path, false).unwrap());
        assert!(!init_settings(&path, false).unwrap());
        assert!(init_settings(&path, true).unwrap());
        assert_eq!(AppConfig::load(Some(&path)).unwrap(), AppConfig::default());
    }
}
