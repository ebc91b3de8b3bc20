//! Staging generated files with `git add`.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, instrument};

use crate::error::{CliError, CliResult};

/// Run `git -C <root> add -- <paths>`, with paths made relative to `root`.
/// A no-op for an empty list.
#[instrument(skip_all, fields(root = %root.display(), count = paths.len()))]
pub fn stage(root: &Path, paths: &[PathBuf]) -> CliResult<()> {
    if paths.is_empty() {
        return Ok(());
    }

    let command = format!("git add ({} paths)", paths.len());
    let output = Command::new("git")
        .arg("-C")
        .arg(root)
        .arg("add")
        .arg("--")
        .args(paths.iter().map(|p| p.strip_prefix(root).unwrap_or(p.as_path())))
        .output()
        .map_err(|e| CliError::ExternalCommandFailed {
            command: command.clone(),
            source: Some(Box::new(e)),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
        return Err(CliError::ExternalCommandFailed {
            command,
            source: Some(stderr.into()),
        });
    }

    debug!("Staged generated files");
    Ok(())
}
