//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use cleandroid_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{CleandroidError, CleandroidResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> CleandroidResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn delete(&self, path: &Path) -> CleandroidResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "delete file"))
    }

    fn write_text(&self, path: &Path, content: &str) -> CleandroidResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn write_bytes(&self, path: &Path, content: &[u8]) -> CleandroidResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn copy_file(&self, from: &Path, to: &Path, overwrite: bool) -> CleandroidResult<()> {
        if !overwrite && to.exists() {
            return Ok(());
        }
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(to, e, "copy file"))
    }

    fn rename(&self, from: &Path, to: &Path) -> CleandroidResult<()> {
        std::fs::rename(from, to).map_err(|e| map_io_error(to, e, "rename file"))
    }

    fn read_to_string(&self, path: &Path) -> CleandroidResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> CleandroidError {
    ApplicationError::filesystem(path, format!("Failed to {operation}: {e}")).into()
}
