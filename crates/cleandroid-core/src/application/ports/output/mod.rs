//! Driven (output) ports - implemented by infrastructure.
//!
//! The `cleandroid-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::RelativePath;
use crate::error::CleandroidResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `cleandroid_adapters::filesystem::LocalFilesystem` (production)
/// - `cleandroid_adapters::filesystem::MemoryFilesystem` (testing)
///
/// The engine never touches `std::fs` directly. Failures are reported as
/// `ApplicationError::Filesystem` carrying the offending path.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all missing parents. No-op if it exists.
    fn create_dir_all(&self, path: &Path) -> CleandroidResult<()>;

    /// Check if a file or directory exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a single file.
    fn delete(&self, path: &Path) -> CleandroidResult<()>;

    fn write_text(&self, path: &Path, content: &str) -> CleandroidResult<()>;

    fn write_bytes(&self, path: &Path, content: &[u8]) -> CleandroidResult<()>;

    /// Copy `from` to `to`. When `overwrite` is false an existing target is
    /// left alone.
    fn copy_file(&self, from: &Path, to: &Path, overwrite: bool) -> CleandroidResult<()>;

    /// Atomically replace `to` with `from`.
    fn rename(&self, from: &Path, to: &Path) -> CleandroidResult<()>;

    fn read_to_string(&self, path: &Path) -> CleandroidResult<String>;
}

/// Where the bytes of a resource file come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceSource {
    /// Compiled into the binary.
    Embedded(&'static [u8]),
    /// A file on disk, copied with [`Filesystem::copy_file`].
    File(PathBuf),
}

/// One file of a resource bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    /// Path inside the bundle, e.g. `mipmap-hdpi/ic_launcher.png`.
    pub path: RelativePath,
    pub source: ResourceSource,
}

/// Port for named trees of binary resources (launcher icons).
///
/// Implemented by:
/// - `cleandroid_adapters::resources::BundledResources` (compiled in)
/// - `cleandroid_adapters::resources::DirectoryResources` (on disk)
pub trait ResourceBundle: Send + Sync {
    /// Bundle names, sorted.
    fn names(&self) -> Vec<String>;

    /// Files of `bundle`, or `ApplicationError::ResourceNotFound`.
    fn files(&self, bundle: &str) -> CleandroidResult<Vec<ResourceFile>>;
}
