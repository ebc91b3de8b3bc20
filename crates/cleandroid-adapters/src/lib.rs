//! Infrastructure adapters for Cleandroid.
//!
//! This crate implements the ports defined in
//! `cleandroid-core::application::ports` and owns every direct I/O call:
//! the local and in-memory filesystems, resource bundles and the loader for
//! user override files.

pub mod filesystem;
pub mod overrides;
pub mod resources;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use overrides::{OverrideFileLoader, OverrideLocation};
pub use resources::{BundledResources, DirectoryResources, resource_bundle};
