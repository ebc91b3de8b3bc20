//! Application ports (traits) for external dependencies.
//!
//! - **Driven (output) ports**: called by the application, implemented by
//!   infrastructure
//!   - `Filesystem`: file operations
//!   - `ResourceBundle`: binary resources copied into generated projects
//! - **Driving (input) ports**: the CLI calls `GenerationService` directly

pub mod output;

pub use output::{Filesystem, ResourceBundle, ResourceFile, ResourceSource};

#[cfg(test)]
pub use output::MockFilesystem;
