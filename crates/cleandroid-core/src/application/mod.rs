//! Application layer for Cleandroid.
//!
//! This layer contains:
//! - **Services**: request orchestration ([`GenerationService`])
//! - **Blueprints**: what each request generates
//! - **Assembler**: flag and catalog gated content fragments
//! - **Materializer**: idempotent writes through the filesystem port
//! - **Ports**: traits the adapters implement
//!
//! Business rules live in `crate::domain`; nothing here touches `std::fs`.

pub mod assembler;
pub mod blueprints;
pub mod error;
pub mod materializer;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use assembler::{ContentAssembler, ModuleKind};
pub use materializer::{Materializer, Outcome};
pub use ports::{Filesystem, ResourceBundle, ResourceFile, ResourceSource};
pub use services::{CatalogAdditions, FailedPath, GenerationReport, GenerationService};

pub use error::ApplicationError;
