//! Application services - orchestrate use cases.

pub mod generation_service;

pub use generation_service::{
    CATALOG_PATH, CatalogAdditions, FailedPath, GenerationReport, GenerationService,
};
