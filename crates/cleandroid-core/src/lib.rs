//! Cleandroid Core - Hexagonal Architecture Implementation
//!
//! Domain and application layers of the Cleandroid Android scaffolder,
//! following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          cleandroid-cli (CLI)           │
//! └──────────────────┬──────────────────────┘
//!                    │ builds requests, calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │           GenerationService             │
//! │  catalog → blueprint → materializer     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     Ports (Filesystem, ResourceBundle)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   cleandroid-adapters (Infrastructure)  │
//! │  LocalFilesystem, BundledResources, ... │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cleandroid_core::prelude::*;
//!
//! # fn run(fs: Box<dyn Filesystem>, icons: Box<dyn ResourceBundle>) -> CleandroidResult<()> {
//! let request = RequestBuilder::new("./notes")
//!     .name("login")
//!     .package("com.acme.notes")
//!     .flags(FeatureFlags::default().with_compose(true))
//!     .build_feature()?;
//!
//! let report = GenerationService::new(fs, icons)
//!     .generate(&request.into(), &UserOverrides::default())?;
//! report.ensure_complete()?;
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

/// Everything a driving adapter needs.
pub mod prelude {
    pub use crate::application::{
        GenerationReport, GenerationService,
        ports::{Filesystem, ResourceBundle, ResourceFile, ResourceSource},
    };
    pub use crate::domain::{
        CatalogVariant, DataSourceFlavor, DependencyInjection, FeatureFlags, GenerationRequest,
        NetworkClient, OverrideFile, RequestBuilder, UserOverrides,
    };
    pub use crate::error::{CleandroidError, CleandroidResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
