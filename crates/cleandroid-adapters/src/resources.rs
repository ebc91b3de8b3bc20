//! Resource bundle adapters.
//!
//! A bundle is a named tree of binary files copied verbatim into generated
//! projects. [`BundledResources`] ships the launcher icons inside the
//! binary; [`DirectoryResources`] reads `<root>/<bundle>/**` from disk so a
//! team can swap in its own artwork.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use cleandroid_core::{
    application::{
        ApplicationError,
        blueprints::LAUNCHER_BUNDLE,
        ports::{ResourceBundle, ResourceFile, ResourceSource},
    },
    domain::RelativePath,
    error::CleandroidResult,
};

macro_rules! launcher_icon {
    ($density:literal) => {
        (
            concat!("mipmap-", $density, "/ic_launcher.png"),
            include_bytes!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/resources/launcher/mipmap-",
                $density,
                "/ic_launcher.png"
            ))
            .as_slice(),
        )
    };
}

static LAUNCHER_ICONS: [(&str, &[u8]); 5] = [
    launcher_icon!("mdpi"),
    launcher_icon!("hdpi"),
    launcher_icon!("xhdpi"),
    launcher_icon!("xxhdpi"),
    launcher_icon!("xxxhdpi"),
];

/// Resources compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledResources;

impl BundledResources {
    pub fn new() -> Self {
        Self
    }
}

impl ResourceBundle for BundledResources {
    fn names(&self) -> Vec<String> {
        vec![LAUNCHER_BUNDLE.to_owned()]
    }

    fn files(&self, bundle: &str) -> CleandroidResult<Vec<ResourceFile>> {
        if bundle != LAUNCHER_BUNDLE {
            return Err(ApplicationError::ResourceNotFound {
                bundle: bundle.to_owned(),
            }
            .into());
        }

        LAUNCHER_ICONS
            .iter()
            .map(|(path, bytes)| -> CleandroidResult<ResourceFile> {
                Ok(ResourceFile {
                    path: RelativePath::try_new(*path)?,
                    source: ResourceSource::Embedded(*bytes),
                })
            })
            .collect()
    }
}

/// Bundles read from subdirectories of `root`.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceBundle for DirectoryResources {
    fn names(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.root) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|e| e.path().is_dir())
            .filter_map(|e| e.file_name().to_str().map(str::to_owned))
            .collect();
        names.sort();
        names
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn files(&self, bundle: &str) -> CleandroidResult<Vec<ResourceFile>> {
        let base = self.root.join(bundle);
        if !base.is_dir() {
            return Err(ApplicationError::ResourceNotFound {
                bundle: bundle.to_owned(),
            }
            .into());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&base).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&base).to_path_buf();
                ApplicationError::filesystem(path, e.to_string())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&base)
                .map_err(|e| ApplicationError::filesystem(entry.path(), e.to_string()))?;
            files.push(ResourceFile {
                path: RelativePath::try_new(relative)?,
                source: ResourceSource::File(entry.path().to_path_buf()),
            });
        }

        debug!(bundle, count = files.len(), "Loaded resource bundle");
        Ok(files)
    }
}

/// The directory bundle when `dir` is given, the compiled-in one otherwise.
pub fn resource_bundle(dir: Option<&Path>) -> Box<dyn ResourceBundle> {
    match dir {
        Some(dir) => Box::new(DirectoryResources::new(dir)),
        None => Box::new(BundledResources::new()),
    }
}
