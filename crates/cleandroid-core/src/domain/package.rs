//! Package namespace → directory chain.
//!
//! Pure functions, no I/O. Segmentation drops empty segments produced by
//! leading, trailing or repeated dots, and never trims whitespace inside a
//! segment.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Split a dotted namespace into its non-empty segments.
///
/// ```
/// use cleandroid_core::domain::package::to_segments;
///
/// assert_eq!(to_segments("com..example."), vec!["com", "example"]);
/// assert!(to_segments("...").is_empty());
/// ```
pub fn to_segments(namespace: &str) -> Vec<String> {
    namespace
        .split('.')
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Fold `segments` onto `root`, one directory level per segment.
pub fn build_directory<S: AsRef<str>>(root: impl AsRef<Path>, segments: &[S]) -> PathBuf {
    segments
        .iter()
        .fold(root.as_ref().to_path_buf(), |path, segment| {
            path.join(segment.as_ref())
        })
}

/// `<module>/src/<source_set>/java/<segments…>`
pub fn kotlin_source_dir<S: AsRef<str>>(
    module_root: impl AsRef<Path>,
    source_set: &str,
    segments: &[S],
) -> PathBuf {
    build_directory(
        module_root.as_ref().join("src").join(source_set).join("java"),
        segments,
    )
}

/// A validated package namespace.
///
/// Invariant: at least one segment, every segment a Kotlin identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageName {
    segments: Vec<String>,
}

impl PackageName {
    /// Parse and validate a namespace.
    ///
    /// Empty segments collapse silently; an empty result or a segment that is
    /// not an identifier is rejected.
    pub fn parse(namespace: &str) -> Result<Self, DomainError> {
        let segments = to_segments(namespace.trim());

        if segments.is_empty() {
            return Err(DomainError::InvalidNamespace {
                namespace: namespace.to_owned(),
                reason: "no package segments".into(),
            });
        }

        if let Some(bad) = segments.iter().find(|s| !is_identifier(s)) {
            return Err(DomainError::InvalidNamespace {
                namespace: namespace.to_owned(),
                reason: format!("segment '{bad}' is not a valid identifier"),
            });
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// A child package, e.g. `com.example` + `feature.login`.
    ///
    /// Extra segments are appended as given; callers pass identifiers they
    /// built themselves.
    pub fn child(&self, extra: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(to_segments(extra));
        Self { segments }
    }

    pub fn directory(&self, root: impl AsRef<Path>) -> PathBuf {
        build_directory(root, &self.segments)
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
