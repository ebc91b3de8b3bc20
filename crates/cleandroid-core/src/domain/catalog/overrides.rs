//! User override files (`overrides.ini` in the user config directory and
//! `.cleandroid.ini` in a project).
//!
//! ```ini
//! # versions used when generating a new project
//! [new.versions]
//! composeBom=2025.08.01
//!
//! # versions used when adding code to an existing project
//! [existing.versions]
//! ktor=3.0.0
//!
//! [git]
//! stage=true
//!
//! [dependencyInjection]
//! default=hilt
//!
//! [disabled]
//! detekt=true
//! ```
//!
//! Parsing is lenient: malformed lines are skipped, unknown sections are
//! dropped wholesale.

use std::collections::{BTreeMap, BTreeSet};

use super::SkippedLine;
use super::model::DependencyId;
use crate::domain::{error::DomainError, value_objects::DependencyInjection};

/// Which version table applies to a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogVariant {
    /// Generating a brand new project.
    New,
    /// Adding modules or code to an existing project.
    Existing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    NewVersions,
    ExistingVersions,
    Git,
    DependencyInjection,
    Disabled,
    Unknown,
}

impl Section {
    fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "new.versions" => Self::NewVersions,
            "existing.versions" => Self::ExistingVersions,
            "git" => Self::Git,
            "dependencyinjection" => Self::DependencyInjection,
            "disabled" => Self::Disabled,
            _ => Self::Unknown,
        }
    }
}

/// One parsed override file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideFile {
    new_versions: BTreeMap<String, String>,
    existing_versions: BTreeMap<String, String>,
    git: BTreeMap<String, String>,
    dependency_injection: BTreeMap<String, String>,
    disabled: BTreeMap<String, String>,
    skipped: Vec<SkippedLine>,
}

impl OverrideFile {
    pub fn parse(text: &str) -> Self {
        let mut file = Self::default();
        let mut section: Option<Section> = None;

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                section = match rest.strip_suffix(']').map(str::trim) {
                    Some(name) if !name.is_empty() => Some(Section::from_name(name)),
                    _ => {
                        file.skip(line_no, raw, "malformed section header");
                        Some(Section::Unknown)
                    }
                };
                continue;
            }

            let Some(current) = section else {
                file.skip(line_no, raw, "key/value outside of a section");
                continue;
            };
            if current == Section::Unknown {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                file.skip(line_no, raw, "expected key=value");
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                file.skip(line_no, raw, "empty key");
                continue;
            }
            let value = value.trim().to_owned();

            let table = match current {
                Section::NewVersions => &mut file.new_versions,
                Section::ExistingVersions => &mut file.existing_versions,
                Section::Git => &mut file.git,
                Section::DependencyInjection => &mut file.dependency_injection,
                Section::Disabled => &mut file.disabled,
                Section::Unknown => continue,
            };
            table.insert(key.to_owned(), value);
        }

        file
    }

    pub fn skipped(&self) -> &[SkippedLine] {
        &self.skipped
    }

    fn skip(&mut self, line: usize, text: &str, reason: &str) {
        self.skipped.push(SkippedLine {
            line,
            text: text.to_owned(),
            reason: reason.to_owned(),
        });
    }
}

/// Home and project override files merged per key, project winning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserOverrides {
    new_versions: BTreeMap<String, String>,
    existing_versions: BTreeMap<String, String>,
    git: BTreeMap<String, String>,
    dependency_injection: BTreeMap<String, String>,
    disabled: BTreeMap<String, String>,
}

impl UserOverrides {
    pub fn merge(home: Option<&OverrideFile>, project: Option<&OverrideFile>) -> Self {
        let mut merged = Self::default();
        for file in [home, project].into_iter().flatten() {
            merged.new_versions.extend(file.new_versions.clone());
            merged.existing_versions.extend(file.existing_versions.clone());
            merged.git.extend(file.git.clone());
            merged
                .dependency_injection
                .extend(file.dependency_injection.clone());
            merged.disabled.extend(file.disabled.clone());
        }
        merged
    }

    /// Version overrides for the given variant.
    pub fn versions(&self, variant: CatalogVariant) -> &BTreeMap<String, String> {
        match variant {
            CatalogVariant::New => &self.new_versions,
            CatalogVariant::Existing => &self.existing_versions,
        }
    }

    /// Dependencies switched off with `[disabled] <id>=true`.
    ///
    /// Unknown ids are ignored.
    pub fn disabled(&self) -> BTreeSet<DependencyId> {
        self.disabled
            .iter()
            .filter(|(_, v)| is_truthy(v))
            .filter_map(|(k, _)| k.parse::<DependencyId>().ok())
            .collect()
    }

    /// `[git] stage=true`
    pub fn stage_written_files(&self) -> bool {
        self.git.get("stage").is_some_and(|v| is_truthy(v))
    }

    /// `[dependencyInjection] default=...`, validated.
    pub fn default_dependency_injection(&self) -> Result<Option<DependencyInjection>, DomainError> {
        self.dependency_injection
            .get("default")
            .filter(|v| !v.is_empty())
            .map(|v| v.parse())
            .transpose()
    }

    pub fn with_version(mut self, variant: CatalogVariant, key: &str, value: &str) -> Self {
        let table = match variant {
            CatalogVariant::New => &mut self.new_versions,
            CatalogVariant::Existing => &mut self.existing_versions,
        };
        table.insert(key.to_owned(), value.to_owned());
        self
    }

    pub fn with_disabled(mut self, id: DependencyId) -> Self {
        self.disabled.insert(id.as_str().to_owned(), "true".into());
        self
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "1" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_file_overrides_home_file_per_key() {
        let home = OverrideFile::parse("[new.versions]\ncomposeBom=2000.01.01\nktor=1.0.0\n");
        let project = OverrideFile::parse("[new.versions]\ncomposeBom=2025.08.01\n");
        let merged = UserOverrides::merge(Some(&home), Some(&project));

        let versions = merged.versions(CatalogVariant::New);
        assert_eq!(versions.get("composeBom").map(String::as_str), Some("2025.08.01"));
        assert_eq!(versions.get("ktor").map(String::as_str), Some("1.0.0"));
    }

    #[test]
    fn comments_blank_lines_and_unknown_sections_are_ignored() {
        let text = "\
# comment
; also a comment

[mystery]
foo=bar
[existing.versions]
kotlin = 2.1.0
";
        let file = OverrideFile::parse(text);
        let merged = UserOverrides::merge(None, Some(&file));
        assert_eq!(
            merged.versions(CatalogVariant::Existing).get("kotlin").map(String::as_str),
            Some("2.1.0")
        );
        assert!(merged.versions(CatalogVariant::New).is_empty());
        assert!(file.skipped().is_empty());
    }

    #[test]
    fn malformed_lines_are_reported_and_skipped() {
        let text = "orphan=1\n[git]\nnot a pair\n[broken\nstage=true\n";
        let file = OverrideFile::parse(text);
        let lines: Vec<usize> = file.skipped().iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![1, 3, 4]);
        // `stage` sits under a malformed header and is dropped
        assert!(!UserOverrides::merge(None, Some(&file)).stage_written_files());
    }

    #[test]
    fn git_stage_flag() {
        let file = OverrideFile::parse("[git]\nstage=yes\n");
        assert!(UserOverrides::merge(Some(&file), None).stage_written_files());
    }

    #[test]
    fn default_di_is_validated() {
        let ok = OverrideFile::parse("[dependencyInjection]\ndefault=koin\n");
        assert_eq!(
            UserOverrides::merge(Some(&ok), None).default_dependency_injection(),
            Ok(Some(DependencyInjection::Koin))
        );

        let bad = OverrideFile::parse("[dependencyInjection]\ndefault=dagger\n");
        assert!(matches!(
            UserOverrides::merge(Some(&bad), None).default_dependency_injection(),
            Err(DomainError::UnknownDependencyInjection { .. })
        ));

        assert_eq!(UserOverrides::default().default_dependency_injection(), Ok(None));
    }

    #[test]
    fn disabled_section_resolves_known_ids() {
        let file = OverrideFile::parse("[disabled]\ndetekt=true\nktlint=false\nunknownThing=true\n");
        let disabled = UserOverrides::merge(None, Some(&file)).disabled();
        assert_eq!(disabled.into_iter().collect::<Vec<_>>(), vec![DependencyId::Detekt]);
    }
}
