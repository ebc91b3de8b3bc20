//! Lenient reader for a project's `gradle/libs.versions.toml`.
//!
//! The file is read line by line instead of as a whole TOML document so that a
//! single hand-edited mistake costs one entry, not the whole catalog. Each
//! value is still parsed with `toml` as an inline value.

use std::collections::BTreeMap;

use toml::Value;

use super::SkippedLine;
use super::alias::{Alias, is_valid_alias, normalize};
use super::model::{Coordinate, DependencyKind};

/// Version of a declared entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSpec {
    Literal(String),
    Ref(String),
}

/// One `[libraries]` or `[plugins]` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredEntry {
    pub alias: Alias,
    pub kind: DependencyKind,
    /// `group:artifact` or plugin id.
    pub notation: String,
    pub version: Option<VersionSpec>,
}

impl DeclaredEntry {
    pub fn matches(&self, coordinate: &Coordinate) -> bool {
        self.kind == coordinate.kind() && self.notation == coordinate.notation()
    }
}

/// What a project catalog declares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectCatalog {
    versions: BTreeMap<String, String>,
    entries: Vec<DeclaredEntry>,
    skipped: Vec<SkippedLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Versions,
    Libraries,
    Plugins,
    Ignored,
}

impl ProjectCatalog {
    /// Parse catalog text. Never fails; unusable lines end up in
    /// [`ProjectCatalog::skipped`].
    pub fn parse(text: &str) -> Self {
        let mut catalog = Self::default();
        let mut section = Section::Ignored;

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') {
                section = match parse_header(line) {
                    Some("versions") => Section::Versions,
                    Some("libraries") => Section::Libraries,
                    Some("plugins") => Section::Plugins,
                    Some(_) => Section::Ignored,
                    None => {
                        catalog.skip(line_no, raw, "malformed section header");
                        Section::Ignored
                    }
                };
                continue;
            }

            if section == Section::Ignored {
                continue;
            }

            let Some((key, value)) = split_key_value(line) else {
                catalog.skip(line_no, raw, "expected key = value");
                continue;
            };

            let value = match parse_inline_value(value) {
                Ok(v) => v,
                Err(reason) => {
                    catalog.skip(line_no, raw, &reason);
                    continue;
                }
            };

            let outcome = match section {
                Section::Versions => catalog.add_version(key, &value),
                Section::Libraries => catalog.add_entry(key, &value, DependencyKind::Library),
                Section::Plugins => catalog.add_entry(key, &value, DependencyKind::Plugin),
                Section::Ignored => Ok(()),
            };

            if let Err(reason) = outcome {
                catalog.skip(line_no, raw, &reason);
            }
        }

        catalog
    }

    pub fn version(&self, key: &str) -> Option<&str> {
        self.versions.get(key).map(String::as_str)
    }

    pub fn versions(&self) -> &BTreeMap<String, String> {
        &self.versions
    }

    pub fn entries(&self) -> &[DeclaredEntry] {
        &self.entries
    }

    /// First entry declaring `coordinate`.
    pub fn find(&self, coordinate: &Coordinate) -> Option<&DeclaredEntry> {
        self.entries.iter().find(|e| e.matches(coordinate))
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

    fn add_version(&mut self, key: &str, value: &Value) -> Result<(), String> {
        let version = match value {
            Value::String(s) => s.clone(),
            Value::Table(t) => ["strictly", "require", "prefer"]
                .iter()
                .find_map(|k| t.get(*k).and_then(Value::as_str))
                .map(str::to_owned)
                .ok_or_else(|| "rich version without strictly/require/prefer".to_owned())?,
            _ => return Err("version must be a string or table".into()),
        };
        self.versions.entry(key.to_owned()).or_insert(version);
        Ok(())
    }

    fn add_entry(&mut self, key: &str, value: &Value, kind: DependencyKind) -> Result<(), String> {
        if !is_valid_alias(key) {
            return Err(format!("'{key}' is not a valid catalog alias"));
        }

        let normalized = normalize(key);
        if self
            .entries
            .iter()
            .any(|e| e.kind == kind && e.alias.normalized() == normalized)
        {
            return Err(format!("duplicate alias '{key}'"));
        }

        let (notation, version) = match kind {
            DependencyKind::Library => library_notation(value)?,
            DependencyKind::Plugin => plugin_notation(value)?,
        };

        self.entries.push(DeclaredEntry {
            alias: Alias::new_unchecked(key),
            kind,
            notation,
            version,
        });
        Ok(())
    }
}

fn parse_header(line: &str) -> Option<&str> {
    let inner = line.strip_prefix('[')?;
    let end = inner.find(']')?;
    let rest = inner[end + 1..].trim();
    if !rest.is_empty() && !rest.starts_with('#') {
        return None;
    }
    let name = inner[..end].trim();
    if name.is_empty() || name.starts_with('[') {
        return None;
    }
    Some(name)
}

fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim().trim_matches('"');
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn parse_inline_value(value: &str) -> Result<Value, String> {
    let document = format!("value = {value}");
    let mut table: toml::Table =
        toml::from_str(&document).map_err(|e| format!("unparsable value: {}", e.message()))?;
    table
        .remove("value")
        .ok_or_else(|| "missing value".to_owned())
}

fn library_notation(value: &Value) -> Result<(String, Option<VersionSpec>), String> {
    match value {
        Value::String(s) => {
            let parts: Vec<&str> = s.split(':').collect();
            match parts.as_slice() {
                [group, artifact] if !group.is_empty() && !artifact.is_empty() => {
                    Ok((format!("{group}:{artifact}"), None))
                }
                [group, artifact, version] if !group.is_empty() && !artifact.is_empty() => Ok((
                    format!("{group}:{artifact}"),
                    Some(VersionSpec::Literal((*version).to_owned())),
                )),
                _ => Err(format!("'{s}' is not group:artifact[:version]")),
            }
        }
        Value::Table(t) => {
            let notation = if let Some(module) = t.get("module").and_then(Value::as_str) {
                module.to_owned()
            } else {
                let group = t.get("group").and_then(Value::as_str);
                let name = t.get("name").and_then(Value::as_str);
                match (group, name) {
                    (Some(g), Some(n)) => format!("{g}:{n}"),
                    _ => return Err("library table needs module or group + name".into()),
                }
            };
            Ok((notation, version_of(t)))
        }
        _ => Err("library must be a string or table".into()),
    }
}

fn plugin_notation(value: &Value) -> Result<(String, Option<VersionSpec>), String> {
    match value {
        Value::String(s) => match s.split_once(':') {
            Some((id, version)) if !id.is_empty() => {
                Ok((id.to_owned(), Some(VersionSpec::Literal(version.to_owned()))))
            }
            Some(_) => Err(format!("'{s}' is not plugin.id[:version]")),
            None => Ok((s.clone(), None)),
        },
        Value::Table(t) => {
            let id = t
                .get("id")
                .and_then(Value::as_str)
                .ok_or_else(|| "plugin table needs id".to_owned())?;
            Ok((id.to_owned(), version_of(t)))
        }
        _ => Err("plugin must be a string or table".into()),
    }
}

fn version_of(table: &toml::Table) -> Option<VersionSpec> {
    match table.get("version")? {
        Value::String(s) => Some(VersionSpec::Literal(s.clone())),
        Value::Table(v) => {
            if let Some(r) = v.get("ref").and_then(Value::as_str) {
                return Some(VersionSpec::Ref(r.to_owned()));
            }
            ["strictly", "require", "prefer"]
                .iter()
                .find_map(|k| v.get(*k).and_then(Value::as_str))
                .map(|s| VersionSpec::Literal(s.to_owned()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
[versions]
agp = "8.5.0"
composeBom = { strictly = "2024.06.00" }

[libraries]
androidx-core-ktx = { group = "androidx.core", name = "core-ktx", version.ref = "coreKtx" }
junit = "junit:junit:4.13.2"
compose-ui = { module = "androidx.compose.ui:ui" }

[plugins]
kotlin-android = { id = "org.jetbrains.kotlin.android", version.ref = "kotlin" }
android-application = "com.android.application:8.5.0"

[bundles]
compose = ["compose-ui"]
"#;

    #[test]
    fn parses_versions_including_rich_versions() {
        let catalog = ProjectCatalog::parse(CATALOG);
        assert_eq!(catalog.version("agp"), Some("8.5.0"));
        assert_eq!(catalog.version("composeBom"), Some("2024.06.00"));
    }

    #[test]
    fn parses_library_notations() {
        let catalog = ProjectCatalog::parse(CATALOG);
        let core = catalog
            .find(&Coordinate::Library {
                group: "androidx.core",
                artifact: "core-ktx",
            })
            .unwrap();
        assert_eq!(core.alias.as_str(), "androidx-core-ktx");
        assert_eq!(core.version, Some(VersionSpec::Ref("coreKtx".into())));

        let junit = catalog
            .find(&Coordinate::Library {
                group: "junit",
                artifact: "junit",
            })
            .unwrap();
        assert_eq!(junit.version, Some(VersionSpec::Literal("4.13.2".into())));
    }

    #[test]
    fn parses_plugins() {
        let catalog = ProjectCatalog::parse(CATALOG);
        let kotlin = catalog
            .find(&Coordinate::Plugin {
                id: "org.jetbrains.kotlin.android",
            })
            .unwrap();
        assert_eq!(kotlin.alias.as_str(), "kotlin-android");
        assert_eq!(kotlin.kind, DependencyKind::Plugin);
        assert!(catalog.skipped().is_empty());
    }

    #[test]
    fn malformed_lines_are_skipped_not_fatal() {
        let text = "\
[versions]
kotlin = \"2.0.0\"
this line is garbage
broken = { unterminated
[plugins
ksp = { id = \"com.google.devtools.ksp\" }
[libraries]
Bad-Alias = \"a:b:1\"
okhttp = \"com.squareup.okhttp3:okhttp:4.12.0\"
";
        let catalog = ProjectCatalog::parse(text);
        assert_eq!(catalog.version("kotlin"), Some("2.0.0"));
        assert_eq!(catalog.entries().len(), 1);
        assert_eq!(catalog.entries()[0].notation, "com.squareup.okhttp3:okhttp");
        let lines: Vec<usize> = catalog.skipped().iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![3, 4, 5, 8]);
    }

    #[test]
    fn duplicate_alias_keeps_first() {
        let text = "[libraries]\nfoo = \"a:b\"\nfoo = \"c:d\"\n";
        let catalog = ProjectCatalog::parse(text);
        assert_eq!(catalog.entries().len(), 1);
        assert_eq!(catalog.entries()[0].notation, "a:b");
        assert_eq!(catalog.skipped().len(), 1);
    }

    #[test]
    fn empty_text_is_empty_catalog() {
        let catalog = ProjectCatalog::parse("");
        assert!(catalog.entries().is_empty());
        assert!(catalog.versions().is_empty());
    }
}
