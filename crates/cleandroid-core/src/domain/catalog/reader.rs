//! The merged view of defaults, the project catalog and user overrides.
//!
//! Built once per generation run. All queries are infallible: a dependency
//! the merged catalog cannot provide is reported as unavailable.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use super::alias::{self, Alias};
use super::gradle::ProjectCatalog;
use super::model::{
    Coordinate, DEPENDENCY_REGISTRY, DependencyId, DependencyKind, LogicalDependency,
    default_version,
};
use super::overrides::{CatalogVariant, UserOverrides};

/// Outcome of [`VersionCatalogReader::resolve_alias`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "alias", rename_all = "lowercase")]
pub enum AliasResolution {
    /// Reused verbatim from the project catalog.
    Declared(Alias),
    /// Synthesized from the coordinate.
    Synthesized(Alias),
    Unavailable,
}

impl AliasResolution {
    pub fn alias(&self) -> Option<&Alias> {
        match self {
            Self::Declared(a) | Self::Synthesized(a) => Some(a),
            Self::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

/// Builder for [`VersionCatalogReader`].
#[derive(Debug, Clone)]
pub struct VersionCatalogReaderBuilder<'a> {
    defaults: &'a [LogicalDependency],
    project: Option<&'a ProjectCatalog>,
    overrides: Option<&'a UserOverrides>,
    variant: CatalogVariant,
}

impl<'a> VersionCatalogReaderBuilder<'a> {
    /// Replace the built-in default set.
    ///
    /// Passing an empty slice restricts availability to what the project
    /// catalog declares.
    pub fn defaults(mut self, defaults: &'a [LogicalDependency]) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn project_catalog(mut self, project: Option<&'a ProjectCatalog>) -> Self {
        self.project = project;
        self
    }

    pub fn overrides(mut self, overrides: &'a UserOverrides, variant: CatalogVariant) -> Self {
        self.overrides = Some(overrides);
        self.variant = variant;
        self
    }

    pub fn build(self) -> VersionCatalogReader {
        let disabled = self.overrides.map(UserOverrides::disabled).unwrap_or_default();

        // version precedence, lowest first
        let mut versions: BTreeMap<String, String> = BTreeMap::new();
        for dep in DEPENDENCY_REGISTRY {
            if let Some(key) = dep.version_key
                && let Some(v) = default_version(key)
            {
                versions.insert(key.to_owned(), v.to_owned());
            }
        }
        if let Some(project) = self.project {
            versions.extend(project.versions().clone());
        }
        if let Some(overrides) = self.overrides {
            versions.extend(overrides.versions(self.variant).clone());
        }

        // aliases already declared by the project, per kind
        let mut taken: HashMap<(DependencyKind, String), String> = HashMap::new();
        if let Some(project) = self.project {
            for entry in project.entries() {
                taken
                    .entry((entry.kind, entry.alias.normalized()))
                    .or_insert_with(|| entry.notation.clone());
            }
        }

        let mut aliases = HashMap::new();
        for dep in DEPENDENCY_REGISTRY {
            let declared = self.project.and_then(|p| p.find(&dep.coordinate));
            let in_defaults = self.defaults.iter().any(|d| d.id == dep.id);

            let resolution = if disabled.contains(&dep.id) {
                AliasResolution::Unavailable
            } else if let Some(entry) = declared {
                AliasResolution::Declared(entry.alias.clone())
            } else if in_defaults {
                AliasResolution::Synthesized(assign_alias(&dep.coordinate, &mut taken))
            } else {
                AliasResolution::Unavailable
            };
            aliases.insert(dep.id, resolution);
        }

        VersionCatalogReader {
            versions,
            aliases,
            has_project_catalog: self.project.is_some(),
        }
    }
}

/// Pick the first free alias for `coordinate`, suffixing `2`, `3`, … on
/// collision, and reserve it.
fn assign_alias(
    coordinate: &Coordinate,
    taken: &mut HashMap<(DependencyKind, String), String>,
) -> Alias {
    let base = alias::synthesize(coordinate);
    let kind = coordinate.kind();
    let mut candidate = base.clone();
    let mut suffix = 2;
    while taken.contains_key(&(kind, alias::normalize(&candidate))) {
        candidate = format!("{base}{suffix}");
        suffix += 1;
    }
    taken.insert((kind, alias::normalize(&candidate)), coordinate.notation());
    Alias::new_unchecked(candidate)
}

/// Resolved catalog for one generation run.
#[derive(Debug, Clone)]
pub struct VersionCatalogReader {
    versions: BTreeMap<String, String>,
    aliases: HashMap<DependencyId, AliasResolution>,
    has_project_catalog: bool,
}

impl VersionCatalogReader {
    pub fn builder<'a>() -> VersionCatalogReaderBuilder<'a> {
        VersionCatalogReaderBuilder {
            defaults: DEPENDENCY_REGISTRY,
            project: None,
            overrides: None,
            variant: CatalogVariant::New,
        }
    }

    /// Defaults only, no project catalog, no overrides.
    pub fn with_defaults() -> Self {
        Self::builder().build()
    }

    pub fn is_available(&self, id: DependencyId) -> bool {
        self.resolve_alias(id).is_available()
    }

    pub fn resolve_alias(&self, id: DependencyId) -> AliasResolution {
        self.aliases
            .get(&id)
            .cloned()
            .unwrap_or(AliasResolution::Unavailable)
    }

    /// Kotlin DSL accessor such as `libs.plugins.kotlin.android`.
    pub fn accessor(&self, id: DependencyId) -> Option<String> {
        let resolution = self.resolve_alias(id);
        resolution
            .alias()
            .map(|a| a.accessor(id.definition().kind()))
    }

    /// Version for `key`, or `None` when nobody has an opinion.
    pub fn merged_version(&self, key: &str) -> Option<&str> {
        self.versions.get(key).map(String::as_str)
    }

    pub fn has_project_catalog(&self) -> bool {
        self.has_project_catalog
    }

    /// Available dependencies among `ids` that the project catalog does not
    /// declare, in the order given, without duplicates.
    pub fn undeclared(&self, ids: &[DependencyId]) -> Vec<DependencyId> {
        let mut seen = BTreeSet::new();
        ids.iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .filter(|id| matches!(self.resolve_alias(*id), AliasResolution::Synthesized(_)))
            .collect()
    }

    /// The `libs.versions.toml` line declaring `id`.
    pub fn render_entry(&self, id: DependencyId) -> Option<String> {
        let alias = self.resolve_alias(id).alias()?.clone();
        let dep = id.definition();
        let version = dep
            .version_key
            .filter(|key| self.merged_version(key).is_some())
            .map(|key| format!(", version.ref = \"{key}\""))
            .unwrap_or_default();

        Some(match dep.coordinate {
            Coordinate::Library { group, artifact } => {
                format!("{alias} = {{ group = \"{group}\", name = \"{artifact}\"{version} }}")
            }
            Coordinate::Plugin { id } => format!("{alias} = {{ id = \"{id}\"{version} }}"),
        })
    }

    /// A complete catalog declaring every available dependency.
    pub fn render_catalog(&self) -> String {
        let available: Vec<&LogicalDependency> = DEPENDENCY_REGISTRY
            .iter()
            .filter(|d| self.is_available(d.id))
            .collect();

        let mut version_keys: Vec<&str> = Vec::new();
        for dep in &available {
            if let Some(key) = dep.version_key
                && self.merged_version(key).is_some()
                && !version_keys.contains(&key)
            {
                version_keys.push(key);
            }
        }

        let mut out = String::from("[versions]\n");
        for key in version_keys {
            if let Some(version) = self.merged_version(key) {
                out.push_str(&format!("{key} = \"{version}\"\n"));
            }
        }

        for (title, kind) in [
            ("libraries", DependencyKind::Library),
            ("plugins", DependencyKind::Plugin),
        ] {
            out.push_str(&format!("\n[{title}]\n"));
            for dep in available.iter().filter(|d| d.kind() == kind) {
                if let Some(line) = self.render_entry(dep.id) {
                    out.push_str(&line);
                    out.push('\n');
                }
            }
        }

        out
    }
}
