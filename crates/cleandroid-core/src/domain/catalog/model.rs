//! Static registry of the libraries and plugins the generator knows about.
//!
//! # Adding a New Dependency
//!
//! 1. Add a variant to [`DependencyId`] (plus its `as_str` arm)
//! 2. Add one [`LogicalDependency`] entry to [`DEPENDENCY_REGISTRY`]
//! 3. If it declares a new version key, add it to [`DEFAULT_VERSIONS`]
//!
//! Registry order is semantic: alias collisions are resolved in this order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ── Identity ─────────────────────────────────────────────────────────────────

/// Stable key of a logical dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DependencyId {
    // plugins
    AndroidApplication,
    AndroidLibrary,
    KotlinAndroid,
    KotlinCompose,
    KotlinSerialization,
    Ksp,
    Hilt,
    Ktlint,
    Detekt,
    // libraries
    CoreKtx,
    LifecycleRuntime,
    LifecycleViewModel,
    ActivityCompose,
    ComposeBom,
    ComposeUi,
    ComposeMaterial3,
    ComposeUiTooling,
    HiltAndroid,
    HiltCompiler,
    HiltNavigationCompose,
    KoinAndroid,
    KoinCompose,
    Retrofit,
    RetrofitSerialization,
    KtorCore,
    KtorOkhttp,
    KtorContentNegotiation,
    KtorSerializationJson,
    KotlinxSerializationJson,
    CoroutinesAndroid,
    Junit,
}

impl DependencyId {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AndroidApplication => "androidApplication",
            Self::AndroidLibrary => "androidLibrary",
            Self::KotlinAndroid => "kotlinAndroid",
            Self::KotlinCompose => "kotlinCompose",
            Self::KotlinSerialization => "kotlinSerialization",
            Self::Ksp => "ksp",
            Self::Hilt => "hilt",
            Self::Ktlint => "ktlint",
            Self::Detekt => "detekt",
            Self::CoreKtx => "coreKtx",
            Self::LifecycleRuntime => "lifecycleRuntime",
            Self::LifecycleViewModel => "lifecycleViewModel",
            Self::ActivityCompose => "activityCompose",
            Self::ComposeBom => "composeBom",
            Self::ComposeUi => "composeUi",
            Self::ComposeMaterial3 => "composeMaterial3",
            Self::ComposeUiTooling => "composeUiTooling",
            Self::HiltAndroid => "hiltAndroid",
            Self::HiltCompiler => "hiltCompiler",
            Self::HiltNavigationCompose => "hiltNavigationCompose",
            Self::KoinAndroid => "koinAndroid",
            Self::KoinCompose => "koinCompose",
            Self::Retrofit => "retrofit",
            Self::RetrofitSerialization => "retrofitSerialization",
            Self::KtorCore => "ktorCore",
            Self::KtorOkhttp => "ktorOkhttp",
            Self::KtorContentNegotiation => "ktorContentNegotiation",
            Self::KtorSerializationJson => "ktorSerializationJson",
            Self::KotlinxSerializationJson => "kotlinxSerializationJson",
            Self::CoroutinesAndroid => "coroutinesAndroid",
            Self::Junit => "junit",
        }
    }

    /// HTTP client and JSON serialization entries.
    pub const fn is_network(&self) -> bool {
        matches!(
            self,
            Self::KotlinSerialization
                | Self::Retrofit
                | Self::RetrofitSerialization
                | Self::KtorCore
                | Self::KtorOkhttp
                | Self::KtorContentNegotiation
                | Self::KtorSerializationJson
                | Self::KotlinxSerializationJson
        )
    }

    /// The registry entry for this id.
    pub fn definition(self) -> &'static LogicalDependency {
        DEPENDENCY_REGISTRY
            .iter()
            .find(|d| d.id == self)
            .unwrap_or_else(|| unreachable!("{self} missing from DEPENDENCY_REGISTRY"))
    }
}

impl fmt::Display for DependencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DependencyId {
    type Err = String;

    /// Case-insensitive lookup by the camelCase key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DEPENDENCY_REGISTRY
            .iter()
            .map(|d| d.id)
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown dependency id: {s}"))
    }
}

// ── Coordinates ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyKind {
    Library,
    Plugin,
}

/// Where a dependency lives in Maven / the Gradle plugin portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coordinate {
    Library {
        group: &'static str,
        artifact: &'static str,
    },
    Plugin {
        id: &'static str,
    },
}

impl Coordinate {
    pub const fn kind(&self) -> DependencyKind {
        match self {
            Self::Library { .. } => DependencyKind::Library,
            Self::Plugin { .. } => DependencyKind::Plugin,
        }
    }

    /// `group:artifact` for libraries, the plugin id for plugins.
    pub fn notation(&self) -> String {
        match self {
            Self::Library { group, artifact } => format!("{group}:{artifact}"),
            Self::Plugin { id } => (*id).to_owned(),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation())
    }
}

/// One known library or plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalDependency {
    pub id: DependencyId,
    pub coordinate: Coordinate,
    /// Key into the `[versions]` table. `None` for BOM-managed libraries.
    pub version_key: Option<&'static str>,
}

impl LogicalDependency {
    pub const fn kind(&self) -> DependencyKind {
        self.coordinate.kind()
    }
}

const fn plugin(id: DependencyId, plugin_id: &'static str, version_key: &'static str) -> LogicalDependency {
    LogicalDependency {
        id,
        coordinate: Coordinate::Plugin { id: plugin_id },
        version_key: Some(version_key),
    }
}

const fn library(
    id: DependencyId,
    group: &'static str,
    artifact: &'static str,
    version_key: Option<&'static str>,
) -> LogicalDependency {
    LogicalDependency {
        id,
        coordinate: Coordinate::Library { group, artifact },
        version_key,
    }
}

/// Single source of truth for every dependency the generator may reference.
pub static DEPENDENCY_REGISTRY: &[LogicalDependency] = &[
    // ── Plugins ──────────────────────────────────────────────────────────────
    plugin(DependencyId::AndroidApplication, "com.android.application", "agp"),
    plugin(DependencyId::AndroidLibrary, "com.android.library", "agp"),
    plugin(DependencyId::KotlinAndroid, "org.jetbrains.kotlin.android", "kotlin"),
    plugin(DependencyId::KotlinCompose, "org.jetbrains.kotlin.plugin.compose", "kotlin"),
    plugin(
        DependencyId::KotlinSerialization,
        "org.jetbrains.kotlin.plugin.serialization",
        "kotlin",
    ),
    plugin(DependencyId::Ksp, "com.google.devtools.ksp", "ksp"),
    plugin(DependencyId::Hilt, "com.google.dagger.hilt.android", "hilt"),
    plugin(DependencyId::Ktlint, "org.jlleitschuh.gradle.ktlint", "ktlintGradle"),
    plugin(DependencyId::Detekt, "io.gitlab.arturbosch.detekt", "detekt"),
    // ── AndroidX ─────────────────────────────────────────────────────────────
    library(DependencyId::CoreKtx, "androidx.core", "core-ktx", Some("coreKtx")),
    library(
        DependencyId::LifecycleRuntime,
        "androidx.lifecycle",
        "lifecycle-runtime-ktx",
        Some("lifecycle"),
    ),
    library(
        DependencyId::LifecycleViewModel,
        "androidx.lifecycle",
        "lifecycle-viewmodel-ktx",
        Some("lifecycle"),
    ),
    library(
        DependencyId::ActivityCompose,
        "androidx.activity",
        "activity-compose",
        Some("activityCompose"),
    ),
    // ── Compose (BOM managed) ────────────────────────────────────────────────
    library(DependencyId::ComposeBom, "androidx.compose", "compose-bom", Some("composeBom")),
    library(DependencyId::ComposeUi, "androidx.compose.ui", "ui", None),
    library(DependencyId::ComposeMaterial3, "androidx.compose.material3", "material3", None),
    library(DependencyId::ComposeUiTooling, "androidx.compose.ui", "ui-tooling", None),
    // ── Dependency injection ─────────────────────────────────────────────────
    library(DependencyId::HiltAndroid, "com.google.dagger", "hilt-android", Some("hilt")),
    library(
        DependencyId::HiltCompiler,
        "com.google.dagger",
        "hilt-android-compiler",
        Some("hilt"),
    ),
    library(
        DependencyId::HiltNavigationCompose,
        "androidx.hilt",
        "hilt-navigation-compose",
        Some("hiltNavigationCompose"),
    ),
    library(DependencyId::KoinAndroid, "io.insert-koin", "koin-android", Some("koin")),
    library(DependencyId::KoinCompose, "io.insert-koin", "koin-androidx-compose", Some("koin")),
    // ── Networking ───────────────────────────────────────────────────────────
    library(DependencyId::Retrofit, "com.squareup.retrofit2", "retrofit", Some("retrofit")),
    library(
        DependencyId::RetrofitSerialization,
        "com.squareup.retrofit2",
        "converter-kotlinx-serialization",
        Some("retrofit"),
    ),
    library(DependencyId::KtorCore, "io.ktor", "ktor-client-core", Some("ktor")),
    library(DependencyId::KtorOkhttp, "io.ktor", "ktor-client-okhttp", Some("ktor")),
    library(
        DependencyId::KtorContentNegotiation,
        "io.ktor",
        "ktor-client-content-negotiation",
        Some("ktor"),
    ),
    library(
        DependencyId::KtorSerializationJson,
        "io.ktor",
        "ktor-serialization-kotlinx-json",
        Some("ktor"),
    ),
    library(
        DependencyId::KotlinxSerializationJson,
        "org.jetbrains.kotlinx",
        "kotlinx-serialization-json",
        Some("kotlinxSerialization"),
    ),
    // ── Misc ─────────────────────────────────────────────────────────────────
    library(
        DependencyId::CoroutinesAndroid,
        "org.jetbrains.kotlinx",
        "kotlinx-coroutines-android",
        Some("coroutines"),
    ),
    library(DependencyId::Junit, "junit", "junit", Some("junit")),
];

/// Built-in version for every version key used by the registry.
pub static DEFAULT_VERSIONS: &[(&str, &str)] = &[
    ("agp", "8.7.3"),
    ("kotlin", "2.0.21"),
    ("ksp", "2.0.21-1.0.28"),
    ("hilt", "2.52"),
    ("ktlintGradle", "12.1.2"),
    ("detekt", "1.23.7"),
    ("coreKtx", "1.15.0"),
    ("lifecycle", "2.8.7"),
    ("activityCompose", "1.9.3"),
    ("composeBom", "2024.12.01"),
    ("hiltNavigationCompose", "1.2.0"),
    ("koin", "4.0.0"),
    ("retrofit", "2.11.0"),
    ("ktor", "3.0.2"),
    ("kotlinxSerialization", "1.7.3"),
    ("coroutines", "1.9.0"),
    ("junit", "4.13.2"),
];

pub fn default_version(key: &str) -> Option<&'static str> {
    DEFAULT_VERSIONS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}
