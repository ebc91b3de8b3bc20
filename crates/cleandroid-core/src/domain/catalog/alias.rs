//! Catalog alias synthesis and accessor rendering.
//!
//! Gradle treats `-`, `_` and `.` in an alias as equivalent separators and
//! maps each of them to a `.` in the generated accessor. Aliases are compared
//! in that normalized form so `kotlin-android` and `kotlin.android` collide.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{Coordinate, DependencyKind};

const RESERVED_FIRST_WORDS: &[&str] = &["bundles", "plugins", "versions"];
const RESERVED_WORDS: &[&str] = &["extensions", "class", "convention"];

/// A catalog alias as written on the left-hand side of `libs.versions.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Alias(String);

impl Alias {
    /// Wrap an alias that has already been checked with [`is_valid_alias`].
    pub(crate) fn new_unchecked(alias: impl Into<String>) -> Self {
        Self(alias.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Separator-normalized form used for collision checks.
    pub fn normalized(&self) -> String {
        normalize(&self.0)
    }

    /// Kotlin DSL accessor, e.g. `libs.plugins.kotlin.android`.
    pub fn accessor(&self, kind: DependencyKind) -> String {
        let path = self.normalized();
        match kind {
            DependencyKind::Library => format!("libs.{path}"),
            DependencyKind::Plugin => format!("libs.plugins.{path}"),
        }
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn normalize(alias: &str) -> String {
    alias
        .chars()
        .map(|c| if matches!(c, '-' | '_') { '.' } else { c })
        .collect()
}

/// Whether `alias` is accepted by Gradle as a catalog alias.
///
/// `[a-z][a-zA-Z0-9_.-]+`, no empty separator runs, no reserved words.
pub fn is_valid_alias(alias: &str) -> bool {
    let mut chars = alias.chars();
    if !matches!(chars.next(), Some(c) if c.is_ascii_lowercase()) {
        return false;
    }
    if alias.len() < 2
        || !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return false;
    }

    let normalized = normalize(alias);
    let words: Vec<&str> = normalized.split('.').collect();
    if words.iter().any(|w| w.is_empty()) {
        return false;
    }
    if RESERVED_FIRST_WORDS.contains(&words[0]) {
        return false;
    }
    !words.iter().any(|w| RESERVED_WORDS.contains(w))
}

/// Build the canonical camelCase alias for a coordinate.
///
/// Libraries use their artifact id. Plugins drop the reverse-domain owner
/// prefix: one segment for three-segment ids, two for longer ones.
pub fn synthesize(coordinate: &Coordinate) -> String {
    let words: Vec<String> = match coordinate {
        Coordinate::Library { artifact, .. } => split_words(artifact),
        Coordinate::Plugin { id } => {
            let segments: Vec<&str> = id.split('.').filter(|s| !s.is_empty()).collect();
            let skip = match segments.len() {
                0..=2 => 0,
                3 => 1,
                _ => 2,
            };
            segments[skip..]
                .iter()
                .flat_map(|s| split_words(s))
                .collect()
        }
    };

    let candidate = camel_case(&words);
    if is_valid_alias(&candidate) {
        return candidate;
    }

    let prefix = match coordinate.kind() {
        DependencyKind::Library => "lib",
        DependencyKind::Plugin => "plugin",
    };
    let mut prefixed = vec![prefix.to_owned()];
    prefixed.extend(words);
    camel_case(&prefixed)
}

fn split_words(s: &str) -> Vec<String> {
    s.split(['.', '-', '_'])
        .map(|w| w.chars().filter(char::is_ascii_alphanumeric).collect::<String>())
        .filter(|w| !w.is_empty())
        .collect()
}

fn camel_case(words: &[String]) -> String {
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if i == 0 {
                out.push(first.to_ascii_lowercase());
            } else {
                out.push(first.to_ascii_uppercase());
            }
            out.extend(chars);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lib(group: &'static str, artifact: &'static str) -> Coordinate {
        Coordinate::Library { group, artifact }
    }

    #[test]
    fn library_alias_from_artifact() {
        assert_eq!(synthesize(&lib("androidx.core", "core-ktx")), "coreKtx");
        assert_eq!(
            synthesize(&lib("com.google.dagger", "hilt-android-compiler")),
            "hiltAndroidCompiler"
        );
    }

    #[test]
    fn plugin_alias_drops_owner_prefix() {
        let three = Coordinate::Plugin {
            id: "com.android.application",
        };
        let four = Coordinate::Plugin {
            id: "org.jetbrains.kotlin.android",
        };
        assert_eq!(synthesize(&three), "androidApplication");
        assert_eq!(synthesize(&four), "kotlinAndroid");
    }

    #[test]
    fn digit_leading_artifact_is_prefixed() {
        assert_eq!(synthesize(&lib("org.example", "3d-engine")), "lib3dEngine");
    }

    #[test]
    fn reserved_first_word_is_prefixed() {
        assert_eq!(synthesize(&lib("org.example", "versions")), "libVersions");
    }

    #[test]
    fn validity_rules() {
        assert!(is_valid_alias("compose-bom"));
        assert!(is_valid_alias("kotlinAndroid"));
        assert!(!is_valid_alias("Compose"));
        assert!(!is_valid_alias("a"));
        assert!(!is_valid_alias("plugins-foo"));
        assert!(!is_valid_alias("foo--bar"));
        assert!(!is_valid_alias("foo.class"));
    }

    #[test]
    fn accessor_maps_separators() {
        let alias = Alias::new_unchecked("kotlin-android");
        assert_eq!(alias.accessor(DependencyKind::Plugin), "libs.plugins.kotlin.android");
        let alias = Alias::new_unchecked("androidx_core_ktx");
        assert_eq!(alias.accessor(DependencyKind::Library), "libs.androidx.core.ktx");
    }
}
