//! Domain value objects: DependencyInjection, NetworkClient, DataSourceFlavor,
//! FeatureFlags.
//!
//! # Design
//!
//! These are pure value types: `Copy` and compared by value.
//! Which fragments each variant contributes lives in
//! `application::assembler`. This file only defines the types, their string
//! representations, and their `FromStr` parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── DependencyInjection ──────────────────────────────────────────────────────

/// Dependency-injection framework wired into generated code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyInjection {
    Hilt,
    Koin,
    #[default]
    None,
}

impl DependencyInjection {
    pub const ALL: [Self; 3] = [Self::Hilt, Self::Koin, Self::None];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hilt => "hilt",
            Self::Koin => "koin",
            Self::None => "none",
        }
    }
}

impl fmt::Display for DependencyInjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DependencyInjection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hilt" | "dagger-hilt" => Ok(Self::Hilt),
            "koin" => Ok(Self::Koin),
            "none" | "manual" => Ok(Self::None),
            _ => Err(DomainError::UnknownDependencyInjection {
                selector: s.to_owned(),
            }),
        }
    }
}

// ── NetworkClient ────────────────────────────────────────────────────────────

/// HTTP client used by remote data sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkClient {
    #[default]
    None,
    Retrofit,
    Ktor,
}

impl NetworkClient {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Retrofit => "retrofit",
            Self::Ktor => "ktor",
        }
    }
}

impl fmt::Display for NetworkClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkClient {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "retrofit" => Ok(Self::Retrofit),
            "ktor" => Ok(Self::Ktor),
            _ => Err(DomainError::UnknownNetworkClient {
                selector: s.to_owned(),
            }),
        }
    }
}

// ── DataSourceFlavor ─────────────────────────────────────────────────────────

/// Whether a data source talks to local storage or a remote API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceFlavor {
    #[default]
    Local,
    Remote,
}

impl DataSourceFlavor {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
        }
    }

    /// Package segment the data source lives under.
    pub const fn package_segment(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
        }
    }
}

impl fmt::Display for DataSourceFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataSourceFlavor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "remote" => Ok(Self::Remote),
            _ => Err(DomainError::UnknownDataSourceFlavor {
                selector: s.to_owned(),
            }),
        }
    }
}

// ── FeatureFlags ─────────────────────────────────────────────────────────────

/// Boolean/enum switches that decide which optional content is rendered.
///
/// A flag only expresses what was *requested*; whether the catalog can
/// satisfy it is decided later by the content assembler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub compose: bool,
    pub ktlint: bool,
    pub detekt: bool,
    pub network: NetworkClient,
    pub di: DependencyInjection,
}

impl FeatureFlags {
    pub fn with_compose(mut self, compose: bool) -> Self {
        self.compose = compose;
        self
    }

    pub fn with_ktlint(mut self, ktlint: bool) -> Self {
        self.ktlint = ktlint;
        self
    }

    pub fn with_detekt(mut self, detekt: bool) -> Self {
        self.detekt = detekt;
        self
    }

    pub fn with_network(mut self, network: NetworkClient) -> Self {
        self.network = network;
        self
    }

    pub fn with_di(mut self, di: DependencyInjection) -> Self {
        self.di = di;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn di_parses_case_insensitively() {
        assert_eq!("Hilt".parse::<DependencyInjection>().unwrap(), DependencyInjection::Hilt);
        assert_eq!(" koin ".parse::<DependencyInjection>().unwrap(), DependencyInjection::Koin);
        assert_eq!("NONE".parse::<DependencyInjection>().unwrap(), DependencyInjection::None);
    }

    #[test]
    fn unknown_di_selector_is_validation_error() {
        let err = "dagger".parse::<DependencyInjection>().unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownDependencyInjection {
                selector: "dagger".into()
            }
        );
    }

    #[test]
    fn network_client_round_trips_display() {
        for client in [NetworkClient::None, NetworkClient::Retrofit, NetworkClient::Ktor] {
            assert_eq!(client.to_string().parse::<NetworkClient>().unwrap(), client);
        }
    }

    #[test]
    fn flags_default_to_nothing_requested() {
        let flags = FeatureFlags::default();
        assert!(!flags.compose && !flags.ktlint && !flags.detekt);
        assert_eq!(flags.network, NetworkClient::None);
        assert_eq!(flags.di, DependencyInjection::None);
    }
}
