//! Generation requests.
//!
//! One struct per thing a user can ask for, plus the [`GenerationRequest`]
//! sum type the generation service dispatches on. All requests are built
//! through [`RequestBuilder`], which validates every field before any file
//! I/O happens.
//!
//! ```
//! use cleandroid_core::domain::{FeatureFlags, RequestBuilder};
//!
//! let request = RequestBuilder::new("/tmp/notes")
//!     .name("login")
//!     .package("com.acme.notes")
//!     .flags(FeatureFlags::default().with_compose(true))
//!     .build_feature()
//!     .unwrap();
//!
//! assert_eq!(request.module_name(), "feature-login");
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::catalog::CatalogVariant;
use crate::domain::error::DomainError;
use crate::domain::naming::Name;
use crate::domain::package::PackageName;
use crate::domain::value_objects::{DataSourceFlavor, FeatureFlags};

pub const DEFAULT_MIN_SDK: u32 = 24;
pub const DEFAULT_COMPILE_SDK: u32 = 35;

/// A brand new multi-module project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectTemplateRequest {
    pub app_name: Name,
    pub package: PackageName,
    pub destination: PathBuf,
    pub flags: FeatureFlags,
    pub min_sdk: u32,
    pub compile_sdk: u32,
}

/// The shared `core`, `domain` and `data` modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchitectureRequest {
    pub package: PackageName,
    pub destination: PathBuf,
    pub flags: FeatureFlags,
}

/// A `feature-<name>` module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureRequest {
    pub name: Name,
    pub package: PackageName,
    pub destination: PathBuf,
    pub flags: FeatureFlags,
}

impl FeatureRequest {
    pub fn module_name(&self) -> String {
        feature_module(&self.name)
    }

    /// `<base>.feature.<name>`
    pub fn feature_package(&self) -> PackageName {
        feature_package(&self.package, &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UseCaseRequest {
    pub name: Name,
    pub feature: Name,
    pub package: PackageName,
    pub destination: PathBuf,
    pub flags: FeatureFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModelRequest {
    pub name: Name,
    pub feature: Name,
    pub package: PackageName,
    pub destination: PathBuf,
    pub flags: FeatureFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataSourceRequest {
    pub name: Name,
    pub feature: Name,
    pub flavor: DataSourceFlavor,
    pub package: PackageName,
    pub destination: PathBuf,
    pub flags: FeatureFlags,
}

pub(crate) fn feature_module(feature: &Name) -> String {
    format!("feature-{}", feature.kebab())
}

pub(crate) fn feature_package(base: &PackageName, feature: &Name) -> PackageName {
    base.child("feature").child(&feature.package_segment())
}

/// Anything the generation service can materialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationRequest {
    Project(ProjectTemplateRequest),
    Architecture(ArchitectureRequest),
    Feature(FeatureRequest),
    UseCase(UseCaseRequest),
    ViewModel(ViewModelRequest),
    DataSource(DataSourceRequest),
}

impl GenerationRequest {
    pub fn destination(&self) -> &Path {
        match self {
            Self::Project(r) => &r.destination,
            Self::Architecture(r) => &r.destination,
            Self::Feature(r) => &r.destination,
            Self::UseCase(r) => &r.destination,
            Self::ViewModel(r) => &r.destination,
            Self::DataSource(r) => &r.destination,
        }
    }

    pub fn flags(&self) -> FeatureFlags {
        match self {
            Self::Project(r) => r.flags,
            Self::Architecture(r) => r.flags,
            Self::Feature(r) => r.flags,
            Self::UseCase(r) => r.flags,
            Self::ViewModel(r) => r.flags,
            Self::DataSource(r) => r.flags,
        }
    }

    pub fn package(&self) -> &PackageName {
        match self {
            Self::Project(r) => &r.package,
            Self::Architecture(r) => &r.package,
            Self::Feature(r) => &r.package,
            Self::UseCase(r) => &r.package,
            Self::ViewModel(r) => &r.package,
            Self::DataSource(r) => &r.package,
        }
    }

    /// New projects read `[new.versions]`, everything else
    /// `[existing.versions]`.
    pub fn catalog_variant(&self) -> CatalogVariant {
        match self {
            Self::Project(_) => CatalogVariant::New,
            _ => CatalogVariant::Existing,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Project(_) => "project",
            Self::Architecture(_) => "architecture",
            Self::Feature(_) => "feature",
            Self::UseCase(_) => "usecase",
            Self::ViewModel(_) => "viewmodel",
            Self::DataSource(_) => "datasource",
        }
    }
}

macro_rules! impl_from_request {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(impl From<$ty> for GenerationRequest {
            fn from(request: $ty) -> Self {
                Self::$variant(request)
            }
        })*
    };
}

impl_from_request! {
    Project => ProjectTemplateRequest,
    Architecture => ArchitectureRequest,
    Feature => FeatureRequest,
    UseCase => UseCaseRequest,
    ViewModel => ViewModelRequest,
    DataSource => DataSourceRequest,
}

// ── Builder ──────────────────────────────────────────────────────────────────

/// Collects raw user input and validates it into a typed request.
///
/// Which fields are required depends on the terminal `build_*` call.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    destination: PathBuf,
    name: Option<String>,
    feature: Option<String>,
    package: Option<String>,
    flags: FeatureFlags,
    flavor: DataSourceFlavor,
    min_sdk: Option<u32>,
    compile_sdk: Option<u32>,
}

impl RequestBuilder {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn feature(mut self, feature: impl Into<String>) -> Self {
        self.feature = Some(feature.into());
        self
    }

    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn flags(mut self, flags: FeatureFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn flavor(mut self, flavor: DataSourceFlavor) -> Self {
        self.flavor = flavor;
        self
    }

    pub fn min_sdk(mut self, min_sdk: u32) -> Self {
        self.min_sdk = Some(min_sdk);
        self
    }

    pub fn compile_sdk(mut self, compile_sdk: u32) -> Self {
        self.compile_sdk = Some(compile_sdk);
        self
    }

    pub fn build_project(self) -> Result<ProjectTemplateRequest, DomainError> {
        let min_sdk = self.min_sdk.unwrap_or(DEFAULT_MIN_SDK);
        let compile_sdk = self.compile_sdk.unwrap_or(DEFAULT_COMPILE_SDK);
        if min_sdk > compile_sdk {
            return Err(DomainError::InvalidSdkRange {
                min_sdk,
                compile_sdk,
            });
        }

        Ok(ProjectTemplateRequest {
            app_name: required_name("name", self.name.as_deref())?,
            package: self.parse_package()?,
            destination: self.checked_destination()?,
            flags: self.flags,
            min_sdk,
            compile_sdk,
        })
    }

    pub fn build_architecture(self) -> Result<ArchitectureRequest, DomainError> {
        Ok(ArchitectureRequest {
            package: self.parse_package()?,
            destination: self.checked_destination()?,
            flags: self.flags,
        })
    }

    pub fn build_feature(self) -> Result<FeatureRequest, DomainError> {
        Ok(FeatureRequest {
            name: required_name("name", self.name.as_deref())?,
            package: self.parse_package()?,
            destination: self.checked_destination()?,
            flags: self.flags,
        })
    }

    pub fn build_use_case(self) -> Result<UseCaseRequest, DomainError> {
        Ok(UseCaseRequest {
            name: required_name("name", self.name.as_deref())?,
            feature: required_name("feature", self.feature.as_deref())?,
            package: self.parse_package()?,
            destination: self.checked_destination()?,
            flags: self.flags,
        })
    }

    pub fn build_view_model(self) -> Result<ViewModelRequest, DomainError> {
        Ok(ViewModelRequest {
            name: required_name("name", self.name.as_deref())?,
            feature: required_name("feature", self.feature.as_deref())?,
            package: self.parse_package()?,
            destination: self.checked_destination()?,
            flags: self.flags,
        })
    }

    pub fn build_data_source(self) -> Result<DataSourceRequest, DomainError> {
        Ok(DataSourceRequest {
            name: required_name("name", self.name.as_deref())?,
            feature: required_name("feature", self.feature.as_deref())?,
            flavor: self.flavor,
            package: self.parse_package()?,
            destination: self.checked_destination()?,
            flags: self.flags,
        })
    }

    fn parse_package(&self) -> Result<PackageName, DomainError> {
        let raw = self
            .package
            .as_deref()
            .ok_or(DomainError::MissingRequiredField { field: "package" })?;
        PackageName::parse(raw)
    }

    fn checked_destination(&self) -> Result<PathBuf, DomainError> {
        if self.destination.as_os_str().is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "destination",
            });
        }
        Ok(self.destination.clone())
    }
}

fn required_name(field: &'static str, raw: Option<&str>) -> Result<Name, DomainError> {
    let raw = raw.ok_or(DomainError::MissingRequiredField { field })?;
    Name::parse(field, raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::DependencyInjection;

    fn base() -> RequestBuilder {
        RequestBuilder::new("/work/notes").package("com.acme.notes")
    }

    #[test]
    fn project_defaults_sdk_levels() {
        let request = base().name("Notes").build_project().unwrap();
        assert_eq!(request.min_sdk, DEFAULT_MIN_SDK);
        assert_eq!(request.compile_sdk, DEFAULT_COMPILE_SDK);
        assert_eq!(request.app_name.as_str(), "Notes");
    }

    #[test]
    fn project_rejects_min_above_compile() {
        assert_eq!(
            base().name("Notes").min_sdk(36).build_project(),
            Err(DomainError::InvalidSdkRange {
                min_sdk: 36,
                compile_sdk: DEFAULT_COMPILE_SDK
            })
        );
    }

    #[test]
    fn names_are_trimmed_and_checked_for_blankness() {
        let request = base().name("  login ").build_feature().unwrap();
        assert_eq!(request.name.as_str(), "login");

        assert_eq!(
            base().name("   ").build_feature(),
            Err(DomainError::BlankName { field: "name" })
        );
    }

    #[test]
    fn missing_fields_are_reported() {
        assert_eq!(
            RequestBuilder::new("/work").name("x").build_feature(),
            Err(DomainError::MissingRequiredField { field: "package" })
        );
        assert_eq!(
            base().name("GetUser").build_use_case(),
            Err(DomainError::MissingRequiredField { field: "feature" })
        );
        assert_eq!(
            RequestBuilder::new("").package("com.acme").build_architecture(),
            Err(DomainError::MissingRequiredField {
                field: "destination"
            })
        );
    }

    #[test]
    fn namespace_with_spaces_is_rejected() {
        let err = RequestBuilder::new("/work")
            .package("com. example .myapp")
            .build_architecture()
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidNamespace { .. }));
    }

    #[test]
    fn feature_module_and_package() {
        let request = base().name("User Profile").build_feature().unwrap();
        assert_eq!(request.module_name(), "feature-user-profile");
        assert_eq!(
            request.feature_package().to_string(),
            "com.acme.notes.feature.userprofile"
        );
    }

    #[test]
    fn variant_depends_on_request_kind() {
        let project: GenerationRequest = base().name("Notes").build_project().unwrap().into();
        let feature: GenerationRequest = base().name("login").build_feature().unwrap().into();
        assert_eq!(project.catalog_variant(), CatalogVariant::New);
        assert_eq!(feature.catalog_variant(), CatalogVariant::Existing);
        assert_eq!(feature.kind(), "feature");
    }

    #[test]
    fn flags_are_carried() {
        let flags = FeatureFlags::default().with_di(DependencyInjection::Koin);
        let request: GenerationRequest = base()
            .name("Login")
            .feature("auth")
            .flags(flags)
            .build_view_model()
            .unwrap()
            .into();
        assert_eq!(request.flags().di, DependencyInjection::Koin);
        assert_eq!(request.destination(), Path::new("/work/notes"));
    }
}
