// ============================================================================
// domain/error.rs - VALIDATION ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports keep copies of per-file failures)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
///
/// Domain errors are raised before any file I/O happens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("'{field}' must not be blank")]
    BlankName { field: &'static str },

    #[error("Invalid package namespace '{namespace}': {reason}")]
    InvalidNamespace { namespace: String, reason: String },

    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Unknown dependency injection selector '{selector}'")]
    UnknownDependencyInjection { selector: String },

    #[error("Unknown network client '{selector}'")]
    UnknownNetworkClient { selector: String },

    #[error("Unknown data source flavour '{selector}'")]
    UnknownDataSourceFlavor { selector: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("minSdk {min_sdk} is higher than compileSdk {compile_sdk}")]
    InvalidSdkRange { min_sdk: u32, compile_sdk: u32 },

    #[error("Duplicate path in generation plan: {path}")]
    DuplicatePath { path: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::BlankName { field } => vec![
                format!("Provide a non-empty value for '{field}'"),
                "Surrounding whitespace is trimmed before validation".into(),
            ],
            Self::InvalidNamespace { .. } => vec![
                "Use a dotted package name such as com.example.app".into(),
                "Each segment must start with a letter or '_' and contain only letters, digits or '_'".into(),
            ],
            Self::InvalidName { .. } => vec![
                "Use letters, digits, '-' or '_' only".into(),
                "Examples: login, user-profile, Checkout".into(),
            ],
            Self::UnknownDependencyInjection { selector } => vec![
                format!("'{selector}' is not a dependency injection variant"),
                "Supported: hilt, koin, none".into(),
                "Check [dependencyInjection] default=... in your overrides file".into(),
            ],
            Self::InvalidSdkRange { .. } => {
                vec!["Lower --min-sdk or raise --compile-sdk".into()]
            }
            Self::UnknownNetworkClient { .. } => {
                vec!["Supported network clients: none, retrofit, ktor".into()]
            }
            Self::UnknownDataSourceFlavor { .. } => {
                vec!["Supported data source flavours: local, remote".into()]
            }
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicatePath { .. } | Self::AbsolutePathNotAllowed { .. } => {
                ErrorCategory::Internal
            }
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
