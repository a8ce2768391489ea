//! Domain-level error types for keepmypassword.
//!
//! Filesystem and database failures are translated into these variants at the
//! point where they happen. The presentation layer decides how to render them;
//! this module only classifies.

use std::path::PathBuf;
use thiserror::Error;

use super::models::Artifact;

/// How an error should be surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// An expected condition (e.g. "already exists"), shown as a plain notice.
    Informational,
    /// An unexpected environment problem, shown with full diagnostic detail.
    Diagnostic,
}

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// `create` was called while a configuration file is already present.
    #[error("Configuration file already exists at: {path}")]
    AlreadyExists { path: PathBuf },

    /// The configuration file is not present.
    #[error("Configuration file not found at: {path}")]
    NotFound { path: PathBuf },

    /// The configuration file was empty; both artifacts have been deleted.
    #[error("Configuration file at {path} was empty. Account deleted, restart required")]
    CorruptedAndReset { path: PathBuf },

    /// A present artifact could not be removed.
    #[error("{target} could not be deleted")]
    DeleteFailed {
        target: Artifact,
        #[source]
        source: std::io::Error,
    },

    /// The initial payload could not be written to a new configuration file.
    #[error("Writing the new configuration file failed (configuration file {})", config_outcome(.config_kept))]
    PayloadWrite {
        config_kept: bool,
        #[source]
        source: std::io::Error,
    },

    /// Credential store creation failed after the configuration file was written.
    #[error("Credential store creation failed (configuration file {})", config_outcome(.config_kept))]
    StoreCreation {
        config_kept: bool,
        #[source]
        source: Box<AppError>,
    },

    /// Failed to open or initialize the credential store.
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    /// Settings file could not be read or parsed.
    #[error("Settings error: {message}")]
    Settings { message: String },

    /// Result could not be rendered.
    #[error("Output error: {message}")]
    Output { message: String },

    /// The host OS has no known storage location.
    #[error("No working directory is defined for operating system '{os_name}'")]
    UnsupportedPlatform { os_name: String },

    /// IO operation failed.
    #[error("IO error while trying to {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    /// Create a database error from rusqlite error.
    pub fn database(err: rusqlite::Error) -> Self {
        Self::Database {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create an IO error naming the operation that failed.
    pub fn io(operation: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source: err,
        }
    }

    /// Classify this error for presentation.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::AlreadyExists { .. } | Self::NotFound { .. } | Self::CorruptedAndReset { .. } => {
                Severity::Informational
            }
            _ => Severity::Diagnostic,
        }
    }

    /// Whether the process must restart before continuing.
    #[must_use]
    pub const fn requires_restart(&self) -> bool {
        matches!(self, Self::CorruptedAndReset { .. })
    }
}

const fn config_outcome(config_kept: &bool) -> &'static str {
    if *config_kept {
        "kept"
    } else {
        "rolled back"
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_conditions_are_informational() {
        let err = AppError::AlreadyExists {
            path: PathBuf::from("/tmp/config.conf"),
        };
        assert_eq!(err.severity(), Severity::Informational);
        assert!(!err.requires_restart());

        let err = AppError::CorruptedAndReset {
            path: PathBuf::from("/tmp/config.conf"),
        };
        assert_eq!(err.severity(), Severity::Informational);
        assert!(err.requires_restart());
    }

    #[test]
    fn test_environment_failures_are_diagnostic() {
        let err = AppError::DeleteFailed {
            target: Artifact::CredentialStore,
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(err.severity(), Severity::Diagnostic);
        assert_eq!(err.to_string(), "Credential store could not be deleted");

        let err = AppError::io("write file", std::io::Error::other("disk full"));
        assert_eq!(err.severity(), Severity::Diagnostic);
        assert!(!err.requires_restart());
    }

    #[test]
    fn test_store_creation_message_reports_rollback() {
        let inner = AppError::Database {
            message: "locked".into(),
            source: None,
        };
        let err = AppError::StoreCreation {
            config_kept: false,
            source: Box::new(inner),
        };
        assert!(err.to_string().contains("rolled back"));
    }

    #[test]
    fn test_payload_write_is_diagnostic() {
        let err = AppError::PayloadWrite {
            config_kept: true,
            source: std::io::Error::other("no space left on device"),
        };
        assert_eq!(err.severity(), Severity::Diagnostic);
        assert!(err.to_string().contains("kept"));
    }
}
