//! Domain models for the persisted account artifacts.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File name of the configuration file inside the working directory.
pub const CONFIG_FILE_NAME: &str = "config.conf";

/// File name of the credential store inside the working directory.
pub const CREDENTIAL_STORE_FILE_NAME: &str = "database.db";

/// Subfolder created under the platform base location.
pub const APP_FOLDER_NAME: &str = "KeepMyPassword";

/// Operating system family, as far as storage locations are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsCategory {
    Windows,
    MacOs,
    UnixLike,
    Unknown,
}

impl std::fmt::Display for OsCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Windows => write!(f, "Windows"),
            Self::MacOs => write!(f, "macOS"),
            Self::UnixLike => write!(f, "Unix-like"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One of the two files this core manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Artifact {
    ConfigFile,
    CredentialStore,
}

impl Artifact {
    /// File name of this artifact within the working directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::ConfigFile => CONFIG_FILE_NAME,
            Self::CredentialStore => CREDENTIAL_STORE_FILE_NAME,
        }
    }
}

impl std::fmt::Display for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigFile => write!(f, "Configuration file"),
            Self::CredentialStore => write!(f, "Credential store"),
        }
    }
}

/// On-disk state of a single artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactStatus {
    pub artifact: Artifact,
    pub path: PathBuf,
    pub present: bool,
    /// Size in bytes, when present.
    pub size_bytes: Option<u64>,
    /// Last modification time, when present and reported by the filesystem.
    pub modified: Option<DateTime<Utc>>,
}

impl ArtifactStatus {
    /// Status for an artifact that does not exist.
    #[must_use]
    pub const fn missing(artifact: Artifact, path: PathBuf) -> Self {
        Self {
            artifact,
            path,
            present: false,
            size_bytes: None,
            modified: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_file_names() {
        assert_eq!(Artifact::ConfigFile.file_name(), "config.conf");
        assert_eq!(Artifact::CredentialStore.file_name(), "database.db");
    }

    #[test]
    fn test_os_category_serializes_lowercase() {
        let json = serde_json::to_string(&OsCategory::UnixLike).unwrap();
        assert_eq!(json, "\"unixlike\"");
    }
}
