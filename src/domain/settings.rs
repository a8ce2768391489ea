//! Runtime settings for the core.
//!
//! These are operator settings, separate from the opaque configuration
//! payload stored in `config.conf`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Path overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathSettings {
    /// Working directory to use instead of the OS-derived one.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Directory scanned for localization bundles.
    #[serde(default)]
    pub resource_dir: Option<PathBuf>,
}

/// Credential store behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Remove a freshly created configuration file when the credential
    /// store cannot be created.
    #[serde(default = "default_rollback")]
    pub rollback_on_failure: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            rollback_on_failure: default_rollback(),
        }
    }
}

const fn default_rollback() -> bool {
    true
}

/// Complete runtime settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub paths: PathSettings,

    #[serde(default)]
    pub store: StoreSettings,
}

impl Settings {
    /// Apply command-line overrides on top of file values.
    #[must_use]
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, resource_dir: Option<PathBuf>) -> Self {
        if data_dir.is_some() {
            self.paths.data_dir = data_dir;
        }
        if resource_dir.is_some() {
            self.paths.resource_dir = resource_dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.paths.data_dir.is_none());
        assert!(settings.store.rollback_on_failure);
    }

    #[test]
    fn test_overrides_replace_only_given_values() {
        let settings = Settings {
            paths: PathSettings {
                data_dir: Some(PathBuf::from("/from/file")),
                resource_dir: Some(PathBuf::from("/lang/file")),
            },
            ..Default::default()
        }
        .with_overrides(Some(PathBuf::from("/from/cli")), None);

        assert_eq!(settings.paths.data_dir, Some(PathBuf::from("/from/cli")));
        assert_eq!(settings.paths.resource_dir, Some(PathBuf::from("/lang/file")));
    }
}
