//! Settings file loading.
//!
//! Settings are optional TOML; every field has a default.

use std::fs;
use std::path::Path;

use crate::domain::{AppError, Result, Settings};

/// Load settings from `path`, or defaults when no path is given or the
/// file does not exist.
///
/// # Errors
/// Returns error if the file exists but cannot be read or parsed.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) if path.exists() => load_settings_from_file(path),
        Some(path) => {
            tracing::debug!(path = %path.display(), "Settings file not found, using defaults");
            Ok(Settings::default())
        }
        None => Ok(Settings::default()),
    }
}

/// Load settings from a specific file.
///
/// # Errors
/// Returns error if file cannot be read or parsed.
pub fn load_settings_from_file(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("read settings file {}", path.display()), e))?;

    let settings = toml::from_str(&content).map_err(|e| AppError::Settings {
        message: format!("Failed to parse {}: {e}", path.display()),
    })?;

    tracing::debug!(path = %path.display(), "Loaded settings");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();

        let settings = load_settings(Some(&dir.path().join("settings.toml"))).unwrap();

        assert!(settings.store.rollback_on_failure);
        assert!(settings.paths.data_dir.is_none());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(
            &path,
            "[paths]\ndata_dir = \"/srv/kmp\"\n\n[store]\nrollback_on_failure = false\n",
        )
        .unwrap();

        let settings = load_settings(Some(&path)).unwrap();

        assert_eq!(settings.paths.data_dir, Some(PathBuf::from("/srv/kmp")));
        assert!(settings.paths.resource_dir.is_none());
        assert!(!settings.store.rollback_on_failure);
    }

    #[test]
    fn test_malformed_file_is_settings_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[paths\n").unwrap();

        assert!(matches!(
            load_settings(Some(&path)),
            Err(AppError::Settings { .. })
        ));
    }
}
