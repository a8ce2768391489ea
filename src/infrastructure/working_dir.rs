//! Working directory resolution.
//!
//! Maps the host OS to its storage location and creates it. The resolved
//! path is held by a `WorkingDir` value that the caller constructs once and
//! passes to everything that touches the account files.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::domain::{AppError, OsCategory, PathSettings, Result, APP_FOLDER_NAME};
use crate::infrastructure::os_detect;

/// Outcome of a resolution attempt.
#[derive(Debug)]
pub struct Resolution {
    /// Detected OS category.
    pub os: OsCategory,
    /// Working directory, unset when the OS has no known location.
    pub path: Option<PathBuf>,
    /// Directory creation failure. Not fatal; the caller decides what to do.
    pub error: Option<AppError>,
}

/// Process-wide working directory, set on first resolution.
#[derive(Debug, Default)]
pub struct WorkingDir {
    path: OnceLock<PathBuf>,
    override_dir: Option<PathBuf>,
}

impl WorkingDir {
    /// Create an unresolved working directory.
    #[must_use]
    pub fn new(settings: &PathSettings) -> Self {
        Self {
            path: OnceLock::new(),
            override_dir: settings.data_dir.clone(),
        }
    }

    /// Create a working directory fixed to `path`, bypassing OS detection.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: OnceLock::new(),
            override_dir: Some(path.into()),
        }
    }

    /// Detect the OS, compute the directory and create it.
    ///
    /// Safe to call repeatedly: the first resolved path is kept for the
    /// lifetime of this value and creation is idempotent.
    pub fn resolve_and_prepare(&self) -> Resolution {
        let os = os_detect::detect();
        let base = platform_dir(os, dirs::home_dir(), app_data_dir());
        self.resolve_for(os, base)
    }

    fn resolve_for(&self, os: OsCategory, platform: Option<PathBuf>) -> Resolution {
        let candidate = match self.path.get() {
            Some(existing) => Some(existing.clone()),
            None => self.override_dir.clone().or(platform),
        };

        let Some(candidate) = candidate else {
            tracing::warn!(%os, "No working directory for this platform");
            return Resolution {
                os,
                path: None,
                error: None,
            };
        };

        let path = self.path.get_or_init(|| candidate).clone();
        let error = ensure_dir(&path).err();

        Resolution {
            os,
            path: Some(path),
            error,
        }
    }

    /// The resolved path, if resolution has happened.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.get().map(PathBuf::as_path)
    }

    /// The resolved path, or an error when the platform has none.
    ///
    /// # Errors
    /// Returns `UnsupportedPlatform` if the directory was never resolved.
    pub fn require(&self) -> Result<&Path> {
        self.path().ok_or_else(|| AppError::UnsupportedPlatform {
            os_name: std::env::consts::OS.to_string(),
        })
    }
}

/// Storage directory for an OS category, given its base locations.
#[must_use]
pub fn platform_dir(
    os: OsCategory,
    home: Option<PathBuf>,
    app_data: Option<PathBuf>,
) -> Option<PathBuf> {
    match os {
        OsCategory::Windows => app_data.map(|p| p.join(APP_FOLDER_NAME)),
        OsCategory::MacOs => home.map(|p| p.join("Library").join(APP_FOLDER_NAME)),
        OsCategory::UnixLike => home.map(|p| p.join(APP_FOLDER_NAME)),
        OsCategory::Unknown => None,
    }
}

/// Roaming application data location on Windows.
fn app_data_dir() -> Option<PathBuf> {
    std::env::var_os("APPDATA")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        tracing::debug!(path = %path.display(), "Working directory already present");
        return Ok(());
    }

    std::fs::create_dir_all(path).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to create working directory");
        AppError::io(format!("create working directory {}", path.display()), e)
    })?;

    tracing::info!(path = %path.display(), "Created working directory");
    Ok(())
}
