//! Startup decision: first-time setup or load existing state.

use crate::domain::Result;
use crate::infrastructure::{ConfigFiles, CredentialStore};

/// What the host application should do after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupState {
    /// No configuration file yet; run first-time setup.
    FirstRun,
    /// Existing configuration payload.
    Ready(String),
}

/// Inspect the configuration file and decide how to continue.
///
/// # Errors
/// Propagates read failures. `CorruptedAndReset` means the account was
/// wiped and the process must restart.
pub fn begin<S: CredentialStore>(files: &ConfigFiles<S>) -> Result<StartupState> {
    if !files.exists() {
        tracing::info!("No configuration file, first-time setup required");
        return Ok(StartupState::FirstRun);
    }

    if !files.credential_store_exists() {
        tracing::warn!(path = %files.store_path().display(), "Configuration present but credential store is missing");
    }

    files.read().map(StartupState::Ready)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AppError, StoreSettings};
    use tempfile::tempdir;

    #[test]
    fn test_fresh_directory_is_first_run() {
        let dir = tempdir().unwrap();
        let files = ConfigFiles::open(dir.path(), &StoreSettings::default());

        assert_eq!(begin(&files).unwrap(), StartupState::FirstRun);
    }

    #[test]
    fn test_existing_config_is_ready() {
        let dir = tempdir().unwrap();
        let files = ConfigFiles::open(dir.path(), &StoreSettings::default());
        files.create("payload").unwrap();

        assert_eq!(begin(&files).unwrap(), StartupState::Ready("payload".into()));
    }

    #[test]
    fn test_empty_config_requires_restart() {
        let dir = tempdir().unwrap();
        let files = ConfigFiles::open(dir.path(), &StoreSettings::default());
        files.create("payload").unwrap();
        files.write("").unwrap();

        let err = begin(&files).unwrap_err();
        assert!(matches!(err, AppError::CorruptedAndReset { .. }));

        // After the reset the next startup is a first run.
        assert_eq!(begin(&files).unwrap(), StartupState::FirstRun);
    }
}
