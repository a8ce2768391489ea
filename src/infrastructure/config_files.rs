//! Configuration file lifecycle.
//!
//! Owns `config.conf` and drives creation and deletion of the credential
//! store next to it. Every operation re-opens the files by path; nothing is
//! cached between calls and no locking is done, so mutating calls against
//! the same directory must be serialized by the caller.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::{Artifact, ArtifactStatus, AppError, Result, StoreSettings, CONFIG_FILE_NAME};
use crate::infrastructure::credential_store::{CredentialStore, SqliteCredentialStore};

/// Manager for the configuration file and its companion credential store.
pub struct ConfigFiles<S = SqliteCredentialStore> {
    config_path: PathBuf,
    store: S,
    rollback_on_failure: bool,
}

impl ConfigFiles<SqliteCredentialStore> {
    /// Manager for the files inside `working_dir`, backed by `SQLite`.
    #[must_use]
    pub fn open(working_dir: &Path, settings: &StoreSettings) -> Self {
        let store = SqliteCredentialStore::new(working_dir.join(Artifact::CredentialStore.file_name()));
        Self::with_store(working_dir, store, settings)
    }
}

impl<S: CredentialStore> ConfigFiles<S> {
    /// Manager using a specific credential store implementation.
    pub fn with_store(working_dir: &Path, store: S, settings: &StoreSettings) -> Self {
        Self {
            config_path: working_dir.join(CONFIG_FILE_NAME),
            store,
            rollback_on_failure: settings.rollback_on_failure,
        }
    }

    /// Path of the configuration file.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Path of the credential store file.
    #[must_use]
    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    /// Whether the configuration file is present.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }

    /// Whether the credential store file is present.
    #[must_use]
    pub fn credential_store_exists(&self) -> bool {
        self.store.path().exists()
    }

    /// Create the configuration file with `initial_payload`, then the
    /// credential store and its schema.
    ///
    /// A credential store left over from an earlier account is removed
    /// before the new one is created.
    ///
    /// # Errors
    /// - `AlreadyExists` if the configuration file is present; nothing is written.
    /// - `Io` if the file cannot be created; nothing is left on disk.
    /// - `PayloadWrite` if the payload cannot be written. `config_kept` tells
    ///   whether the new configuration file was left in place.
    /// - `StoreCreation` if the credential store fails, with the same
    ///   `config_kept` meaning.
    pub fn create(&self, initial_payload: &str) -> Result<()> {
        let file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.config_path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::warn!(path = %self.config_path.display(), "Configuration file already exists");
                return Err(AppError::AlreadyExists {
                    path: self.config_path.clone(),
                });
            }
            Err(e) => return Err(AppError::io("create configuration file", e)),
        };

        self.write_initial(file, initial_payload)?;

        tracing::info!(path = %self.config_path.display(), "Created configuration file");

        if let Err(e) = self.create_store() {
            tracing::error!(error = %e, "Credential store creation failed");
            return Err(AppError::StoreCreation {
                config_kept: self.keep_or_roll_back(),
                source: Box::new(e),
            });
        }

        Ok(())
    }

    /// Write the payload into a freshly created configuration file.
    fn write_initial(&self, mut writer: impl Write, payload: &str) -> Result<()> {
        let written = writer
            .write_all(payload.as_bytes())
            .and_then(|()| writer.flush());
        // Close before a possible rollback.
        drop(writer);

        if let Err(e) = written {
            tracing::error!(path = %self.config_path.display(), error = %e, "Failed to write configuration file");
            return Err(AppError::PayloadWrite {
                config_kept: self.keep_or_roll_back(),
                source: e,
            });
        }

        Ok(())
    }

    fn create_store(&self) -> Result<()> {
        remove_artifact(Artifact::CredentialStore, self.store.path())?;
        self.store.create_store()?;
        self.store.initialize_schema()
    }

    /// Apply the rollback policy after a failed `create`.
    /// Returns whether the configuration file is still on disk.
    fn keep_or_roll_back(&self) -> bool {
        !self.rollback_on_failure || !self.roll_back_config()
    }

    /// Remove the configuration file after a failed creation.
    /// Returns whether it is gone.
    fn roll_back_config(&self) -> bool {
        match fs::remove_file(&self.config_path) {
            Ok(()) => {
                tracing::info!(path = %self.config_path.display(), "Rolled back configuration file");
                true
            }
            Err(e) => {
                tracing::error!(
                    path = %self.config_path.display(),
                    error = %e,
                    "Failed to roll back configuration file"
                );
                false
            }
        }
    }

    /// Replace the whole configuration file with `payload`.
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be written.
    pub fn write(&self, payload: &str) -> Result<()> {
        fs::write(&self.config_path, payload)
            .map_err(|e| AppError::io("write configuration file", e))?;

        tracing::debug!(path = %self.config_path.display(), bytes = payload.len(), "Wrote configuration file");
        Ok(())
    }

    /// Read the configuration payload.
    ///
    /// An empty file is treated as corruption: both artifacts are deleted
    /// and `CorruptedAndReset` is returned.
    ///
    /// # Errors
    /// - `NotFound` if the file does not exist.
    /// - `CorruptedAndReset` if it was empty and has been wiped.
    /// - `DeleteFailed` if it was empty but could not be wiped.
    /// - `Io` for other read failures.
    pub fn read(&self) -> Result<String> {
        let content = match fs::read_to_string(&self.config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(AppError::NotFound {
                    path: self.config_path.clone(),
                });
            }
            Err(e) => return Err(AppError::io("read configuration file", e)),
        };

        if content.is_empty() {
            tracing::warn!(path = %self.config_path.display(), "Configuration file is empty, deleting account");
            self.delete()?;
            return Err(AppError::CorruptedAndReset {
                path: self.config_path.clone(),
            });
        }

        Ok(content)
    }

    /// Delete the configuration file and the credential store.
    ///
    /// Missing files are skipped. Both removals are attempted even if the
    /// first one fails.
    ///
    /// # Errors
    /// Returns `DeleteFailed` naming the first artifact that could not be
    /// removed. A second failure is logged.
    pub fn delete(&self) -> Result<()> {
        let config = remove_artifact(Artifact::ConfigFile, &self.config_path);
        let store = remove_artifact(Artifact::CredentialStore, self.store.path());

        match (config, store) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
            (Err(first), Err(second)) => {
                tracing::error!(error = %second, "Additional deletion failure");
                Err(first)
            }
        }
    }

    /// On-disk status of both artifacts.
    #[must_use]
    pub fn status(&self) -> [ArtifactStatus; 2] {
        [
            artifact_status(Artifact::ConfigFile, &self.config_path),
            artifact_status(Artifact::CredentialStore, self.store.path()),
        ]
    }
}

fn remove_artifact(artifact: Artifact, path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "Deleted {}", artifact);
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to delete {}", artifact);
            Err(AppError::DeleteFailed {
                target: artifact,
                source: e,
            })
        }
    }
}

fn artifact_status(artifact: Artifact, path: &Path) -> ArtifactStatus {
    match fs::metadata(path) {
        Ok(metadata) => ArtifactStatus {
            artifact,
            path: path.to_path_buf(),
            present: true,
            size_bytes: Some(metadata.len()),
            modified: metadata.modified().ok().map(DateTime::<Utc>::from),
        },
        Err(_) => ArtifactStatus::missing(artifact, path.to_path_buf()),
    }
}
