//! Credential store collaborator.
//!
//! The core only creates the store and its initial schema. Everything stored
//! inside it belongs to other parts of the application.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{params, Connection};

use crate::domain::{AppError, Result};

/// Operations the config file manager needs from the credential store.
pub trait CredentialStore {
    /// Location of the store file.
    fn path(&self) -> &Path;

    /// Create the store file.
    ///
    /// # Errors
    /// Returns error if the file cannot be created.
    fn create_store(&self) -> Result<()>;

    /// Create the initial tables.
    ///
    /// # Errors
    /// Returns error if schema creation fails.
    fn initialize_schema(&self) -> Result<()>;
}

/// `SQLite`-backed credential store.
#[derive(Debug, Clone)]
pub struct SqliteCredentialStore {
    path: PathBuf,
}

impl SqliteCredentialStore {
    /// Store located at `path`. Nothing is touched on disk until
    /// `create_store` is called.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path).map_err(AppError::database)?;

        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(AppError::database)?;

        Ok(conn)
    }
}

impl CredentialStore for SqliteCredentialStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn create_store(&self) -> Result<()> {
        // SQLite creates the file lazily; force it onto disk.
        let conn = self.connect()?;
        conn.execute_batch("PRAGMA user_version = 1;")
            .map_err(AppError::database)?;

        tracing::info!(path = %self.path.display(), "Created credential store");
        Ok(())
    }

    fn initialize_schema(&self) -> Result<()> {
        let conn = self.connect()?;

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS credentials (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username BLOB NOT NULL,
                password BLOB NOT NULL,
                url TEXT,
                iv BLOB NOT NULL
            );

            CREATE TABLE IF NOT EXISTS store_meta (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                created_at TEXT NOT NULL
            );
            ",
        )
        .map_err(AppError::database)?;

        conn.execute(
            "INSERT OR IGNORE INTO store_meta (id, created_at) VALUES (1, ?1)",
            params![Utc::now().to_rfc3339()],
        )
        .map_err(AppError::database)?;

        tracing::debug!(path = %self.path.display(), "Initialized credential store schema");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_store_writes_file() {
        let dir = tempdir().unwrap();
        let store = SqliteCredentialStore::new(dir.path().join("database.db"));

        assert!(!store.path().exists());
        store.create_store().unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_initialize_schema_creates_tables() {
        let dir = tempdir().unwrap();
        let store = SqliteCredentialStore::new(dir.path().join("database.db"));

        store.create_store().unwrap();
        store.initialize_schema().unwrap();
        // Second run must not fail or duplicate metadata.
        store.initialize_schema().unwrap();

        let conn = Connection::open(store.path()).unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN ('credentials', 'store_meta')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        let meta_rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM store_meta", [], |row| row.get(0))
            .unwrap();

        assert_eq!(tables, 2);
        assert_eq!(meta_rows, 1);
    }

    #[test]
    fn test_create_store_in_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let store = SqliteCredentialStore::new(dir.path().join("missing").join("database.db"));

        assert!(matches!(store.create_store(), Err(AppError::Database { .. })));
    }
}
