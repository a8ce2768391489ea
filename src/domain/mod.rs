//! Domain layer - core types, errors and settings.
//!
//! This layer has no filesystem or database access of its own.

pub mod error;
pub mod models;
pub mod settings;

pub use error::{AppError, Result, Severity};
pub use models::{Artifact, ArtifactStatus, OsCategory, APP_FOLDER_NAME, CONFIG_FILE_NAME};
pub use settings::{PathSettings, Settings, StoreSettings};
