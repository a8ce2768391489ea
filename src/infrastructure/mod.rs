//! Infrastructure layer - filesystem, OS and database adapters.
//!
//! This layer handles all I/O operations and external dependencies.

pub mod config_files;
pub mod credential_store;
pub mod locales;
pub mod os_detect;
pub mod settings;
pub mod working_dir;

pub use config_files::ConfigFiles;
pub use credential_store::CredentialStore;
pub use locales::{default_resource_dir, list_locales};
pub use settings::load_settings;
pub use working_dir::WorkingDir;
