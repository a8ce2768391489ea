//! Localization bundle discovery.
//!
//! Bundles are files named `<prefix>_<locale>.<ext>`, e.g. `lang_en.properties`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Directory holding the bundles shipped with the application.
const LANGUAGE_DIR: &str = "language";

/// Locale identifiers available under `base`.
///
/// Returns an empty set if `base` is not a directory. Entries that do not
/// follow the naming convention are skipped with a warning.
#[must_use]
pub fn list_locales(base: &Path) -> BTreeSet<String> {
    let mut locales = BTreeSet::new();

    if !base.is_dir() {
        tracing::debug!(path = %base.display(), "Resource directory not found");
        return locales;
    }

    let entries = match std::fs::read_dir(base) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %base.display(), error = %e, "Failed to read resource directory");
            return locales;
        }
    };

    for entry in entries.filter_map(std::result::Result::ok) {
        let name = entry.file_name();
        let name = name.to_string_lossy();

        match locale_from_file_name(&name) {
            Some(locale) => {
                locales.insert(locale.to_string());
            }
            None => {
                tracing::warn!(file = %name, "Skipping malformed resource file name");
            }
        }
    }

    tracing::debug!("Found {} locale(s) in {}", locales.len(), base.display());

    locales
}

/// Extracts `<locale>` from `<prefix>_<locale>.<ext>`.
fn locale_from_file_name(name: &str) -> Option<&str> {
    let stem = name.split('.').next()?;
    let locale = stem.split('_').nth(1)?;

    if locale.is_empty() {
        None
    } else {
        Some(locale)
    }
}

/// `language/` next to the running executable.
#[must_use]
pub fn default_resource_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    exe.parent().map(|dir| dir.join(LANGUAGE_DIR))
}
