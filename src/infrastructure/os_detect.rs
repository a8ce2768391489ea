//! Host operating system classification.

use crate::domain::OsCategory;

const MAC_TOKENS: &[&str] = &["mac", "osx"];
const UNIX_TOKENS: &[&str] = &["nix", "nux", "aix", "bsd", "sunos", "solaris"];

/// Classifies the running host.
#[must_use]
pub fn detect() -> OsCategory {
    classify(std::env::consts::OS)
}

/// Classifies an operating system name by substring match.
///
/// `win` is checked first, so any name containing it is Windows even if it
/// would also match a later family.
#[must_use]
pub fn classify(os_name: &str) -> OsCategory {
    let os = os_name.to_lowercase();

    if os.contains("win") {
        OsCategory::Windows
    } else if MAC_TOKENS.iter().any(|t| os.contains(t)) {
        OsCategory::MacOs
    } else if UNIX_TOKENS.iter().any(|t| os.contains(t)) {
        OsCategory::UnixLike
    } else {
        OsCategory::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_names() {
        assert_eq!(classify("windows"), OsCategory::Windows);
        assert_eq!(classify("Windows 10"), OsCategory::Windows);
        assert_eq!(classify("WIN32"), OsCategory::Windows);
    }

    #[test]
    fn test_mac_names() {
        assert_eq!(classify("macos"), OsCategory::MacOs);
        assert_eq!(classify("Mac OS X"), OsCategory::MacOs);
        assert_eq!(classify("OSX"), OsCategory::MacOs);
    }

    #[test]
    fn test_unix_names() {
        assert_eq!(classify("linux"), OsCategory::UnixLike);
        assert_eq!(classify("Linux"), OsCategory::UnixLike);
        assert_eq!(classify("AIX"), OsCategory::UnixLike);
        assert_eq!(classify("freebsd"), OsCategory::UnixLike);
        assert_eq!(classify("Unix"), OsCategory::UnixLike);
    }

    #[test]
    fn test_win_takes_priority() {
        // "darwin" contains "win"
        assert_eq!(classify("darwin"), OsCategory::Windows);
    }

    #[test]
    fn test_unknown_fallback() {
        assert_eq!(classify(""), OsCategory::Unknown);
        assert_eq!(classify("haiku"), OsCategory::Unknown);
        assert_eq!(classify("android"), OsCategory::Unknown);
    }

    #[test]
    fn test_detect_matches_classify() {
        assert_eq!(detect(), classify(std::env::consts::OS));
    }
}
