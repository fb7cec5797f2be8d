//! Platform detection for artifact naming and terminal handling

use std::env;

/// Information about the platform the runner executes on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformInfo {
    /// Identifier embedded in artifact names (e.g., "linux", "darwin", "win32")
    pub identifier: String,
    /// Whether child processes should be attached to the invoking terminal by default
    pub default_tty: bool,
}

impl PlatformInfo {
    /// Detect the current platform
    pub fn current() -> Self {
        Self::from_os(env::consts::OS)
    }

    /// Create platform info from an OS name as reported by `std::env::consts::OS`
    pub fn from_os(os: &str) -> Self {
        let identifier = match os {
            "macos" => "darwin",
            "windows" => "win32",
            other => other,
        };

        Self {
            identifier: identifier.to_string(),
            default_tty: os != "windows",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_detection() {
        let platform = PlatformInfo::current();
        assert!(!platform.identifier.is_empty());
    }

    #[test]
    fn test_linux() {
        let platform = PlatformInfo::from_os("linux");
        assert_eq!(platform.identifier, "linux");
        assert!(platform.default_tty);
    }

    #[test]
    fn test_macos() {
        let platform = PlatformInfo::from_os("macos");
        assert_eq!(platform.identifier, "darwin");
        assert!(platform.default_tty);
    }

    #[test]
    fn test_windows_has_no_tty() {
        let platform = PlatformInfo::from_os("windows");
        assert_eq!(platform.identifier, "win32");
        assert!(!platform.default_tty);
    }

    #[test]
    fn test_unlisted_os_passes_through() {
        assert_eq!(PlatformInfo::from_os("freebsd").identifier, "freebsd");
    }
}
