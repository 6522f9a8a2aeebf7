//! OS family and platform detection.
//!
//! Derived from the `version_compile_os` and `version_compile_machine`
//! variables the server reports. Detection never guesses: an OS string
//! that mentions neither Linux nor Windows yields no OS.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operating system family a server was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OsFamily {
    Linux,
    Windows,
}

/// CPU/OS word width a server was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "32-bit")]
    Bits32,
    #[serde(rename = "64-bit")]
    Bits64,
}

/// The detected environment a default is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnvironmentInfo {
    pub os: OsFamily,
    pub platform: Platform,
}

impl EnvironmentInfo {
    /// Create environment info from known parts.
    pub fn new(os: OsFamily, platform: Platform) -> Self {
        Self { os, platform }
    }
}

/// Detect the OS family from the compile-OS string.
///
/// # Example
///
/// ```
/// use defcheck::detection::{detect_os, OsFamily};
///
/// assert_eq!(detect_os("Linux"), Some(OsFamily::Linux));
/// assert_eq!(detect_os("Win64"), Some(OsFamily::Windows));
/// assert_eq!(detect_os("osx10.12"), None);
/// ```
pub fn detect_os(compile_os: &str) -> Option<OsFamily> {
    let os = compile_os.to_lowercase();
    if os.contains("linux") {
        Some(OsFamily::Linux)
    } else if os.contains("win") {
        Some(OsFamily::Windows)
    } else {
        None
    }
}

/// Detect the platform width from compile-machine and compile-OS strings.
///
/// 32-bit builds carry no width marker, so anything without "64" is 32-bit.
pub fn detect_platform(compile_machine: &str, compile_os: &str) -> Platform {
    if compile_machine.contains("64") || compile_os.contains("64") {
        Platform::Bits64
    } else {
        Platform::Bits32
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => f.write_str("Linux"),
            Self::Windows => f.write_str("Windows"),
        }
    }
}

impl FromStr for OsFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linux" => Ok(Self::Linux),
            "windows" | "win" => Ok(Self::Windows),
            _ => Err(format!("unknown OS family: {}", s)),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bits32 => f.write_str("32-bit"),
            Self::Bits64 => f.write_str("64-bit"),
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "32" | "32-bit" => Ok(Self::Bits32),
            "64" | "64-bit" => Ok(Self::Bits64),
            _ => Err(format!("unknown platform: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_linux_variants() {
        assert_eq!(detect_os("Linux"), Some(OsFamily::Linux));
        assert_eq!(detect_os("linux-glibc2.12"), Some(OsFamily::Linux));
        assert_eq!(detect_os("debian-linux-gnu"), Some(OsFamily::Linux));
    }

    #[test]
    fn detects_windows_variants() {
        assert_eq!(detect_os("Win64"), Some(OsFamily::Windows));
        assert_eq!(detect_os("Win32"), Some(OsFamily::Windows));
    }

    #[test]
    fn unknown_os_is_not_guessed() {
        assert_eq!(detect_os("osx10.14"), None);
        assert_eq!(detect_os("FreeBSD12.0"), None);
        assert_eq!(detect_os(""), None);
    }

    #[test]
    fn platform_from_machine() {
        assert_eq!(detect_platform("x86_64", "Linux"), Platform::Bits64);
        assert_eq!(detect_platform("i686", "Linux"), Platform::Bits32);
    }

    #[test]
    fn platform_from_os_string() {
        assert_eq!(detect_platform("x86", "Win64"), Platform::Bits64);
        assert_eq!(detect_platform("x86", "Win32"), Platform::Bits32);
    }

    #[test]
    fn display_and_parse_round_trip() {
        assert_eq!("linux".parse::<OsFamily>(), Ok(OsFamily::Linux));
        assert_eq!("Windows".parse::<OsFamily>(), Ok(OsFamily::Windows));
        assert!("solaris".parse::<OsFamily>().is_err());
        assert_eq!("64".parse::<Platform>(), Ok(Platform::Bits64));
        assert_eq!("32-bit".parse::<Platform>(), Ok(Platform::Bits32));
        assert_eq!(Platform::Bits64.to_string(), "64-bit");
        assert_eq!(OsFamily::Windows.to_string(), "Windows");
    }

    #[test]
    fn platform_serializes_with_width_label() {
        assert_eq!(
            serde_json::to_value(Platform::Bits32).unwrap(),
            serde_json::json!("32-bit")
        );
    }
}
