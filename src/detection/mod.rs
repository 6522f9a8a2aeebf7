//! Server version, OS and platform detection.
//!
//! Detection is best-effort: each part is `None` when the dump does not
//! carry enough information, and the check engine only resolves defaults
//! when all three parts are known.

pub mod environment;
pub mod version;

pub use environment::{detect_os, detect_platform, EnvironmentInfo, OsFamily, Platform};
pub use version::{BuildTag, ServerVersion};

use serde::Serialize;

use crate::input::ObservedVariables;

/// What could be detected about the server that produced a dump.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetectedServer {
    pub version: Option<ServerVersion>,
    pub os: Option<OsFamily>,
    pub platform: Option<Platform>,
}

impl DetectedServer {
    /// Detect version, OS and platform from observed variables.
    ///
    /// # Example
    ///
    /// ```
    /// use defcheck::detection::{DetectedServer, OsFamily, Platform};
    /// use defcheck::input::ObservedVariables;
    ///
    /// let vars = ObservedVariables::new()
    ///     .with("version", "5.7.21-log")
    ///     .with("version_compile_os", "Linux")
    ///     .with("version_compile_machine", "x86_64");
    ///
    /// let detected = DetectedServer::detect(&vars);
    /// assert_eq!(detected.os, Some(OsFamily::Linux));
    /// assert_eq!(detected.platform, Some(Platform::Bits64));
    /// assert!(detected.is_complete());
    /// ```
    pub fn detect(vars: &ObservedVariables) -> Self {
        let version = vars
            .get("version")
            .and_then(|raw| match ServerVersion::parse(raw) {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::debug!("{}", e);
                    None
                }
            });

        let compile_os = vars.get("version_compile_os");
        let os = compile_os.and_then(detect_os);

        let platform = match (vars.get("version_compile_machine"), compile_os) {
            (Some(machine), Some(os)) => Some(detect_platform(machine, os)),
            _ => None,
        };

        tracing::debug!(
            "Detected version={:?} os={:?} platform={:?}",
            version.as_ref().map(ToString::to_string),
            os,
            platform
        );

        Self {
            version,
            os,
            platform,
        }
    }

    /// Whether version, OS and platform were all detected.
    pub fn is_complete(&self) -> bool {
        self.resolved().is_some()
    }

    /// Names of the parts that could not be detected.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.version.is_none() {
            missing.push("version");
        }
        if self.os.is_none() {
            missing.push("OS");
        }
        if self.platform.is_none() {
            missing.push("platform");
        }
        missing
    }

    /// The version and environment, when every part is known.
    pub fn resolved(&self) -> Option<(&ServerVersion, EnvironmentInfo)> {
        match (&self.version, self.os, self.platform) {
            (Some(version), Some(os), Some(platform)) => {
                Some((version, EnvironmentInfo::new(os, platform)))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linux_vars() -> ObservedVariables {
        ObservedVariables::new()
            .with("version", "5.7.21-log")
            .with("version_compile_os", "Linux")
            .with("version_compile_machine", "x86_64")
    }

    #[test]
    fn detects_full_environment() {
        let detected = DetectedServer::detect(&linux_vars());
        assert_eq!(detected.version, Some(ServerVersion::new(5, 7, 21)));
        let (_, env) = detected.resolved().unwrap();
        assert_eq!(env, EnvironmentInfo::new(OsFamily::Linux, Platform::Bits64));
    }

    #[test]
    fn missing_version_is_incomplete() {
        let vars = linux_vars().with("version", "10.2-MariaDB");
        let detected = DetectedServer::detect(&vars);
        assert!(detected.version.is_none());
        assert!(!detected.is_complete());
    }

    #[test]
    fn platform_needs_both_compile_variables() {
        let vars = ObservedVariables::new()
            .with("version", "5.7.21")
            .with("version_compile_machine", "x86_64");
        let detected = DetectedServer::detect(&vars);
        assert!(detected.os.is_none());
        assert!(detected.platform.is_none());
    }

    #[test]
    fn platform_detected_even_when_os_unknown() {
        let vars = ObservedVariables::new()
            .with("version", "5.7.21")
            .with("version_compile_os", "osx10.12")
            .with("version_compile_machine", "x86_64");
        let detected = DetectedServer::detect(&vars);
        assert!(detected.os.is_none());
        assert_eq!(detected.platform, Some(Platform::Bits64));
        assert!(!detected.is_complete());
    }

    #[test]
    fn lists_missing_parts() {
        assert_eq!(
            DetectedServer::default().missing(),
            vec!["version", "OS", "platform"]
        );
        assert!(DetectedServer::detect(&linux_vars()).missing().is_empty());
    }
}
