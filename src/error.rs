//! Error types for defcheck operations.
//!
//! This module defines [`DefcheckError`], the error type used by the outer
//! layers of the tool (input, config, rule-table loading), and a [`Result`]
//! alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - The check engine itself never fails: unknown versions, platforms and
//!   variables are reported as data on the [`CheckReport`](crate::check::CheckReport)
//! - Use `DefcheckError` for I/O and parse failures around the engine
//! - Use `anyhow::Error` (via `DefcheckError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for defcheck operations.
#[derive(Debug, Error)]
pub enum DefcheckError {
    /// The reported server version could not be parsed.
    #[error("Unrecognized server version: {raw}")]
    UnrecognizedVersion { raw: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A rule table exists but is not valid.
    #[error("Failed to parse rule table at {path}: {message}")]
    RuleTableParseError { path: PathBuf, message: String },

    /// Rules directory given explicitly does not exist.
    #[error("Rules directory not found: {path}")]
    RulesDirNotFound { path: PathBuf },

    /// Variable dump file not found.
    #[error("Input not found: {path}")]
    InputNotFound { path: PathBuf },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for defcheck operations.
pub type Result<T> = std::result::Result<T, DefcheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_version_displays_raw() {
        let err = DefcheckError::UnrecognizedVersion {
            raw: "10.2-MariaDB".into(),
        };
        assert!(err.to_string().contains("10.2-MariaDB"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = DefcheckError::ConfigParseError {
            path: PathBuf::from("/.defcheck.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/.defcheck.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn rule_table_parse_error_displays_path() {
        let err = DefcheckError::RuleTableParseError {
            path: PathBuf::from("rules/mysql-5.7.yml"),
            message: "expected a mapping".into(),
        };
        assert!(err.to_string().contains("mysql-5.7.yml"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: DefcheckError = io_err.into();
        assert!(matches!(err, DefcheckError::Io(_)));
    }

    #[test]
    fn anyhow_error_converts() {
        let err: DefcheckError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}
