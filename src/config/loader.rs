//! Configuration file discovery and loading.

use crate::config::schema::DefcheckConfig;
use crate::error::{DefcheckError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project config file.
pub const CONFIG_FILE_NAME: &str = ".defcheck.yml";

/// Find `.defcheck.yml` in the given directory.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file and parse it into DefcheckConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<DefcheckConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DefcheckError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DefcheckError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into DefcheckConfig.
///
/// An empty file is a valid, all-defaults config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<DefcheckConfig> {
    if content.trim().is_empty() {
        return Ok(DefcheckConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| DefcheckError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// An explicit path must exist. Without one, `.defcheck.yml` in `cwd` is
/// used when present, and defaults otherwise.
pub fn load_config(cwd: &Path, config_override: Option<&Path>) -> Result<DefcheckConfig> {
    let path = match config_override {
        Some(path) => path.to_path_buf(),
        None => match discover(cwd) {
            Some(path) => path,
            None => {
                tracing::debug!("No {} in {}", CONFIG_FILE_NAME, cwd.display());
                return Ok(DefcheckConfig::default());
            }
        },
    };

    tracing::debug!("Loading config from {}", path.display());
    let mut config = load_config_file(&path)?;

    // Relative rule dirs are relative to the config file.
    if let Some(rules_dir) = config.rules_dir.take() {
        let base = path.parent().unwrap_or(cwd);
        config.rules_dir = Some(if rules_dir.is_relative() {
            base.join(rules_dir)
        } else {
            rules_dir
        });
    }

    Ok(config)
}
