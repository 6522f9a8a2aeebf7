//! Configuration loading for defcheck.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use defcheck::config::load_config;
//! use defcheck::report::OutputFormat;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".defcheck.yml"), "output: json").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.output, OutputFormat::Json);
//! ```
//!
//! # Configuration File Location
//!
//! `.defcheck.yml` in the current directory, unless `--config` names
//! another file. Command-line flags override config values.

pub mod loader;
pub mod schema;

pub use loader::{discover, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::DefcheckConfig;
