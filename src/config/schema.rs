//! Configuration schema definitions for defcheck.
//!
//! This module contains the struct that maps to `.defcheck.yml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::compare::Verdict;
use crate::report::OutputFormat;

/// Root configuration structure for `.defcheck.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefcheckConfig {
    /// Directory of `mysql-X.Y.yml` rule tables, replacing the built-in ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules_dir: Option<PathBuf>,

    /// Report format.
    pub output: OutputFormat,

    /// Verdicts to show; empty shows everything.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub only: Vec<Verdict>,

    /// Variables reported without a verdict.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,

    /// Exit with failure when any variable deviates from its default.
    #[serde(skip_serializing_if = "is_false")]
    pub fail_on_ko: bool,
}

fn is_false(v: &bool) -> bool {
    !v
}
