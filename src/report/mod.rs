//! Check report formatters.
//!
//! This module renders a [`CheckReport`] in different formats
//! (human-readable, JSON).

pub mod human;
pub mod json;

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::check::CheckReport;
use crate::compare::Verdict;

/// Output format for check reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Trait for formatting check reports.
pub trait ReportFormatter {
    /// Format the variables whose verdict is in `only` (all when empty).
    fn format<W: Write>(
        &self,
        report: &CheckReport,
        only: &[Verdict],
        writer: &mut W,
    ) -> std::io::Result<()>;
}

/// Render a report to a string in the given format.
pub fn render(report: &CheckReport, only: &[Verdict], format: OutputFormat, use_color: bool) -> String {
    let mut output = Vec::new();
    let result = match format {
        OutputFormat::Human => HumanFormatter::new(use_color).format(report, only, &mut output),
        OutputFormat::Json => JsonFormatter::new().format(report, only, &mut output),
    };
    if let Err(e) = result {
        tracing::warn!("Failed to render report: {}", e);
    }
    String::from_utf8(output).unwrap_or_default()
}

pub use human::HumanFormatter;
pub use json::{DetectedJson, JsonFormatter};
