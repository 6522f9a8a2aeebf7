//! Human-readable output formatter.
//!
//! One line per variable, with optional color support.

use std::io::Write;

use super::ReportFormatter;
use crate::check::{CheckReport, CheckedVariable};
use crate::compare::Verdict;
use crate::ui::DefcheckTheme;

/// Formats check reports for human consumption.
pub struct HumanFormatter {
    theme: DefcheckTheme,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        Self {
            theme: DefcheckTheme::for_color(use_color),
        }
    }

    fn verdict_label(&self, verdict: Option<Verdict>) -> String {
        let label = format!("{:<7}", verdict.map_or("-", Verdict::as_str));
        match verdict {
            Some(Verdict::Ok) => self.theme.success.apply_to(label).to_string(),
            Some(Verdict::Ko) => self.theme.error.apply_to(label).to_string(),
            Some(Verdict::Unknown) => self.theme.warning.apply_to(label).to_string(),
            None => self.theme.dim.apply_to(label).to_string(),
        }
    }

    fn detected_line<W: Write>(&self, writer: &mut W, key: &str, value: Option<String>) -> std::io::Result<()> {
        let value = value.unwrap_or_else(|| "not detected".to_string());
        writeln!(
            writer,
            "{} {}",
            self.theme.key.apply_to(format!("{:<9}", format!("{}:", key))),
            value
        )
    }

    fn variable_line<W: Write>(&self, writer: &mut W, name: &str, var: &CheckedVariable) -> std::io::Result<()> {
        write!(
            writer,
            "{} {} = {}",
            self.verdict_label(var.verdict),
            name,
            display_value(&var.value)
        )?;

        if var.verdict == Some(Verdict::Ko) {
            if let Some(ref default) = var.default {
                let note = if default.computed {
                    format!("(default: {}, autosized)", display_value(&default.value))
                } else {
                    format!("(default: {})", display_value(&default.value))
                };
                write!(writer, " {}", self.theme.dim.apply_to(note))?;
            }
        }

        if var.is_removed() {
            write!(writer, " {}", self.theme.warning.apply_to("[removed]"))?;
        }

        writeln!(writer)
    }
}

fn display_value(value: &str) -> &str {
    if value.is_empty() {
        "''"
    } else {
        value
    }
}

impl ReportFormatter for HumanFormatter {
    fn format<W: Write>(
        &self,
        report: &CheckReport,
        only: &[Verdict],
        writer: &mut W,
    ) -> std::io::Result<()> {
        let detected = &report.detected;
        self.detected_line(writer, "version", detected.version.as_ref().map(ToString::to_string))?;
        self.detected_line(writer, "os", detected.os.map(|o| o.to_string()))?;
        self.detected_line(writer, "platform", detected.platform.map(|p| p.to_string()))?;
        writeln!(writer)?;

        for (name, var) in report.filtered(only) {
            self.variable_line(writer, name, var)?;
        }

        let summary = report.summary();
        writeln!(writer)?;
        write!(
            writer,
            "{} variables: {} ok, {} ko, {} unknown",
            summary.total, summary.ok, summary.ko, summary.unknown
        )?;
        if summary.unchecked > 0 {
            write!(writer, ", {} unchecked", summary.unchecked)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
