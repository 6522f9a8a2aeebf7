//! JSON output formatter.
//!
//! Formats check reports as machine-readable JSON for tooling integration.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ReportFormatter;
use crate::check::{CheckReport, CheckSummary};
use crate::compare::Verdict;
use crate::detection::DetectedServer;

/// Formats check reports as JSON.
pub struct JsonFormatter {
    checked_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    checked_at: DateTime<Utc>,
    detected: DetectedJson,
    variables: Vec<JsonVariable<'a>>,
    summary: CheckSummary,
}

/// JSON view of what was detected about the server.
#[derive(Debug, Serialize)]
pub struct DetectedJson {
    pub version: Option<String>,
    pub bucket: Option<String>,
    pub os: Option<String>,
    pub platform: Option<String>,
    pub complete: bool,
}

impl DetectedJson {
    /// Build the view from a detection result.
    pub fn new(detected: &DetectedServer) -> Self {
        Self {
            version: detected.version.as_ref().map(ToString::to_string),
            bucket: detected.version.as_ref().map(|v| v.bucket()),
            os: detected.os.map(|o| o.to_string()),
            platform: detected.platform.map(|p| p.to_string()),
            complete: detected.is_complete(),
        }
    }
}

#[derive(Serialize)]
struct JsonVariable<'a> {
    name: &'a str,
    value: &'a str,
    verdict: Option<Verdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    r#type: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    autosized: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    removed: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter stamped with the current time.
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Create a JSON formatter with a fixed timestamp.
    pub fn at(checked_at: DateTime<Utc>) -> Self {
        Self { checked_at }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format<W: Write>(
        &self,
        report: &CheckReport,
        only: &[Verdict],
        writer: &mut W,
    ) -> std::io::Result<()> {
        let variables = report
            .filtered(only)
            .map(|(name, var)| JsonVariable {
                name,
                value: &var.value,
                verdict: var.verdict,
                default: var.default.as_ref().map(|d| d.value.as_str()),
                r#type: var.default.as_ref().map(|d| d.value_type().to_string()),
                autosized: var.default.as_ref().is_some_and(|d| d.computed),
                removed: var.is_removed(),
            })
            .collect();

        let output = JsonOutput {
            checked_at: self.checked_at,
            detected: DetectedJson::new(&report.detected),
            variables,
            summary: report.summary(),
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::Checker;
    use crate::rules::{DefaultRule, MemoryRuleStore, RuleTable, ValueType};
    use chrono::TimeZone;

    fn report() -> CheckReport {
        let table = RuleTable::empty("5.7")
            .with_rule("back_log", DefaultRule::new(ValueType::Numeric, "-1").autosized())
            .with_rule("max_connections", DefaultRule::new(ValueType::Numeric, "151"))
            .with_rule("table_open_cache", DefaultRule::new(ValueType::Numeric, "2000"));
        Checker::new(MemoryRuleStore::new().with_table(table)).check(
            "version\t5.7.21-log\nversion_compile_os\tLinux\nversion_compile_machine\tx86_64\nmax_connections\t151\nback_log\t80\ntable_open_cache\t4000\n",
        )
    }

    fn render(only: &[Verdict]) -> serde_json::Value {
        let mut output = Vec::new();
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        JsonFormatter::at(at)
            .format(&report(), only, &mut output)
            .unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn detected_block() {
        let json = render(&[]);
        assert_eq!(json["detected"]["version"], "5.7.21");
        assert_eq!(json["detected"]["bucket"], "5.7");
        assert_eq!(json["detected"]["os"], "Linux");
        assert_eq!(json["detected"]["platform"], "64-bit");
        assert_eq!(json["detected"]["complete"], true);
        assert_eq!(json["checked_at"], "2026-01-02T03:04:05Z");
    }

    #[test]
    fn variables_carry_defaults() {
        let json = render(&[]);
        let variables = json["variables"].as_array().unwrap();
        let back_log = variables.iter().find(|v| v["name"] == "back_log").unwrap();
        assert_eq!(back_log["verdict"], "ok");
        assert_eq!(back_log["default"], "80");
        assert_eq!(back_log["autosized"], true);

        let version = variables.iter().find(|v| v["name"] == "version").unwrap();
        assert_eq!(version["verdict"], "unknown");
        assert!(version.get("default").is_none());
    }

    #[test]
    fn filter_applies_but_summary_is_complete() {
        let json = render(&[Verdict::Ko]);
        let variables = json["variables"].as_array().unwrap();
        assert_eq!(variables.len(), 1);
        assert_eq!(variables[0]["name"], "table_open_cache");
        assert_eq!(variables[0]["default"], "2000");
        assert_eq!(variables[0]["type"], "numeric");
        assert_eq!(json["summary"]["total"], 6);
        assert_eq!(json["summary"]["ok"], 2);
        assert_eq!(json["summary"]["ko"], 1);
    }
}
