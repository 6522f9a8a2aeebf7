//! Default rule rows and rule tables.
//!
//! A rule table covers one `MAJOR.MINOR` bucket and maps each variable
//! name to an ordered list of rules. Rows are authored in ascending
//! version order; the resolver relies on that ordering.
//!
//! # Table format
//!
//! ```yaml
//! bucket: "5.7"
//! variables:
//!   binlog_format:
//!     - { type: enumeration, value: STATEMENT }
//!     - { min_patch: 7, type: enumeration, value: ROW }
//!   back_log:
//!     - { autosized: true, type: numeric, value: "-1" }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::detection::{OsFamily, Platform, ServerVersion};
use crate::error::{DefcheckError, Result};

/// Sentinel value meaning "no default" for string-like variables.
pub const NULL_SENTINEL: &str = "NULL";

/// OS constraint of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RuleOs {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(alias = "linux")]
    Linux,
    #[serde(alias = "windows")]
    Windows,
}

impl RuleOs {
    /// Whether a server built for `os` satisfies this constraint.
    pub fn matches(self, os: OsFamily) -> bool {
        match self {
            Self::All => true,
            Self::Linux => os == OsFamily::Linux,
            Self::Windows => os == OsFamily::Windows,
        }
    }
}

/// Platform constraint of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RulePlatform {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "32-bit")]
    Bits32,
    #[serde(rename = "64-bit")]
    Bits64,
}

impl RulePlatform {
    /// Whether a server built for `platform` satisfies this constraint.
    pub fn matches(self, platform: Platform) -> bool {
        match self {
            Self::All => true,
            Self::Bits32 => platform == Platform::Bits32,
            Self::Bits64 => platform == Platform::Bits64,
        }
    }
}

/// Declared type of a variable's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueType {
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "numeric", alias = "integer")]
    Numeric,
    #[serde(rename = "enumeration")]
    Enumeration,
    #[serde(rename = "set")]
    Set,
    #[serde(rename = "directory name")]
    DirectoryName,
    #[serde(rename = "file name")]
    FileName,
    #[serde(other, rename = "other")]
    Other,
}

impl ValueType {
    /// Types for which an empty observed value means "not set".
    pub fn is_string_like(self) -> bool {
        matches!(self, Self::String | Self::DirectoryName | Self::FileName)
    }

    /// Name as written in rule tables.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Numeric => "numeric",
            Self::Enumeration => "enumeration",
            Self::Set => "set",
            Self::DirectoryName => "directory name",
            Self::FileName => "file name",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultRule {
    /// Lowest patch level this row applies to.
    #[serde(default)]
    pub min_patch: u32,
    /// Lowest build tag this row applies to.
    #[serde(default)]
    pub min_build: u64,
    #[serde(default)]
    pub os: RuleOs,
    #[serde(default)]
    pub platform: RulePlatform,
    /// The variable no longer exists from this version on.
    #[serde(default)]
    pub removed: bool,
    /// The server computes this default at startup.
    #[serde(default)]
    pub autosized: bool,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default)]
    pub unit: String,
    /// Factory default, or [`NULL_SENTINEL`].
    #[serde(deserialize_with = "scalar_string")]
    pub value: String,
}

impl DefaultRule {
    /// A rule that applies everywhere with the given type and value.
    pub fn new(value_type: ValueType, value: impl Into<String>) -> Self {
        Self {
            min_patch: 0,
            min_build: 0,
            os: RuleOs::All,
            platform: RulePlatform::All,
            removed: false,
            autosized: false,
            value_type,
            unit: String::new(),
            value: value.into(),
        }
    }

    /// Set the minimum patch level.
    pub fn since_patch(mut self, patch: u32) -> Self {
        self.min_patch = patch;
        self
    }

    /// Set the minimum build tag.
    pub fn since_build(mut self, build: u64) -> Self {
        self.min_build = build;
        self
    }

    /// Restrict to an OS.
    pub fn on_os(mut self, os: RuleOs) -> Self {
        self.os = os;
        self
    }

    /// Restrict to a platform.
    pub fn on_platform(mut self, platform: RulePlatform) -> Self {
        self.platform = platform;
        self
    }

    /// Mark as computed at server startup.
    pub fn autosized(mut self) -> Self {
        self.autosized = true;
        self
    }

    /// Mark as removed.
    pub fn removed(mut self) -> Self {
        self.removed = true;
        self
    }

    /// Whether the value is the NULL sentinel.
    pub fn is_null(&self) -> bool {
        self.value == NULL_SENTINEL
    }

    /// Whether this row's version constraints hold for `version`.
    pub fn applies_to_version(&self, version: &ServerVersion) -> bool {
        self.min_patch <= version.patch && version.build.cmp_threshold(self.min_build).is_ge()
    }
}

/// The default that applies to one variable after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDefault {
    /// The rule row selected by the resolver.
    pub rule: DefaultRule,
    /// Effective default: the rule's value or the computed one.
    pub value: String,
    /// Whether `value` came from an autosize formula.
    pub computed: bool,
}

impl ResolvedDefault {
    /// A default that keeps the rule's static value.
    pub fn from_rule(rule: &DefaultRule) -> Self {
        Self {
            rule: rule.clone(),
            value: rule.value.clone(),
            computed: false,
        }
    }

    /// Replace the effective value with a computed one.
    pub fn with_computed(mut self, value: String) -> Self {
        self.value = value;
        self.computed = true;
        self
    }

    /// Declared type of the variable.
    pub fn value_type(&self) -> ValueType {
        self.rule.value_type
    }

    /// Whether the effective value is the NULL sentinel.
    pub fn is_null(&self) -> bool {
        self.value == NULL_SENTINEL
    }
}

/// All rules for one `MAJOR.MINOR` bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    pub bucket: String,
    #[serde(default)]
    pub variables: BTreeMap<String, Vec<DefaultRule>>,
}

impl RuleTable {
    /// An empty table for a bucket.
    pub fn empty(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            variables: BTreeMap::new(),
        }
    }

    /// Parse a YAML table.
    ///
    /// # Errors
    ///
    /// Returns `RuleTableParseError` if the YAML is invalid.
    pub fn from_yaml(content: &str, source_path: &Path) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| DefcheckError::RuleTableParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Append a rule for a variable, keeping authored order.
    pub fn push(&mut self, name: impl Into<String>, rule: DefaultRule) {
        self.variables.entry(name.into()).or_default().push(rule);
    }

    /// Builder-style [`push`](Self::push).
    pub fn with_rule(mut self, name: &str, rule: DefaultRule) -> Self {
        self.push(name, rule);
        self
    }

    /// Ordered candidates for a variable (empty when unknown).
    pub fn rules(&self, name: &str) -> &[DefaultRule] {
        self.variables.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of variables covered.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether the table covers no variables.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Accept any YAML scalar as a rule value; `~` becomes the NULL sentinel.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Str(String),
        Int(i64),
        UInt(u64),
        Float(f64),
        Bool(bool),
    }

    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        None => NULL_SENTINEL.to_string(),
        Some(Scalar::Str(s)) => s,
        Some(Scalar::Int(n)) => n.to_string(),
        Some(Scalar::UInt(n)) => n.to_string(),
        Some(Scalar::Float(n)) => n.to_string(),
        Some(Scalar::Bool(b)) => if b { "ON" } else { "OFF" }.to_string(),
    })
}
