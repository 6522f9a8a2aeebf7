//! Comparing observed values with resolved defaults.
//!
//! The checks, in order:
//! 1. No default resolved → `unknown`
//! 2. Case-insensitive string equality → `ok`
//! 3. Boolean type and same truthiness (`ON` vs `1`) → `ok`
//! 4. String-like type, NULL default and empty observed value → `ok`
//! 5. Anything else → `ko`

pub mod truthiness;

pub use truthiness::{is_false, is_true, same_truthiness};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rules::{ResolvedDefault, ValueType};

/// Outcome of comparing one variable with its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Matches the factory default.
    Ok,
    /// Differs from the factory default.
    Ko,
    /// No default known for this variable.
    Unknown,
}

impl Verdict {
    /// Lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Ko => "ko",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ok" => Ok(Self::Ok),
            "ko" => Ok(Self::Ko),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("unknown verdict: {}", s)),
        }
    }
}

/// Compare an observed value with its resolved default.
///
/// # Example
///
/// ```
/// use defcheck::compare::{compare, Verdict};
/// use defcheck::rules::{DefaultRule, ResolvedDefault, ValueType};
///
/// let rule = DefaultRule::new(ValueType::Boolean, "ON");
/// let default = ResolvedDefault::from_rule(&rule);
///
/// assert_eq!(compare("1", Some(&default)), Verdict::Ok);
/// assert_eq!(compare("OFF", Some(&default)), Verdict::Ko);
/// assert_eq!(compare("OFF", None), Verdict::Unknown);
/// ```
pub fn compare(observed: &str, default: Option<&ResolvedDefault>) -> Verdict {
    let Some(default) = default else {
        return Verdict::Unknown;
    };

    if default.value.to_lowercase() == observed.to_lowercase() {
        return Verdict::Ok;
    }

    match default.value_type() {
        ValueType::Boolean if same_truthiness(&default.value, observed) => Verdict::Ok,
        t if t.is_string_like() && default.is_null() && observed.is_empty() => Verdict::Ok,
        _ => Verdict::Ko,
    }
}
