//! Check results.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::compare::Verdict;
use crate::detection::DetectedServer;
use crate::rules::ResolvedDefault;

/// One observed variable after checking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckedVariable {
    /// Value as reported by the server.
    pub value: String,
    /// `None` when the variable was not checked.
    pub verdict: Option<Verdict>,
    /// The default the value was compared against.
    pub default: Option<ResolvedDefault>,
}

impl CheckedVariable {
    /// A variable that was not checked.
    pub fn unchecked(value: &str) -> Self {
        Self {
            value: value.to_string(),
            verdict: None,
            default: None,
        }
    }

    /// Whether the matched rule marks the variable as removed.
    pub fn is_removed(&self) -> bool {
        self.default.as_ref().is_some_and(|d| d.rule.removed)
    }
}

/// Result of checking one variable dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    #[serde(flatten)]
    pub detected: DetectedServer,
    pub variables: BTreeMap<String, CheckedVariable>,
}

/// Verdict counts for a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub total: usize,
    pub ok: usize,
    pub ko: usize,
    pub unknown: usize,
    pub unchecked: usize,
}

impl CheckReport {
    /// Whether version, OS and platform were all detected.
    pub fn is_resolved(&self) -> bool {
        self.detected.is_complete()
    }

    /// Verdict of a variable, `None` if absent or unchecked.
    pub fn verdict(&self, name: &str) -> Option<Verdict> {
        self.variables.get(name)?.verdict
    }

    /// Variables whose verdict is in `only`; all variables when `only` is empty.
    pub fn filtered<'a>(
        &'a self,
        only: &'a [Verdict],
    ) -> impl Iterator<Item = (&'a str, &'a CheckedVariable)> + 'a {
        self.variables
            .iter()
            .filter(move |(_, v)| {
                only.is_empty() || v.verdict.is_some_and(|verdict| only.contains(&verdict))
            })
            .map(|(name, v)| (name.as_str(), v))
    }

    /// Count verdicts.
    pub fn summary(&self) -> CheckSummary {
        let mut summary = CheckSummary {
            total: self.variables.len(),
            ..Default::default()
        };
        for variable in self.variables.values() {
            match variable.verdict {
                Some(Verdict::Ok) => summary.ok += 1,
                Some(Verdict::Ko) => summary.ko += 1,
                Some(Verdict::Unknown) => summary.unknown += 1,
                None => summary.unchecked += 1,
            }
        }
        summary
    }
}
