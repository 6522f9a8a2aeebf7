//! Picking the single applicable default for a variable.
//!
//! Tables list a variable's rules in ascending version order, so the last
//! row whose constraints all hold is the one with the highest threshold
//! still at or below the observed version. Newer rows supersede older ones
//! without needing an explicit range end.

use serde::Serialize;

use super::rule::DefaultRule;
use crate::detection::{EnvironmentInfo, ServerVersion};

/// Why a candidate row did or did not apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Eligibility {
    Eligible,
    OsMismatch,
    PlatformMismatch,
    PatchTooLow,
    BuildTooLow,
}

impl Eligibility {
    /// Check one candidate. The first failing constraint is reported.
    pub fn of(rule: &DefaultRule, version: &ServerVersion, env: EnvironmentInfo) -> Self {
        if !rule.os.matches(env.os) {
            Self::OsMismatch
        } else if !rule.platform.matches(env.platform) {
            Self::PlatformMismatch
        } else if rule.min_patch > version.patch {
            Self::PatchTooLow
        } else if !rule.applies_to_version(version) {
            Self::BuildTooLow
        } else {
            Self::Eligible
        }
    }

    /// Whether the candidate applies.
    pub fn is_eligible(self) -> bool {
        self == Self::Eligible
    }

    /// Short human description.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Eligible => "eligible",
            Self::OsMismatch => "different OS",
            Self::PlatformMismatch => "different platform",
            Self::PatchTooLow => "newer patch level",
            Self::BuildTooLow => "newer build",
        }
    }
}

/// Select the applicable rule: the last eligible candidate in table order.
///
/// # Example
///
/// ```
/// use defcheck::detection::{EnvironmentInfo, OsFamily, Platform, ServerVersion};
/// use defcheck::rules::{resolve, DefaultRule, ValueType};
///
/// let rules = vec![
///     DefaultRule::new(ValueType::Enumeration, "STATEMENT"),
///     DefaultRule::new(ValueType::Enumeration, "ROW").since_patch(7),
/// ];
/// let env = EnvironmentInfo::new(OsFamily::Linux, Platform::Bits64);
///
/// let old = resolve(&rules, &ServerVersion::new(5, 7, 6), env).unwrap();
/// assert_eq!(old.value, "STATEMENT");
///
/// let new = resolve(&rules, &ServerVersion::new(5, 7, 21), env).unwrap();
/// assert_eq!(new.value, "ROW");
/// ```
pub fn resolve<'a>(
    candidates: &'a [DefaultRule],
    version: &ServerVersion,
    env: EnvironmentInfo,
) -> Option<&'a DefaultRule> {
    candidates
        .iter()
        .filter(|c| Eligibility::of(c, version, env).is_eligible())
        .last()
}

/// One candidate as seen by the resolver.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateReport<'a> {
    /// Position in table order.
    pub index: usize,
    pub rule: &'a DefaultRule,
    pub eligibility: Eligibility,
    /// Whether this candidate is the one [`resolve`] returns.
    pub selected: bool,
}

/// Explain resolution: every candidate with its eligibility.
pub fn explain<'a>(
    candidates: &'a [DefaultRule],
    version: &ServerVersion,
    env: EnvironmentInfo,
) -> Vec<CandidateReport<'a>> {
    let mut reports: Vec<CandidateReport<'a>> = candidates
        .iter()
        .enumerate()
        .map(|(index, rule)| CandidateReport {
            index,
            rule,
            eligibility: Eligibility::of(rule, version, env),
            selected: false,
        })
        .collect();

    if let Some(last) = reports
        .iter_mut()
        .rev()
        .find(|r| r.eligibility.is_eligible())
    {
        last.selected = true;
    }

    reports
}
