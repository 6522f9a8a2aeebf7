//! Checking a variable dump against factory defaults.
//!
//! A check runs in this order:
//! 1. Parse the dump into observed variables
//! 2. Detect version, OS and platform
//! 3. If all three are known, for every variable: resolve the rule,
//!    apply autosizing, compare
//!
//! When detection is incomplete, no variable gets a verdict. Resolution
//! needs a version bucket and an environment, so it is all-or-nothing.
//!
//! # Example
//!
//! ```
//! use defcheck::check::Checker;
//! use defcheck::compare::Verdict;
//! use defcheck::rules::{DefaultRule, MemoryRuleStore, RuleTable, ValueType};
//!
//! let table = RuleTable::empty("5.7")
//!     .with_rule("back_log", DefaultRule::new(ValueType::Numeric, "-1").autosized())
//!     .with_rule("max_connections", DefaultRule::new(ValueType::Numeric, "151"));
//! let checker = Checker::new(MemoryRuleStore::new().with_table(table));
//!
//! let report = checker.check(
//!     "version\t5.7.21-log\n\
//!      version_compile_os\tLinux\n\
//!      version_compile_machine\tx86_64\n\
//!      max_connections\t151\n\
//!      back_log\t80\n",
//! );
//!
//! assert_eq!(report.verdict("back_log"), Some(Verdict::Ok));
//! assert_eq!(report.verdict("max_connections"), Some(Verdict::Ok));
//! assert_eq!(report.verdict("version"), Some(Verdict::Unknown));
//! ```

pub mod report;

pub use report::{CheckReport, CheckSummary, CheckedVariable};

use std::collections::{BTreeMap, BTreeSet};

use crate::autosize;
use crate::compare::compare;
use crate::detection::{DetectedServer, EnvironmentInfo, ServerVersion};
use crate::input::{parse_variables, ObservedVariables};
use crate::rules::{resolve, ResolvedDefault, RuleStore, RuleTable};

/// Runs checks against an injected rule store.
#[derive(Debug)]
pub struct Checker<S> {
    store: S,
    ignored: BTreeSet<String>,
}

impl<S: RuleStore> Checker<S> {
    /// Create a checker over a rule store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            ignored: BTreeSet::new(),
        }
    }

    /// Variables to report without a verdict.
    pub fn with_ignored<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.ignored.extend(names.into_iter().map(Into::into));
        self
    }

    /// Check raw dump text.
    pub fn check(&self, text: &str) -> CheckReport {
        self.check_variables(parse_variables(text))
    }

    /// Check already-parsed variables.
    pub fn check_variables(&self, vars: ObservedVariables) -> CheckReport {
        let detected = DetectedServer::detect(&vars);

        let variables = match detected.resolved() {
            Some((version, env)) => {
                let table = self.store.rules_for(&version.bucket());
                self.resolve_all(&vars, &table, version, env)
            }
            None => {
                tracing::debug!("Detection incomplete, skipping default resolution");
                vars.iter()
                    .map(|(name, value)| (name.to_string(), CheckedVariable::unchecked(value)))
                    .collect()
            }
        };

        CheckReport {
            detected,
            variables,
        }
    }

    fn resolve_all(
        &self,
        vars: &ObservedVariables,
        table: &RuleTable,
        version: &ServerVersion,
        env: EnvironmentInfo,
    ) -> BTreeMap<String, CheckedVariable> {
        vars.iter()
            .map(|(name, value)| {
                let checked = if self.ignored.contains(name) {
                    CheckedVariable::unchecked(value)
                } else {
                    let default = resolve_default(name, table, version, env, vars);
                    CheckedVariable {
                        value: value.to_string(),
                        verdict: Some(compare(value, default.as_ref())),
                        default,
                    }
                };
                (name.to_string(), checked)
            })
            .collect()
    }
}

/// Resolve one variable's effective default, autosizing if needed.
pub fn resolve_default(
    name: &str,
    table: &RuleTable,
    version: &ServerVersion,
    env: EnvironmentInfo,
    vars: &ObservedVariables,
) -> Option<ResolvedDefault> {
    let rule = resolve(table.rules(name), version, env)?;
    let resolved = autosize::apply(name, ResolvedDefault::from_rule(rule), vars, env);
    tracing::debug!("Resolved {} → {:?}", name, resolved.value);
    Some(resolved)
}
