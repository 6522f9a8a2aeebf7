//! Computed ("autosized") defaults.
//!
//! Some factory defaults are not fixed: the server derives them at startup
//! from other settings. For those, the rule table carries a placeholder
//! value and the `autosized` flag, and a formula here recomputes the real
//! default from the observed variables.
//!
//! Formulas are pure functions of the observed variables and environment.
//! A formula that lacks an input returns `None` and the table's static
//! value stands.
//!
//! # Example
//!
//! ```
//! use defcheck::autosize::apply;
//! use defcheck::detection::{EnvironmentInfo, OsFamily, Platform};
//! use defcheck::input::ObservedVariables;
//! use defcheck::rules::{DefaultRule, ResolvedDefault, ValueType};
//!
//! let rule = DefaultRule::new(ValueType::Numeric, "-1").autosized();
//! let vars = ObservedVariables::new().with("max_connections", "151");
//! let env = EnvironmentInfo::new(OsFamily::Linux, Platform::Bits64);
//!
//! let resolved = apply("back_log", ResolvedDefault::from_rule(&rule), &vars, env);
//! assert_eq!(resolved.value, "80");
//! assert!(resolved.computed);
//! ```

pub mod paths;
pub mod sizing;

use crate::detection::EnvironmentInfo;
use crate::input::ObservedVariables;
use crate::rules::ResolvedDefault;

/// A formula computing one variable's default.
pub type Formula = fn(&ObservedVariables, EnvironmentInfo) -> Option<String>;

/// Variable name → formula.
pub const FORMULAS: &[(&str, Formula)] = &[
    ("back_log", sizing::back_log),
    ("general_log_file", paths::general_log_file),
    ("host_cache_size", sizing::host_cache_size),
    ("innodb_buffer_pool_instances", sizing::innodb_buffer_pool_instances),
    ("innodb_data_home_dir", paths::innodb_data_home_dir),
    ("innodb_io_capacity_max", sizing::innodb_io_capacity_max),
    ("innodb_open_files", sizing::innodb_open_files),
    ("log_bin_basename", paths::log_bin_basename),
    ("log_bin_index", paths::log_bin_index),
    ("log_error", paths::log_error),
    ("open_files_limit", sizing::open_files_limit),
    ("pid_file", paths::pid_file),
    ("plugin_dir", paths::plugin_dir),
    ("relay_log_basename", paths::relay_log_basename),
    ("relay_log_index", paths::relay_log_index),
    ("slow_query_log_file", paths::slow_query_log_file),
    ("table_definition_cache", sizing::table_definition_cache),
    ("thread_cache_size", sizing::thread_cache_size),
];

/// Look up the formula for a variable.
pub fn formula_for(name: &str) -> Option<Formula> {
    FORMULAS
        .iter()
        .find(|(variable, _)| *variable == name)
        .map(|(_, formula)| *formula)
}

/// Recompute a resolved default if its rule is autosized.
///
/// Non-autosized rules, variables without a formula and formulas missing
/// an input all return `resolved` unchanged.
pub fn apply(
    name: &str,
    resolved: ResolvedDefault,
    vars: &ObservedVariables,
    env: EnvironmentInfo,
) -> ResolvedDefault {
    if !resolved.rule.autosized {
        return resolved;
    }

    let Some(formula) = formula_for(name) else {
        tracing::debug!("No autosize formula for '{}', keeping table value", name);
        return resolved;
    };

    match formula(vars, env) {
        Some(value) => {
            tracing::debug!("Autosized {} = {}", name, value);
            resolved.with_computed(value)
        }
        None => {
            tracing::debug!("Inputs for '{}' missing, keeping table value", name);
            resolved
        }
    }
}
