//! Path-composing autosize formulas.
//!
//! Log, pid and binary-log files default to `<datadir><hostname><suffix>`.
//! The binary-log family is empty when its governing switch is off.

use crate::compare::{is_false, is_true};
use crate::detection::{EnvironmentInfo, OsFamily};
use crate::input::ObservedVariables;

/// `<datadir><hostname><suffix>`, when both are known.
fn in_datadir(vars: &ObservedVariables, suffix: &str) -> Option<String> {
    let datadir = vars.get("datadir")?;
    let hostname = vars.get("hostname")?;
    Some(format!("{}{}{}", datadir, hostname, suffix))
}

/// State of a `log_bin` / `relay_log` style switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogSwitch {
    /// Absent, empty or falsy.
    Off,
    /// Truthy.
    On,
    /// Set to a custom base name.
    Named,
}

fn log_switch(vars: &ObservedVariables, name: &str) -> LogSwitch {
    match vars.get(name) {
        None => LogSwitch::Off,
        Some(v) if v.is_empty() || is_false(v) => LogSwitch::Off,
        Some(v) if is_true(v) => LogSwitch::On,
        Some(_) => LogSwitch::Named,
    }
}

pub fn general_log_file(vars: &ObservedVariables, _env: EnvironmentInfo) -> Option<String> {
    in_datadir(vars, ".log")
}

pub fn log_error(vars: &ObservedVariables, _env: EnvironmentInfo) -> Option<String> {
    in_datadir(vars, ".err")
}

pub fn pid_file(vars: &ObservedVariables, _env: EnvironmentInfo) -> Option<String> {
    in_datadir(vars, ".pid")
}

pub fn slow_query_log_file(vars: &ObservedVariables, _env: EnvironmentInfo) -> Option<String> {
    in_datadir(vars, "-slow.log")
}

pub fn innodb_data_home_dir(vars: &ObservedVariables, _env: EnvironmentInfo) -> Option<String> {
    vars.get("datadir").map(str::to_string)
}

/// `<basedir>lib/plugin/`, with backslashes on Windows.
pub fn plugin_dir(vars: &ObservedVariables, env: EnvironmentInfo) -> Option<String> {
    let basedir = vars.get("basedir")?;
    let (mut dir, sep) = match env.os {
        OsFamily::Windows => (basedir.replace('/', "\\"), '\\'),
        OsFamily::Linux => (basedir.to_string(), '/'),
    };
    if !dir.ends_with(sep) {
        dir.push(sep);
    }
    dir.push_str("lib");
    dir.push(sep);
    dir.push_str("plugin");
    dir.push(sep);
    Some(dir)
}

pub fn log_bin_basename(vars: &ObservedVariables, _env: EnvironmentInfo) -> Option<String> {
    match log_switch(vars, "log_bin") {
        LogSwitch::Off => Some(String::new()),
        LogSwitch::On => in_datadir(vars, "-bin"),
        LogSwitch::Named => None,
    }
}

pub fn log_bin_index(vars: &ObservedVariables, _env: EnvironmentInfo) -> Option<String> {
    match log_switch(vars, "log_bin") {
        LogSwitch::Off => Some(String::new()),
        LogSwitch::On => in_datadir(vars, "-bin.index"),
        LogSwitch::Named => None,
    }
}

pub fn relay_log_basename(vars: &ObservedVariables, _env: EnvironmentInfo) -> Option<String> {
    match log_switch(vars, "relay_log") {
        LogSwitch::Off => Some(String::new()),
        LogSwitch::On => in_datadir(vars, "-relay-bin"),
        LogSwitch::Named => None,
    }
}

/// Composed whenever `relay_log` is set, even to a custom name.
pub fn relay_log_index(vars: &ObservedVariables, _env: EnvironmentInfo) -> Option<String> {
    match log_switch(vars, "relay_log") {
        LogSwitch::Off => Some(String::new()),
        LogSwitch::On | LogSwitch::Named => in_datadir(vars, "-relay-bin.index"),
    }
}
