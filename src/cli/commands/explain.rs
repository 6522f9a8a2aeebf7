//! Explain command implementation.
//!
//! The `defcheck explain` command lists every candidate rule for one
//! variable, why each did or did not apply, and which one wins.

use crate::check::resolve_default;
use crate::cli::args::ExplainArgs;
use crate::config::DefcheckConfig;
use crate::detection::{DetectedServer, EnvironmentInfo, ServerVersion};
use crate::error::Result;
use crate::input::{parse_variables, read_source, ObservedVariables};
use crate::rules::{explain, open_store, CandidateReport, DefaultRule, RuleStore};
use crate::ui::{DefcheckTheme, UserInterface};

use super::dispatcher::{Command, CommandResult, EXIT_UNDETECTED};

/// The explain command implementation.
pub struct ExplainCommand {
    config: DefcheckConfig,
    args: ExplainArgs,
}

impl ExplainCommand {
    /// Create a new explain command.
    pub fn new(config: DefcheckConfig, args: ExplainArgs) -> Self {
        Self { config, args }
    }

    /// Flags win over what the optional dump says.
    fn target(
        &self,
        detected: &DetectedServer,
    ) -> std::result::Result<(ServerVersion, EnvironmentInfo), String> {
        let version = match self.args.server_version {
            Some(ref raw) => ServerVersion::parse(raw).map_err(|e| e.to_string())?,
            None => detected
                .version
                .clone()
                .ok_or("Server version unknown; pass --server-version")?,
        };
        let os = self
            .args
            .os
            .or(detected.os)
            .ok_or("Server OS unknown; pass --os")?;
        let platform = self
            .args
            .platform
            .or(detected.platform)
            .ok_or("Server platform unknown; pass --platform")?;
        Ok((version, EnvironmentInfo::new(os, platform)))
    }

    /// Render the explanation.
    pub fn render<S: RuleStore>(
        &self,
        store: &S,
        version: &ServerVersion,
        env: EnvironmentInfo,
        vars: &ObservedVariables,
        theme: &DefcheckTheme,
    ) -> String {
        let name = &self.args.variable;
        let bucket = version.bucket();
        let table = store.rules_for(&bucket);
        let candidates = table.rules(name);

        let mut out = format!(
            "{} {}\n",
            theme.header.apply_to(name),
            theme.dim.apply_to(format!(
                "(MySQL {} on {} {}, table {})",
                version, env.os, env.platform, bucket
            ))
        );

        if candidates.is_empty() {
            out.push_str(&format!(
                "  no rule in {}; verdict would be unknown\n",
                store.source()
            ));
            return out;
        }

        for report in explain(candidates, version, env) {
            out.push_str(&candidate_line(&report, theme));
        }

        match resolve_default(name, &table, version, env, vars) {
            Some(default) if default.computed => out.push_str(&format!(
                "default: {} {}\n",
                default.value,
                theme.dim.apply_to("(autosized)")
            )),
            Some(default) if default.rule.autosized => out.push_str(&format!(
                "default: {} {}\n",
                default.value,
                theme
                    .dim
                    .apply_to("(autosized at startup; pass --input to compute it)")
            )),
            Some(default) => out.push_str(&format!("default: {}\n", default.value)),
            None => out.push_str("default: none applies; verdict would be unknown\n"),
        }

        out
    }
}

fn constraints(rule: &DefaultRule) -> String {
    let mut parts = vec![format!("patch>={}", rule.min_patch)];
    if rule.min_build > 0 {
        parts.push(format!("build>={}", rule.min_build));
    }
    parts.push(format!("os={}", serde_label(&rule.os)));
    parts.push(format!("platform={}", serde_label(&rule.platform)));
    parts.join(" ")
}

fn serde_label<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn candidate_line(report: &CandidateReport<'_>, theme: &DefcheckTheme) -> String {
    let rule = report.rule;
    let status = if report.selected {
        theme.success.apply_to("selected").to_string()
    } else if report.eligibility.is_eligible() {
        theme.dim.apply_to("superseded").to_string()
    } else {
        theme
            .dim
            .apply_to(format!("skipped: {}", report.eligibility.describe()))
            .to_string()
    };

    let mut flags = String::new();
    if rule.autosized {
        flags.push_str(" autosized");
    }
    if rule.removed {
        flags.push_str(" removed");
    }

    format!(
        "  #{} {} = {} [{}]{} {}\n",
        report.index,
        rule.value_type,
        rule.value,
        constraints(rule),
        flags,
        status
    )
}

impl Command for ExplainCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let vars = match self.args.input {
            Some(ref path) => parse_variables(&read_source(path)?),
            None => ObservedVariables::new(),
        };
        let detected = DetectedServer::detect(&vars);

        let (version, env) = match self.target(&detected) {
            Ok(target) => target,
            Err(message) => {
                ui.error(&message);
                return Ok(CommandResult::failure(EXIT_UNDETECTED));
            }
        };

        let store = open_store(self.config.rules_dir.as_deref())?;
        let theme = DefcheckTheme::for_color(ui.use_color());
        let output = self.render(&store, &version, env, &vars, &theme);
        ui.output(&output);

        Ok(CommandResult::success())
    }
}
