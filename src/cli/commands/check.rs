//! Check command implementation.
//!
//! The `defcheck check` command compares a variable dump with the factory
//! defaults of the detected server.

use crate::check::{CheckReport, Checker};
use crate::cli::args::CheckArgs;
use crate::compare::Verdict;
use crate::config::DefcheckConfig;
use crate::error::Result;
use crate::input::read_source;
use crate::report::{render, OutputFormat};
use crate::rules::{open_store, RuleStore};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, EXIT_DEVIATIONS, EXIT_UNDETECTED};

/// The check command implementation.
pub struct CheckCommand {
    config: DefcheckConfig,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(config: DefcheckConfig, args: CheckArgs) -> Self {
        Self { config, args }
    }

    fn format(&self) -> OutputFormat {
        self.args.format.unwrap_or(self.config.output)
    }

    fn only(&self) -> &[Verdict] {
        if self.args.only.is_empty() {
            &self.config.only
        } else {
            &self.args.only
        }
    }

    fn fail_on_ko(&self) -> bool {
        self.args.fail_on_ko || self.config.fail_on_ko
    }

    /// Run the check with a given store.
    pub fn run<S: RuleStore>(&self, store: S, text: &str) -> CheckReport {
        let ignored = self.config.ignore.iter().chain(&self.args.ignore).cloned();
        Checker::new(store).with_ignored(ignored).check(text)
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let text = read_source(&self.args.input)?;
        let store = open_store(self.config.rules_dir.as_deref())?;

        if self.format() == OutputFormat::Human && ui.output_mode().shows_details() {
            ui.message(&format!("Rule tables: {}", store.source()));
        }

        let report = self.run(store, &text);
        let use_color = ui.use_color();
        ui.output(&render(&report, self.only(), self.format(), use_color));

        if !report.is_resolved() {
            ui.warning(&format!(
                "Could not detect server {}; no defaults were checked",
                report.detected.missing().join(", ")
            ));
            return Ok(CommandResult::failure(EXIT_UNDETECTED));
        }

        let summary = report.summary();
        if self.fail_on_ko() && summary.ko > 0 {
            ui.error(&format!(
                "{} variable(s) differ from factory defaults",
                summary.ko
            ));
            return Ok(CommandResult::failure(EXIT_DEVIATIONS));
        }

        Ok(CommandResult::success())
    }
}
