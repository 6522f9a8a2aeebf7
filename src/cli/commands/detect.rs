//! Detect command implementation.
//!
//! The `defcheck detect` command shows what a dump says about the server.

use anyhow::Context;

use crate::cli::args::DetectArgs;
use crate::detection::DetectedServer;
use crate::error::Result;
use crate::input::{parse_variables, read_source};
use crate::report::DetectedJson;
use crate::ui::{DefcheckTheme, UserInterface};

use super::dispatcher::{Command, CommandResult, EXIT_UNDETECTED};

/// The detect command implementation.
pub struct DetectCommand {
    args: DetectArgs,
}

impl DetectCommand {
    /// Create a new detect command.
    pub fn new(args: DetectArgs) -> Self {
        Self { args }
    }

    fn format_human(detected: &DetectedServer, theme: &DefcheckTheme) -> String {
        let not_detected = || "not detected".to_string();
        let rows = [
            (
                "version",
                detected
                    .version
                    .as_ref()
                    .map_or_else(not_detected, ToString::to_string),
            ),
            (
                "bucket",
                detected
                    .version
                    .as_ref()
                    .map_or_else(not_detected, |v| v.bucket()),
            ),
            ("os", detected.os.map_or_else(not_detected, |o| o.to_string())),
            (
                "platform",
                detected.platform.map_or_else(not_detected, |p| p.to_string()),
            ),
        ];

        rows.iter()
            .map(|(key, value)| {
                format!(
                    "{} {}\n",
                    theme.key.apply_to(format!("{:<9}", format!("{}:", key))),
                    theme.value.apply_to(value)
                )
            })
            .collect()
    }
}

impl Command for DetectCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let text = read_source(&self.args.input)?;
        let detected = DetectedServer::detect(&parse_variables(&text));

        let output = if self.args.json {
            let json = serde_json::to_string_pretty(&DetectedJson::new(&detected))
                .context("Failed to serialize detection result")?;
            format!("{}\n", json)
        } else {
            Self::format_human(&detected, &DefcheckTheme::for_color(ui.use_color()))
        };
        ui.output(&output);

        if !detected.is_complete() {
            ui.warning(&format!(
                "Could not detect server {}",
                detected.missing().join(", ")
            ));
            return Ok(CommandResult::failure(EXIT_UNDETECTED));
        }

        Ok(CommandResult::success())
    }
}
