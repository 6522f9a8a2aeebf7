//! Schema command implementation.
//!
//! The `defcheck schema` command prints the JSON Schema for rule tables.

use anyhow::Context;

use crate::error::Result;
use crate::rules::SchemaGenerator;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
#[derive(Debug, Default)]
pub struct SchemaCommand;

impl SchemaCommand {
    /// Create a new schema command.
    pub fn new() -> Self {
        Self
    }
}

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let schema = SchemaGenerator::new().generate();
        let json = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;
        ui.output(&format!("{}\n", json));
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    #[test]
    fn prints_rule_table_schema() {
        let mut ui = MockUI::new();
        let result = SchemaCommand::new().execute(&mut ui).unwrap();
        assert!(result.success);

        let schema: serde_json::Value = serde_json::from_str(&ui.output_text()).unwrap();
        assert_eq!(schema["title"], "defcheck rule table");
        assert_eq!(schema["required"][0], "bucket");
    }
}
