//! JSON Schema generation for rule tables.
//!
//! Lets table authors validate `mysql-<bucket>.yml` files in their editor.

use serde_json::{json, Value};

/// Generates JSON Schema for rule tables.
pub struct SchemaGenerator;

impl SchemaGenerator {
    /// Create a new schema generator.
    pub fn new() -> Self {
        Self
    }

    /// Generate the complete JSON Schema for a rule table file.
    pub fn generate(&self) -> Value {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "$id": "https://defcheck.dev/schemas/rule-table.json",
            "title": "defcheck rule table",
            "description": "Factory defaults for one MAJOR.MINOR release line",
            "type": "object",
            "required": ["bucket"],
            "properties": {
                "bucket": {
                    "type": "string",
                    "pattern": "^[0-9]\\.[0-9]$",
                    "description": "Release line this table covers, e.g. \"5.7\""
                },
                "variables": {
                    "type": "object",
                    "description": "Variable name to rows in ascending version order",
                    "propertyNames": { "pattern": "^[a-z0-9_]+$" },
                    "additionalProperties": {
                        "type": "array",
                        "items": self.rule_schema()
                    }
                }
            },
            "additionalProperties": false
        })
    }

    /// Generate schema for one rule row.
    fn rule_schema(&self) -> Value {
        json!({
            "type": "object",
            "required": ["type", "value"],
            "properties": {
                "min_patch": {
                    "type": "integer",
                    "minimum": 0,
                    "default": 0,
                    "description": "Lowest patch level this row applies to"
                },
                "min_build": {
                    "type": "integer",
                    "minimum": 0,
                    "default": 0,
                    "description": "Lowest build tag this row applies to"
                },
                "os": {
                    "type": "string",
                    "enum": ["all", "Linux", "Windows"],
                    "default": "all"
                },
                "platform": {
                    "type": "string",
                    "enum": ["all", "32-bit", "64-bit"],
                    "default": "all"
                },
                "removed": {
                    "type": "boolean",
                    "default": false,
                    "description": "Variable no longer exists from this version on"
                },
                "autosized": {
                    "type": "boolean",
                    "default": false,
                    "description": "Default is computed at server startup"
                },
                "type": {
                    "type": "string",
                    "enum": [
                        "boolean", "string", "numeric", "integer", "enumeration",
                        "set", "directory name", "file name", "other"
                    ]
                },
                "unit": {
                    "type": "string",
                    "default": ""
                },
                "value": {
                    "type": ["string", "number", "boolean", "null"],
                    "description": "Factory default; \"NULL\" or null for no value"
                }
            },
            "additionalProperties": false
        })
    }
}

impl Default for SchemaGenerator {
    fn default() -> Self {
        Self::new()
    }
}
