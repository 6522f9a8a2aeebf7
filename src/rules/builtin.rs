//! Built-in rule tables embedded at compile time.

use std::path::Path;

use include_dir::{include_dir, Dir};

use super::rule::RuleTable;
use super::store::{RuleStore, VersionBucket};
use crate::error::{DefcheckError, Result};

/// Embedded `defaults/` directory.
static DEFAULTS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/defaults");

/// Rule tables shipped with defcheck.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinRuleStore;

impl BuiltinRuleStore {
    /// Create the built-in store.
    pub fn new() -> Self {
        Self
    }

    /// Buckets that have an embedded table, in file order.
    pub fn buckets(&self) -> Vec<String> {
        let mut buckets: Vec<String> = DEFAULTS_DIR
            .files()
            .filter_map(|f| f.path().file_stem()?.to_str())
            .filter_map(|stem| stem.strip_prefix("mysql-"))
            .map(str::to_string)
            .collect();
        buckets.sort();
        buckets
    }
}

impl RuleStore for BuiltinRuleStore {
    fn source(&self) -> String {
        "built-in defaults".to_string()
    }

    fn load_table(&self, bucket: &VersionBucket) -> Result<Option<RuleTable>> {
        let file_name = bucket.file_name();
        let Some(file) = DEFAULTS_DIR.get_file(&file_name) else {
            return Ok(None);
        };

        let path = Path::new("defaults").join(&file_name);
        let content = file
            .contents_utf8()
            .ok_or_else(|| DefcheckError::RuleTableParseError {
                path: path.clone(),
                message: "Invalid UTF-8".to_string(),
            })?;

        RuleTable::from_yaml(content, &path).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ValueType;

    fn load(bucket: &str) -> RuleTable {
        BuiltinRuleStore::new()
            .load_table(&VersionBucket::parse(bucket).unwrap())
            .unwrap()
            .unwrap()
    }

    #[test]
    fn ships_tracked_release_lines() {
        let buckets = BuiltinRuleStore::new().buckets();
        assert_eq!(buckets, vec!["5.6", "5.7", "8.0"]);
    }

    #[test]
    fn every_builtin_table_parses() {
        for bucket in BuiltinRuleStore::new().buckets() {
            let table = load(&bucket);
            assert_eq!(table.bucket, bucket);
            assert!(!table.is_empty(), "{} is empty", bucket);
        }
    }

    #[test]
    fn builtin_rows_have_values() {
        for bucket in BuiltinRuleStore::new().buckets() {
            for (name, rules) in &load(&bucket).variables {
                assert!(!rules.is_empty(), "{} in {} has no rows", name, bucket);
            }
        }
    }

    #[test]
    fn builtin_5_7_has_version_ranged_binlog_format() {
        let table = load("5.7");
        let rules = table.rules("binlog_format");
        assert!(rules.len() >= 2);
        assert_eq!(rules.last().unwrap().value, "ROW");
        assert_eq!(rules[0].value_type, ValueType::Enumeration);
    }

    #[test]
    fn builtin_back_log_is_autosized() {
        for bucket in ["5.6", "5.7", "8.0"] {
            assert!(load(bucket).rules("back_log")[0].autosized, "{}", bucket);
        }
    }

    #[test]
    fn unknown_bucket_has_no_table() {
        let store = BuiltinRuleStore::new();
        assert!(store
            .load_table(&VersionBucket::parse("4.1").unwrap())
            .unwrap()
            .is_none());
        assert!(store.rules_for("4.1").is_empty());
    }
}
