//! End-to-end checks through the public library API.

use defcheck::check::Checker;
use defcheck::compare::Verdict;
use defcheck::detection::{OsFamily, Platform, ServerVersion};
use defcheck::rules::{BuiltinRuleStore, DefaultRule, MemoryRuleStore, RuleTable, ValueType};

const LINUX_5_7: &str = "\
+-------------------------+------------+
| Variable_name           | Value      |
+-------------------------+------------+
| version                 | 5.7.21-log |
| version_compile_os      | Linux      |
| version_compile_machine | x86_64     |
| max_connections         | 151        |
";

#[test]
fn detects_linux_64_bit_5_7() {
    let report = Checker::new(BuiltinRuleStore::new()).check(LINUX_5_7);

    assert_eq!(report.detected.version, Some(ServerVersion::new(5, 7, 21)));
    assert_eq!(report.detected.os, Some(OsFamily::Linux));
    assert_eq!(report.detected.platform, Some(Platform::Bits64));
    assert!(report.is_resolved());
}

#[test]
fn absent_back_log_has_no_verdict() {
    let report = Checker::new(BuiltinRuleStore::new()).check(LINUX_5_7);
    assert_eq!(report.verdict("back_log"), None);
    assert_eq!(report.verdict("max_connections"), Some(Verdict::Ok));
}

#[test]
fn back_log_is_checked_against_autosized_value() {
    let checker = Checker::new(BuiltinRuleStore::new());

    let report = checker.check(&format!("{}| back_log | 80 |\n", LINUX_5_7));
    assert_eq!(report.verdict("back_log"), Some(Verdict::Ok));

    let report = checker.check(&format!("{}| back_log | 81 |\n", LINUX_5_7));
    assert_eq!(report.verdict("back_log"), Some(Verdict::Ko));
    let default = report.variables["back_log"].default.as_ref().unwrap();
    assert_eq!(default.value, "80");
}

#[test]
fn unparseable_version_checks_nothing() {
    let report = Checker::new(BuiltinRuleStore::new()).check(
        "version\t10.2-MariaDB\nversion_compile_os\tLinux\nversion_compile_machine\tx86_64\nmax_connections\t151\n",
    );

    assert!(!report.is_resolved());
    assert!(report.variables.values().all(|v| v.verdict.is_none()));
    assert_eq!(report.summary().unchecked, report.variables.len());
}

#[test]
fn malformed_bucket_makes_everything_unknown() {
    let report = Checker::new(BuiltinRuleStore::new()).check(
        "version\t10.2.3-MariaDB\nversion_compile_os\tLinux\nversion_compile_machine\tx86_64\nmax_connections\t151\n",
    );

    assert!(report.is_resolved());
    assert!(report
        .variables
        .values()
        .all(|v| v.verdict == Some(Verdict::Unknown)));
}

#[test]
fn patch_level_selects_row() {
    let checker = Checker::new(BuiltinRuleStore::new());
    let dump = |patch: u32| {
        format!(
            "version\t5.7.{}\nversion_compile_os\tLinux\nversion_compile_machine\tx86_64\nbinlog_format\tROW\n",
            patch
        )
    };

    assert_eq!(checker.check(&dump(6)).verdict("binlog_format"), Some(Verdict::Ko));
    assert_eq!(checker.check(&dump(7)).verdict("binlog_format"), Some(Verdict::Ok));
}

#[test]
fn windows_only_rows_do_not_apply_on_linux() {
    let report = Checker::new(BuiltinRuleStore::new())
        .check(&format!("{}| named_pipe | OFF |\n", LINUX_5_7));
    assert_eq!(report.verdict("named_pipe"), Some(Verdict::Unknown));
}

#[test]
fn boolean_spellings_compare_equal() {
    let report = Checker::new(BuiltinRuleStore::new())
        .check(&format!("{}| autocommit | 1 |\n", LINUX_5_7));
    assert_eq!(report.verdict("autocommit"), Some(Verdict::Ok));
}

#[test]
fn injected_store_replaces_builtin_tables() {
    let table = RuleTable::empty("5.7")
        .with_rule("max_connections", DefaultRule::new(ValueType::Numeric, "500"));
    let store = MemoryRuleStore::new().with_table(table);

    let report = Checker::new(store).check(LINUX_5_7);
    assert_eq!(report.verdict("max_connections"), Some(Verdict::Ko));
}

#[test]
fn ignored_variables_stay_unchecked() {
    let report = Checker::new(BuiltinRuleStore::new())
        .with_ignored(["max_connections"])
        .check(LINUX_5_7);
    assert_eq!(report.verdict("max_connections"), None);
    assert_eq!(report.summary().unchecked, 1);
}
