//! Factory-default rule tables and resolution.
//!
//! - [`rule`] - Rule rows, tables and resolved defaults
//! - [`store`] - The [`RuleStore`] trait and its file/memory/cache backends
//! - [`builtin`] - Tables embedded in the binary
//! - [`resolver`] - Selecting the one rule that applies
//! - [`schema`] - JSON Schema for table files

pub mod builtin;
pub mod resolver;
pub mod rule;
pub mod schema;
pub mod store;

pub use builtin::BuiltinRuleStore;
pub use resolver::{explain, resolve, CandidateReport, Eligibility};
pub use rule::{
    DefaultRule, ResolvedDefault, RuleOs, RulePlatform, RuleTable, ValueType, NULL_SENTINEL,
};
pub use schema::SchemaGenerator;
pub use store::{
    open_store, CachedRuleStore, DirectoryRuleStore, MemoryRuleStore, RuleStore, VersionBucket,
};
