//! defcheck - Compare MySQL server variables with factory defaults.
//!
//! defcheck reads a `SHOW VARIABLES` dump, works out which server version,
//! OS and platform produced it, and reports for every variable whether it
//! still holds its factory default.
//!
//! # Modules
//!
//! - [`input`] - Parsing variable dumps
//! - [`detection`] - Version, OS and platform detection
//! - [`rules`] - Factory-default tables and rule resolution
//! - [`autosize`] - Defaults the server computes at startup
//! - [`compare`] - Observed value vs default verdicts
//! - [`check`] - The end-to-end check
//! - [`report`] - Human and JSON report formatters
//! - [`config`] - `.defcheck.yml` loading
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use defcheck::check::Checker;
//! use defcheck::compare::Verdict;
//! use defcheck::rules::BuiltinRuleStore;
//!
//! let checker = Checker::new(BuiltinRuleStore::new());
//! let report = checker.check(
//!     "| version                 | 5.7.21-log |\n\
//!      | version_compile_os      | Linux      |\n\
//!      | version_compile_machine | x86_64     |\n\
//!      | max_connections         | 151        |\n\
//!      | back_log                | 80         |\n",
//! );
//!
//! assert!(report.is_resolved());
//! assert_eq!(report.verdict("back_log"), Some(Verdict::Ok));
//! ```

pub mod autosize;
pub mod check;
pub mod cli;
pub mod compare;
pub mod config;
pub mod detection;
pub mod error;
pub mod input;
pub mod report;
pub mod rules;
pub mod ui;

pub use error::{DefcheckError, Result};
