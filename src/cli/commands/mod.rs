//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`defcheck check`, `defcheck explain`)
//! - Shared config loading
//! - Consistent exit codes

pub mod check;
pub mod completions;
pub mod detect;
pub mod dispatcher;
pub mod explain;
pub mod schema;

pub use dispatcher::{
    Command, CommandDispatcher, CommandResult, EXIT_DEVIATIONS, EXIT_UNDETECTED,
};
