//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::compare::Verdict;
use crate::detection::{OsFamily, Platform};
use crate::report::OutputFormat;

/// defcheck - Compare MySQL server variables with factory defaults.
#[derive(Debug, Parser)]
#[command(name = "defcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .defcheck.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory of mysql-X.Y.yml rule tables (overrides built-in tables)
    #[arg(long, global = true, env = "DEFCHECK_RULES_DIR")]
    pub rules_dir: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// No report output; only errors and the exit code
    #[arg(short, long, global = true)]
    pub silent: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check a variable dump against factory defaults
    Check(CheckArgs),

    /// Show the version, OS and platform detected in a dump
    Detect(DetectArgs),

    /// Show how the default of one variable is resolved
    Explain(ExplainArgs),

    /// Print the JSON Schema for rule table files
    Schema,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    /// Variable dump to read (`-` for stdin)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Show only these verdicts (comma-separated: ok,ko,unknown)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<Verdict>,

    /// Report these variables without a verdict (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub ignore: Vec<String>,

    /// Exit with code 1 when any variable differs from its default
    #[arg(long)]
    pub fail_on_ko: bool,
}

/// Arguments for the `detect` command.
#[derive(Debug, Clone, clap::Args)]
pub struct DetectArgs {
    /// Variable dump to read (`-` for stdin)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `explain` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ExplainArgs {
    /// Variable to explain
    pub variable: String,

    /// Server version (e.g. 5.7.21-log)
    #[arg(long, value_name = "VERSION")]
    pub server_version: Option<String>,

    /// Server OS family (linux, windows)
    #[arg(long)]
    pub os: Option<OsFamily>,

    /// Server platform (32-bit, 64-bit)
    #[arg(long)]
    pub platform: Option<Platform>,

    /// Variable dump supplying the server and autosizing inputs
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
