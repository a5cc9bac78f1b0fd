// src/cli.rs

//! CLI argument parsing using `clap`.

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

/// Command-line arguments for `studyplan`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "studyplan",
    version,
    about = "Plan a week of study sessions from topic prerequisites and quiz performance.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the plan file (TOML, or JSON when the extension is `.json`).
    #[arg(long, value_name = "PATH", default_value = "Studyplan.toml")]
    pub plan: String,

    /// Seed for the session-type draw. Omit for a fresh random draw per run.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Plan as if today were this date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub today: Option<NaiveDate>,

    /// Output format for the generated plan.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `STUDYPLAN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the dependency graph and order, but don't plan.
    #[arg(long)]
    pub dry_run: bool,

    /// Ignore `--plan` and generate demo topics for these subject names.
    #[arg(long, value_name = "SUBJECT", num_args = 1..)]
    pub demo: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// How the plan is written to stdout.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
