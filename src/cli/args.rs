//! CLI argument definitions using clap
//!
//! Commands:
//! - timetable show [--day D] [--subject S] [--format text|json]
//! - timetable validate
//!
//! Both accept `--config`, `--source` and `--schema`; flags override the
//! configuration file.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Timetable - validate a course schedule and display its week
#[derive(Parser, Debug)]
#[command(name = "timetable")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Only log errors
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the document and schema come from
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceArgs {
    /// Path to JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Timetable XML document, overrides the configuration
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// XSD schema, overrides the configuration
    #[arg(long)]
    pub schema: Option<PathBuf>,
}

/// Output rendering
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain terminal table
    #[default]
    Text,
    /// `{"status": ..., "data": ...}` envelope
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Display the week, Monday to Friday
    Show {
        #[command(flatten)]
        sources: SourceArgs,

        /// Only courses on this day (exact match)
        #[arg(long)]
        day: Option<String>,

        /// Only courses of this subject (exact match)
        #[arg(long)]
        subject: Option<String>,

        /// List courses outside Monday..Friday instead of dropping them
        #[arg(long)]
        show_unscheduled: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Check the document against its schema and list every violation
    Validate {
        #[command(flatten)]
        sources: SourceArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
