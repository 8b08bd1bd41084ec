//! CLI module for the timetable
//!
//! Provides command-line interface for:
//! - show: Display the filtered week, as text or JSON
//! - validate: Check the document against its schema

mod args;
mod commands;
mod errors;
mod io;
mod render;

pub use args::{Cli, Command, OutputFormat, SourceArgs};
pub use commands::{build_week, load_config, run, run_command, show, validate};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response, write_text};
pub use render::{render_record, render_violations, render_week};
