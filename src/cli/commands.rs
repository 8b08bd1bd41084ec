//! CLI command implementations
//!
//! Each command builds its configuration, runs the pipeline once and
//! writes a single result. Nothing is rendered after a load or validation
//! failure.

use serde_json::{json, Value};

use crate::config::Config;
use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::query::{Query, UnknownDayPolicy, WeekSchedule};
use crate::timetable::{Timetable, TimetableError};

use super::args::{Cli, Command, OutputFormat, SourceArgs};
use super::errors::{CliError, CliErrorCode, CliResult};
use super::io::{write_error, write_response, write_text};
use super::render::{render_violations, render_week};

/// Parse arguments and run the requested command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    if cli.quiet {
        Logger::set_min_severity(Severity::Error);
    }
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Show {
            sources,
            day,
            subject,
            show_unscheduled,
            format,
        } => {
            let mut query = Query::from_params(day.as_deref(), subject.as_deref());
            if show_unscheduled {
                query = query.with_unknown_days(UnknownDayPolicy::Collect);
            }
            show(&sources, &query, format)
        }
        Command::Validate { sources, format } => validate(&sources, format),
    }
}

/// Resolve configuration: file first, then command-line overrides
pub fn load_config(sources: &SourceArgs) -> CliResult<Config> {
    let mut config = match &sources.config {
        Some(path) => {
            let config = Config::load(path)?;
            log_event_with_fields(Event::ConfigLoaded, &[("path", &path.display().to_string())]);
            config
        }
        None => Config::default(),
    };

    if let Some(source) = &sources.source {
        config = config.with_source_path(source);
    }
    if let Some(schema) = &sources.schema {
        config = config.with_schema_path(schema);
    }
    config.validate()?;

    Ok(config)
}

/// Build the week for a query
pub fn build_week(sources: &SourceArgs, query: &Query) -> CliResult<WeekSchedule> {
    let config = load_config(sources)?;
    Ok(Timetable::new(config).query(query)?)
}

/// Display the week
pub fn show(sources: &SourceArgs, query: &Query, format: OutputFormat) -> CliResult<()> {
    match (build_week(sources, query), format) {
        (Ok(week), OutputFormat::Text) => write_text(&render_week(&week)),
        (Ok(week), OutputFormat::Json) => write_response(serde_json::to_value(&week)?),
        (Err(e), format) => fail(e, format),
    }
}

/// Check the document against its schema
///
/// Prints every violation. A non-conforming document is an error so the
/// process exits non-zero.
pub fn validate(sources: &SourceArgs, format: OutputFormat) -> CliResult<()> {
    let config = match load_config(sources) {
        Ok(config) => config,
        Err(e) => return fail(e, format),
    };
    let source = config.source_path.display().to_string();

    match Timetable::new(config).load_validated() {
        Ok(_) => match format {
            OutputFormat::Text => write_text(&format!("{}: valid\n", source)),
            OutputFormat::Json => write_response(validation_json(&source, true, Vec::new())),
        },
        Err(TimetableError::ValidationFailed { violations }) => {
            match format {
                OutputFormat::Text => write_text(&render_violations(&violations))?,
                OutputFormat::Json => {
                    let listed = violations
                        .iter()
                        .map(serde_json::to_value)
                        .collect::<Result<Vec<Value>, _>>()?;
                    write_response(validation_json(&source, false, listed))?
                }
            }
            Err(CliError::new(
                CliErrorCode::ValidationFailed,
                format!("{} violation(s) in {}", violations.len(), source),
            ))
        }
        Err(e) => fail(e.into(), format),
    }
}

fn validation_json(source: &str, valid: bool, violations: Vec<Value>) -> Value {
    json!({
        "source": source,
        "valid": valid,
        "violations": violations,
    })
}

/// JSON output reports the failure on stdout too; the caller still exits 1.
fn fail(e: CliError, format: OutputFormat) -> CliResult<()> {
    if format == OutputFormat::Json {
        write_error(e.code_str(), e.message())?;
    }
    Err(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_defaults() {
        let config = load_config(&SourceArgs::default()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("timetable.json");
        fs::write(
            &path,
            r#"{"source_path": "from_file.xml", "schema_path": "from_file.xsd", "unknown_days": "collect"}"#,
        )
        .unwrap();

        let sources = SourceArgs {
            config: Some(path),
            source: Some(PathBuf::from("from_flag.xml")),
            schema: None,
        };
        let config = load_config(&sources).unwrap();
        assert_eq!(config.source_path, PathBuf::from("from_flag.xml"));
        assert_eq!(config.schema_path, PathBuf::from("from_file.xsd"));
        assert_eq!(config.unknown_days, UnknownDayPolicy::Collect);
    }

    #[test]
    fn test_missing_config_file() {
        let sources = SourceArgs {
            config: Some(PathBuf::from("/nonexistent/timetable.json")),
            ..SourceArgs::default()
        };
        let err = load_config(&sources).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::ConfigError);
    }

    #[test]
    fn test_build_week_missing_source() {
        let dir = TempDir::new().unwrap();
        let sources = SourceArgs {
            config: None,
            source: Some(dir.path().join("missing.xml")),
            schema: Some(dir.path().join("missing.xsd")),
        };
        let err = build_week(&sources, &Query::default()).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::SourceUnreadable);
    }
}
