//! Load → validate → extract → filter → sort → group
//!
//! The schema is a gate: nothing is extracted from a document that was not
//! validated. Every run rereads both files.

use super::errors::{TimetableError, TimetableResult};
use crate::config::Config;
use crate::document::{Document, DocumentLoader};
use crate::extract::{extract_records, Record};
use crate::observability::{log_event_with_fields, Event, ObservationScope};
use crate::query::{Query, Weekday, WeekSchedule};
use crate::schema::{SchemaLoader, SchemaValidator};

/// Timetable pipeline over one source document and its schema
#[derive(Debug, Clone)]
pub struct Timetable {
    config: Config,
    documents: DocumentLoader,
    schemas: SchemaLoader,
}

impl Timetable {
    pub fn new(config: Config) -> Self {
        Self {
            documents: DocumentLoader::new(&config),
            schemas: SchemaLoader::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Loads the source document and checks it against the schema.
    ///
    /// An unusable schema fails the run the same way a non-conforming
    /// document does.
    pub fn load_validated(&self) -> TimetableResult<Document> {
        let source = self.config.source_path.display().to_string();
        let schema_path = self.config.schema_path.display().to_string();

        let scope = ObservationScope::with_fields("LOAD", &[("path", &source)]);
        let document = match self.documents.load() {
            Ok(document) => document,
            Err(e) => {
                log_event_with_fields(
                    Event::DocumentRejected,
                    &[("code", e.code()), ("path", e.path()), ("reason", &e.to_string())],
                );
                scope.fail(e.code());
                return Err(e.into());
            }
        };
        scope.complete();
        log_event_with_fields(Event::DocumentLoaded, &[("path", &source)]);

        let scope = ObservationScope::with_fields("VALIDATE", &[("schema", &schema_path)]);
        let schema = match self.schemas.load() {
            Ok(schema) => schema,
            Err(e) => {
                log_event_with_fields(
                    Event::ValidationFailed,
                    &[("code", e.code()), ("path", e.path()), ("reason", &e.to_string())],
                );
                scope.fail(e.code());
                return Err(e.into());
            }
        };
        log_event_with_fields(Event::SchemaLoaded, &[("path", &schema_path)]);

        let report = SchemaValidator::new(&schema).validate(&document);
        if !report.is_valid() {
            let count = report.violations().len().to_string();
            log_event_with_fields(
                Event::ValidationFailed,
                &[
                    ("code", "TIMETABLE_VALIDATION_FAILED"),
                    ("path", &source),
                    ("violations", &count),
                ],
            );
            scope.fail("TIMETABLE_VALIDATION_FAILED");
            return Err(TimetableError::ValidationFailed {
                violations: report.into_violations(),
            });
        }
        scope.complete();
        log_event_with_fields(Event::SchemaValidated, &[("path", &source)]);

        Ok(document)
    }

    /// Loads, validates and extracts every course record in document order.
    pub fn load_records(&self) -> TimetableResult<Vec<Record>> {
        let document = self.load_validated()?;
        let records = extract_records(&document);
        log_event_with_fields(
            Event::RecordsExtracted,
            &[("count", &records.len().to_string())],
        );
        Ok(records)
    }

    /// Runs the whole pipeline and returns the grouped week.
    pub fn query(&self, query: &Query) -> TimetableResult<WeekSchedule> {
        let records = self.load_records()?;

        let matching = records.iter().filter(|r| query.filter.matches(r)).count();
        let week = query.apply(records, self.config.unknown_days);

        let dropped = matching - week.scheduled_count() - week.unscheduled().len();
        if dropped > 0 {
            log_event_with_fields(
                Event::UnknownDaysDropped,
                &[("count", &dropped.to_string())],
            );
        }

        let days_with_records = Weekday::ALL
            .iter()
            .filter(|day| !week.records_for(**day).is_empty())
            .count();
        log_event_with_fields(
            Event::QueryComplete,
            &[
                ("day", query.filter.day.as_deref().unwrap_or("")),
                ("days_with_records", &days_with_records.to_string()),
                ("scheduled", &week.scheduled_count().to_string()),
                ("subject", query.filter.subject.as_deref().unwrap_or("")),
                ("unscheduled", &week.unscheduled().len().to_string()),
            ],
        );

        Ok(week)
    }
}
