//! Observability for the timetable pipeline
//!
//! - Structured logging (JSON lines on stderr)
//! - Typed lifecycle events
//! - Stage scopes with begin/complete logging
//!
//! Observability is read-only: nothing here changes what the pipeline
//! returns.
//!
//! ```ignore
//! use timetable::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::RecordsExtracted, &[("count", "12")]);
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::ObservationScope;

#[cfg(test)]
pub(crate) use logger::{capture_events, error_events};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
///
/// Terminal events are logged at ERROR, everything else at INFO.
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_terminal() {
        Severity::Error
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        log_event(Event::DocumentLoaded);
        log_event(Event::ValidationFailed);
    }

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::ConfigLoaded, &[("path", "/tmp/timetable.json")]);
    }
}
