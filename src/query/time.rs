//! Time display formatting

/// Separator placed between the two ends of a slot
pub const RANGE_SEPARATOR: &str = " – ";

/// Formats a stored time for display as `HH:MM`.
///
/// Keeps the segment before the first colon verbatim and the second
/// segment when present, `"00"` otherwise. Anything after the second
/// colon is dropped. Values are not range-checked, so an empty input
/// gives `":00"`.
pub fn format_time(raw: &str) -> String {
    let mut parts = raw.split(':');
    let hours = parts.next().unwrap_or_default();
    let minutes = parts.next().unwrap_or("00");
    format!("{hours}:{minutes}")
}

/// `"08:00 – 09:30"` for a slot's start and end.
pub fn time_range(start: &str, end: &str) -> String {
    format!("{}{}{}", format_time(start), RANGE_SEPARATOR, format_time(end))
}
