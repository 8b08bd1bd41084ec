//! Record extraction
//!
//! Walks the tree and builds one [`Record`] per `course` element, in
//! document order. Lookups are by element name at any depth; the first
//! match wins.

use super::record::Record;
use crate::document::{Document, Element};

/// Element and attribute names of the timetable document
pub mod tags {
    pub const COURSE: &str = "course";
    pub const ID: &str = "id";
    pub const SUBJECT: &str = "subject";
    pub const INSTRUCTOR: &str = "instructor";
    pub const FAMILY_NAME: &str = "family_name";
    pub const GIVEN_NAME: &str = "given_name";
    pub const SLOT: &str = "slot";
    pub const DAY: &str = "day";
    pub const START: &str = "start";
    pub const END: &str = "end";
    pub const ROOM: &str = "room";
    pub const TYPE: &str = "type";
}

/// Extracts every course of the document, in document order.
pub fn extract_records(document: &Document) -> Vec<Record> {
    document
        .elements_named(tags::COURSE)
        .map(record_from_course)
        .collect()
}

fn record_from_course(course: &Element) -> Record {
    let instructor = course.first_descendant(tags::INSTRUCTOR);
    let slot = course.first_descendant(tags::SLOT);

    Record {
        id: course.attribute(tags::ID).unwrap_or_default().to_string(),
        subject: child_text(course, tags::SUBJECT),
        instructor_family_name: optional_text(instructor, tags::FAMILY_NAME),
        instructor_given_name: optional_text(instructor, tags::GIVEN_NAME),
        day: optional_text(slot, tags::DAY),
        start_time: optional_text(slot, tags::START),
        end_time: optional_text(slot, tags::END),
        room: child_text(course, tags::ROOM),
        session_type: child_text(course, tags::TYPE),
    }
}

/// Trimmed text of the first descendant named `name`, or `""`.
pub fn child_text(element: &Element, name: &str) -> String {
    element
        .first_descendant(name)
        .map(|found| found.text_content().trim().to_string())
        .unwrap_or_default()
}

fn optional_text(block: Option<&Element>, name: &str) -> String {
    block.map(|b| child_text(b, name)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_str;

    #[test]
    fn test_full_course() {
        let doc = parse_str(
            r#"<timetable>
                <course id="C1">
                    <subject>Networks</subject>
                    <instructor><family_name>Durand</family_name><given_name>Alice</given_name></instructor>
                    <slot><day>Monday</day><start>08:00:00</start><end>09:30:00</end></slot>
                    <room>B204</room>
                    <type>Lecture</type>
                </course>
            </timetable>"#,
        )
        .unwrap();

        let records = extract_records(&doc);
        assert_eq!(
            records,
            vec![Record {
                id: "C1".into(),
                subject: "Networks".into(),
                instructor_family_name: "Durand".into(),
                instructor_given_name: "Alice".into(),
                day: "Monday".into(),
                start_time: "08:00:00".into(),
                end_time: "09:30:00".into(),
                room: "B204".into(),
                session_type: "Lecture".into(),
            }]
        );
    }

    #[test]
    fn test_missing_blocks_yield_empty_fields() {
        let doc = parse_str(r#"<timetable><course><subject>Databases</subject></course></timetable>"#)
            .unwrap();

        let records = extract_records(&doc);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.subject, "Databases");
        assert_eq!(record.id, "");
        assert_eq!(record.instructor_family_name, "");
        assert_eq!(record.instructor_given_name, "");
        assert_eq!(record.day, "");
        assert_eq!(record.start_time, "");
        assert_eq!(record.room, "");
    }

    #[test]
    fn test_document_order_and_nesting() {
        let doc = parse_str(
            r#"<timetable>
                <course id="B"/>
                <term><course id="A"/></term>
                <course id="C"/>
            </timetable>"#,
        )
        .unwrap();

        let ids: Vec<String> = extract_records(&doc).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_text_is_trimmed_and_first_match_wins() {
        let doc = parse_str(
            "<course><subject>\n  Networks\t</subject><subject>Other</subject></course>",
        )
        .unwrap();
        assert_eq!(child_text(doc.root(), "subject"), "Networks");
        assert_eq!(child_text(doc.root(), "room"), "");
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let doc = parse_str(r#"<timetable><course id="C1"><room>A1</room></course></timetable>"#).unwrap();
        assert_eq!(extract_records(&doc), extract_records(&doc));
    }
}
