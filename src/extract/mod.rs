//! Record extraction
//!
//! Turns a validated document into a flat list of course records. Records
//! are built fresh on every call and never written back to the document.

mod extractor;
mod record;

pub use extractor::{child_text, extract_records, tags};
pub use record::Record;
