//! Document loading
//!
//! Turns an XML source into a read-only element tree.
//!
//! - Missing or unreadable source: `TIMETABLE_SOURCE_UNREADABLE`
//! - Source not well-formed: `TIMETABLE_PARSE_ERROR`
//!
//! The tree is never mutated after loading.

mod errors;
mod loader;
mod tree;

pub use errors::{DocumentError, DocumentResult, IN_MEMORY_PATH};
pub use loader::{parse_str, DocumentLoader};
pub use tree::{Attribute, Descendants, Document, Element, Node};
