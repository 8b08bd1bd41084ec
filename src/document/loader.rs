//! Document loader
//!
//! Reads an XML file and builds the element tree. Whitespace-only text
//! between tags is formatting, not content, and is dropped.

use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event as XmlEvent};
use quick_xml::Reader;

use super::errors::{DocumentError, DocumentResult};
use super::tree::{Document, Element, Node};
use crate::config::Config;

/// Loads documents, defaulting to the configured source path
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    default_path: PathBuf,
}

impl DocumentLoader {
    /// Creates a loader whose default source comes from the configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            default_path: config.source_path.clone(),
        }
    }

    /// Returns the default source path.
    pub fn default_path(&self) -> &Path {
        &self.default_path
    }

    /// Loads the default source.
    pub fn load(&self) -> DocumentResult<Document> {
        self.load_from(&self.default_path)
    }

    /// Loads an explicit source.
    pub fn load_from(&self, path: &Path) -> DocumentResult<Document> {
        let shown = path.display().to_string();

        if !path.is_file() {
            return Err(DocumentError::unreadable(&shown, "not a readable file"));
        }

        let bytes = fs::read(path).map_err(|e| DocumentError::unreadable(&shown, e.to_string()))?;

        let text = String::from_utf8(bytes).map_err(|e| {
            DocumentError::parse(e.utf8_error().valid_up_to(), "document is not valid UTF-8")
                .with_path(&shown)
        })?;

        parse_str(&text).map_err(|e| e.with_path(&shown))
    }
}

impl Document {
    /// Parses in-memory XML text.
    pub fn parse_str(text: &str) -> DocumentResult<Self> {
        parse_str(text)
    }
}

/// Parses XML text into a document.
pub fn parse_str(text: &str) -> DocumentResult<Document> {
    let mut reader = Reader::from_str(text);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let position = reader.buffer_position();

        match reader.read_event() {
            Ok(XmlEvent::Start(start)) => {
                let element = element_from_start(&start, position)?;
                if stack.is_empty() && root.is_some() {
                    return Err(DocumentError::parse(position, "more than one root element"));
                }
                stack.push(element);
            }
            Ok(XmlEvent::Empty(start)) => {
                let element = element_from_start(&start, position)?;
                attach(&mut stack, &mut root, element, position)?;
            }
            Ok(XmlEvent::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| DocumentError::parse(position, "closing tag without opening tag"))?;
                attach(&mut stack, &mut root, element, position)?;
            }
            Ok(XmlEvent::Text(text)) => {
                let value = text
                    .unescape()
                    .map_err(|e| DocumentError::parse(position, e.to_string()))?;
                push_text(&mut stack, value.into_owned(), position)?;
            }
            Ok(XmlEvent::CData(data)) => {
                let value = String::from_utf8(data.into_inner().into_owned())
                    .map_err(|_| DocumentError::parse(position, "CDATA is not valid UTF-8"))?;
                push_text(&mut stack, value, position)?;
            }
            Ok(XmlEvent::Eof) => break,
            // Declarations, comments, processing instructions, doctype
            Ok(_) => {}
            Err(e) => return Err(DocumentError::parse(position, e.to_string())),
        }
    }

    if let Some(open) = stack.last() {
        return Err(DocumentError::parse(
            reader.buffer_position(),
            format!("element <{}> is never closed", open.name()),
        ));
    }

    root.map(Document::new)
        .ok_or_else(|| DocumentError::parse(0, "document has no root element"))
}

fn element_from_start(start: &BytesStart<'_>, position: usize) -> DocumentResult<Element> {
    let name = utf8(start.local_name().as_ref(), position)?;
    let mut element = Element::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| DocumentError::parse(position, e.to_string()))?;
        let key = utf8(attr.key.as_ref(), position)?;

        // Namespace declarations are not data
        if key == "xmlns" || key.starts_with("xmlns:") {
            continue;
        }

        let value = attr
            .unescape_value()
            .map_err(|e| DocumentError::parse(position, e.to_string()))?;
        element.push_attribute(key, value.into_owned());
    }

    Ok(element)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
    position: usize,
) -> DocumentResult<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.push_child(Node::Element(element));
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(DocumentError::parse(position, "more than one root element")),
    }
}

/// Whitespace-only runs are formatting between tags and are dropped.
/// Any other text is kept verbatim, inner spaces included.
fn push_text(stack: &mut [Element], value: String, position: usize) -> DocumentResult<()> {
    if value.trim().is_empty() {
        return Ok(());
    }
    match stack.last_mut() {
        Some(parent) => {
            parent.push_child(Node::Text(value));
            Ok(())
        }
        None => Err(DocumentError::parse(position, "text outside the root element")),
    }
}

fn utf8(bytes: &[u8], position: usize) -> DocumentResult<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| DocumentError::parse(position, "name is not valid UTF-8"))
}
