//! Schema validator
//!
//! Validation semantics:
//! - the root element must match a global declaration
//! - element-only content follows its content model
//! - simple content satisfies its type and facets
//! - required attributes are present, undeclared attributes are rejected
//! - `xs:ID` values are unique and every `xs:IDREF` points at one
//!
//! The validator never mutates the document and collects every violation
//! instead of stopping at the first.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::errors::Violation;
use super::loader::SchemaLoader;
use super::types::{
    AttributeDecl, BuiltinType, ComplexType, Compositor, ContentModel, ElementDecl, Particle,
    Schema, SimpleType, Term, TypeRef,
};
use crate::config::Config;
use crate::document::{Document, Element};
use crate::observability::{log_event_with_fields, Event};

/// Outcome of validating one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// True when the document conforms
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Every violation found, in document order
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

/// Validates documents against a compiled schema
pub struct SchemaValidator<'a> {
    schema: &'a Schema,
}

impl<'a> SchemaValidator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Validates a document, collecting every violation.
    pub fn validate(&self, document: &Document) -> ValidationReport {
        let mut run = Run {
            schema: self.schema,
            violations: Vec::new(),
            ids: HashSet::new(),
            idrefs: Vec::new(),
        };

        let root = document.root();
        let path = format!("/{}", root.name());
        match self.schema.root(root.name()) {
            Some(decl) => run.element(root, &decl.type_ref, &path),
            None => {
                let expected: Vec<String> =
                    self.schema.root_names().map(|n| format!("<{}>", n)).collect();
                run.violations.push(Violation::new(
                    &path,
                    format!("root element {}", expected.join(" or ")),
                    format!("<{}>", root.name()),
                ));
            }
        }

        for (path, reference) in std::mem::take(&mut run.idrefs) {
            if !run.ids.contains(&reference) {
                run.violations.push(Violation::invalid_value(
                    &path,
                    "a reference to an existing ID",
                    &reference,
                ));
            }
        }

        ValidationReport {
            violations: run.violations,
        }
    }
}

/// Boolean validity check against a schema file.
///
/// Fails closed: a schema that cannot be read or compiled makes the
/// document invalid. Every `false` logs one `VALIDATION_FAILED` line.
pub fn validate_with_schema_file(document: &Document, schema_path: &Path) -> bool {
    let loader = SchemaLoader::new(&Config::default());
    let schema = match loader.load_from(schema_path) {
        Ok(schema) => schema,
        Err(e) => {
            log_event_with_fields(
                Event::ValidationFailed,
                &[("code", e.code()), ("reason", &e.to_string())],
            );
            return false;
        }
    };

    let report = SchemaValidator::new(&schema).validate(document);
    if !report.is_valid() {
        let count = report.violations().len().to_string();
        log_event_with_fields(
            Event::ValidationFailed,
            &[("code", "TIMETABLE_VALIDATION_FAILED"), ("violations", &count)],
        );
    }
    report.is_valid()
}

/// Failure to match a content model at a child position
struct Mismatch {
    at: usize,
    expected: String,
}

struct Run<'s> {
    schema: &'s Schema,
    violations: Vec<Violation>,
    ids: HashSet<String>,
    idrefs: Vec<(String, String)>,
}

impl<'s> Run<'s> {
    fn element(&mut self, element: &Element, type_ref: &'s TypeRef, path: &str) {
        let schema = self.schema;
        match type_ref {
            TypeRef::Any => {}
            TypeRef::Simple(simple) => {
                self.attributes(element, &[], path);
                if element.has_child_elements() {
                    self.violations.push(Violation::new(
                        path,
                        format!("text content of type {}", simple.display_name()),
                        "child elements",
                    ));
                } else {
                    self.value(&element.direct_text(), simple, path);
                }
            }
            TypeRef::Complex(complex) => self.complex(element, complex, path),
            TypeRef::Named(name) => match schema.complex_type(name) {
                Some(complex) => self.complex(element, complex, path),
                None => self.violations.push(Violation::new(
                    path,
                    format!("declared type '{}'", name),
                    "undeclared type",
                )),
            },
        }
    }

    fn complex(&mut self, element: &Element, complex: &'s ComplexType, path: &str) {
        self.attributes(element, &complex.attributes, path);

        match &complex.content {
            ContentModel::Empty => {
                if let Some(child) = element.child_elements().next() {
                    self.violations
                        .push(Violation::unexpected_element(path, child.name()));
                }
                if !element.direct_text().is_empty() {
                    self.violations.push(Violation::new(path, "empty content", "text"));
                }
            }
            ContentModel::Simple(simple) => {
                if element.has_child_elements() {
                    self.violations.push(Violation::new(
                        path,
                        format!("text content of type {}", simple.display_name()),
                        "child elements",
                    ));
                } else {
                    self.value(&element.direct_text(), simple, path);
                }
            }
            ContentModel::Elements(particle) => {
                if !element.direct_text().is_empty() {
                    self.violations.push(Violation::unexpected_text(path));
                }
                self.children(element, particle, path);
            }
        }
    }

    fn children(&mut self, element: &Element, particle: &'s Particle, path: &str) {
        let children: Vec<&Element> = element.child_elements().collect();
        let mut matched: Vec<&'s ElementDecl> = Vec::new();

        match self.particle(particle, &children, 0, &mut matched) {
            Ok(end) => {
                if let Some(extra) = children.get(end) {
                    self.violations
                        .push(Violation::unexpected_element(path, extra.name()));
                }
            }
            Err(mismatch) => {
                let actual = match children.get(mismatch.at) {
                    Some(child) => format!("<{}>", child.name()),
                    None => "end of content".to_string(),
                };
                self.violations.push(Violation::new(path, mismatch.expected, actual));
            }
        }

        let paths = child_paths(path, &children);
        for ((child, decl), child_path) in children.iter().zip(matched).zip(paths) {
            self.element(child, &decl.type_ref, &child_path);
        }
    }

    /// Matches a particle with its occurrence bounds, greedily.
    fn particle(
        &self,
        particle: &'s Particle,
        children: &[&Element],
        start: usize,
        matched: &mut Vec<&'s ElementDecl>,
    ) -> Result<usize, Mismatch> {
        let mut pos = start;
        let mut count = 0;

        while particle.occurs.allows_more(count) {
            match self.term_once(&particle.term, children, pos, matched)? {
                Some(next) if next > pos => {
                    pos = next;
                    count += 1;
                }
                Some(_) => {
                    count += 1;
                    break;
                }
                None => break,
            }
        }

        if count < particle.occurs.min {
            return Err(Mismatch {
                at: pos,
                expected: self.describe(&particle.term),
            });
        }

        Ok(pos)
    }

    /// One occurrence of a term. `Ok(None)` means the term does not start here.
    fn term_once(
        &self,
        term: &'s Term,
        children: &[&Element],
        pos: usize,
        matched: &mut Vec<&'s ElementDecl>,
    ) -> Result<Option<usize>, Mismatch> {
        match term {
            Term::Element(decl) => Ok(self.element_once(decl, children, pos, matched)),
            Term::ElementRef(name) => match self.schema.root(name) {
                Some(decl) => Ok(self.element_once(decl, children, pos, matched)),
                None => Ok(None),
            },
            Term::Group {
                compositor: Compositor::Sequence,
                particles,
            } => {
                let saved = matched.len();
                let mut next = pos;
                for particle in particles {
                    match self.particle(particle, children, next, matched) {
                        Ok(end) => next = end,
                        Err(mismatch) if mismatch.at == pos => {
                            matched.truncate(saved);
                            return Ok(None);
                        }
                        Err(mismatch) => return Err(mismatch),
                    }
                }
                Ok(Some(next))
            }
            Term::Group {
                compositor: Compositor::Choice,
                particles,
            } => {
                let mut empty_allowed = false;
                for particle in particles {
                    let saved = matched.len();
                    match self.particle(particle, children, pos, matched) {
                        Ok(end) if end > pos => return Ok(Some(end)),
                        Ok(_) => {
                            empty_allowed = true;
                            matched.truncate(saved);
                        }
                        Err(mismatch) if mismatch.at == pos => matched.truncate(saved),
                        Err(mismatch) => return Err(mismatch),
                    }
                }
                Ok(empty_allowed.then_some(pos))
            }
            Term::Group {
                compositor: Compositor::All,
                particles,
            } => {
                let decls: Vec<(&'s ElementDecl, &'s Particle)> = particles
                    .iter()
                    .filter_map(|p| self.resolve_element(&p.term).map(|d| (d, p)))
                    .collect();

                let mut used: HashSet<&str> = HashSet::new();
                let mut next = pos;
                while let Some(child) = children.get(next) {
                    let found = decls
                        .iter()
                        .find(|(d, _)| d.name == child.name() && !used.contains(d.name.as_str()));
                    match found {
                        Some((decl, _)) => {
                            used.insert(decl.name.as_str());
                            matched.push(*decl);
                            next += 1;
                        }
                        None => break,
                    }
                }

                let missing = decls
                    .iter()
                    .find(|(d, p)| p.occurs.min > 0 && !used.contains(d.name.as_str()));
                match missing {
                    None => Ok(Some(next)),
                    Some(_) if next == pos => Ok(None),
                    Some((decl, _)) => Err(Mismatch {
                        at: next,
                        expected: format!("<{}>", decl.name),
                    }),
                }
            }
        }
    }

    fn element_once(
        &self,
        decl: &'s ElementDecl,
        children: &[&Element],
        pos: usize,
        matched: &mut Vec<&'s ElementDecl>,
    ) -> Option<usize> {
        match children.get(pos) {
            Some(child) if child.name() == decl.name => {
                matched.push(decl);
                Some(pos + 1)
            }
            _ => None,
        }
    }

    fn resolve_element(&self, term: &'s Term) -> Option<&'s ElementDecl> {
        match term {
            Term::Element(decl) => Some(decl),
            Term::ElementRef(name) => self.schema.root(name),
            Term::Group { .. } => None,
        }
    }

    /// Human-readable description of what a term expects first
    fn describe(&self, term: &Term) -> String {
        match term {
            Term::Element(decl) => format!("<{}>", decl.name),
            Term::ElementRef(name) => format!("<{}>", name),
            Term::Group {
                compositor: Compositor::Sequence,
                particles,
            } => particles
                .first()
                .map(|p| self.describe(&p.term))
                .unwrap_or_else(|| "empty sequence".to_string()),
            Term::Group { particles, .. } => {
                let options: Vec<String> = particles.iter().map(|p| self.describe(&p.term)).collect();
                format!("one of {}", options.join(", "))
            }
        }
    }

    fn attributes(&mut self, element: &Element, decls: &[AttributeDecl], path: &str) {
        for decl in decls {
            match element.attribute(&decl.name) {
                Some(value) => {
                    let attr_path = format!("{}/@{}", path, decl.name);
                    self.value(value, &decl.simple_type, &attr_path);
                }
                None if decl.required => self
                    .violations
                    .push(Violation::missing_attribute(path, &decl.name)),
                None => {}
            }
        }

        for attr in element.attributes() {
            // Instance and reserved attributes are not part of the content
            if matches!(attr.prefix(), Some("xsi") | Some("xml")) {
                continue;
            }
            if !decls.iter().any(|d| d.name == attr.local_name()) {
                self.violations
                    .push(Violation::undeclared_attribute(path, &attr.name));
            }
        }
    }

    fn value(&mut self, raw: &str, simple: &SimpleType, path: &str) {
        if let Err(expected) = simple.check(raw) {
            self.violations.push(Violation::invalid_value(path, expected, raw));
            return;
        }

        let value = raw.trim().to_string();
        match simple.base {
            BuiltinType::Id => {
                if !self.ids.insert(value.clone()) {
                    self.violations
                        .push(Violation::invalid_value(path, "a unique ID", &value));
                }
            }
            BuiltinType::IdRef => self.idrefs.push((path.to_string(), value)),
            _ => {}
        }
    }
}

/// Paths for each child, indexed only when a name repeats among siblings
fn child_paths(parent: &str, children: &[&Element]) -> Vec<String> {
    let mut totals: HashMap<&str, usize> = HashMap::new();
    for child in children {
        *totals.entry(child.name()).or_default() += 1;
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    children
        .iter()
        .map(|child| {
            let name = child.name();
            let index = seen.entry(name).or_default();
            *index += 1;
            if totals[name] > 1 {
                format!("{}/{}[{}]", parent, name, index)
            } else {
                format!("{}/{}", parent, name)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_str;
    use crate::observability::{capture_events, error_events};
    use std::fs;
    use tempfile::TempDir;

    const COURSE_SCHEMA: &str = r#"
        <xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
            <xs:element name="timetable">
                <xs:complexType>
                    <xs:sequence>
                        <xs:element name="course" type="courseType" minOccurs="0" maxOccurs="unbounded"/>
                    </xs:sequence>
                </xs:complexType>
            </xs:element>
            <xs:complexType name="courseType">
                <xs:sequence>
                    <xs:element name="subject" type="xs:string"/>
                    <xs:element name="slot">
                        <xs:complexType>
                            <xs:all>
                                <xs:element name="day" type="dayType"/>
                                <xs:element name="start" type="xs:time"/>
                            </xs:all>
                        </xs:complexType>
                    </xs:element>
                    <xs:choice minOccurs="0">
                        <xs:element name="room" type="xs:token"/>
                        <xs:element name="online" type="xs:boolean"/>
                    </xs:choice>
                </xs:sequence>
                <xs:attribute name="id" type="xs:ID" use="required"/>
                <xs:attribute name="follows" type="xs:IDREF"/>
            </xs:complexType>
            <xs:simpleType name="dayType">
                <xs:restriction base="xs:string">
                    <xs:enumeration value="Monday"/>
                    <xs:enumeration value="Tuesday"/>
                </xs:restriction>
            </xs:simpleType>
        </xs:schema>
    "#;

    fn report(xml: &str) -> ValidationReport {
        let schema = Schema::parse_str(COURSE_SCHEMA).unwrap();
        let document = parse_str(xml).unwrap();
        SchemaValidator::new(&schema).validate(&document)
    }

    fn course(id: &str, inner: &str) -> String {
        format!(r#"<course id="{}">{}</course>"#, id, inner)
    }

    const SLOT: &str = "<slot><day>Monday</day><start>08:00:00</start></slot>";

    #[test]
    fn test_valid_document() {
        let xml = format!(
            "<timetable>{}{}</timetable>",
            course("C1", &format!("<subject>Networks</subject>{}<room>B204</room>", SLOT)),
            course(
                "C2",
                "<subject>Databases</subject><slot><start>10:00:00</start><day>Tuesday</day></slot>"
            ),
        );
        let result = report(&xml);
        assert!(result.is_valid(), "{:?}", result.violations());
    }

    #[test]
    fn test_empty_timetable_is_valid() {
        assert!(report("<timetable/>").is_valid());
    }

    #[test]
    fn test_wrong_root() {
        let result = report("<schedule/>");
        assert_eq!(result.violations().len(), 1);
        assert!(result.violations()[0].expected.contains("<timetable>"));
    }

    #[test]
    fn test_missing_required_child() {
        let xml = format!("<timetable>{}</timetable>", course("C1", SLOT));
        let result = report(&xml);
        assert!(!result.is_valid());
        let v = &result.violations()[0];
        assert_eq!(v.path, "/timetable/course");
        assert_eq!(v.expected, "<subject>");
        assert_eq!(v.actual, "<slot>");
    }

    #[test]
    fn test_missing_child_in_all_group() {
        let xml = format!(
            "<timetable>{}</timetable>",
            course("C1", "<subject>S</subject><slot><day>Monday</day></slot>")
        );
        let result = report(&xml);
        let v = &result.violations()[0];
        assert_eq!(v.path, "/timetable/course/slot");
        assert_eq!(v.expected, "<start>");
        assert_eq!(v.actual, "end of content");
    }

    #[test]
    fn test_bad_enumeration_and_time() {
        let xml = format!(
            "<timetable>{}</timetable>",
            course(
                "C1",
                "<subject>S</subject><slot><day>Sunday</day><start>8h</start></slot>"
            )
        );
        let result = report(&xml);
        let paths: Vec<&str> = result.violations().iter().map(|v| v.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/timetable/course/slot/day", "/timetable/course/slot/start"]
        );
    }

    #[test]
    fn test_unexpected_trailing_element() {
        let xml = format!(
            "<timetable>{}</timetable>",
            course(
                "C1",
                &format!("<subject>S</subject>{}<room>A1</room><online>true</online>", SLOT)
            )
        );
        let result = report(&xml);
        assert_eq!(result.violations().len(), 1);
        assert_eq!(result.violations()[0].actual, "<online>");
    }

    #[test]
    fn test_attributes_checked() {
        let xml = format!(
            r#"<timetable><course lang="fr"><subject>S</subject>{}</course></timetable>"#,
            SLOT
        );
        let result = report(&xml);
        let expected: Vec<&str> = result.violations().iter().map(|v| v.expected.as_str()).collect();
        assert!(expected.contains(&"attribute 'id'"));
        assert!(expected.contains(&"no undeclared attributes"));
    }

    #[test]
    fn test_xsi_attributes_ignored() {
        let xml = r#"<timetable xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:noNamespaceSchemaLocation="timetable.xsd"/>"#;
        assert!(report(xml).is_valid());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let body = format!("<subject>S</subject>{}", SLOT);
        let xml = format!("<timetable>{}{}</timetable>", course("C1", &body), course("C1", &body));
        let result = report(&xml);
        assert_eq!(result.violations().len(), 1);
        assert_eq!(result.violations()[0].path, "/timetable/course[2]/@id");
        assert_eq!(result.violations()[0].expected, "a unique ID");
    }

    #[test]
    fn test_dangling_idref_rejected() {
        let xml = format!(
            r#"<timetable><course id="C1" follows="C9"><subject>S</subject>{}</course></timetable>"#,
            SLOT
        );
        let result = report(&xml);
        assert_eq!(result.violations().len(), 1);
        assert_eq!(result.violations()[0].expected, "a reference to an existing ID");
    }

    #[test]
    fn test_text_in_element_only_content() {
        let xml = format!(
            "<timetable>stray{}</timetable>",
            course("C1", &format!("<subject>S</subject>{}", SLOT))
        );
        let result = report(&xml);
        assert_eq!(result.violations()[0].expected, "element-only content");
    }

    #[test]
    fn test_simple_element_with_children() {
        let xml = format!(
            "<timetable>{}</timetable>",
            course("C1", &format!("<subject><b>S</b></subject>{}", SLOT))
        );
        let result = report(&xml);
        assert_eq!(result.violations()[0].actual, "child elements");
    }

    #[test]
    fn test_validation_is_deterministic() {
        let xml = format!("<timetable>{}</timetable>", course("C1", SLOT));
        let first = report(&xml);
        for _ in 0..10 {
            assert_eq!(report(&xml), first);
        }
    }

    #[test]
    fn test_schema_file_missing_fails_closed() {
        let tmp = TempDir::new().unwrap();
        let document = parse_str("<timetable/>").unwrap();
        assert!(!validate_with_schema_file(&document, &tmp.path().join("absent.xsd")));
    }

    #[test]
    fn test_schema_file_malformed_fails_closed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.xsd");
        fs::write(&path, "<xs:schema").unwrap();

        let document = parse_str("<timetable/>").unwrap();
        assert!(!validate_with_schema_file(&document, &path));
    }

    #[test]
    fn test_schema_file_valid_document() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("timetable.xsd");
        fs::write(&path, COURSE_SCHEMA).unwrap();

        let document = parse_str("<timetable/>").unwrap();
        assert!(validate_with_schema_file(&document, &path));
    }

    #[test]
    fn test_simple_content_extension() {
        let schema = Schema::parse_str(
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
                <xs:element name="room">
                    <xs:complexType>
                        <xs:simpleContent>
                            <xs:extension base="xs:token">
                                <xs:attribute name="capacity" type="xs:positiveInteger" use="required"/>
                            </xs:extension>
                        </xs:simpleContent>
                    </xs:complexType>
                </xs:element>
            </xs:schema>"#,
        )
        .unwrap();
        let validator = SchemaValidator::new(&schema);

        let ok = parse_str(r#"<room capacity="30">B204</room>"#).unwrap();
        assert!(validator.validate(&ok).is_valid());

        let bad = parse_str(r#"<room capacity="0">B204</room>"#).unwrap();
        let result = validator.validate(&bad);
        assert_eq!(result.violations()[0].path, "/room/@capacity");
    }

    #[test]
    fn test_child_paths_index_repeats_only() {
        let document = parse_str("<a><b/><c/><b/></a>").unwrap();
        let children: Vec<&Element> = document.root().child_elements().collect();
        assert_eq!(
            child_paths("/a", &children),
            vec!["/a/b[1]", "/a/c", "/a/b[2]"]
        );
    }

    #[test]
    fn test_schema_file_logs_once_per_rejection() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("t.xsd");
        fs::write(&path, COURSE_SCHEMA).unwrap();

        let bad = parse_str("<timetable><course/></timetable>").unwrap();
        let lines = capture_events(|| assert!(!validate_with_schema_file(&bad, &path)));
        let errors = error_events(&lines);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["event"], "VALIDATION_FAILED");
        assert_eq!(errors[0]["code"], "TIMETABLE_VALIDATION_FAILED");
        assert_ne!(errors[0]["violations"], "0");

        let lines = capture_events(|| {
            assert!(!validate_with_schema_file(&bad, &tmp.path().join("absent.xsd")))
        });
        let errors = error_events(&lines);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["code"], "TIMETABLE_SCHEMA_UNREADABLE");
    }

    #[test]
    fn test_schema_file_logs_nothing_when_valid() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("t.xsd");
        fs::write(&path, COURSE_SCHEMA).unwrap();

        let ok = parse_str("<timetable/>").unwrap();
        let lines = capture_events(|| assert!(validate_with_schema_file(&ok, &path)));
        assert!(error_events(&lines).is_empty());
    }
}
