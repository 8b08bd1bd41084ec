//! Schema loader
//!
//! Reads an XSD file through the document loader and compiles it into a
//! [`Schema`]. Anything outside the supported subset is rejected rather
//! than skipped, so an unusable schema never validates a document.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use regex::Regex;

use super::errors::{SchemaError, SchemaResult};
use super::types::{
    AttributeDecl, BuiltinType, ComplexType, Compositor, ContentModel, ElementDecl, Facet,
    Occurs, Particle, Schema, SimpleType, Term, TypeRef,
};
use crate::config::Config;
use crate::document::{parse_str, Document, DocumentLoader, Element};

/// Loads schemas, defaulting to the configured schema path
#[derive(Debug, Clone)]
pub struct SchemaLoader {
    default_path: PathBuf,
    documents: DocumentLoader,
}

impl SchemaLoader {
    /// Creates a loader whose default schema comes from the configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            default_path: config.schema_path.clone(),
            documents: DocumentLoader::new(config),
        }
    }

    /// Returns the default schema path.
    pub fn default_path(&self) -> &Path {
        &self.default_path
    }

    /// Loads and compiles the default schema.
    pub fn load(&self) -> SchemaResult<Schema> {
        self.load_from(&self.default_path)
    }

    /// Loads and compiles an explicit schema file.
    pub fn load_from(&self, path: &Path) -> SchemaResult<Schema> {
        let shown = path.display().to_string();

        let document = self
            .documents
            .load_from(path)
            .map_err(|e| SchemaError::Unreadable {
                path: shown.clone(),
                reason: e.to_string(),
            })?;

        compile(&document).map_err(|e| e.with_path(&shown))
    }
}

impl Schema {
    /// Compiles schema text held in memory.
    pub fn parse_str(text: &str) -> SchemaResult<Schema> {
        let document = parse_str(text).map_err(|e| SchemaError::Unreadable {
            path: e.path().to_string(),
            reason: e.to_string(),
        })?;
        compile(&document)
    }
}

/// Compiles a parsed XSD document.
pub fn compile(document: &Document) -> SchemaResult<Schema> {
    let root = document.root();
    if root.name() != "schema" {
        return Err(SchemaError::unsupported(format!(
            "root element is <{}>, expected <schema>",
            root.name()
        )));
    }

    let mut compiler = Compiler::default();

    for child in root.child_elements() {
        let sources = match child.name() {
            "annotation" => continue,
            "element" => &mut compiler.global_sources,
            "complexType" => &mut compiler.complex_sources,
            "simpleType" => &mut compiler.simple_sources,
            other => return Err(unsupported_construct(other)),
        };
        let name = required_attribute(child, "name")?;
        if sources.insert(name, child).is_some() {
            return Err(SchemaError::unsupported(format!(
                "duplicate top-level <{}> '{}'",
                child.name(),
                name
            )));
        }
    }

    if compiler.global_sources.is_empty() {
        return Err(SchemaError::unsupported("schema declares no global element"));
    }

    let mut schema = Schema::default();

    let simple_names: Vec<&str> = compiler.simple_sources.keys().copied().collect();
    for name in simple_names {
        compiler.resolve_simple(name)?;
    }

    let complex_sources: Vec<(&str, &Element)> = compiler
        .complex_sources
        .iter()
        .map(|(name, element)| (*name, *element))
        .collect();
    for (name, element) in complex_sources {
        let complex = compiler.compile_complex(element, Some(name))?;
        schema.complex_types.insert(name.to_string(), complex);
    }

    let global_sources: Vec<(&str, &Element)> = compiler
        .global_sources
        .iter()
        .map(|(name, element)| (*name, *element))
        .collect();
    for (name, element) in global_sources {
        check_attributes(element, GLOBAL_ELEMENT_ATTRIBUTES)?;
        let decl = ElementDecl {
            name: name.to_string(),
            type_ref: compiler.compile_element_type(element)?,
        };
        schema.roots.insert(name.to_string(), decl);
    }

    Ok(schema)
}

#[derive(Default)]
struct Compiler<'d> {
    global_sources: HashMap<&'d str, &'d Element>,
    complex_sources: HashMap<&'d str, &'d Element>,
    simple_sources: HashMap<&'d str, &'d Element>,
    simple_cache: HashMap<String, SimpleType>,
    resolving: HashSet<String>,
}

impl<'d> Compiler<'d> {
    /// Resolves the `type` of an element declaration.
    fn resolve_type_name(&mut self, qname: &str) -> SchemaResult<TypeRef> {
        let name = local_name(qname);

        if self.simple_sources.contains_key(name) {
            return Ok(TypeRef::Simple(self.resolve_simple(name)?));
        }
        if self.complex_sources.contains_key(name) {
            return Ok(TypeRef::Named(name.to_string()));
        }
        if name == "anyType" {
            return Ok(TypeRef::Any);
        }
        BuiltinType::from_name(name)
            .map(|builtin| TypeRef::Simple(SimpleType::builtin(builtin)))
            .ok_or_else(|| SchemaError::unsupported(format!("unknown type '{}'", qname)))
    }

    /// Resolves a type that must be simple (attributes, restriction bases).
    fn resolve_simple_name(&mut self, qname: &str) -> SchemaResult<SimpleType> {
        let name = local_name(qname);

        if self.simple_sources.contains_key(name) {
            return self.resolve_simple(name);
        }
        BuiltinType::from_name(name)
            .map(SimpleType::builtin)
            .ok_or_else(|| SchemaError::unsupported(format!("unknown simple type '{}'", qname)))
    }

    fn resolve_simple(&mut self, name: &str) -> SchemaResult<SimpleType> {
        if let Some(cached) = self.simple_cache.get(name) {
            return Ok(cached.clone());
        }
        if !self.resolving.insert(name.to_string()) {
            return Err(SchemaError::unsupported(format!(
                "simple type '{}' derives from itself",
                name
            )));
        }

        let element = *self
            .simple_sources
            .get(name)
            .ok_or_else(|| SchemaError::unsupported(format!("unknown simple type '{}'", name)))?;
        let compiled = self.compile_simple(element, Some(name))?;

        self.resolving.remove(name);
        self.simple_cache.insert(name.to_string(), compiled.clone());
        Ok(compiled)
    }

    fn compile_simple(&mut self, element: &'d Element, name: Option<&str>) -> SchemaResult<SimpleType> {
        check_attributes(element, &["name"])?;
        let mut restriction = None;
        for child in significant_children(element) {
            match child.name() {
                "restriction" if restriction.is_none() => restriction = Some(child),
                other => return Err(unsupported_construct(other)),
            }
        }
        let restriction = restriction
            .ok_or_else(|| SchemaError::unsupported("simpleType without restriction"))?;
        check_attributes(restriction, &["base"])?;

        let mut base = match restriction.attribute("base") {
            Some(base) => self.resolve_simple_name(base)?,
            None => {
                let inline = significant_children(restriction)
                    .find(|c| c.name() == "simpleType")
                    .ok_or_else(|| SchemaError::unsupported("restriction without base"))?;
                self.compile_simple(inline, None)?
            }
        };

        let mut enumeration = Vec::new();
        let mut patterns = Vec::new();
        for facet in significant_children(restriction) {
            if facet.name() != "simpleType" {
                check_attributes(facet, &["value"])?;
            }
            match facet.name() {
                "simpleType" if restriction.attribute("base").is_none() => {}
                "enumeration" => enumeration.push(required_attribute(facet, "value")?.to_string()),
                "pattern" => {
                    let pattern = required_attribute(facet, "value")?;
                    let anchored = format!("^(?:{})$", pattern);
                    let regex = Regex::new(&anchored).map_err(|e| {
                        SchemaError::unsupported(format!("pattern '{}': {}", pattern, e))
                    })?;
                    patterns.push(regex);
                }
                "length" => base.facets.push(Facet::Length(length_value(facet)?)),
                "minLength" => base.facets.push(Facet::MinLength(length_value(facet)?)),
                "maxLength" => base.facets.push(Facet::MaxLength(length_value(facet)?)),
                "whiteSpace" => {}
                other => return Err(unsupported_construct(other)),
            }
        }
        if !enumeration.is_empty() {
            base.facets.push(Facet::Enumeration(enumeration));
        }
        if !patterns.is_empty() {
            base.facets.push(Facet::Pattern(patterns));
        }

        base.name = name.map(str::to_string);
        Ok(base)
    }

    fn compile_complex(&mut self, element: &'d Element, name: Option<&str>) -> SchemaResult<ComplexType> {
        check_attributes(element, &["name", "mixed"])?;
        if element.attribute("mixed").is_some_and(|m| m != "false") {
            return Err(SchemaError::unsupported("mixed content"));
        }

        let mut content = ContentModel::Empty;
        let mut content_seen = false;
        let mut attributes = Vec::new();

        for child in significant_children(element) {
            match child.name() {
                "sequence" | "choice" | "all" | "simpleContent" if content_seen => {
                    return Err(SchemaError::unsupported(format!(
                        "complexType '{}' declares more than one content model",
                        name.unwrap_or("<anonymous>")
                    )));
                }
                "sequence" | "choice" | "all" => {
                    content = ContentModel::Elements(self.compile_group(child)?);
                    content_seen = true;
                }
                "simpleContent" => {
                    let (simple, extra) = self.compile_simple_content(child)?;
                    content = ContentModel::Simple(simple);
                    attributes.extend(extra);
                    content_seen = true;
                }
                "attribute" => attributes.push(self.compile_attribute(child)?),
                other => return Err(unsupported_construct(other)),
            }
        }

        Ok(ComplexType {
            name: name.map(str::to_string),
            content,
            attributes,
        })
    }

    fn compile_simple_content(
        &mut self,
        element: &'d Element,
    ) -> SchemaResult<(SimpleType, Vec<AttributeDecl>)> {
        check_attributes(element, &[])?;
        let mut extension = None;
        for child in significant_children(element) {
            match child.name() {
                "extension" if extension.is_none() => extension = Some(child),
                other => return Err(unsupported_construct(other)),
            }
        }
        let extension =
            extension.ok_or_else(|| SchemaError::unsupported("simpleContent without extension"))?;
        check_attributes(extension, &["base"])?;

        let base = self.resolve_simple_name(required_attribute(extension, "base")?)?;

        let mut attributes = Vec::new();
        for child in significant_children(extension) {
            match child.name() {
                "attribute" => attributes.push(self.compile_attribute(child)?),
                other => return Err(unsupported_construct(other)),
            }
        }

        Ok((base, attributes))
    }

    fn compile_group(&mut self, element: &'d Element) -> SchemaResult<Particle> {
        let compositor = match element.name() {
            "sequence" => Compositor::Sequence,
            "choice" => Compositor::Choice,
            "all" => Compositor::All,
            other => return Err(unsupported_construct(other)),
        };
        check_attributes(element, &["minOccurs", "maxOccurs"])?;

        let mut particles = Vec::new();
        for child in significant_children(element) {
            let particle = match (compositor, child.name()) {
                (_, "element") => self.compile_local_element(child)?,
                (Compositor::Sequence | Compositor::Choice, "sequence" | "choice") => {
                    self.compile_group(child)?
                }
                (_, other) => return Err(unsupported_construct(other)),
            };
            if compositor == Compositor::All && particle.occurs.max.map_or(true, |max| max > 1) {
                return Err(SchemaError::unsupported(
                    "elements inside <all> may occur at most once",
                ));
            }
            particles.push(particle);
        }

        Ok(Particle {
            term: Term::Group {
                compositor,
                particles,
            },
            occurs: parse_occurs(element)?,
        })
    }

    fn compile_local_element(&mut self, element: &'d Element) -> SchemaResult<Particle> {
        let occurs = parse_occurs(element)?;

        if let Some(reference) = element.attribute("ref") {
            check_attributes(element, &["ref", "minOccurs", "maxOccurs"])?;
            if let Some(child) = significant_children(element).next() {
                return Err(unsupported_construct(child.name()));
            }
            let name = local_name(reference);
            if !self.global_sources.contains_key(name) {
                return Err(SchemaError::unsupported(format!(
                    "reference to undeclared element '{}'",
                    reference
                )));
            }
            return Ok(Particle {
                term: Term::ElementRef(name.to_string()),
                occurs,
            });
        }

        check_attributes(element, LOCAL_ELEMENT_ATTRIBUTES)?;
        let decl = ElementDecl {
            name: required_attribute(element, "name")?.to_string(),
            type_ref: self.compile_element_type(element)?,
        };

        Ok(Particle {
            term: Term::Element(decl),
            occurs,
        })
    }

    /// Type of an element: a `type` attribute or one inline type, never
    /// both. Identity constraints and any other child are rejected.
    fn compile_element_type(&mut self, element: &'d Element) -> SchemaResult<TypeRef> {
        let mut inline = None;
        for child in significant_children(element) {
            match child.name() {
                "complexType" | "simpleType" if inline.is_none() => inline = Some(child),
                other => return Err(unsupported_construct(other)),
            }
        }

        match (element.attribute("type"), inline) {
            (Some(_), Some(_)) => Err(SchemaError::unsupported(format!(
                "element '{}' has both a type attribute and an inline type",
                element.attribute("name").unwrap_or_default()
            ))),
            (Some(type_name), None) => self.resolve_type_name(type_name),
            (None, Some(child)) if child.name() == "complexType" => {
                Ok(TypeRef::Complex(Box::new(self.compile_complex(child, None)?)))
            }
            (None, Some(child)) => Ok(TypeRef::Simple(self.compile_simple(child, None)?)),
            (None, None) => Ok(TypeRef::Any),
        }
    }

    fn compile_attribute(&mut self, element: &'d Element) -> SchemaResult<AttributeDecl> {
        check_attributes(element, &["name", "type", "use"])?;
        let name = required_attribute(element, "name")?.to_string();

        let mut inline = None;
        for child in significant_children(element) {
            match child.name() {
                "simpleType" if inline.is_none() => inline = Some(child),
                other => return Err(unsupported_construct(other)),
            }
        }

        let simple_type = match (element.attribute("type"), inline) {
            (Some(_), Some(_)) => {
                return Err(SchemaError::unsupported(format!(
                    "attribute '{}' has both a type attribute and an inline type",
                    name
                )))
            }
            (Some(type_name), None) => self.resolve_simple_name(type_name)?,
            (None, Some(inline)) => self.compile_simple(inline, None)?,
            (None, None) => SimpleType::builtin(BuiltinType::AnySimpleType),
        };

        let required = match element.attribute("use") {
            None | Some("optional") => false,
            Some("required") => true,
            Some(other) => {
                return Err(SchemaError::unsupported(format!(
                    "attribute use '{}' on '{}'",
                    other, name
                )))
            }
        };

        Ok(AttributeDecl {
            name,
            simple_type,
            required,
        })
    }
}

/// Attributes a global `xs:element` may carry
const GLOBAL_ELEMENT_ATTRIBUTES: &[&str] = &["name", "type"];

/// Attributes a local `xs:element` may carry
const LOCAL_ELEMENT_ATTRIBUTES: &[&str] = &["name", "type", "minOccurs", "maxOccurs"];

/// Rejects any attribute the compiled model would otherwise ignore, such
/// as `fixed`, `default`, `nillable`, `abstract` or `substitutionGroup`.
/// `id` and foreign-namespace attributes carry no constraint and pass.
fn check_attributes(element: &Element, allowed: &[&str]) -> SchemaResult<()> {
    for attribute in element.attributes() {
        if attribute.prefix().is_some() || attribute.name == "id" {
            continue;
        }
        if !allowed.contains(&attribute.name.as_str()) {
            return Err(SchemaError::unsupported(format!(
                "unsupported attribute '{}' on <{}>",
                attribute.name,
                element.name()
            )));
        }
    }
    Ok(())
}

fn significant_children(element: &Element) -> impl Iterator<Item = &Element> {
    element.child_elements().filter(|c| c.name() != "annotation")
}

fn local_name(qname: &str) -> &str {
    qname.rsplit_once(':').map_or(qname, |(_, local)| local)
}

fn required_attribute<'e>(element: &'e Element, name: &str) -> SchemaResult<&'e str> {
    element.attribute(name).ok_or_else(|| {
        SchemaError::unsupported(format!("<{}> without '{}' attribute", element.name(), name))
    })
}

fn unsupported_construct(name: &str) -> SchemaError {
    SchemaError::unsupported(format!("unsupported construct <{}>", name))
}

fn length_value(facet: &Element) -> SchemaResult<usize> {
    let raw = required_attribute(facet, "value")?;
    raw.trim().parse().map_err(|_| {
        SchemaError::unsupported(format!("<{}> value '{}' is not a length", facet.name(), raw))
    })
}

fn parse_occurs(element: &Element) -> SchemaResult<Occurs> {
    let min = match element.attribute("minOccurs") {
        Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
            SchemaError::unsupported(format!("minOccurs '{}' is not a count", raw))
        })?,
        None => 1,
    };
    let max = match element.attribute("maxOccurs").map(str::trim) {
        Some("unbounded") => None,
        Some(raw) => Some(raw.parse::<u32>().map_err(|_| {
            SchemaError::unsupported(format!("maxOccurs '{}' is not a count", raw))
        })?),
        None => Some(1),
    };

    if let Some(max) = max {
        if min > max {
            return Err(SchemaError::unsupported(format!(
                "minOccurs {} exceeds maxOccurs {}",
                min, max
            )));
        }
    }

    Ok(Occurs { min, max })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const XS: &str = r#"xmlns:xs="http://www.w3.org/2001/XMLSchema""#;

    fn schema(body: &str) -> SchemaResult<Schema> {
        Schema::parse_str(&format!("<xs:schema {}>{}</xs:schema>", XS, body))
    }

    #[test]
    fn test_compiles_named_types_in_any_order() {
        let compiled = schema(
            r#"
            <xs:element name="week" type="weekType"/>
            <xs:complexType name="weekType">
                <xs:sequence>
                    <xs:element name="day" type="dayType" maxOccurs="unbounded"/>
                </xs:sequence>
            </xs:complexType>
            <xs:simpleType name="dayType">
                <xs:restriction base="xs:string">
                    <xs:enumeration value="Monday"/>
                </xs:restriction>
            </xs:simpleType>
            "#,
        )
        .unwrap();

        assert_eq!(compiled.root_names().collect::<Vec<_>>(), vec!["week"]);
        assert!(matches!(compiled.root("week").unwrap().type_ref, TypeRef::Named(ref n) if n == "weekType"));
        let week = compiled.complex_type("weekType").unwrap();
        match &week.content {
            ContentModel::Elements(particle) => match &particle.term {
                Term::Group { compositor, particles } => {
                    assert_eq!(*compositor, Compositor::Sequence);
                    assert_eq!(particles[0].occurs, Occurs { min: 1, max: None });
                    match &particles[0].term {
                        Term::Element(decl) => match &decl.type_ref {
                            TypeRef::Simple(st) => assert_eq!(st.display_name(), "dayType"),
                            other => panic!("unexpected type {:?}", other),
                        },
                        other => panic!("unexpected term {:?}", other),
                    }
                }
                other => panic!("unexpected term {:?}", other),
            },
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[test]
    fn test_restriction_of_named_type_keeps_base_facets() {
        let compiled = schema(
            r#"
            <xs:element name="code" type="shortCode"/>
            <xs:simpleType name="shortCode">
                <xs:restriction base="code">
                    <xs:maxLength value="3"/>
                </xs:restriction>
            </xs:simpleType>
            <xs:simpleType name="code">
                <xs:restriction base="xs:token">
                    <xs:pattern value="[A-Z]+"/>
                </xs:restriction>
            </xs:simpleType>
            "#,
        )
        .unwrap();

        match &compiled.root("code").unwrap().type_ref {
            TypeRef::Simple(st) => {
                assert_eq!(st.base, BuiltinType::Token);
                assert!(st.check("ABC").is_ok());
                assert!(st.check("ABCD").is_err());
                assert!(st.check("ab").is_err());
            }
            other => panic!("unexpected type {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let err = schema(r#"<xs:element name="a" type="missingType"/>"#).unwrap_err();
        assert!(err.to_string().contains("missingType"));
    }

    #[test]
    fn test_unsupported_construct_is_rejected() {
        let err = schema(r#"<xs:element name="a"/><xs:group name="g"/>"#).unwrap_err();
        assert!(err.to_string().contains("<group>"));
    }

    #[test]
    fn test_self_derivation_is_rejected() {
        let err = schema(
            r#"
            <xs:element name="a" type="loop"/>
            <xs:simpleType name="loop"><xs:restriction base="loop"/></xs:simpleType>
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("derives from itself"));
    }

    #[test]
    fn test_bad_pattern_is_rejected() {
        let err = schema(
            r#"
            <xs:element name="a">
                <xs:simpleType><xs:restriction base="xs:string"><xs:pattern value="(["/></xs:restriction></xs:simpleType>
            </xs:element>
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("pattern"));
    }

    #[test]
    fn test_occurs_bounds_checked() {
        let err = schema(
            r#"
            <xs:element name="a">
                <xs:complexType><xs:sequence><xs:element name="b" minOccurs="3" maxOccurs="2"/></xs:sequence></xs:complexType>
            </xs:element>
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_non_schema_root_is_rejected() {
        let err = Schema::parse_str("<timetable/>").unwrap_err();
        assert!(err.to_string().contains("expected <schema>"));
    }

    #[test]
    fn test_dangling_ref_is_rejected() {
        let err = schema(
            r#"
            <xs:element name="a">
                <xs:complexType><xs:sequence><xs:element ref="nowhere"/></xs:sequence></xs:complexType>
            </xs:element>
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("nowhere"));
    }

    #[test]
    fn test_load_missing_file_is_unreadable() {
        let tmp = TempDir::new().unwrap();
        let loader = SchemaLoader::new(&Config::default());

        let err = loader.load_from(&tmp.path().join("absent.xsd")).unwrap_err();
        assert!(matches!(err, SchemaError::Unreadable { .. }));
    }

    #[test]
    fn test_load_reports_path_on_unsupported_schema() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.xsd");
        fs::write(&path, "<xs:schema xmlns:xs=\"http://www.w3.org/2001/XMLSchema\"/>").unwrap();

        let loader = SchemaLoader::new(&Config::default().with_schema_path(&path));
        let err = loader.load().unwrap_err();
        assert!(matches!(err, SchemaError::Unsupported { .. }));
        assert_eq!(err.path(), path.display().to_string());
    }

    #[test]
    fn test_value_constraints_rejected() {
        for attribute in ["fixed=\"Monday\"", "default=\"Monday\"", "nillable=\"true\""] {
            let err = schema(&format!(
                r#"<xs:element name="t"><xs:complexType><xs:sequence>
                     <xs:element name="day" type="xs:string" {}/>
                   </xs:sequence></xs:complexType></xs:element>"#,
                attribute
            ))
            .unwrap_err();
            assert!(matches!(err, SchemaError::Unsupported { .. }), "{}", attribute);
        }
    }

    #[test]
    fn test_global_element_modifiers_rejected() {
        for attribute in ["abstract=\"true\"", "substitutionGroup=\"other\"", "fixed=\"x\""] {
            let err = schema(&format!(
                r#"<xs:element name="t" type="xs:string" {}/>"#,
                attribute
            ))
            .unwrap_err();
            assert!(err.to_string().contains("unsupported attribute"), "{}", attribute);
        }
    }

    #[test]
    fn test_attribute_value_constraints_rejected() {
        for attribute in ["fixed=\"a\"", "default=\"a\""] {
            let err = schema(&format!(
                r#"<xs:element name="t"><xs:complexType>
                     <xs:attribute name="k" type="xs:string" {}/>
                   </xs:complexType></xs:element>"#,
                attribute
            ))
            .unwrap_err();
            assert!(err.to_string().contains("unsupported attribute"), "{}", attribute);
        }
    }

    #[test]
    fn test_identity_constraints_rejected() {
        for constraint in ["unique", "key"] {
            let err = schema(&format!(
                r#"<xs:element name="t" type="tType">
                     <xs:{c} name="u"><xs:selector xpath="c"/><xs:field xpath="@k"/></xs:{c}>
                   </xs:element>
                   <xs:complexType name="tType"><xs:sequence>
                     <xs:element name="c" maxOccurs="unbounded">
                       <xs:complexType><xs:attribute name="k" type="xs:string"/></xs:complexType>
                     </xs:element>
                   </xs:sequence></xs:complexType>"#,
                c = constraint
            ))
            .unwrap_err();
            assert!(err.to_string().contains(constraint), "{}", constraint);
        }

        let err = schema(
            r#"<xs:element name="t">
                 <xs:complexType/>
                 <xs:keyref name="r" refer="u"><xs:selector xpath="c"/><xs:field xpath="@k"/></xs:keyref>
               </xs:element>"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("keyref"));
    }

    #[test]
    fn test_type_attribute_with_inline_type_rejected() {
        let err = schema(
            r#"<xs:element name="t" type="xs:string">
                 <xs:simpleType><xs:restriction base="xs:string"/></xs:simpleType>
               </xs:element>"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("both a type attribute and an inline type"));

        let err = schema(
            r#"<xs:element name="t"><xs:complexType>
                 <xs:attribute name="k" type="xs:string">
                   <xs:simpleType><xs:restriction base="xs:string"/></xs:simpleType>
                 </xs:attribute>
               </xs:complexType></xs:element>"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("both a type attribute and an inline type"));
    }

    #[test]
    fn test_id_and_annotation_accepted() {
        schema(
            r#"<xs:element name="t" id="root">
                 <xs:annotation><xs:documentation>week</xs:documentation></xs:annotation>
                 <xs:complexType mixed="false"><xs:sequence id="s">
                   <xs:element name="day" type="xs:string"/>
                 </xs:sequence></xs:complexType>
               </xs:element>"#,
        )
        .unwrap();
    }
}
