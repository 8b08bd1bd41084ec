//! Compiled schema model
//!
//! Supported subset of XSD 1.0:
//! - global elements, named complex and simple types
//! - sequence / choice / all content models with occurrence bounds
//! - simpleContent extensions carrying attributes
//! - simple type restrictions with enumeration, pattern and length facets
//!
//! Names compare by local name; namespaces are not modelled.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

/// Occurrence bounds of a particle. `max == None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurs {
    pub min: u32,
    pub max: Option<u32>,
}

impl Occurs {
    /// Exactly once, the XSD default
    pub const ONCE: Occurs = Occurs {
        min: 1,
        max: Some(1),
    };

    /// Whether another occurrence is allowed after `count`
    pub fn allows_more(&self, count: u32) -> bool {
        self.max.map_or(true, |max| count < max)
    }
}

/// Built-in simple types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinType {
    AnySimpleType,
    String,
    NormalizedString,
    Token,
    Name,
    NcName,
    Id,
    IdRef,
    Time,
    Date,
    Integer,
    Int,
    PositiveInteger,
    NonNegativeInteger,
    Decimal,
    Boolean,
}

impl BuiltinType {
    /// Looks up a built-in type by local name
    pub fn from_name(name: &str) -> Option<Self> {
        let builtin = match name {
            "anySimpleType" => BuiltinType::AnySimpleType,
            "string" => BuiltinType::String,
            "normalizedString" => BuiltinType::NormalizedString,
            "token" => BuiltinType::Token,
            "Name" => BuiltinType::Name,
            "NCName" => BuiltinType::NcName,
            "ID" => BuiltinType::Id,
            "IDREF" => BuiltinType::IdRef,
            "time" => BuiltinType::Time,
            "date" => BuiltinType::Date,
            "integer" => BuiltinType::Integer,
            "int" => BuiltinType::Int,
            "positiveInteger" => BuiltinType::PositiveInteger,
            "nonNegativeInteger" => BuiltinType::NonNegativeInteger,
            "decimal" => BuiltinType::Decimal,
            "boolean" => BuiltinType::Boolean,
            _ => return None,
        };
        Some(builtin)
    }

    /// XSD name of the type
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinType::AnySimpleType => "anySimpleType",
            BuiltinType::String => "string",
            BuiltinType::NormalizedString => "normalizedString",
            BuiltinType::Token => "token",
            BuiltinType::Name => "Name",
            BuiltinType::NcName => "NCName",
            BuiltinType::Id => "ID",
            BuiltinType::IdRef => "IDREF",
            BuiltinType::Time => "time",
            BuiltinType::Date => "date",
            BuiltinType::Integer => "integer",
            BuiltinType::Int => "int",
            BuiltinType::PositiveInteger => "positiveInteger",
            BuiltinType::NonNegativeInteger => "nonNegativeInteger",
            BuiltinType::Decimal => "decimal",
            BuiltinType::Boolean => "boolean",
        }
    }

    /// `string` and `anySimpleType` keep whitespace; every other type collapses it
    fn preserves_whitespace(&self) -> bool {
        matches!(self, BuiltinType::String | BuiltinType::AnySimpleType)
    }

    /// Checks a lexical value against the type
    pub fn check(&self, value: &str) -> bool {
        match self {
            BuiltinType::AnySimpleType | BuiltinType::String => true,
            BuiltinType::NormalizedString => !value.contains(['\t', '\n', '\r']),
            BuiltinType::Token => {
                !value.contains(['\t', '\n', '\r'])
                    && !value.starts_with(' ')
                    && !value.ends_with(' ')
                    && !value.contains("  ")
            }
            BuiltinType::Name => is_name(value, true),
            BuiltinType::NcName | BuiltinType::Id | BuiltinType::IdRef => is_name(value, false),
            BuiltinType::Time => is_time(value),
            BuiltinType::Date => is_date(value),
            BuiltinType::Integer => is_integer(value),
            BuiltinType::Int => value.parse::<i32>().is_ok() && is_integer(value),
            BuiltinType::PositiveInteger => {
                is_integer(value) && !value.starts_with('-') && value.bytes().any(|b| (b'1'..=b'9').contains(&b))
            }
            BuiltinType::NonNegativeInteger => {
                is_integer(value)
                    && (!value.starts_with('-') || value[1..].bytes().all(|b| b == b'0'))
            }
            BuiltinType::Decimal => is_decimal(value),
            BuiltinType::Boolean => matches!(value, "true" | "false" | "1" | "0"),
        }
    }
}

fn is_name(value: &str, allow_colon: bool) -> bool {
    let mut chars = value.chars();
    let first_ok = match chars.next() {
        Some(c) => c.is_alphabetic() || c == '_' || (allow_colon && c == ':'),
        None => false,
    };
    first_ok
        && chars.all(|c| {
            c.is_alphanumeric() || matches!(c, '.' | '-' | '_') || (allow_colon && c == ':')
        })
}

fn strip_timezone(value: &str) -> &str {
    if let Some(rest) = value.strip_suffix('Z') {
        return rest;
    }
    if value.len() > 6 {
        let split = value.len() - 6;
        let tail = &value.as_bytes()[split..];
        if (tail[0] == b'+' || tail[0] == b'-') && tail[3] == b':' {
            return &value[..split];
        }
    }
    value
}

fn is_time(value: &str) -> bool {
    let local = strip_timezone(value);
    let bytes = local.as_bytes();
    if bytes.len() < 8 || bytes[2] != b':' || bytes[5] != b':' {
        return false;
    }
    if local == "24:00:00" {
        return true;
    }
    NaiveTime::parse_from_str(local, "%H:%M:%S").is_ok()
        || NaiveTime::parse_from_str(local, "%H:%M:%S%.f").is_ok()
}

fn is_date(value: &str) -> bool {
    let local = strip_timezone(value);
    let bytes = local.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && NaiveDate::parse_from_str(local, "%Y-%m-%d").is_ok()
}

fn is_integer(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_decimal(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    (!whole.is_empty() || !fraction.is_empty())
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

/// A restriction facet
#[derive(Debug, Clone)]
pub enum Facet {
    /// Value must be one of the listed literals
    Enumeration(Vec<String>),
    /// Value must fully match at least one pattern
    Pattern(Vec<Regex>),
    Length(usize),
    MinLength(usize),
    MaxLength(usize),
}

impl Facet {
    fn check(&self, value: &str) -> Result<(), String> {
        let length = value.chars().count();
        match self {
            Facet::Enumeration(values) => {
                if values.iter().any(|v| v == value) {
                    Ok(())
                } else {
                    Err(format!("one of [{}]", values.join(", ")))
                }
            }
            Facet::Pattern(patterns) => {
                if patterns.iter().any(|p| p.is_match(value)) {
                    Ok(())
                } else {
                    let shown: Vec<&str> = patterns.iter().map(|p| p.as_str()).collect();
                    Err(format!("a value matching {}", shown.join(" or ")))
                }
            }
            Facet::Length(n) if length != *n => Err(format!("exactly {} characters", n)),
            Facet::MinLength(n) if length < *n => Err(format!("at least {} characters", n)),
            Facet::MaxLength(n) if length > *n => Err(format!("at most {} characters", n)),
            _ => Ok(()),
        }
    }
}

/// A simple type: a built-in base narrowed by facets.
///
/// Restrictions of named simple types are flattened at compile time, so
/// `facets` holds the facets of every derivation step; all must hold.
#[derive(Debug, Clone)]
pub struct SimpleType {
    pub name: Option<String>,
    pub base: BuiltinType,
    pub facets: Vec<Facet>,
}

impl SimpleType {
    /// An unrestricted built-in type
    pub fn builtin(base: BuiltinType) -> Self {
        Self {
            name: None,
            base,
            facets: Vec::new(),
        }
    }

    /// Name used in violation messages
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.base.name())
    }

    /// Checks a value, returning the expectation it failed
    pub fn check(&self, raw: &str) -> Result<(), String> {
        let value = if self.base.preserves_whitespace() {
            raw
        } else {
            raw.trim()
        };

        if !self.base.check(value) {
            return Err(format!("a valid {}", self.base.name()));
        }

        for facet in &self.facets {
            facet.check(value)?;
        }

        Ok(())
    }
}

/// Type of an element declaration
#[derive(Debug, Clone)]
pub enum TypeRef {
    /// Anything goes (`xs:anyType` or no type given)
    Any,
    Simple(SimpleType),
    Complex(Box<ComplexType>),
    /// Named complex type, resolved against the schema at validation time
    Named(String),
}

/// An element declaration
#[derive(Debug, Clone)]
pub struct ElementDecl {
    pub name: String,
    pub type_ref: TypeRef,
}

/// Content model compositors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compositor {
    Sequence,
    Choice,
    All,
}

impl Compositor {
    pub fn name(&self) -> &'static str {
        match self {
            Compositor::Sequence => "sequence",
            Compositor::Choice => "choice",
            Compositor::All => "all",
        }
    }
}

/// The thing a particle matches
#[derive(Debug, Clone)]
pub enum Term {
    Element(ElementDecl),
    /// Reference to a global element by name
    ElementRef(String),
    Group {
        compositor: Compositor,
        particles: Vec<Particle>,
    },
}

/// A term with occurrence bounds
#[derive(Debug, Clone)]
pub struct Particle {
    pub term: Term,
    pub occurs: Occurs,
}

/// Content allowed inside a complex-typed element
#[derive(Debug, Clone)]
pub enum ContentModel {
    /// No text, no child elements
    Empty,
    /// Child elements only, following the particle
    Elements(Particle),
    /// Text only, of the given simple type
    Simple(SimpleType),
}

/// An attribute declaration
#[derive(Debug, Clone)]
pub struct AttributeDecl {
    pub name: String,
    pub simple_type: SimpleType,
    pub required: bool,
}

/// A complex type
#[derive(Debug, Clone)]
pub struct ComplexType {
    pub name: Option<String>,
    pub content: ContentModel,
    pub attributes: Vec<AttributeDecl>,
}

/// A compiled schema
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub(crate) roots: BTreeMap<String, ElementDecl>,
    pub(crate) complex_types: BTreeMap<String, ComplexType>,
}

impl Schema {
    /// Global element declaration by name
    pub fn root(&self, name: &str) -> Option<&ElementDecl> {
        self.roots.get(name)
    }

    /// Names of the global elements, sorted
    pub fn root_names(&self) -> impl Iterator<Item = &str> {
        self.roots.keys().map(String::as_str)
    }

    /// Named complex type
    pub fn complex_type(&self, name: &str) -> Option<&ComplexType> {
        self.complex_types.get(name)
    }
}
