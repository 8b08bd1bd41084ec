//! Schema validation
//!
//! The timetable document must satisfy an XSD schema before any of its
//! data is trusted.
//!
//! # Design Principles
//!
//! - Fail closed: an unreadable or unusable schema never validates anything
//! - Unsupported XSD constructs are rejected, not ignored
//! - Validation is deterministic and reports every violation

mod errors;
mod loader;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaResult, Violation};
pub use loader::{compile, SchemaLoader};
pub use types::{
    AttributeDecl, BuiltinType, ComplexType, Compositor, ContentModel, ElementDecl, Facet,
    Occurs, Particle, Schema, SimpleType, Term, TypeRef,
};
pub use validator::{validate_with_schema_file, SchemaValidator, ValidationReport};
