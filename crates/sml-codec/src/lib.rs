//! Schema-driven SpreadsheetML element codec.
//!
//! Every supported complex type is described once, as static data ([`ElementSchema`]): its
//! attributes with their scalar types and XSD defaults, its child elements in schema sequence
//! order with their cardinality, and the namespaces its document root declares. One generic
//! implementation then covers all types:
//!
//! - [`decode_document`] turns an XML token stream into an [`Element`] tree, tolerating unknown
//!   elements (reported through a [`DecodeSink`]) and rejecting malformed attribute values.
//! - [`encode_document`] writes an [`Element`] back out in canonical schema order.
//! - [`validate`] reports the first missing required attribute or child, with its path.
//!
//! The shipped schema family is the pivot table definition part
//! (`xl/pivotTables/pivotTableN.xml`, see [`pivots`]), with a typed
//! [`PivotTableDefinition`] facade on top of the generic tree.

pub mod cli;
mod compare;
pub mod decode;
pub mod encode;
pub mod error;
pub mod node;
pub mod openxml;
pub mod pivots;
pub mod scalar;
pub mod schema;
pub mod sink;
pub mod validate;

pub use compare::*;
pub use decode::{decode_document, DecodeOptions};
pub use encode::{encode_document, encode_to_string, EncodeOptions};
pub use error::{CodecError, ErrorKind};
pub use node::{Child, Element};
pub use pivots::PivotTableDefinition;
pub use scalar::{Scalar, ScalarType};
pub use schema::{AttributeSpec, Cardinality, ChildSpec, Content, ElementSchema, QualifiedName};
pub use sink::{DecodeNotice, DecodeSink, LogSink, NullSink};
pub use validate::{validate, validate_with_path};
