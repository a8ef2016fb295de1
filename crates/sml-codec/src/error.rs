use thiserror::Error;

use crate::scalar::{Scalar, ScalarType};

/// Coarse classification of a [`CodecError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A present attribute could not be parsed as its declared scalar type.
    MalformedAttribute,
    /// The underlying token stream (or output writer) failed.
    Stream,
    /// Validation found a schema-required attribute or child missing.
    MissingRequiredField,
    /// The node API was used in a way the schema does not allow.
    Usage,
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed attribute {element}@{attribute}: {value:?} is not a valid {expected}")]
    MalformedAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
        expected: ScalarType,
    },
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("xml attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("utf-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("unexpected end of document inside <{element}>")]
    UnexpectedEof { element: &'static str },
    #[error("{path}/{field} is a mandatory field")]
    MissingRequiredField { field: &'static str, path: String },
    #[error("expected document root <{expected}>, found <{found}>")]
    UnexpectedRoot { expected: &'static str, found: String },
    #[error("<{element}> has no field named {field:?}")]
    UnknownField { element: &'static str, field: String },
    #[error("{element}@{attribute} expects {expected}, got {value:?}")]
    TypeMismatch {
        element: &'static str,
        attribute: &'static str,
        expected: ScalarType,
        value: Scalar,
    },
    #[error("<{element}>/{field} holds {expected} elements, not {found}")]
    SchemaMismatch {
        element: &'static str,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("<{element}>/{field} is a {actual} field")]
    WrongCardinality {
        element: &'static str,
        field: &'static str,
        actual: &'static str,
    },
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedAttribute { .. } => ErrorKind::MalformedAttribute,
            Self::Xml(_)
            | Self::Attr(_)
            | Self::Io(_)
            | Self::Utf8(_)
            | Self::UnexpectedEof { .. } => ErrorKind::Stream,
            Self::MissingRequiredField { .. } => ErrorKind::MissingRequiredField,
            Self::UnexpectedRoot { .. }
            | Self::UnknownField { .. }
            | Self::TypeMismatch { .. }
            | Self::SchemaMismatch { .. }
            | Self::WrongCardinality { .. } => ErrorKind::Usage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_failures_classify_as_stream_errors() {
        let err = CodecError::from(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "truncated part",
        ));
        assert_eq!(err.kind(), ErrorKind::Stream);
    }

    #[test]
    fn missing_field_message_names_path_and_field() {
        let err = CodecError::MissingRequiredField {
            field: "cacheId",
            path: "pivotTableDefinition".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::MissingRequiredField);
        assert_eq!(
            err.to_string(),
            "pivotTableDefinition/cacheId is a mandatory field"
        );
    }
}
