//! Structural validation: required attributes and required children, depth-first.

use crate::error::CodecError;
use crate::node::{Child, Element};
use crate::schema::Cardinality;

/// Validate `node` using its schema's element name as the root path.
pub fn validate(node: &Element) -> Result<(), CodecError> {
    validate_with_path(node, node.schema().name.local)
}

/// Validate `node`, reporting the first violation found.
///
/// Checks run in schema order: required attributes first, then each child field (presence and
/// minimum occurrence count), descending into a child before moving on to the next field. Paths
/// extend as `path/field` for singular children and `path/field[i]` for repeated ones.
pub fn validate_with_path(node: &Element, path: &str) -> Result<(), CodecError> {
    let schema = node.schema();

    for (spec, value) in schema.attributes.iter().zip(node.attribute_values()) {
        if spec.required && value.is_none() {
            return Err(missing(spec.name, path));
        }
    }

    for (spec, slot) in schema.children.iter().zip(node.child_slots()) {
        match (spec.cardinality, slot) {
            (_, Child::Single(Some(child))) => {
                validate_with_path(child, &format!("{path}/{}", spec.name.local))?;
            }
            (Cardinality::Required, Child::Single(None)) => {
                return Err(missing(spec.name.local, path));
            }
            (_, Child::Single(None)) => {}
            (cardinality, Child::Repeated(items)) => {
                if let Cardinality::Repeated { min } = cardinality {
                    if items.len() < min {
                        return Err(missing(spec.name.local, path));
                    }
                }
                for (idx, child) in items.iter().enumerate() {
                    validate_with_path(child, &format!("{path}/{}[{idx}]", spec.name.local))?;
                }
            }
        }
    }

    Ok(())
}

fn missing(field: &'static str, path: &str) -> CodecError {
    CodecError::MissingRequiredField {
        field,
        path: path.to_string(),
    }
}

impl Element {
    /// Shorthand for [`validate`].
    pub fn validate(&self) -> Result<(), CodecError> {
        validate(self)
    }
}
