//! Declarative element schemas.
//!
//! Every SpreadsheetML complex type is described by one [`ElementSchema`] table: which
//! attributes it carries (and how to parse them), which child elements it accepts (and in which
//! order they must be written), and whether its content is typed children or an opaque
//! `xsd:any` payload. The decoder, encoder and validator are driven entirely by these tables, so
//! adding a type means adding data, not code.

use crate::scalar::{Scalar, ScalarType};

/// A namespace-qualified element name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifiedName {
    pub namespace: &'static str,
    pub local: &'static str,
}

impl QualifiedName {
    pub const fn new(namespace: &'static str, local: &'static str) -> Self {
        Self { namespace, local }
    }

    pub(crate) fn matches(&self, namespace: Option<&[u8]>, local: &[u8]) -> bool {
        self.local.as_bytes() == local && namespace == Some(self.namespace.as_bytes())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AttributeSpec {
    pub name: &'static str,
    pub ty: ScalarType,
    pub required: bool,
    /// Lexical XSD default applied by readers when the attribute is absent.
    pub default: Option<&'static str>,
}

impl AttributeSpec {
    pub const fn optional(name: &'static str, ty: ScalarType) -> Self {
        Self {
            name,
            ty,
            required: false,
            default: None,
        }
    }

    pub const fn required(name: &'static str, ty: ScalarType) -> Self {
        Self {
            name,
            ty,
            required: true,
            default: None,
        }
    }

    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    /// The parsed XSD default, if the schema declares one.
    pub fn default_value(&self) -> Option<Scalar> {
        self.default.and_then(|text| self.ty.parse(text))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// `minOccurs="0" maxOccurs="1"`.
    Optional,
    /// `minOccurs="1" maxOccurs="1"`.
    Required,
    /// `maxOccurs="unbounded"` with the given `minOccurs`.
    Repeated { min: usize },
}

impl Cardinality {
    pub fn is_repeated(self) -> bool {
        matches!(self, Cardinality::Repeated { .. })
    }

    pub(crate) fn label(self) -> &'static str {
        if self.is_repeated() {
            "repeated"
        } else {
            "singular"
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChildSpec {
    pub name: QualifiedName,
    pub schema: &'static ElementSchema,
    pub cardinality: Cardinality,
}

impl ChildSpec {
    pub const fn optional(name: QualifiedName, schema: &'static ElementSchema) -> Self {
        Self {
            name,
            schema,
            cardinality: Cardinality::Optional,
        }
    }

    pub const fn required(name: QualifiedName, schema: &'static ElementSchema) -> Self {
        Self {
            name,
            schema,
            cardinality: Cardinality::Required,
        }
    }

    pub const fn repeated(
        name: QualifiedName,
        schema: &'static ElementSchema,
        min: usize,
    ) -> Self {
        Self {
            name,
            schema,
            cardinality: Cardinality::Repeated { min },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    /// Child elements from [`ElementSchema::children`]; character data is ignored.
    Elements,
    /// Inner XML is kept verbatim (`xsd:any` extension payloads such as `<ext>`).
    Raw,
}

#[derive(Debug)]
pub struct ElementSchema {
    /// Complex type name, e.g. `CT_Location`.
    pub type_name: &'static str,
    /// Element name used when this type is the document root.
    pub name: QualifiedName,
    pub attributes: &'static [AttributeSpec],
    /// Children in the order the schema requires them to be written.
    pub children: &'static [ChildSpec],
    pub content: Content,
    /// `(prefix, uri)` declarations written on the document root; `""` is the default namespace.
    pub namespaces: &'static [(&'static str, &'static str)],
}

impl ElementSchema {
    pub fn attribute_index(&self, name: &[u8]) -> Option<usize> {
        self.attributes
            .iter()
            .position(|spec| spec.name.as_bytes() == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeSpec> {
        self.attribute_index(name.as_bytes())
            .map(|idx| &self.attributes[idx])
    }

    /// Look up a child slot by its qualified element name.
    pub fn child_index(&self, namespace: Option<&[u8]>, local: &[u8]) -> Option<usize> {
        self.children
            .iter()
            .position(|spec| spec.name.matches(namespace, local))
    }

    /// Look up a child slot by local name only (for the node accessor API).
    pub fn child_index_by_local(&self, local: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|spec| spec.name.local == local)
    }

    pub fn is_raw(&self) -> bool {
        self.content == Content::Raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "urn:test";

    static LEAF: ElementSchema = ElementSchema {
        type_name: "CT_Leaf",
        name: QualifiedName::new(NS, "leaf"),
        attributes: &[
            AttributeSpec::required("v", ScalarType::U32),
            AttributeSpec::optional("on", ScalarType::Bool).with_default("1"),
        ],
        children: &[],
        content: Content::Elements,
        namespaces: &[],
    };

    static ROOT: ElementSchema = ElementSchema {
        type_name: "CT_Root",
        name: QualifiedName::new(NS, "root"),
        attributes: &[],
        children: &[
            ChildSpec::optional(QualifiedName::new(NS, "first"), &LEAF),
            ChildSpec::repeated(QualifiedName::new(NS, "leaf"), &LEAF, 0),
        ],
        content: Content::Elements,
        namespaces: &[("", NS)],
    };

    #[test]
    fn child_lookup_requires_matching_namespace() {
        assert_eq!(ROOT.child_index(Some(NS.as_bytes()), b"leaf"), Some(1));
        assert_eq!(ROOT.child_index(Some(b"urn:other"), b"leaf"), None);
        assert_eq!(ROOT.child_index(None, b"leaf"), None);
        assert_eq!(ROOT.child_index_by_local("first"), Some(0));
    }

    #[test]
    fn defaults_parse_with_the_declared_type() {
        let spec = LEAF.attribute("on").expect("attribute exists");
        assert_eq!(spec.default_value(), Some(Scalar::Bool(true)));
        assert_eq!(LEAF.attribute("v").and_then(|s| s.default_value()), None);
        assert!(LEAF.attribute("missing").is_none());
    }
}
