use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::CodecError;
use crate::scalar::Scalar;
use crate::schema::{Cardinality, ElementSchema};

/// Storage for one schema child slot.
#[derive(Clone, PartialEq)]
pub enum Child {
    Single(Option<Box<Element>>),
    Repeated(Vec<Element>),
}

/// One instance of an [`ElementSchema`].
///
/// Attributes and children are stored positionally, parallel to the schema tables, and every
/// attribute is an explicit `Option`: an absent attribute stays `None` even when the schema
/// declares an XSD default (use [`Element::attribute_or_default`] to apply it).
#[derive(Clone)]
pub struct Element {
    schema: &'static ElementSchema,
    attributes: Vec<Option<Scalar>>,
    children: Vec<Child>,
    raw_content: Option<String>,
    namespace_declarations: Vec<(String, String)>,
}

impl Element {
    /// A node with no attributes, no children and no raw content.
    pub fn new(schema: &'static ElementSchema) -> Self {
        Self {
            schema,
            attributes: vec![None; schema.attributes.len()],
            children: schema
                .children
                .iter()
                .map(|spec| match spec.cardinality {
                    Cardinality::Repeated { .. } => Child::Repeated(Vec::new()),
                    Cardinality::Optional | Cardinality::Required => Child::Single(None),
                })
                .collect(),
            raw_content: None,
            namespace_declarations: Vec::new(),
        }
    }

    pub fn schema(&self) -> &'static ElementSchema {
        self.schema
    }

    pub fn attribute(&self, name: &str) -> Option<&Scalar> {
        let idx = self.schema.attribute_index(name.as_bytes())?;
        self.attributes[idx].as_ref()
    }

    /// The attribute value, falling back to the schema's XSD default when absent.
    pub fn attribute_or_default(&self, name: &str) -> Option<Scalar> {
        let idx = self.schema.attribute_index(name.as_bytes())?;
        match &self.attributes[idx] {
            Some(value) => Some(value.clone()),
            None => self.schema.attributes[idx].default_value(),
        }
    }

    /// Set an attribute, returning the previous value.
    ///
    /// The value is checked (and integer widths coerced) against the declared scalar type.
    pub fn set_attribute(
        &mut self,
        name: &str,
        value: impl Into<Scalar>,
    ) -> Result<Option<Scalar>, CodecError> {
        let idx = self.attribute_slot(name)?;
        let schema = self.schema;
        let spec = &schema.attributes[idx];
        let value = value.into();
        let coerced = spec
            .ty
            .coerce(value.clone())
            .ok_or(CodecError::TypeMismatch {
                element: schema.name.local,
                attribute: spec.name,
                expected: spec.ty,
                value,
            })?;
        Ok(self.attributes[idx].replace(coerced))
    }

    pub fn remove_attribute(&mut self, name: &str) -> Result<Option<Scalar>, CodecError> {
        let idx = self.attribute_slot(name)?;
        Ok(self.attributes[idx].take())
    }

    /// Present attributes in schema order.
    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &Scalar)> + '_ {
        self.schema
            .attributes
            .iter()
            .zip(&self.attributes)
            .filter_map(|(spec, value)| value.as_ref().map(|value| (spec.name, value)))
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        match self.children.get(self.schema.child_index_by_local(name)?)? {
            Child::Single(child) => child.as_deref(),
            Child::Repeated(_) => None,
        }
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        let idx = self.schema.child_index_by_local(name)?;
        match &mut self.children[idx] {
            Child::Single(child) => child.as_deref_mut(),
            Child::Repeated(_) => None,
        }
    }

    /// Elements of a repeated child field (empty for unknown or singular fields).
    pub fn children(&self, name: &str) -> &[Element] {
        let slot = self
            .schema
            .child_index_by_local(name)
            .and_then(|idx| self.children.get(idx));
        match slot {
            Some(Child::Repeated(items)) => items,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self, name: &str) -> Option<&mut Vec<Element>> {
        let idx = self.schema.child_index_by_local(name)?;
        match &mut self.children[idx] {
            Child::Repeated(items) => Some(items),
            Child::Single(_) => None,
        }
    }

    /// Assign a singular child, returning the element it replaced.
    pub fn set_child(&mut self, name: &str, child: Element) -> Result<Option<Element>, CodecError> {
        let idx = self.child_slot(name, &child)?;
        if let Child::Single(slot) = &mut self.children[idx] {
            return Ok(slot.replace(Box::new(child)).map(|old| *old));
        }
        Err(self.wrong_cardinality(idx))
    }

    /// Append to a repeated child field.
    pub fn push_child(&mut self, name: &str, child: Element) -> Result<(), CodecError> {
        let idx = self.child_slot(name, &child)?;
        if let Child::Repeated(items) = &mut self.children[idx] {
            items.push(child);
            return Ok(());
        }
        Err(self.wrong_cardinality(idx))
    }

    pub fn take_child(&mut self, name: &str) -> Option<Element> {
        let idx = self.schema.child_index_by_local(name)?;
        match &mut self.children[idx] {
            Child::Single(slot) => slot.take().map(|child| *child),
            Child::Repeated(_) => None,
        }
    }

    /// Child slots, parallel to [`ElementSchema::children`].
    pub fn child_slots(&self) -> &[Child] {
        &self.children
    }

    pub(crate) fn child_slot_mut(&mut self, idx: usize) -> &mut Child {
        &mut self.children[idx]
    }

    pub(crate) fn attribute_value_mut(&mut self, idx: usize) -> &mut Option<Scalar> {
        &mut self.attributes[idx]
    }

    pub(crate) fn attribute_values(&self) -> &[Option<Scalar>] {
        &self.attributes
    }

    /// Verbatim inner XML of a raw-content element (`<ext>` payloads).
    pub fn raw_content(&self) -> Option<&str> {
        self.raw_content.as_deref()
    }

    pub fn set_raw_content(&mut self, xml: impl Into<String>) {
        self.raw_content = Some(xml.into());
    }

    pub fn clear_raw_content(&mut self) {
        self.raw_content = None;
    }

    /// `xmlns` declarations carried on this element beyond the ones the encoder writes itself.
    pub fn namespace_declarations(&self) -> &[(String, String)] {
        &self.namespace_declarations
    }

    /// Declare `prefix` (`""` for the default namespace) on this element.
    ///
    /// Declarations are kept sorted by prefix; document order of `xmlns` attributes carries no
    /// meaning.
    pub fn declare_namespace(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        let prefix = prefix.into();
        let uri = uri.into();
        match self
            .namespace_declarations
            .binary_search_by(|(existing, _)| existing.as_str().cmp(prefix.as_str()))
        {
            Ok(idx) => self.namespace_declarations[idx].1 = uri,
            Err(idx) => self.namespace_declarations.insert(idx, (prefix, uri)),
        }
    }

    pub(crate) fn declares_prefix(&self, prefix: &str) -> bool {
        self.namespace_declarations
            .binary_search_by(|(existing, _)| existing.as_str().cmp(prefix))
            .is_ok()
    }

    fn attribute_slot(&self, name: &str) -> Result<usize, CodecError> {
        self.schema
            .attribute_index(name.as_bytes())
            .ok_or_else(|| CodecError::UnknownField {
                element: self.schema.name.local,
                field: name.to_string(),
            })
    }

    fn child_slot(&self, name: &str, child: &Element) -> Result<usize, CodecError> {
        let idx = self
            .schema
            .child_index_by_local(name)
            .ok_or_else(|| CodecError::UnknownField {
                element: self.schema.name.local,
                field: name.to_string(),
            })?;
        let spec = &self.schema.children[idx];
        if !std::ptr::eq(spec.schema, child.schema) {
            return Err(CodecError::SchemaMismatch {
                element: self.schema.name.local,
                field: spec.name.local,
                expected: spec.schema.type_name,
                found: child.schema.type_name,
            });
        }
        Ok(idx)
    }

    fn wrong_cardinality(&self, idx: usize) -> CodecError {
        let spec = &self.schema.children[idx];
        CodecError::WrongCardinality {
            element: self.schema.name.local,
            field: spec.name.local,
            actual: spec.cardinality.label(),
        }
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema)
            && self.attributes == other.attributes
            && self.children == other.children
            && self.raw_content == other.raw_content
            && self.namespace_declarations == other.namespace_declarations
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.schema.type_name);
        for (name, value) in self.attributes() {
            out.field(name, value);
        }
        for (spec, slot) in self.schema.children.iter().zip(&self.children) {
            match slot {
                Child::Single(Some(child)) => {
                    out.field(spec.name.local, child);
                }
                Child::Repeated(items) if !items.is_empty() => {
                    out.field(spec.name.local, items);
                }
                _ => {}
            }
        }
        if let Some(raw) = &self.raw_content {
            out.field("raw_content", raw);
        }
        if !self.namespace_declarations.is_empty() {
            out.field("xmlns", &self.namespace_declarations);
        }
        out.finish()
    }
}

impl fmt::Debug for Child {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Child::Single(child) => child.fmt(f),
            Child::Repeated(items) => items.fmt(f),
        }
    }
}

/// JSON-friendly view: `{"element": ..., "attributes": {...}, "children": {...}}` with only
/// present entries.
impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("element", self.schema.name.local)?;

        let attributes: Vec<(&str, &Scalar)> = self.attributes().collect();
        if !attributes.is_empty() {
            map.serialize_entry("attributes", &OrderedMap(&attributes))?;
        }

        let children: Vec<(&str, &Child)> = self
            .schema
            .children
            .iter()
            .zip(&self.children)
            .filter(|(_, slot)| match slot {
                Child::Single(child) => child.is_some(),
                Child::Repeated(items) => !items.is_empty(),
            })
            .map(|(spec, slot)| (spec.name.local, slot))
            .collect();
        if !children.is_empty() {
            map.serialize_entry("children", &OrderedMap(&children))?;
        }

        if let Some(raw) = &self.raw_content {
            map.serialize_entry("raw", raw)?;
        }
        map.end()
    }
}

impl Serialize for Child {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Child::Single(child) => child.serialize(serializer),
            Child::Repeated(items) => items.serialize(serializer),
        }
    }
}

struct OrderedMap<'a, V>(&'a [(&'a str, V)]);

impl<V: Serialize> Serialize for OrderedMap<'_, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::error::ErrorKind;
    use crate::pivots::schema::{DATA_FIELD, LOCATION, PIVOT_TABLE_DEFINITION};

    #[test]
    fn new_node_has_every_field_absent() {
        let node = Element::new(&PIVOT_TABLE_DEFINITION);
        assert_eq!(node.attributes().count(), 0);
        assert!(node.child("location").is_none());
        assert!(node.children("pivotFields").is_empty());
        assert_eq!(node.raw_content(), None);
    }

    #[test]
    fn absent_attribute_is_distinct_from_its_default() {
        let mut node = Element::new(&PIVOT_TABLE_DEFINITION);
        assert_eq!(node.attribute("rowGrandTotals"), None);
        assert_eq!(
            node.attribute_or_default("rowGrandTotals"),
            Some(Scalar::Bool(true))
        );

        node.set_attribute("rowGrandTotals", true).unwrap();
        assert_eq!(node.attribute("rowGrandTotals"), Some(&Scalar::Bool(true)));
    }

    #[test]
    fn set_attribute_checks_declared_type() {
        let mut node = Element::new(&PIVOT_TABLE_DEFINITION);
        assert_eq!(node.set_attribute("cacheId", 3).unwrap(), None);
        assert_eq!(node.attribute("cacheId"), Some(&Scalar::U32(3)));

        let err = node.set_attribute("cacheId", "three").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        let err = node.set_attribute("createdVersion", 300).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { attribute: "createdVersion", .. }));
        let err = node.set_attribute("noSuchAttribute", 1).unwrap_err();
        assert!(matches!(err, CodecError::UnknownField { .. }));
    }

    #[test]
    fn child_assignment_checks_schema_and_cardinality() {
        let mut node = Element::new(&PIVOT_TABLE_DEFINITION);
        let location = Element::new(&LOCATION);
        assert!(node.set_child("location", location.clone()).unwrap().is_none());
        assert_eq!(node.set_child("location", location).unwrap(), Some(Element::new(&LOCATION)));

        let err = node
            .set_child("location", Element::new(&DATA_FIELD))
            .unwrap_err();
        assert!(matches!(err, CodecError::SchemaMismatch { field: "location", .. }));

        let err = node
            .push_child("location", Element::new(&LOCATION))
            .unwrap_err();
        assert!(matches!(err, CodecError::WrongCardinality { actual: "singular", .. }));
    }

    #[test]
    fn declare_namespace_replaces_existing_prefix() {
        let mut node = Element::new(&LOCATION);
        node.declare_namespace("x14", "urn:a");
        node.declare_namespace("x14", "urn:b");
        assert_eq!(
            node.namespace_declarations(),
            &[("x14".to_string(), "urn:b".to_string())]
        );
    }

    #[test]
    fn namespace_declarations_are_ordered_by_prefix() {
        let mut first = Element::new(&LOCATION);
        first.declare_namespace("r", "urn:r");
        first.declare_namespace("a", "urn:a");
        first.declare_namespace("", "urn:default");

        let mut second = Element::new(&LOCATION);
        second.declare_namespace("a", "urn:a");
        second.declare_namespace("", "urn:default");
        second.declare_namespace("r", "urn:r");

        assert_eq!(first, second);
        let prefixes: Vec<&str> = first
            .namespace_declarations()
            .iter()
            .map(|(prefix, _)| prefix.as_str())
            .collect();
        assert_eq!(prefixes, vec!["", "a", "r"]);
        assert!(first.declares_prefix("a"));
        assert!(!first.declares_prefix("x"));
    }

    #[test]
    fn serializes_present_fields_only() {
        let mut node = Element::new(&LOCATION);
        node.set_attribute("ref", "A3:C10").unwrap();
        node.set_attribute("firstHeaderRow", 1).unwrap();

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "element": "location",
                "attributes": { "ref": "A3:C10", "firstHeaderRow": 1 }
            })
        );
    }
}
