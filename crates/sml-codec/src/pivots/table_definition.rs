use crate::decode::{decode_document, DecodeOptions};
use crate::encode::{encode_document, EncodeOptions};
use crate::error::CodecError;
use crate::node::Element;
use crate::openxml::NS_MAIN;
use crate::pivots::schema::{LOCATION, PIVOT_TABLE_DEFINITION};
use crate::pivots::DEFAULT_PIVOT_TABLE_PART;
use crate::sink::{DecodeSink, LogSink};
use crate::validate::validate;

/// A decoded `xl/pivotTables/pivotTable*.xml` part.
///
/// Wraps the generic [`Element`] tree for `CT_pivotTableDefinition` and exposes the commonly
/// used layout settings with their XSD defaults applied. Everything else (pivot fields, items,
/// formats, extension payloads) stays reachable through [`PivotTableDefinition::as_element`] and
/// is written back unchanged by [`PivotTableDefinition::to_xml`].
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTableDefinition {
    /// OPC part path, e.g. `xl/pivotTables/pivotTable1.xml`.
    pub path: String,
    element: Element,
}

impl PivotTableDefinition {
    /// Parse a pivot table part, logging skipped content through the `log` facade.
    ///
    /// Unqualified element names are read as SpreadsheetML.
    pub fn parse(path: &str, xml: &[u8]) -> Result<Self, CodecError> {
        let options = DecodeOptions {
            default_namespace: Some(NS_MAIN),
        };
        Self::decode_with(path, xml, &options, &mut LogSink)
    }

    pub fn decode_with(
        path: &str,
        xml: &[u8],
        options: &DecodeOptions,
        sink: &mut dyn DecodeSink,
    ) -> Result<Self, CodecError> {
        let element = decode_document(&PIVOT_TABLE_DEFINITION, xml, options, sink)?;
        Ok(Self {
            path: path.to_string(),
            element,
        })
    }

    /// A minimal definition that passes validation: the three required attributes (with
    /// `dataCaption="Values"`) and a `location` whose header row is the first row of `location_ref`
    /// and whose data starts one row below it.
    pub fn new(name: &str, cache_id: u32, location_ref: &str) -> Result<Self, CodecError> {
        let mut location = Element::new(&LOCATION);
        location.set_attribute("ref", location_ref)?;
        location.set_attribute("firstHeaderRow", 1u32)?;
        location.set_attribute("firstDataRow", 2u32)?;
        location.set_attribute("firstDataCol", 1u32)?;

        let mut element = Element::new(&PIVOT_TABLE_DEFINITION);
        element.set_attribute("name", name)?;
        element.set_attribute("cacheId", cache_id)?;
        element.set_attribute("dataCaption", "Values")?;
        element.set_child("location", location)?;

        Ok(Self {
            path: DEFAULT_PIVOT_TABLE_PART.to_string(),
            element,
        })
    }

    pub fn to_xml(&self, options: &EncodeOptions) -> Result<Vec<u8>, CodecError> {
        encode_document(&self.element, options)
    }

    pub fn validate(&self) -> Result<(), CodecError> {
        validate(&self.element)
    }

    pub fn as_element(&self) -> &Element {
        &self.element
    }

    pub fn as_element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    pub fn into_element(self) -> Element {
        self.element
    }

    pub fn name(&self) -> Option<&str> {
        self.element.attribute("name").and_then(|v| v.as_str())
    }

    pub fn cache_id(&self) -> Option<u32> {
        self.element.attribute("cacheId").and_then(|v| v.as_u32())
    }

    pub fn data_caption(&self) -> Option<&str> {
        self.element.attribute("dataCaption").and_then(|v| v.as_str())
    }

    /// Output range on the destination worksheet (A1-style range).
    pub fn location_ref(&self) -> Option<&str> {
        self.location_attr("ref").and_then(|v| v.as_str())
    }

    pub fn first_header_row(&self) -> Option<u32> {
        self.location_attr("firstHeaderRow").and_then(|v| v.as_u32())
    }

    pub fn first_data_row(&self) -> Option<u32> {
        self.location_attr("firstDataRow").and_then(|v| v.as_u32())
    }

    pub fn first_data_col(&self) -> Option<u32> {
        self.location_attr("firstDataCol").and_then(|v| v.as_u32())
    }

    /// `pivotTableDefinition@dataOnRows` (defaults to `false`).
    pub fn data_on_rows(&self) -> bool {
        self.flag("dataOnRows")
    }

    /// `pivotTableDefinition@rowGrandTotals` (defaults to `true`).
    pub fn row_grand_totals(&self) -> bool {
        self.flag("rowGrandTotals")
    }

    /// `pivotTableDefinition@colGrandTotals` (defaults to `true`).
    pub fn col_grand_totals(&self) -> bool {
        self.flag("colGrandTotals")
    }

    pub fn outline(&self) -> bool {
        self.flag("outline")
    }

    pub fn compact(&self) -> bool {
        self.flag("compact")
    }

    pub fn compact_data(&self) -> bool {
        self.flag("compactData")
    }

    /// `pivotField@name` for each pivot field, in cache field order.
    pub fn field_names(&self) -> Vec<Option<&str>> {
        self.element
            .child("pivotFields")
            .map(|fields| {
                fields
                    .children("pivotField")
                    .iter()
                    .map(|field| field.attribute("name").and_then(|v| v.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of data (values) fields.
    pub fn data_field_count(&self) -> usize {
        self.element
            .child("dataFields")
            .map_or(0, |fields| fields.children("dataField").len())
    }

    fn location_attr(&self, name: &str) -> Option<&crate::scalar::Scalar> {
        self.element.child("location")?.attribute(name)
    }

    fn flag(&self, name: &str) -> bool {
        self.element
            .attribute_or_default(name)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}
