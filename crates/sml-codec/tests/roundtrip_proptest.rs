use proptest::prelude::*;

use sml_codec::pivots::schema::{
    DATA_FIELD, DATA_FIELDS, FIELD, PIVOT_FIELD, PIVOT_FIELDS, PIVOT_TABLE_DEFINITION, ROW_FIELDS,
};
use sml_codec::{
    decode_document, encode_document, DecodeOptions, Element, EncodeOptions, NullSink,
    PivotTableDefinition,
};

#[derive(Debug, Clone)]
struct Field {
    name: Option<String>,
    data_field: Option<bool>,
    item_page_count: Option<u32>,
}

fn text() -> impl Strategy<Value = String> {
    // Attribute text that survives XML attribute-value normalization.
    "[A-Za-z0-9 &<>\"'{}:._-]{0,16}"
}

fn field() -> impl Strategy<Value = Field> {
    (
        proptest::option::of(text()),
        proptest::option::of(any::<bool>()),
        proptest::option::of(any::<u32>()),
    )
        .prop_map(|(name, data_field, item_page_count)| Field {
            name,
            data_field,
            item_page_count,
        })
}

fn build(
    name: &str,
    cache_id: u32,
    indent: Option<u32>,
    fields: &[Field],
    row_fields: &[i32],
) -> Element {
    let mut node = PivotTableDefinition::new(name, cache_id, "A3:D40")
        .unwrap()
        .into_element();
    if let Some(indent) = indent {
        node.set_attribute("indent", indent).unwrap();
    }

    if !fields.is_empty() {
        let mut pivot_fields = Element::new(&PIVOT_FIELDS);
        for spec in fields {
            let mut field = Element::new(&PIVOT_FIELD);
            if let Some(name) = &spec.name {
                field.set_attribute("name", name.as_str()).unwrap();
            }
            if let Some(data_field) = spec.data_field {
                field.set_attribute("dataField", data_field).unwrap();
            }
            if let Some(count) = spec.item_page_count {
                field.set_attribute("itemPageCount", count).unwrap();
            }
            pivot_fields.push_child("pivotField", field).unwrap();
        }
        node.set_child("pivotFields", pivot_fields).unwrap();

        let mut data_fields = Element::new(&DATA_FIELDS);
        let mut data_field = Element::new(&DATA_FIELD);
        data_field.set_attribute("fld", 0).unwrap();
        data_fields.push_child("dataField", data_field).unwrap();
        node.set_child("dataFields", data_fields).unwrap();
    }

    if !row_fields.is_empty() {
        let mut rows = Element::new(&ROW_FIELDS);
        for x in row_fields {
            let mut field = Element::new(&FIELD);
            field.set_attribute("x", *x).unwrap();
            rows.push_child("field", field).unwrap();
        }
        node.set_child("rowFields", rows).unwrap();
    }

    node
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        rng_seed: proptest::test_runner::RngSeed::Fixed(0),
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn decode_inverts_encode(
        name in text(),
        cache_id in any::<u32>(),
        indent in proptest::option::of(any::<u32>()),
        fields in proptest::collection::vec(field(), 0..6),
        row_fields in proptest::collection::vec(-2i32..8, 0..4),
        prefix in proptest::option::of("[a-z]{1,3}"),
    ) {
        let node = build(&name, cache_id, indent, &fields, &row_fields);
        let options = EncodeOptions {
            prefix: prefix.filter(|p| !p.starts_with("xml")),
            ..EncodeOptions::default()
        };

        let encoded = encode_document(&node, &options).unwrap();
        let decoded = decode_document(
            &PIVOT_TABLE_DEFINITION,
            &encoded,
            &DecodeOptions::default(),
            &mut NullSink,
        )
        .unwrap();
        prop_assert_eq!(&decoded, &node);
        decoded.validate().unwrap();

        let text = String::from_utf8(encoded).unwrap();
        let doc = roxmltree::Document::parse(&text).unwrap();
        let names: Vec<Option<&str>> = doc
            .descendants()
            .filter(|n| n.has_tag_name("pivotField"))
            .map(|n| n.attribute("name"))
            .collect();
        let expected: Vec<Option<&str>> = fields.iter().map(|f| f.name.as_deref()).collect();
        prop_assert_eq!(names, expected);
    }
}
