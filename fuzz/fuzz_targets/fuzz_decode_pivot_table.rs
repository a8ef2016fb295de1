#![no_main]

use libfuzzer_sys::fuzz_target;

use sml_codec::pivots::schema::PIVOT_TABLE_DEFINITION;
use sml_codec::{decode_document, encode_document, DecodeOptions, EncodeOptions, NullSink};

/// Pivot table parts are small; bound the input so pathological nesting stays cheap.
const MAX_INPUT_BYTES: usize = 64 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_BYTES {
        return;
    }

    let options = DecodeOptions {
        default_namespace: Some(sml_codec::openxml::NS_MAIN),
    };
    let Ok(node) = decode_document(&PIVOT_TABLE_DEFINITION, data, &options, &mut NullSink) else {
        return;
    };

    // Validation may fail; it must not panic.
    let _ = node.validate();

    // Anything we decoded must encode, and decode back to the same tree.
    let encoded = encode_document(&node, &EncodeOptions::default()).expect("encode decoded node");
    let reparsed = decode_document(&PIVOT_TABLE_DEFINITION, &encoded, &options, &mut NullSink)
        .expect("decode encoded node");
    assert_eq!(reparsed, node);
});
