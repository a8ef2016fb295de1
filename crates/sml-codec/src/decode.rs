//! Schema-driven decoding from a SpreadsheetML token stream.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, PrefixDeclaration, QName, ResolveResult};
use quick_xml::reader::NsReader;
use quick_xml::Writer;

use crate::error::CodecError;
use crate::node::{Child, Element};
use crate::schema::ElementSchema;
use crate::sink::{DecodeNotice, DecodeSink};

#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Namespace assumed for element names with no namespace binding in scope.
    ///
    /// Children are matched on namespace + local name, so a part written without any `xmlns`
    /// (common in hand-written fixtures) matches nothing unless this is set, typically to
    /// [`crate::openxml::NS_MAIN`].
    pub default_namespace: Option<&'static str>,
}

/// Decode a complete XML document whose root element must be `schema.name`.
///
/// Anything after the root element is ignored.
pub fn decode_document(
    schema: &'static ElementSchema,
    xml: &[u8],
    options: &DecodeOptions,
    sink: &mut dyn DecodeSink,
) -> Result<Element, CodecError> {
    let mut reader = NsReader::from_reader(xml);
    reader.config_mut().trim_text(false);
    decode_root(schema, &mut reader, options, sink)
}

/// Read up to the first start element of `reader` and decode it as `schema`.
pub fn decode_root<R: BufRead>(
    schema: &'static ElementSchema,
    reader: &mut NsReader<R>,
    options: &DecodeOptions,
    sink: &mut dyn DecodeSink,
) -> Result<Element, CodecError> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let (resolved, event) = reader.read_resolved_event_into(&mut buf)?;
        let namespace = resolve_namespace(resolved, options);
        let (start, empty) = match event {
            Event::Start(start) => (start, false),
            Event::Empty(start) => (start, true),
            Event::Eof => {
                return Err(CodecError::UnexpectedEof {
                    element: schema.name.local,
                })
            }
            _ => continue,
        };

        if !schema
            .name
            .matches(namespace.as_deref(), start.local_name().as_ref())
        {
            return Err(CodecError::UnexpectedRoot {
                expected: schema.name.local,
                found: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            });
        }
        return decode_element(schema, reader, &start, empty, options, sink);
    }
}

/// Decode one element whose start tag has already been read from `reader`.
///
/// For a non-empty element this consumes everything up to and including the matching end tag.
pub fn decode_element<R: BufRead>(
    schema: &'static ElementSchema,
    reader: &mut NsReader<R>,
    start: &BytesStart<'_>,
    empty: bool,
    options: &DecodeOptions,
    sink: &mut dyn DecodeSink,
) -> Result<Element, CodecError> {
    let mut node = Element::new(schema);
    apply_attributes(&mut node, start)?;
    if empty {
        return Ok(node);
    }

    if schema.is_raw() {
        let (inner_xml, prefixes) = capture_inner_xml(reader, schema.name.local)?;
        // The payload is written back verbatim, so it keeps every binding it relies on, including
        // ones declared by ancestors or dropped above as implied.
        for prefix in prefixes {
            if node.declares_prefix(&prefix) {
                continue;
            }
            if let Some(uri) = in_scope_namespace(reader, &prefix) {
                node.declare_namespace(prefix, uri);
            }
        }
        if !inner_xml.is_empty() {
            node.set_raw_content(inner_xml);
        }
        return Ok(node);
    }

    let mut buf = Vec::new();
    loop {
        buf.clear();
        let (resolved, event) = reader.read_resolved_event_into(&mut buf)?;
        let namespace = resolve_namespace(resolved, options);
        match event {
            Event::Start(child) => {
                decode_child(&mut node, reader, &child, false, namespace.as_deref(), options, sink)?;
            }
            Event::Empty(child) => {
                decode_child(&mut node, reader, &child, true, namespace.as_deref(), options, sink)?;
            }
            // Children are always consumed whole, so the next end tag closes this element.
            Event::End(_) => break,
            Event::Eof => {
                return Err(CodecError::UnexpectedEof {
                    element: schema.name.local,
                })
            }
            _ => {}
        }
    }

    Ok(node)
}

fn decode_child<R: BufRead>(
    node: &mut Element,
    reader: &mut NsReader<R>,
    start: &BytesStart<'_>,
    empty: bool,
    namespace: Option<&[u8]>,
    options: &DecodeOptions,
    sink: &mut dyn DecodeSink,
) -> Result<(), CodecError> {
    let schema = node.schema();
    let local = start.local_name();
    let Some(idx) = schema.child_index(namespace, local.as_ref()) else {
        sink.notice(DecodeNotice::SkippedElement {
            parent: schema.type_name,
            namespace: namespace.map(|ns| String::from_utf8_lossy(ns).into_owned()),
            local: String::from_utf8_lossy(local.as_ref()).into_owned(),
        });
        if !empty {
            reader.read_to_end_into(start.name(), &mut Vec::new())?;
        }
        return Ok(());
    };

    let spec = &schema.children[idx];
    let child = decode_element(spec.schema, reader, start, empty, options, sink)?;
    match node.child_slot_mut(idx) {
        Child::Single(slot) => {
            // Last occurrence wins; the schema allows one, so flag it.
            if slot.replace(Box::new(child)).is_some() {
                sink.notice(DecodeNotice::ReplacedElement {
                    parent: schema.type_name,
                    field: spec.name.local,
                });
            }
        }
        Child::Repeated(items) => items.push(child),
    }
    Ok(())
}

fn apply_attributes(node: &mut Element, start: &BytesStart<'_>) -> Result<(), CodecError> {
    let schema = node.schema();
    for attr in start.attributes().with_checks(false) {
        let attr = attr?;

        if let Some(binding) = attr.key.as_namespace_binding() {
            let prefix = match binding {
                PrefixDeclaration::Default => String::new(),
                PrefixDeclaration::Named(prefix) => String::from_utf8_lossy(prefix).into_owned(),
            };
            let uri = attr.unescape_value()?.into_owned();
            // `xmlns=""` only undeclares; the encoder always qualifies what it writes.
            if !uri.is_empty() && !is_implied_declaration(schema, &prefix, &uri) {
                node.declare_namespace(prefix, uri);
            }
            continue;
        }

        let Some(idx) = schema.attribute_index(attr.key.local_name().as_ref()) else {
            continue;
        };
        let spec = &schema.attributes[idx];
        let text = attr.unescape_value()?;
        let value = spec
            .ty
            .parse(&text)
            .ok_or_else(|| CodecError::MalformedAttribute {
                element: schema.name.local,
                attribute: spec.name,
                value: text.clone().into_owned(),
                expected: spec.ty,
            })?;
        *node.attribute_value_mut(idx) = Some(value);
    }
    Ok(())
}

/// Declarations the encoder regenerates on its own: the schema's root namespaces and any binding
/// of the element's own namespace.
fn is_implied_declaration(schema: &ElementSchema, prefix: &str, uri: &str) -> bool {
    uri == schema.name.namespace
        || schema
            .namespaces
            .iter()
            .any(|(p, u)| *p == prefix && *u == uri)
}

fn resolve_namespace(resolved: ResolveResult<'_>, options: &DecodeOptions) -> Option<Vec<u8>> {
    match resolved {
        ResolveResult::Bound(Namespace(ns)) => Some(ns.to_vec()),
        ResolveResult::Unbound => options.default_namespace.map(|ns| ns.as_bytes().to_vec()),
        // Undeclared prefix: nothing in a schema can match it.
        ResolveResult::Unknown(_) => None,
    }
}

/// Namespace bound to `prefix` (`""` for the default namespace) in the reader's current scope.
fn in_scope_namespace<R>(reader: &NsReader<R>, prefix: &str) -> Option<String> {
    let qname = if prefix.is_empty() {
        "_".to_string()
    } else {
        format!("{prefix}:_")
    };
    match reader.resolve_element(QName(qname.as_bytes())).0 {
        ResolveResult::Bound(Namespace(ns)) => Some(String::from_utf8_lossy(ns).into_owned()),
        _ => None,
    }
}

/// Element and attribute prefixes used by `start`, with `""` for an unprefixed element name.
fn collect_prefixes(start: &BytesStart<'_>, prefixes: &mut Vec<String>) -> Result<(), CodecError> {
    let mut note = |prefix: &[u8]| {
        let prefix = String::from_utf8_lossy(prefix);
        if prefix != "xml" && !prefixes.iter().any(|p| *p == prefix) {
            prefixes.push(prefix.into_owned());
        }
    };

    match start.name().prefix() {
        Some(prefix) => note(prefix.as_ref()),
        None => note(b""),
    }
    for attr in start.attributes().with_checks(false) {
        let attr = attr?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        if let Some(prefix) = attr.key.prefix() {
            note(prefix.as_ref());
        }
    }
    Ok(())
}

/// Read up to the end tag closing the current element, returning its inner XML and the prefixes
/// the inner XML uses.
///
/// On return the reader is still scoped to the closed element, so its bindings can be resolved.
fn capture_inner_xml<R: BufRead>(
    reader: &mut NsReader<R>,
    element: &'static str,
) -> Result<(String, Vec<String>), CodecError> {
    let mut buf = Vec::new();
    let mut writer = Writer::new(Vec::new());
    let mut prefixes = Vec::new();

    let mut depth: usize = 0;
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                depth += 1;
                collect_prefixes(&e, &mut prefixes)?;
                writer.write_event(Event::Start(e))?;
            }
            Event::Empty(e) => {
                collect_prefixes(&e, &mut prefixes)?;
                writer.write_event(Event::Empty(e))?;
            }
            Event::End(e) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                writer.write_event(Event::End(e))?;
            }
            Event::Eof => return Err(CodecError::UnexpectedEof { element }),
            ev => {
                writer.write_event(ev)?;
            }
        }
        buf.clear();
    }

    Ok((String::from_utf8(writer.into_inner())?, prefixes))
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::error::ErrorKind;
    use crate::openxml::NS_MAIN;
    use crate::pivots::schema::{EXTENSION_LIST, LOCATION, PIVOT_TABLE_DEFINITION};
    use crate::scalar::Scalar;
    use crate::sink::NullSink;

    fn decode(xml: &str) -> Result<Element, CodecError> {
        decode_document(
            &PIVOT_TABLE_DEFINITION,
            xml.as_bytes(),
            &DecodeOptions::default(),
            &mut NullSink,
        )
    }

    #[test]
    fn empty_root_decodes_to_default_node() {
        let node = decode(&format!(r#"<pivotTableDefinition xmlns="{NS_MAIN}"/>"#)).unwrap();
        assert_eq!(node, Element::new(&PIVOT_TABLE_DEFINITION));
    }

    #[test]
    fn malformed_unsigned_attribute_aborts_decode() {
        let err = decode(&format!(
            r#"<pivotTableDefinition xmlns="{NS_MAIN}" name="P" indent="abc"/>"#
        ))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedAttribute);
        assert!(matches!(
            err,
            CodecError::MalformedAttribute { attribute: "indent", ref value, .. } if value == "abc"
        ));

        let node = decode(&format!(
            r#"<pivotTableDefinition xmlns="{NS_MAIN}" indent="12"/>"#
        ))
        .unwrap();
        assert_eq!(node.attribute("indent"), Some(&Scalar::U32(12)));
    }

    #[test]
    fn wrong_root_is_rejected() {
        let err = decode(&format!(r#"<worksheet xmlns="{NS_MAIN}"/>"#)).unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedRoot { ref found, .. } if found == "worksheet"));

        let err = decode(r#"<pivotTableDefinition/>"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn default_namespace_option_matches_unqualified_parts() {
        let xml = r#"<pivotTableDefinition name="P"><location ref="A1:B2" firstHeaderRow="1" firstDataRow="1" firstDataCol="1"/></pivotTableDefinition>"#;
        let options = DecodeOptions {
            default_namespace: Some(NS_MAIN),
        };
        let node = decode_document(&PIVOT_TABLE_DEFINITION, xml.as_bytes(), &options, &mut NullSink)
            .unwrap();
        let location = node.child("location").expect("location decoded");
        assert_eq!(location.attribute("ref"), Some(&Scalar::from("A1:B2")));
    }

    #[test]
    fn truncated_input_is_a_stream_error() {
        let err = decode(&format!(
            r#"<pivotTableDefinition xmlns="{NS_MAIN}"><location ref="A1""#
        ))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Stream);

        let err = decode(&format!(r#"<pivotTableDefinition xmlns="{NS_MAIN}"><pivotFields>"#))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Stream);
    }

    #[test]
    fn duplicate_singular_child_keeps_last_and_reports_it() {
        let xml = format!(
            r#"<pivotTableDefinition xmlns="{NS_MAIN}">
  <location ref="A1:B2" firstHeaderRow="1" firstDataRow="1" firstDataCol="1"/>
  <location ref="C3:D4" firstHeaderRow="1" firstDataRow="2" firstDataCol="1"/>
</pivotTableDefinition>"#
        );
        let mut notices: Vec<DecodeNotice> = Vec::new();
        let node = decode_document(
            &PIVOT_TABLE_DEFINITION,
            xml.as_bytes(),
            &DecodeOptions::default(),
            &mut notices,
        )
        .unwrap();

        let location = node.child("location").unwrap();
        assert_eq!(location.attribute("ref"), Some(&Scalar::from("C3:D4")));
        assert_eq!(
            notices,
            vec![DecodeNotice::ReplacedElement {
                parent: "CT_pivotTableDefinition",
                field: "location",
            }]
        );
    }

    #[test]
    fn extension_payload_is_kept_verbatim() {
        let xml = format!(
            r#"<extLst xmlns="{NS_MAIN}"><ext uri="{{962EF5D1-5CA2-4c93-8EF4-DBF5C05439D2}}" xmlns:x14="http://schemas.microsoft.com/office/spreadsheetml/2009/9/main"><x14:pivotTableDefinition hideValuesRow="1"><x14:note>a &amp; b</x14:note></x14:pivotTableDefinition></ext></extLst>"#
        );
        let node = decode_document(
            &EXTENSION_LIST,
            xml.as_bytes(),
            &DecodeOptions::default(),
            &mut NullSink,
        )
        .unwrap();

        let ext = &node.children("ext")[0];
        assert_eq!(
            ext.attribute("uri"),
            Some(&Scalar::from("{962EF5D1-5CA2-4c93-8EF4-DBF5C05439D2}"))
        );
        assert_eq!(
            ext.raw_content(),
            Some(r#"<x14:pivotTableDefinition hideValuesRow="1"><x14:note>a &amp; b</x14:note></x14:pivotTableDefinition>"#)
        );
        assert_eq!(
            ext.namespace_declarations(),
            &[(
                "x14".to_string(),
                "http://schemas.microsoft.com/office/spreadsheetml/2009/9/main".to_string()
            )]
        );
    }

    #[test]
    fn own_namespace_bindings_are_not_recorded() {
        let xml = format!(
            r#"<ma:location xmlns:ma="{NS_MAIN}" xmlns:xr="http://schemas.microsoft.com/office/spreadsheetml/2014/revision" ref="A1"/>"#
        );
        let node = decode_document(&LOCATION, xml.as_bytes(), &DecodeOptions::default(), &mut NullSink)
            .unwrap();
        assert_eq!(
            node.namespace_declarations(),
            &[(
                "xr".to_string(),
                "http://schemas.microsoft.com/office/spreadsheetml/2014/revision".to_string()
            )]
        );
    }

    #[test]
    fn raw_payload_keeps_bindings_declared_by_ancestors() {
        let xml = format!(
            r#"<x:pivotTableDefinition xmlns:x="{NS_MAIN}" xmlns:x14="urn:x14"><x:extLst><x:ext uri="{{A}}"><x14:flag on="1"/><x:note/></x:ext></x:extLst></x:pivotTableDefinition>"#
        );
        let node = decode(&xml).unwrap();
        assert_eq!(
            node.namespace_declarations(),
            &[("x14".to_string(), "urn:x14".to_string())]
        );

        let ext = &node.child("extLst").unwrap().children("ext")[0];
        assert_eq!(ext.raw_content(), Some(r#"<x14:flag on="1"/><x:note/>"#));
        assert_eq!(
            ext.namespace_declarations(),
            &[
                ("x".to_string(), NS_MAIN.to_string()),
                ("x14".to_string(), "urn:x14".to_string())
            ]
        );
    }
}

