use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

/// Normalize XML for semantic comparisons by:
/// - resolving element names to `{namespace}local`, so prefix choice does not matter
/// - dropping `xmlns` declarations
/// - sorting attributes
/// - writing empty elements as a start/end pair
/// - ignoring insignificant whitespace between elements
///
/// This is intentionally *not* a full XML canonicalization algorithm. It is a
/// pragmatic helper for round-trip checks of SpreadsheetML parts.
pub fn normalize_xml(bytes: &[u8]) -> Result<String, quick_xml::Error> {
    let mut reader = NsReader::from_reader(bytes);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    let mut out = String::new();
    let mut open: Vec<String> = Vec::new();

    loop {
        buf.clear();
        let (resolved, event) = reader.read_resolved_event_into(&mut buf)?;
        let namespace = match resolved {
            ResolveResult::Bound(Namespace(ns)) => Some(String::from_utf8_lossy(ns).into_owned()),
            _ => None,
        };
        match event {
            Event::Start(e) => {
                let name = expanded_name(namespace.as_deref(), &e);
                write_start(&mut out, &name, &e)?;
                open.push(name);
            }
            Event::Empty(e) => {
                let name = expanded_name(namespace.as_deref(), &e);
                write_start(&mut out, &name, &e)?;
                write_end(&mut out, &name);
            }
            Event::End(_) => {
                if let Some(name) = open.pop() {
                    write_end(&mut out, &name);
                }
            }
            Event::Text(e) => {
                let text = e.unescape()?.into_owned();
                if !text.chars().all(|c| c.is_whitespace()) {
                    out.push_str(&escape_text(&text));
                }
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(e.as_ref());
                if !text.chars().all(|c: char| c.is_whitespace()) {
                    out.push_str(&escape_text(&text));
                }
            }
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    Ok(out)
}

/// Panics with both normalized forms when the documents differ.
pub fn assert_xml_semantic_eq(expected: &[u8], actual: &[u8]) {
    let expected_norm = normalize_xml(expected).expect("normalize expected xml");
    let actual_norm = normalize_xml(actual).expect("normalize actual xml");
    assert_eq!(expected_norm, actual_norm);
}

fn expanded_name(namespace: Option<&str>, e: &BytesStart<'_>) -> String {
    let local = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
    match namespace {
        Some(ns) => format!("{{{ns}}}{local}"),
        None => local,
    }
}

fn write_start(out: &mut String, name: &str, e: &BytesStart<'_>) -> Result<(), quick_xml::Error> {
    out.push('<');
    out.push_str(name);
    write_sorted_attrs(out, e)?;
    out.push('>');
    Ok(())
}

fn write_end(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn write_sorted_attrs(out: &mut String, e: &BytesStart<'_>) -> Result<(), quick_xml::Error> {
    let mut attrs: Vec<(String, String)> = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attrs.push((key, value));
    }
    attrs.sort_by(|a, b| a.0.cmp(&b.0));
    for (k, v) in attrs {
        out.push(' ');
        out.push_str(&k);
        out.push_str("=\"");
        out.push_str(&escape_attr(&v));
        out.push('"');
    }
    Ok(())
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\"', "&quot;")
        .replace('\'', "&apos;")
}

fn escape_text(value: &str) -> String {
    value.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_and_attribute_order_do_not_matter() {
        let a = br#"<x:location xmlns:x="urn:m" ref="A1" firstDataRow="2"></x:location>"#;
        let b = br#"<?xml version="1.0"?>
<location firstDataRow="2" ref="A1" xmlns="urn:m"/>"#;
        assert_xml_semantic_eq(a, b);
    }

    #[test]
    fn namespaces_and_values_do_matter() {
        let a = normalize_xml(br#"<location xmlns="urn:m" ref="A1"/>"#).unwrap();
        let b = normalize_xml(br#"<location xmlns="urn:other" ref="A1"/>"#).unwrap();
        let c = normalize_xml(br#"<location xmlns="urn:m" ref="A2"/>"#).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, c);
    }
}
