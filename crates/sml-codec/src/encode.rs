//! Schema-driven encoding of [`Element`] trees.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::CodecError;
use crate::node::{Child, Element};
use crate::openxml::{prefixed_tag, xmlns_attribute};
use crate::schema::QualifiedName;

#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Write `<?xml version="1.0" encoding="UTF-8" standalone="yes"?>` first.
    pub xml_declaration: bool,
    /// Indent nested elements by this many spaces. `None` writes everything on one line.
    pub indent: Option<usize>,
    /// Prefix for the element's own namespace (e.g. `x`). `None` uses the default namespace.
    pub prefix: Option<String>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            xml_declaration: true,
            indent: None,
            prefix: None,
        }
    }
}

/// Encode `node` as a standalone document rooted at its schema's element name.
pub fn encode_document(node: &Element, options: &EncodeOptions) -> Result<Vec<u8>, CodecError> {
    let mut writer = match options.indent {
        Some(width) => Writer::new_with_indent(Vec::new(), b' ', width),
        None => Writer::new(Vec::new()),
    };
    if options.xml_declaration {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    }
    encode_element(&mut writer, node, node.schema().name, options)?;
    Ok(writer.into_inner())
}

pub fn encode_to_string(node: &Element, options: &EncodeOptions) -> Result<String, CodecError> {
    Ok(String::from_utf8(encode_document(node, options)?)?)
}

/// Encode `node` as an element named `name`, declaring the namespaces it needs on itself.
///
/// Attributes are written in schema order and children in schema sequence order, regardless of
/// the order they were assigned or decoded in. Absent attributes and children are omitted.
///
/// Declarations carried by the node override the schema's root declarations for the same prefix.
/// If the requested prefix for `name`'s namespace is then bound elsewhere, a free prefix is used.
pub fn encode_element<W: Write>(
    writer: &mut Writer<W>,
    node: &Element,
    name: QualifiedName,
    options: &EncodeOptions,
) -> Result<(), CodecError> {
    let mut declarations: Vec<(String, String)> = Vec::new();
    for (prefix, uri) in node.schema().namespaces {
        if !declarations.iter().any(|(p, _)| p == prefix) {
            declarations.push((prefix.to_string(), uri.to_string()));
        }
    }
    for (prefix, uri) in node.namespace_declarations() {
        match declarations.iter_mut().find(|(p, _)| p == prefix) {
            Some(existing) => existing.1 = uri.clone(),
            None => declarations.push((prefix.clone(), uri.clone())),
        }
    }
    let wanted = options.prefix.as_deref().unwrap_or("");
    let mut scope = Scope::default();
    bind_prefix(&mut declarations, wanted, name.namespace, &scope);

    write_element(writer, node, name, &declarations, &mut scope)
}

/// Make sure `declarations` bind `uri`, preferring `wanted` as its prefix. Returns the prefix used.
///
/// A fresh prefix is never one already bound in `scope`.
fn bind_prefix(
    declarations: &mut Vec<(String, String)>,
    wanted: &str,
    uri: &str,
    scope: &Scope,
) -> String {
    let prefix = match declarations.iter().find(|(p, _)| p == wanted) {
        Some((_, bound)) if bound == uri => return wanted.to_string(),
        Some(_) => fresh_prefix(declarations, scope),
        None => wanted.to_string(),
    };
    declarations.push((prefix.clone(), uri.to_string()));
    prefix
}

fn fresh_prefix(declarations: &[(String, String)], scope: &Scope) -> String {
    let taken = |candidate: &str| {
        declarations.iter().any(|(p, _)| p == candidate) || scope.resolve(candidate).is_some()
    };
    if !taken("x") {
        return "x".to_string();
    }
    (1..)
        .map(|n| format!("x{n}"))
        .find(|candidate| !taken(candidate.as_str()))
        .unwrap_or_default()
}

/// In-scope `xmlns` bindings, innermost last.
#[derive(Default)]
struct Scope {
    bindings: Vec<(String, String)>,
}

impl Scope {
    fn resolve(&self, prefix: &str) -> Option<&str> {
        self.bindings
            .iter()
            .rev()
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    /// Innermost prefix bound to `uri` that is not shadowed by a later binding.
    fn prefix_for(&self, uri: &str) -> Option<&str> {
        self.bindings
            .iter()
            .rev()
            .find(|(p, u)| u == uri && self.resolve(p) == Some(uri))
            .map(|(p, _)| p.as_str())
    }
}

fn write_element<W: Write>(
    writer: &mut Writer<W>,
    node: &Element,
    name: QualifiedName,
    declarations: &[(String, String)],
    scope: &mut Scope,
) -> Result<(), CodecError> {
    let frame = scope.bindings.len();
    scope.bindings.extend_from_slice(declarations);

    let mut local_declarations = declarations.to_vec();
    let in_scope = scope.prefix_for(name.namespace).map(str::to_string);
    let prefix = match in_scope {
        Some(prefix) => prefix,
        None => {
            let prefix = bind_prefix(&mut local_declarations, "", name.namespace, scope);
            scope
                .bindings
                .push((prefix.clone(), name.namespace.to_string()));
            prefix
        }
    };

    let tag = prefixed_tag(&prefix, name.local);
    let mut start = BytesStart::new(tag.as_str());
    for (prefix, uri) in &local_declarations {
        start.push_attribute((xmlns_attribute(prefix).as_str(), uri.as_str()));
    }
    for (attribute, value) in node.attributes() {
        let value = value.to_string();
        start.push_attribute((attribute, value.as_str()));
    }

    let has_children = node.child_slots().iter().any(|slot| match slot {
        Child::Single(child) => child.is_some(),
        Child::Repeated(items) => !items.is_empty(),
    });
    let raw = node.raw_content().filter(|raw| !raw.is_empty());

    if !has_children && raw.is_none() {
        writer.write_event(Event::Empty(start))?;
        scope.bindings.truncate(frame);
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for (spec, slot) in node.schema().children.iter().zip(node.child_slots()) {
        match slot {
            Child::Single(Some(child)) => {
                write_element(writer, child, spec.name, child.namespace_declarations(), scope)?;
            }
            Child::Single(None) => {}
            Child::Repeated(items) => {
                for child in items {
                    write_element(writer, child, spec.name, child.namespace_declarations(), scope)?;
                }
            }
        }
    }
    if let Some(raw) = raw {
        writer.write_event(Event::Text(BytesText::from_escaped(raw)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag.as_str())))?;

    scope.bindings.truncate(frame);
    Ok(())
}
