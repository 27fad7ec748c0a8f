//! XML snapshot parser.
//!
//! This module parses the XML form of a program snapshot into the internal
//! declaration model.

use crate::error::ParseError;
use crate::types::{
    Accessibility, Annotation, Declaration, DeclarationKind, Member, MemberKind, Parameter,
    Snapshot,
};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

/// Parses a declaration snapshot from an XML string.
///
/// # Arguments
/// * `xml` - XML snapshot content
///
/// # Returns
/// Parsed snapshot or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or contains invalid snapshot elements.
pub fn parse_snapshot(xml: &str) -> Result<Snapshot, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut snapshot: Option<Snapshot> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match name {
                    "snapshot" if snapshot.is_none() => snapshot = Some(Snapshot::new()),
                    "declaration" => {
                        let Some(snapshot) = snapshot.as_mut() else {
                            return Err(ParseError::unknown_element(name, "document"));
                        };
                        let declaration = parse_declaration(&mut reader, e)?;
                        snapshot.add_declaration(declaration);
                    }
                    other => return Err(ParseError::unknown_element(other, "document")),
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match name {
                    "snapshot" if snapshot.is_none() => snapshot = Some(Snapshot::new()),
                    "declaration" => {
                        let Some(snapshot) = snapshot.as_mut() else {
                            return Err(ParseError::unknown_element(name, "document"));
                        };
                        snapshot.add_declaration(parse_declaration_header(e)?);
                    }
                    other => return Err(ParseError::unknown_element(other, "document")),
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let snapshot = snapshot.ok_or_else(|| ParseError::InvalidStructure {
        message: "No snapshot element found".to_string(),
    })?;
    tracing::debug!("Parsed snapshot with {} declarations", snapshot.len());
    Ok(snapshot)
}

/// Collects the unescaped attributes of an element.
fn attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>, ParseError> {
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let raw = std::str::from_utf8(&attr.value)?;
        attrs.push((key.to_string(), unescape(raw)?.into_owned()));
    }
    Ok(attrs)
}

/// Parses a boolean attribute value.
fn parse_bool(element: &str, attribute: &str, value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::invalid_attr(element, attribute, value)),
    }
}

/// Parses the declaration element attributes.
fn parse_declaration_header(e: &BytesStart<'_>) -> Result<Declaration, ParseError> {
    let mut name = None;
    let mut namespace = String::new();
    let mut accessibility = Accessibility::Internal;
    let mut kind = DeclarationKind::Class;
    let mut is_partial = false;
    let mut base_type = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "namespace" => namespace = value,
            "accessibility" => {
                accessibility = Accessibility::parse(&value).ok_or_else(|| {
                    ParseError::invalid_attr("declaration", "accessibility", &value)
                })?
            }
            "kind" => {
                kind = DeclarationKind::parse(&value)
                    .ok_or_else(|| ParseError::invalid_attr("declaration", "kind", &value))?
            }
            "partial" => is_partial = parse_bool("declaration", "partial", &value)?,
            "base" => base_type = Some(value),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("declaration", "name"))?;

    let mut declaration = Declaration::new(name, namespace)
        .with_accessibility(accessibility)
        .with_kind(kind)
        .with_partial(is_partial);
    declaration.base_type = base_type;

    Ok(declaration)
}

/// Parses a declaration element and its children.
fn parse_declaration(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
) -> Result<Declaration, ParseError> {
    let mut declaration = parse_declaration_header(e)?;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                match tag_name {
                    "member" => {
                        let member = parse_member(reader, e)?;
                        declaration.members.push(member);
                    }
                    "annotation" => {
                        declaration.annotations.push(parse_annotation(e)?);
                        reader.read_to_end_into(e.name(), &mut Vec::new())?;
                    }
                    other => return Err(ParseError::unknown_element(other, "declaration")),
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                match tag_name {
                    "member" => declaration.members.push(parse_member_header(e)?),
                    "annotation" => declaration.annotations.push(parse_annotation(e)?),
                    "using" => declaration
                        .usings
                        .push(required(e, "using", "namespace")?),
                    "implements" => declaration
                        .interfaces
                        .push(required(e, "implements", "name")?),
                    other => return Err(ParseError::unknown_element(other, "declaration")),
                }
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => {
                return Err(ParseError::InvalidStructure {
                    message: format!("unterminated declaration '{}'", declaration.name),
                });
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(declaration)
}

/// Reads one required attribute of an element.
fn required(e: &BytesStart<'_>, element: &str, attribute: &str) -> Result<String, ParseError> {
    attributes(e)?
        .into_iter()
        .find(|(k, _)| k == attribute)
        .map(|(_, v)| v)
        .ok_or_else(|| ParseError::missing_attr(element, attribute))
}

/// Parses an annotation element; every attribute except `name` is an argument.
fn parse_annotation(e: &BytesStart<'_>) -> Result<Annotation, ParseError> {
    let mut name = None;
    let mut arguments = Vec::new();

    for (key, value) in attributes(e)? {
        if key == "name" {
            name = Some(value);
        } else {
            arguments.push((key, value));
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("annotation", "name"))?;
    Ok(Annotation { name, arguments })
}

/// Parses the member element attributes.
fn parse_member_header(e: &BytesStart<'_>) -> Result<Member, ParseError> {
    let mut name = None;
    let mut kind = None;
    let mut type_name = None;
    let mut accessibility = Accessibility::Private;
    let mut is_static = false;
    let mut initializer = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "kind" => {
                kind = Some(
                    MemberKind::parse(&value)
                        .ok_or_else(|| ParseError::invalid_attr("member", "kind", &value))?,
                )
            }
            "type" => type_name = Some(value),
            "accessibility" => {
                accessibility = Accessibility::parse(&value)
                    .ok_or_else(|| ParseError::invalid_attr("member", "accessibility", &value))?
            }
            "static" => is_static = parse_bool("member", "static", &value)?,
            "initializer" => initializer = Some(value),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("member", "name"))?;
    let kind = kind.ok_or_else(|| ParseError::missing_attr("member", "kind"))?;
    let type_name = match (type_name, kind) {
        (Some(t), _) => t,
        (None, MemberKind::Method) => "void".to_string(),
        (None, _) => return Err(ParseError::missing_attr("member", "type")),
    };

    let mut member = Member::new(kind, name, type_name).with_accessibility(accessibility);
    member.is_static = is_static;
    member.initializer = initializer;
    Ok(member)
}

/// Parses a member element and its annotations and parameters.
fn parse_member(reader: &mut Reader<&[u8]>, e: &BytesStart<'_>) -> Result<Member, ParseError> {
    let mut member = parse_member_header(e)?;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                match tag_name {
                    "annotation" => {
                        member.annotations.push(parse_annotation(e)?);
                        reader.read_to_end_into(e.name(), &mut Vec::new())?;
                    }
                    other => return Err(ParseError::unknown_element(other, "member")),
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                match tag_name {
                    "annotation" => member.annotations.push(parse_annotation(e)?),
                    "parameter" => member.parameters.push(Parameter::new(
                        required(e, "parameter", "name")?,
                        required(e, "parameter", "type")?,
                    )),
                    other => return Err(ParseError::unknown_element(other, "member")),
                }
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => {
                return Err(ParseError::InvalidStructure {
                    message: format!("unterminated member '{}'", member.name),
                });
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(member)
}
