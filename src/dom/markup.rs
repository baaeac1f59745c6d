use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{Document, DomError, NodeId};

/// Parse a well-formed (XHTML-style) page into a [`Document`].
///
/// `<template>` children are collected into the template's content
/// fragment instead of the live tree. Whitespace-only text is dropped;
/// comments, processing instructions and the doctype are ignored.
pub fn parse_document(markup: &str) -> Result<Document, DomError> {
    let mut reader = Reader::from_str(markup);

    let mut doc = Document::new();
    let mut open: Vec<NodeId> = vec![doc.root()];

    loop {
        let position = reader.buffer_position();
        let event = reader.read_event().map_err(|err| DomError::Markup {
            position,
            message: err.to_string(),
        })?;
        match event {
            Event::Start(tag) => {
                let element = element_from(&mut doc, &tag, position)?;
                append(&mut doc, &open, element)?;
                let container = if doc.tag_name(element) == Some("template") {
                    doc.attach_template_content(element)?
                } else {
                    element
                };
                open.push(container);
            }
            Event::Empty(tag) => {
                let element = element_from(&mut doc, &tag, position)?;
                append(&mut doc, &open, element)?;
                if doc.tag_name(element) == Some("template") {
                    doc.attach_template_content(element)?;
                }
            }
            Event::End(_) => {
                if open.len() <= 1 {
                    return Err(DomError::Markup {
                        position,
                        message: "closing tag without a matching opening tag".to_string(),
                    });
                }
                open.pop();
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|err| DomError::Markup {
                    position,
                    message: err.to_string(),
                })?;
                if !text.trim().is_empty() {
                    let node = doc.create_text(text.into_owned());
                    append(&mut doc, &open, node)?;
                }
            }
            Event::CData(data) => {
                let node = doc.create_text(String::from_utf8_lossy(&data).into_owned());
                append(&mut doc, &open, node)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if open.len() > 1 {
        return Err(DomError::Markup {
            position: reader.buffer_position(),
            message: format!("{} element(s) left unclosed", open.len() - 1),
        });
    }
    Ok(doc)
}

fn element_from(doc: &mut Document, tag: &BytesStart<'_>, position: u64) -> Result<NodeId, DomError> {
    let name = String::from_utf8_lossy(tag.name().as_ref()).into_owned();
    let element = doc.create_element(&name);
    for attribute in tag.html_attributes() {
        let attribute = attribute.map_err(|err| DomError::Markup {
            position,
            message: err.to_string(),
        })?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value().map_err(|err| DomError::Markup {
            position,
            message: err.to_string(),
        })?;
        doc.set_attribute(element, &key, value.into_owned())?;
    }
    Ok(element)
}

fn append(doc: &mut Document, open: &[NodeId], node: NodeId) -> Result<(), DomError> {
    let parent = open.last().copied().unwrap_or_else(|| doc.root());
    doc.append_child(parent, node)
}
