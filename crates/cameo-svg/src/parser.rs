//! Reads SVG text into a [`VectorDocument`].

use std::{borrow::Cow, str};

use log::debug;
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::{
    document::VectorDocument,
    error::SvgError,
    node::{Attribute, Declaration, ElementData, NodeData, NodeId},
};

impl VectorDocument {
    /// Parses serialized SVG.
    ///
    /// # Errors
    ///
    /// Returns [`SvgError::Xml`] for malformed markup (including unknown
    /// entities and mismatched end tags), [`SvgError::UnbalancedTag`] if the
    /// input ends inside an element or closes one that was never opened, and
    /// [`SvgError::MissingRoot`] if there is no root element.
    pub fn parse(text: &str) -> Result<Self, SvgError> {
        let mut reader = Reader::from_str(text);
        let mut doc = VectorDocument::new();
        let mut open: Vec<NodeId> = vec![doc.document_node()];

        loop {
            let position = reader.buffer_position();
            let event = reader
                .read_event()
                .map_err(|source| SvgError::Xml { position, source })?;
            let xml_err = |source: quick_xml::Error| SvgError::Xml { position, source };
            let parent = current(&open);

            match event {
                Event::Start(start) => {
                    let data = element_data(&start).map_err(xml_err)?;
                    let id = doc.append(parent, NodeData::Element(data));
                    open.push(id);
                }
                Event::Empty(start) => {
                    let data = element_data(&start).map_err(xml_err)?;
                    doc.append(parent, NodeData::Element(data));
                }
                Event::End(end) => {
                    if open.len() <= 1 {
                        let name = str::from_utf8(end.name().as_ref())?.to_string();
                        return Err(SvgError::UnbalancedTag(name));
                    }
                    open.pop();
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(xml_err)?;
                    doc.append(parent, NodeData::Text(text.into_owned()));
                }
                Event::CData(cdata) => {
                    let content = str::from_utf8(&cdata)?.to_string();
                    doc.append(parent, NodeData::CData(content));
                }
                Event::Comment(comment) => {
                    let content = str::from_utf8(&comment)?.to_string();
                    doc.append(parent, NodeData::Comment(content));
                }
                Event::Decl(decl) => {
                    let version = utf8(decl.version().map_err(xml_err)?)?;
                    let encoding = decl
                        .encoding()
                        .transpose()
                        .map_err(xml_err)?
                        .map(utf8)
                        .transpose()?;
                    let standalone = decl
                        .standalone()
                        .transpose()
                        .map_err(xml_err)?
                        .map(utf8)
                        .transpose()?;
                    doc.append(
                        parent,
                        NodeData::Declaration(Declaration {
                            version,
                            encoding,
                            standalone,
                        }),
                    );
                }
                Event::DocType(doctype) => {
                    let content = str::from_utf8(&doctype)?.trim_start().to_string();
                    doc.append(parent, NodeData::DocType(content));
                }
                Event::PI(pi) => {
                    let content = str::from_utf8(&pi)?.to_string();
                    doc.append(parent, NodeData::ProcessingInstruction(content));
                }
                Event::Eof => break,
            }
        }

        if open.len() > 1 {
            let name = doc
                .element(current(&open))
                .map(|element| element.name().to_string())
                .unwrap_or_default();
            return Err(SvgError::UnbalancedTag(name));
        }

        if doc.root_element().is_none() {
            return Err(SvgError::MissingRoot);
        }

        debug!(nodes = doc.arena_len(); "SVG document parsed");
        Ok(doc)
    }
}

fn current(open: &[NodeId]) -> NodeId {
    open.last().copied().unwrap_or(NodeId(0))
}

fn utf8(bytes: Cow<'_, [u8]>) -> Result<String, SvgError> {
    Ok(str::from_utf8(&bytes)?.to_string())
}

fn element_data(start: &BytesStart<'_>) -> Result<ElementData, quick_xml::Error> {
    let qname = start.name();
    let name = str::from_utf8(qname.as_ref())
        .map_err(|err| quick_xml::Error::NonDecodable(Some(err)))?;
    let mut element = ElementData::new(name);

    for attr in start.attributes() {
        let attr = attr?;
        let key = str::from_utf8(attr.key.as_ref())
            .map_err(|err| quick_xml::Error::NonDecodable(Some(err)))?;
        let value = attr.unescape_value()?;
        element.push_attribute(Attribute::new(key, value));
    }

    Ok(element)
}
