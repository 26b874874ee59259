//! Writes a [`VectorDocument`] back to SVG text.

use std::str;

use quick_xml::{
    Writer,
    escape::partial_escape,
    events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    document::VectorDocument,
    error::SvgError,
    node::{NodeData, NodeId},
};

impl VectorDocument {
    /// Serializes every node reachable from the document node.
    ///
    /// Elements without children are written as empty-element tags. Detached
    /// nodes are skipped. The output only depends on the tree, so serializing
    /// an unchanged document twice yields identical strings.
    ///
    /// # Errors
    ///
    /// Returns [`SvgError::Write`] if the XML writer fails.
    pub fn to_svg_string(&self) -> Result<String, SvgError> {
        let mut writer = Writer::new(Vec::new());
        for &child in self.children(self.document_node()) {
            self.write_node(&mut writer, child).map_err(SvgError::Write)?;
        }
        let bytes = writer.into_inner();
        Ok(str::from_utf8(&bytes)?.to_string())
    }

    fn write_node(
        &self,
        writer: &mut Writer<Vec<u8>>,
        id: NodeId,
    ) -> Result<(), quick_xml::Error> {
        match self.data(id) {
            NodeData::Document => {
                for &child in self.children(id) {
                    self.write_node(writer, child)?;
                }
            }
            NodeData::Declaration(decl) => {
                writer.write_event(Event::Decl(BytesDecl::new(
                    &decl.version,
                    decl.encoding.as_deref(),
                    decl.standalone.as_deref(),
                )))?;
            }
            NodeData::DocType(content) => {
                writer.write_event(Event::DocType(BytesText::from_escaped(content.as_str())))?;
            }
            NodeData::ProcessingInstruction(content) => {
                writer.write_event(Event::PI(BytesText::from_escaped(content.as_str())))?;
            }
            NodeData::Element(element) => {
                let mut start = BytesStart::new(element.name());
                for attr in element.attributes() {
                    start.push_attribute((attr.name(), attr.value()));
                }

                let children = self.children(id);
                if children.is_empty() {
                    writer.write_event(Event::Empty(start))?;
                } else {
                    writer.write_event(Event::Start(start))?;
                    for &child in children {
                        self.write_node(writer, child)?;
                    }
                    writer.write_event(Event::End(BytesEnd::new(element.name())))?;
                }
            }
            NodeData::Text(text) => {
                writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
            }
            NodeData::CData(content) => {
                writer.write_event(Event::CData(BytesCData::new(content.as_str())))?;
            }
            NodeData::Comment(content) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(content.as_str())))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{NodeData, VectorDocument};

    const BPMN_EXPORT: &str = concat!(
        r#"<?xml version="1.0" encoding="utf-8"?>"#,
        "\n<!-- created with bpmn-js / http://bpmn.io -->\n",
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="200" height="100" viewBox="0 0 200 100" version="1.1">"#,
        r#"<defs><marker id="sequenceflow-end"><path d="M 1 5 L 11 10 L 1 15 Z"/></marker></defs>"#,
        r#"<g class="djs-group"><g class="djs-element djs-shape" data-element-id="Task_1" transform="matrix(1 0 0 1 10 10)">"#,
        r#"<g class="djs-visual"><rect x="0" y="0" width="100" height="80"/><text>Check &amp; approve</text></g>"#,
        r#"</g></g></svg>"#,
    );

    #[test]
    fn test_round_trip_preserves_export() {
        let doc = VectorDocument::parse(BPMN_EXPORT).unwrap();
        assert_eq!(doc.to_svg_string().unwrap(), BPMN_EXPORT);
    }

    #[test]
    fn test_output_is_well_formed() {
        let doc = VectorDocument::parse(BPMN_EXPORT).unwrap();
        let svg = doc.to_svg_string().unwrap();

        let parsed = roxmltree::Document::parse(&svg).unwrap();
        assert_eq!(parsed.root_element().tag_name().name(), "svg");
        assert_eq!(
            parsed.root_element().tag_name().namespace(),
            Some("http://www.w3.org/2000/svg")
        );
    }

    #[test]
    fn test_empty_element_after_detach() {
        let mut doc = VectorDocument::parse("<svg><g><rect/></g></svg>").unwrap();
        let svg = doc.root_element().unwrap();
        let g = doc.children(svg)[0];
        let rect = doc.children(g)[0];

        doc.detach(rect);

        assert_eq!(doc.to_svg_string().unwrap(), "<svg><g/></svg>");
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let mut doc = VectorDocument::parse("<svg/>").unwrap();
        let svg = doc.root_element().unwrap();
        doc.element_mut(svg)
            .unwrap()
            .set_attribute("data-label", r#"a "quoted" <label>"#);

        let svg = doc.to_svg_string().unwrap();
        assert_eq!(
            svg,
            r#"<svg data-label="a &quot;quoted&quot; &lt;label&gt;"/>"#
        );
    }

    #[test]
    fn test_cdata_and_text_survive() {
        let source = r#"<svg><style><![CDATA[.a { fill: "red" }]]></style><text>"x" &lt; 'y'</text></svg>"#;
        let doc = VectorDocument::parse(source).unwrap();

        let text = doc
            .descendants(doc.document_node())
            .find(|&id| matches!(doc.data(id), NodeData::Text(_)))
            .unwrap();
        assert_eq!(doc.data(text), &NodeData::Text(r#""x" < 'y'"#.into()));
        assert_eq!(doc.to_svg_string().unwrap(), source);
    }
}
