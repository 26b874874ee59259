//! Restricting a document serialization to a set of elements.

use std::collections::HashSet;

use log::{debug, trace};

use cameo_core::identifier::ElementId;
use cameo_svg::{NodeId, VectorDocument};

use crate::config::MarkupConfig;

/// Removes the visuals of every element that is not in `ids`.
///
/// Candidates are element nodes carrying the configured element-id attribute
/// below a root-level layer (a direct child of the root `<svg>` with the
/// configured group class). For each candidate whose identifier is not in
/// `ids`, its first descendant with the visual class is detached. Containers,
/// transforms, `<defs>` and everything else stay in place, so kept elements
/// are drawn exactly where they were. Candidates without a visual are left
/// alone, and identifiers in `ids` that never appear are ignored.
///
/// Returns the number of visuals removed.
///
/// # Examples
///
/// ```
/// use cameo::{config::MarkupConfig, filter::filter_to_closure};
/// use cameo_core::identifier::ElementId;
/// use cameo_svg::VectorDocument;
///
/// let mut doc = VectorDocument::parse(concat!(
///     r#"<svg><g class="djs-group">"#,
///     r#"<g data-element-id="Keep"><g class="djs-visual"><rect/></g></g>"#,
///     r#"<g data-element-id="Drop"><g class="djs-visual"><rect/></g></g>"#,
///     r#"</g></svg>"#,
/// ))?;
///
/// let removed = filter_to_closure(&mut doc, &[ElementId::new("Keep")], &MarkupConfig::default());
///
/// assert_eq!(removed, 1);
/// assert_eq!(
///     doc.to_svg_string()?,
///     concat!(
///         r#"<svg><g class="djs-group">"#,
///         r#"<g data-element-id="Keep"><g class="djs-visual"><rect/></g></g>"#,
///         r#"<g data-element-id="Drop"/>"#,
///         r#"</g></svg>"#,
///     )
/// );
/// # Ok::<(), cameo_svg::SvgError>(())
/// ```
pub fn filter_to_closure(
    document: &mut VectorDocument,
    ids: &[ElementId],
    markup: &MarkupConfig,
) -> usize {
    let Some(root) = document.root_element() else {
        return 0;
    };
    let wanted: HashSet<ElementId> = ids.iter().copied().collect();

    let hidden: Vec<NodeId> = candidates(document, root, markup)
        .into_iter()
        .filter(|&(node, id)| {
            let keep = id.is_some_and(|id| wanted.contains(&id));
            trace!(node:? = node, keep = keep; "Filter candidate");
            !keep
        })
        .map(|(node, _)| node)
        .collect();

    let mut removed = 0;
    for node in hidden {
        let visual = document.find_descendant(node, |_, data| {
            data.as_element()
                .is_some_and(|element| element.has_class(markup.visual_class()))
        });
        match visual {
            Some(visual) => {
                document.detach(visual);
                removed += 1;
            }
            None => trace!(node:? = node; "Candidate has no visual"),
        }
    }

    debug!(requested = wanted.len(), removed = removed; "Document filtered to closure");
    removed
}

/// Collects candidate nodes in document order together with their identifier.
///
/// The identifier is `None` when the attribute value was never interned; such
/// an element cannot be part of any requested set.
fn candidates(
    document: &VectorDocument,
    root: NodeId,
    markup: &MarkupConfig,
) -> Vec<(NodeId, Option<ElementId>)> {
    let attribute = markup.element_id_attribute();

    document
        .child_elements(root)
        .filter(|&layer| match markup.group_class() {
            Some(class) => document
                .element(layer)
                .is_some_and(|element| element.has_class(class)),
            None => true,
        })
        .flat_map(|layer| document.descendants(layer))
        .filter_map(|node| {
            let value = document.element(node)?.attribute(attribute)?;
            Some((node, ElementId::lookup(value)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIAGRAM: &str = concat!(
        r#"<svg xmlns="http://www.w3.org/2000/svg">"#,
        r#"<defs><marker id="end"/></defs>"#,
        r#"<g class="djs-group">"#,
        r#"<g class="djs-element" data-element-id="Flt_Lane"><g class="djs-visual"><rect/></g>"#,
        r#"<g class="djs-children"><g class="djs-group">"#,
        r#"<g class="djs-element" data-element-id="Flt_Task"><g class="djs-visual"><rect/></g></g>"#,
        r#"</g></g></g>"#,
        r#"</g>"#,
        r#"<g class="djs-group">"#,
        r#"<g class="djs-element" data-element-id="Flt_Flow"><g class="djs-visual"><path/></g></g>"#,
        r#"</g>"#,
        r#"<g class="layer-overlay"><g data-element-id="Flt_Overlay"><g class="djs-visual"/></g></g>"#,
        r#"</svg>"#,
    );

    fn visual_owners(doc: &VectorDocument) -> Vec<String> {
        doc.descendants(doc.document_node())
            .filter(|&node| {
                doc.element(node)
                    .is_some_and(|element| element.has_class("djs-visual"))
            })
            .filter_map(|visual| {
                let owner = doc.parent(visual)?;
                doc.element(owner)?
                    .attribute("data-element-id")
                    .map(str::to_string)
            })
            .collect()
    }

    #[test]
    fn test_removes_visuals_outside_closure() {
        let mut doc = VectorDocument::parse(DIAGRAM).unwrap();

        let removed = filter_to_closure(
            &mut doc,
            &[ElementId::new("Flt_Task")],
            &MarkupConfig::default(),
        );

        assert_eq!(removed, 2);
        assert_eq!(visual_owners(&doc), vec!["Flt_Task", "Flt_Overlay"]);
    }

    #[test]
    fn test_keeps_containers_and_defs() {
        let mut doc = VectorDocument::parse(DIAGRAM).unwrap();
        filter_to_closure(&mut doc, &[], &MarkupConfig::default());

        let svg = doc.to_svg_string().unwrap();
        assert!(svg.contains(r#"<defs><marker id="end"/></defs>"#));
        assert!(svg.contains(r#"data-element-id="Flt_Lane""#));
        assert!(svg.contains(r#"data-element-id="Flt_Task""#));
        assert!(svg.contains(r#"<g class="djs-element" data-element-id="Flt_Flow"/>"#));
    }

    #[test]
    fn test_all_requested_removes_nothing() {
        let mut doc = VectorDocument::parse(DIAGRAM).unwrap();
        let ids = [
            ElementId::new("Flt_Lane"),
            ElementId::new("Flt_Task"),
            ElementId::new("Flt_Flow"),
            ElementId::new("Flt_Not_In_Document"),
        ];

        assert_eq!(filter_to_closure(&mut doc, &ids, &MarkupConfig::default()), 0);
        assert_eq!(doc.to_svg_string().unwrap(), DIAGRAM);
    }

    #[test]
    fn test_candidate_without_visual_is_unchanged() {
        let mut doc = VectorDocument::parse(
            r#"<svg><g class="djs-group"><g data-element-id="Flt_Bare"><rect/></g></g></svg>"#,
        )
        .unwrap();

        assert_eq!(filter_to_closure(&mut doc, &[], &MarkupConfig::default()), 0);
        assert_eq!(
            doc.to_svg_string().unwrap(),
            r#"<svg><g class="djs-group"><g data-element-id="Flt_Bare"><rect/></g></g></svg>"#
        );
    }

    #[test]
    fn test_without_group_class_searches_every_layer() {
        let mut doc = VectorDocument::parse(DIAGRAM).unwrap();
        let markup = MarkupConfig::new("data-element-id", "djs-visual", None);

        let removed = filter_to_closure(&mut doc, &[ElementId::new("Flt_Task")], &markup);

        assert_eq!(removed, 3);
        assert_eq!(visual_owners(&doc), vec!["Flt_Task"]);
    }

    #[test]
    fn test_document_without_layers() {
        let mut doc = VectorDocument::parse("<svg/>").unwrap();
        assert_eq!(filter_to_closure(&mut doc, &[], &MarkupConfig::default()), 0);
    }
}
