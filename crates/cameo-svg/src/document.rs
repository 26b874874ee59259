//! The arena-backed document tree.

use log::trace;

use crate::node::{ElementData, Node, NodeData, NodeId};

/// A mutable SVG document.
///
/// Nodes live in a flat arena and refer to each other by [`NodeId`]. Node
/// `0` is always the document node. Detaching a node unlinks it from its
/// parent; the node stays in the arena but is no longer reachable from the
/// document node and is not serialized.
#[derive(Debug, Clone)]
pub struct VectorDocument {
    nodes: Vec<Node>,
}

impl Default for VectorDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorDocument {
    /// Creates a document containing only the document node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Document,
            }],
        }
    }

    /// Returns the document node.
    pub fn document_node(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the first element child of the document node, i.e. `<svg>`.
    pub fn root_element(&self) -> Option<NodeId> {
        self.children(self.document_node())
            .iter()
            .copied()
            .find(|&id| self.element(id).is_some())
    }

    /// Adds `data` as the last child of `parent` and returns its id.
    pub fn append(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            data,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Returns the content of a node.
    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    /// Returns the element data of a node, or `None` for non-element nodes.
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.data(id).as_element()
    }

    /// Returns mutable element data of a node, or `None` for non-element nodes.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes[id.0].data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Returns the parent of a node; `None` for the document node and
    /// detached nodes.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Returns the children of a node in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Returns the element children of a node in document order.
    pub fn child_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.element(child).is_some())
    }

    /// Iterates over all descendants of `id` in document order, excluding
    /// `id` itself.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// Returns the first descendant of `id`, in document order, for which
    /// `predicate` holds.
    pub fn find_descendant<P>(&self, id: NodeId, mut predicate: P) -> Option<NodeId>
    where
        P: FnMut(NodeId, &NodeData) -> bool,
    {
        self.descendants(id)
            .find(|&node| predicate(node, self.data(node)))
    }

    /// Unlinks `id` from its parent.
    ///
    /// The subtree below `id` stays intact and detached with it. Detaching
    /// the document node or an already detached node does nothing.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id.0].parent.take() else {
            return;
        };
        trace!(node = id.0, parent = parent.0; "Detaching node");
        self.nodes[parent.0].children.retain(|&child| child != id);
    }

    /// Returns true if `id` is reachable from the document node.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.document_node() {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Returns the number of nodes in the arena, including detached ones.
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }
}

/// Pre-order iterator over the descendants of a node.
///
/// Created by [`VectorDocument::descendants`].
pub struct Descendants<'a> {
    doc: &'a VectorDocument,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(name: &str) -> NodeData {
        NodeData::Element(ElementData::new(name))
    }

    fn names(doc: &VectorDocument, ids: impl Iterator<Item = NodeId>) -> Vec<String> {
        ids.filter_map(|id| doc.element(id).map(|e| e.name().to_string()))
            .collect()
    }

    /// `<svg><g><rect/><circle/></g><path/></svg>`
    fn sample() -> (VectorDocument, NodeId, NodeId) {
        let mut doc = VectorDocument::new();
        let svg = doc.append(doc.document_node(), element("svg"));
        let g = doc.append(svg, element("g"));
        doc.append(g, element("rect"));
        doc.append(g, element("circle"));
        doc.append(svg, element("path"));
        (doc, svg, g)
    }

    #[test]
    fn test_root_element_skips_prolog() {
        let mut doc = VectorDocument::new();
        doc.append(doc.document_node(), NodeData::Comment(" created by hand ".into()));
        let svg = doc.append(doc.document_node(), element("svg"));

        assert_eq!(doc.root_element(), Some(svg));
    }

    #[test]
    fn test_empty_document_has_no_root() {
        assert_eq!(VectorDocument::new().root_element(), None);
    }

    #[test]
    fn test_descendants_in_document_order() {
        let (doc, svg, _) = sample();
        assert_eq!(
            names(&doc, doc.descendants(svg)),
            vec!["g", "rect", "circle", "path"]
        );
    }

    #[test]
    fn test_find_descendant() {
        let (doc, svg, g) = sample();
        let circle = doc
            .find_descendant(svg, |_, data| {
                data.as_element().is_some_and(|e| e.name() == "circle")
            })
            .unwrap();

        assert_eq!(doc.parent(circle), Some(g));
    }

    #[test]
    fn test_detach_unlinks_subtree() {
        let (mut doc, svg, g) = sample();
        let rect = doc.children(g)[0];

        doc.detach(g);

        assert_eq!(names(&doc, doc.descendants(svg)), vec!["path"]);
        assert!(!doc.is_attached(g));
        assert!(!doc.is_attached(rect));
        assert!(doc.is_attached(svg));
        assert_eq!(doc.arena_len(), 6);
    }

    #[test]
    fn test_detach_twice_is_noop() {
        let (mut doc, svg, g) = sample();
        doc.detach(g);
        doc.detach(g);
        doc.detach(doc.document_node());

        assert_eq!(doc.child_elements(svg).count(), 1);
    }
}
