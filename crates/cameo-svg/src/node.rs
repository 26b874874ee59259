//! Node types stored in a [`VectorDocument`](crate::VectorDocument) arena.

/// Index of a node in its document's arena.
///
/// Ids are only meaningful for the document that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// A single `name="value"` pair, stored unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    value: String,
}

impl Attribute {
    /// Creates an attribute from an unescaped value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the qualified attribute name, e.g. `xlink:href`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unescaped attribute value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// An element's qualified name and its attributes in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    name: String,
    attributes: Vec<Attribute>,
}

impl ElementData {
    /// Creates an element without attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Returns the qualified element name, e.g. `svg` or `svg:g`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attributes in document order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Returns the value of the attribute called `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(Attribute::value)
    }

    /// Sets an attribute, replacing an existing value in place or appending
    /// a new attribute at the end.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute::new(name, value)),
        }
    }

    pub(crate) fn push_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    /// Returns true if the whitespace separated `class` attribute contains
    /// `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }
}

/// The `<?xml ...?>` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub(crate) version: String,
    pub(crate) encoding: Option<String>,
    pub(crate) standalone: Option<String>,
}

impl Declaration {
    /// Returns the declared XML version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the declared encoding, if any.
    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }
}

/// Content of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The document node; parent of the prolog and the root element.
    Document,
    Declaration(Declaration),
    /// Raw content of a `<!DOCTYPE ...>`.
    DocType(String),
    /// Raw content of a processing instruction.
    ProcessingInstruction(String),
    Element(ElementData),
    /// Unescaped character data.
    Text(String),
    CData(String),
    Comment(String),
}

impl NodeData {
    /// Returns the element data if this is an element node.
    pub fn as_element(&self) -> Option<&ElementData> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) data: NodeData,
}
