//! Diagram elements and references to them.
//!
//! An [`Element`] is the geometry-bearing handle a host registry hands out for
//! every shape and connection of a diagram. Render calls accept either such a
//! handle or a bare identifier, modelled as [`ElementRef`]; a list of
//! references is collected into [`ElementRefs`], which also wraps a single
//! reference so callers can pass one element or many.

use std::slice;

use indexmap::IndexSet;

use crate::{
    geometry::{Bounds, Point},
    identifier::ElementId,
    registry::ElementRegistry,
};

/// The geometric extent of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A shape occupying a rectangle.
    Shape(Bounds),
    /// A connection drawn through a list of waypoints.
    Connection(Vec<Point>),
}

impl Geometry {
    /// Returns the bounding box of this geometry.
    ///
    /// Connections are bounded by their waypoints; a connection without
    /// waypoints has no bounds.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Self::Shape(bounds) => Some(*bounds),
            Self::Connection(waypoints) => Bounds::from_points(waypoints),
        }
    }
}

/// A resolved diagram element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    id: ElementId,
    geometry: Geometry,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    /// Creates a shape element occupying `bounds`.
    pub fn shape(id: impl Into<ElementId>, bounds: Bounds) -> Self {
        Self::new(id.into(), Geometry::Shape(bounds))
    }

    /// Creates a connection element through `waypoints`.
    pub fn connection(id: impl Into<ElementId>, waypoints: Vec<Point>) -> Self {
        Self::new(id.into(), Geometry::Connection(waypoints))
    }

    fn new(id: ElementId, geometry: Geometry) -> Self {
        Self {
            id,
            geometry,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Sets the parent of this element and returns the modified element.
    pub fn with_parent(mut self, parent: impl Into<ElementId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Returns the identifier of this element.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Returns the geometry of this element.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Returns the bounding box of this element, see [`Geometry::bounds`].
    pub fn bounds(&self) -> Option<Bounds> {
        self.geometry.bounds()
    }

    /// Returns the identifier of the parent element, if any.
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Returns the identifiers of the direct children in insertion order.
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Appends `child`. The registry links each child at most once.
    pub(crate) fn add_child(&mut self, child: ElementId) {
        self.children.push(child);
    }

    pub(crate) fn remove_child(&mut self, child: ElementId) {
        self.children.retain(|&id| id != child);
    }
}

/// A reference to an element, either by identifier or by handle.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementRef {
    /// An identifier that still has to be resolved through a registry.
    Id(ElementId),
    /// An already resolved element handle.
    Handle(Element),
}

impl ElementRef {
    /// Returns the identifier this reference points to.
    pub fn id(&self) -> ElementId {
        match self {
            Self::Id(id) => *id,
            Self::Handle(element) => element.id(),
        }
    }

    /// Resolves this reference to an element handle.
    ///
    /// Handles resolve to themselves; identifiers are looked up in `registry`.
    pub fn resolve<'a, R>(&'a self, registry: &'a R) -> Option<&'a Element>
    where
        R: ElementRegistry + ?Sized,
    {
        match self {
            Self::Id(id) => registry.get(id),
            Self::Handle(element) => Some(element),
        }
    }
}

impl From<ElementId> for ElementRef {
    fn from(id: ElementId) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for ElementRef {
    fn from(id: &str) -> Self {
        Self::Id(ElementId::new(id))
    }
}

impl From<String> for ElementRef {
    fn from(id: String) -> Self {
        Self::Id(ElementId::new(&id))
    }
}

impl From<Element> for ElementRef {
    fn from(element: Element) -> Self {
        Self::Handle(element)
    }
}

impl From<&Element> for ElementRef {
    fn from(element: &Element) -> Self {
        Self::Handle(element.clone())
    }
}

/// An ordered list of element references.
///
/// Conversions exist from a single reference (which becomes a one element
/// list) and from vectors, slices and arrays of anything convertible into
/// [`ElementRef`].
///
/// # Examples
///
/// ```
/// use cameo_core::element::ElementRefs;
/// use cameo_core::identifier::ElementId;
///
/// let one: ElementRefs = "Task_1".into();
/// assert_eq!(one.len(), 1);
///
/// let many: ElementRefs = vec!["Task_1", "Task_2", "Task_1"].into();
/// assert_eq!(many.ids(), vec![ElementId::new("Task_1"), ElementId::new("Task_2")]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementRefs(Vec<ElementRef>);

impl ElementRefs {
    /// Returns the number of references.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no references.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the references.
    pub fn iter(&self) -> slice::Iter<'_, ElementRef> {
        self.0.iter()
    }

    /// Returns the referenced identifiers in order, without duplicates.
    pub fn ids(&self) -> Vec<ElementId> {
        self.0
            .iter()
            .map(ElementRef::id)
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }
}

impl<'a> IntoIterator for &'a ElementRefs {
    type Item = &'a ElementRef;
    type IntoIter = slice::Iter<'a, ElementRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<ElementRef> for ElementRefs {
    fn from_iter<I: IntoIterator<Item = ElementRef>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<ElementRef> for ElementRefs {
    fn from(element: ElementRef) -> Self {
        Self(vec![element])
    }
}

impl From<ElementId> for ElementRefs {
    fn from(id: ElementId) -> Self {
        Self(vec![id.into()])
    }
}

impl From<&str> for ElementRefs {
    fn from(id: &str) -> Self {
        Self(vec![id.into()])
    }
}

impl From<Element> for ElementRefs {
    fn from(element: Element) -> Self {
        Self(vec![element.into()])
    }
}

impl From<&Element> for ElementRefs {
    fn from(element: &Element) -> Self {
        Self(vec![element.into()])
    }
}

impl<T: Into<ElementRef>> From<Vec<T>> for ElementRefs {
    fn from(elements: Vec<T>) -> Self {
        elements.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<ElementRef> + Clone> From<&[T]> for ElementRefs {
    fn from(elements: &[T]) -> Self {
        elements.iter().cloned().map(Into::into).collect()
    }
}

impl<T: Into<ElementRef>, const N: usize> From<[T; N]> for ElementRefs {
    fn from(elements: [T; N]) -> Self {
        elements.into_iter().map(Into::into).collect()
    }
}
