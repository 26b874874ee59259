//! Identifier to element lookup.
//!
//! The host editor owns the element model; Cameo only needs to resolve
//! identifiers to geometry-bearing [`Element`]s. [`ElementRegistry`] is that
//! narrow capability and [`InMemoryRegistry`] is a self-contained
//! implementation used by the CLI and tests.

use indexmap::IndexMap;
use log::trace;

use crate::{element::Element, identifier::ElementId};

/// Read access to the elements of the current document.
pub trait ElementRegistry {
    /// Returns the element registered under `id`, if any.
    fn get(&self, id: &ElementId) -> Option<&Element>;

    /// Returns true if an element is registered under `id`.
    fn contains(&self, id: &ElementId) -> bool {
        self.get(id).is_some()
    }
}

impl<R: ElementRegistry + ?Sized> ElementRegistry for &R {
    fn get(&self, id: &ElementId) -> Option<&Element> {
        (**self).get(id)
    }
}

/// An insertion-ordered registry that owns its elements.
///
/// Adding an element links it to its parent (when the parent is registered)
/// and adopts already registered elements naming it as their parent, so
/// elements can be added in any order.
///
/// # Examples
///
/// ```
/// use cameo_core::element::Element;
/// use cameo_core::geometry::{Bounds, Point, Size};
/// use cameo_core::identifier::ElementId;
/// use cameo_core::registry::{ElementRegistry, InMemoryRegistry};
///
/// let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(50.0, 50.0));
///
/// let mut registry = InMemoryRegistry::new();
/// registry.add(Element::shape("Task_1", bounds).with_parent("Process_1"));
/// registry.add(Element::shape("Process_1", bounds));
///
/// let process = registry.get(&ElementId::new("Process_1")).unwrap();
/// assert_eq!(process.children(), &[ElementId::new("Task_1")]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    elements: IndexMap<ElementId, Element>,
    /// Children waiting for their parent to be registered, keyed by parent.
    orphans: IndexMap<ElementId, Vec<ElementId>>,
}

impl InMemoryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `element`, replacing any element with the same identifier.
    ///
    /// A replacement keeps the children linked to the element it replaces.
    pub fn add(&mut self, mut element: Element) {
        let id = element.id();
        trace!(id:% = id; "Registering element");

        if let Some(previous) = self.elements.get(&id) {
            let (children, parent) = (previous.children().to_vec(), previous.parent());
            children.into_iter().for_each(|child| element.add_child(child));
            if let Some(parent) = parent {
                self.unlink(parent, id);
            }
        }

        if let Some(children) = self.orphans.swap_remove(&id) {
            children.into_iter().for_each(|child| element.add_child(child));
        }

        if let Some(parent) = element.parent() {
            match self.elements.get_mut(&parent) {
                Some(parent) => parent.add_child(id),
                None => self.orphans.entry(parent).or_default().push(id),
            }
        }

        self.elements.insert(id, element);
    }

    fn unlink(&mut self, parent: ElementId, child: ElementId) {
        match self.elements.get_mut(&parent) {
            Some(parent) => parent.remove_child(child),
            None => {
                if let Some(waiting) = self.orphans.get_mut(&parent) {
                    waiting.retain(|&id| id != child);
                }
            }
        }
    }

    /// Returns the number of registered elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if no element is registered.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns an iterator over the registered elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }
}

impl ElementRegistry for InMemoryRegistry {
    fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.get(id)
    }
}

impl FromIterator<Element> for InMemoryRegistry {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        let mut registry = Self::new();
        for element in iter {
            registry.add(element);
        }
        registry
    }
}
