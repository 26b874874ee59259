//! Closure sets: the flattened answer of a closure service.
//!
//! The closure service itself ([`ClosureResolver`]) and its copy-tree types
//! live in `cameo_core` and are re-exported here.

use indexmap::IndexSet;
use log::{debug, warn};

pub use cameo_core::closure::{ClosureResolver, CopyTree, DescendantClosure, Descriptor};
use cameo_core::{
    element::{ElementRef, ElementRefs},
    identifier::ElementId,
    registry::ElementRegistry,
};

/// An insertion-ordered set of element identifiers.
///
/// Built once per render call from a [`CopyTree`] and not modified afterwards,
/// except for dropping identifiers the registry no longer knows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClosureSet {
    ids: IndexSet<ElementId>,
}

impl ClosureSet {
    /// Flattens a copy tree: branches in tree order, then descriptors in
    /// branch order. Repeated identifiers keep their first position.
    ///
    /// # Examples
    ///
    /// ```
    /// use cameo::closure::{ClosureSet, CopyTree, Descriptor};
    /// use cameo_core::identifier::ElementId;
    ///
    /// let a = ElementId::new("Flat_A");
    /// let b = ElementId::new("Flat_B");
    ///
    /// let mut tree = CopyTree::new();
    /// tree.insert("0".into(), vec![Descriptor::new(a, None)]);
    /// tree.insert("1".into(), vec![Descriptor::new(b, Some(a)), Descriptor::new(a, None)]);
    ///
    /// let set = ClosureSet::from_copy_tree(&tree);
    /// assert_eq!(set.iter().collect::<Vec<_>>(), vec![a, b]);
    /// ```
    pub fn from_copy_tree(tree: &CopyTree) -> Self {
        let ids: IndexSet<ElementId> = tree
            .values()
            .flat_map(|branch| branch.iter().map(Descriptor::id))
            .collect();
        debug!(branches = tree.len(), size = ids.len(); "Copy tree flattened");
        Self { ids }
    }

    /// Returns the number of identifiers.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if the set holds no identifiers.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns true if `id` is part of the closure.
    pub fn contains(&self, id: &ElementId) -> bool {
        self.ids.contains(id)
    }

    /// Iterates over the identifiers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.ids.iter().copied()
    }

    /// Removes identifiers that `registry` cannot resolve, returning how many
    /// were dropped.
    pub fn retain_known<R>(&mut self, registry: &R) -> usize
    where
        R: ElementRegistry + ?Sized,
    {
        let before = self.ids.len();
        self.ids.retain(|id| {
            let known = registry.contains(id);
            if !known {
                warn!(id:% = id; "Dropping closure member unknown to the registry");
            }
            known
        });
        before - self.ids.len()
    }

    /// Converts the set into element references, in insertion order.
    pub fn to_element_refs(&self) -> ElementRefs {
        self.iter().map(ElementRef::Id).collect()
    }
}

impl FromIterator<ElementId> for ClosureSet {
    fn from_iter<I: IntoIterator<Item = ElementId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cameo_core::{
        element::Element,
        geometry::{Bounds, Point, Size},
        registry::InMemoryRegistry,
    };

    fn descriptor(id: &str) -> Descriptor {
        Descriptor::new(ElementId::new(id), None)
    }

    #[test]
    fn test_flatten_keeps_branch_then_descriptor_order() {
        let mut tree = CopyTree::new();
        tree.insert(
            "0".into(),
            vec![descriptor("Set_Sub"), descriptor("Set_Task")],
        );
        tree.insert(
            "1".into(),
            vec![descriptor("Set_Inner"), descriptor("Set_Task")],
        );

        let set = ClosureSet::from_copy_tree(&tree);
        let ids: Vec<String> = set.iter().map(|id| id.to_string()).collect();

        assert_eq!(ids, vec!["Set_Sub", "Set_Task", "Set_Inner"]);
        assert!(set.contains(&ElementId::new("Set_Inner")));
    }

    #[test]
    fn test_empty_tree_is_empty_set() {
        assert!(ClosureSet::from_copy_tree(&CopyTree::new()).is_empty());

        let mut tree = CopyTree::new();
        tree.insert("0".into(), Vec::new());
        assert!(ClosureSet::from_copy_tree(&tree).is_empty());
    }

    #[test]
    fn test_retain_known_drops_stale_ids() {
        let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(1.0, 1.0));
        let registry: InMemoryRegistry = [Element::shape("Set_Known", bounds)].into_iter().collect();

        let mut set: ClosureSet = [ElementId::new("Set_Known"), ElementId::new("Set_Stale")]
            .into_iter()
            .collect();

        assert_eq!(set.retain_known(&registry), 1);
        assert_eq!(set.len(), 1);
        assert_eq!(set.to_element_refs().ids(), vec![ElementId::new("Set_Known")]);
    }
}
