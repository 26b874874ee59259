//! Copy trees and closure services.
//!
//! When a user copies a selection, the editor does not copy only the selected
//! elements: children of selected containers come along too. The service that
//! computes this answers with a [`CopyTree`], an ordered map from branch name
//! to the [`Descriptor`]s in that branch. diagram-js names branches after the
//! nesting depth (`"0"`, `"1"`, ...), and [`DescendantClosure`] follows that
//! convention.

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};

use crate::{element::Element, identifier::ElementId, registry::ElementRegistry};

/// One element of a copy tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    id: ElementId,
    parent: Option<ElementId>,
}

impl Descriptor {
    /// Creates a descriptor for `id` with an optional parent.
    pub fn new(id: ElementId, parent: Option<ElementId>) -> Self {
        Self { id, parent }
    }

    /// Returns the identifier of the described element.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Returns the identifier of the parent element, if any.
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }
}

/// Branch name to descriptors, in the order the service produced them.
pub type CopyTree = IndexMap<String, Vec<Descriptor>>;

/// Expands a set of elements into everything a copy of them would include.
pub trait ClosureResolver {
    /// Builds the copy tree for `elements`.
    ///
    /// `registry` resolves identifiers the service encounters while walking
    /// the element hierarchy.
    fn create_tree(&self, elements: &[&Element], registry: &dyn ElementRegistry) -> CopyTree;
}

/// A closure service that includes every descendant of the given elements.
///
/// Branch `"0"` holds the given elements, branch `"1"` their children, and so
/// on. Each element appears in at most one branch, the shallowest that reaches
/// it. Children that are missing from the registry are still listed but not
/// descended into.
///
/// # Examples
///
/// ```
/// use cameo_core::closure::{ClosureResolver, DescendantClosure};
/// use cameo_core::element::Element;
/// use cameo_core::geometry::{Bounds, Point, Size};
/// use cameo_core::identifier::ElementId;
/// use cameo_core::registry::{ElementRegistry, InMemoryRegistry};
///
/// let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
/// let registry: InMemoryRegistry = [
///     Element::shape("Lane", bounds),
///     Element::shape("Task_A", bounds).with_parent("Lane"),
///     Element::shape("Task_B", bounds).with_parent("Lane"),
/// ]
/// .into_iter()
/// .collect();
///
/// let lane = registry.get(&ElementId::new("Lane")).unwrap();
/// let tree = DescendantClosure.create_tree(&[lane], &registry);
///
/// assert_eq!(tree["0"].len(), 1);
/// assert_eq!(tree["1"].len(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DescendantClosure;

impl ClosureResolver for DescendantClosure {
    fn create_tree(&self, elements: &[&Element], registry: &dyn ElementRegistry) -> CopyTree {
        let mut tree = CopyTree::new();
        let mut visited: IndexSet<ElementId> = IndexSet::new();
        let mut level: Vec<(ElementId, Option<ElementId>)> = elements
            .iter()
            .map(|element| (element.id(), element.parent()))
            .collect();

        let mut depth = 0usize;
        while !level.is_empty() {
            let mut branch = Vec::new();
            let mut next = Vec::new();

            for (id, parent) in level {
                if !visited.insert(id) {
                    continue;
                }
                branch.push(Descriptor::new(id, parent));

                match registry.get(&id) {
                    Some(element) => {
                        next.extend(element.children().iter().map(|child| (*child, Some(id))));
                    }
                    None => trace!(id:% = id; "Closure member not in registry"),
                }
            }

            if !branch.is_empty() {
                trace!(depth = depth, size = branch.len(); "Closure branch collected");
                tree.insert(depth.to_string(), branch);
            }

            level = next;
            depth += 1;
        }

        debug!(branches = tree.len(), elements = visited.len(); "Copy tree created");
        tree
    }
}
