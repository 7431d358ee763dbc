//! Node query descriptors.
//!
//! A [`Node`] declares the set of component types an entity must hold to take
//! part in a query. Nodes are immutable once built and are meant to be built
//! once and reused: the node cache of a [`ComponentStore`](crate::ComponentStore)
//! is keyed by node **identity**, not by the node's contents. Clones of a node
//! share its identity; two nodes built from the same types do not.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::component::{Component, ComponentTypeId};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a [`Node`], used as the node cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn fresh() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// An immutable, order-irrelevant set of required component types.
///
/// Build nodes once and keep them. Every fresh node adds its own entry to the
/// node cache of each entity it is matched against, and those entries are
/// only dropped when that entity's components change or it is removed. A
/// system that calls [`Node::of`] on every tick grows the cache of every
/// unchanged entity by one entry per tick.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    types: Arc<[ComponentTypeId]>,
}

impl Node {
    /// Build a node from a collection of component type tags.
    ///
    /// Duplicates collapse. Every call mints a new identity, even for a type
    /// set that an existing node already covers. A node with no types matches
    /// no entity.
    pub fn of<I>(types: I) -> Self
    where
        I: IntoIterator<Item = ComponentTypeId>,
    {
        let set: BTreeSet<ComponentTypeId> = types.into_iter().collect();
        Self {
            id: NodeId::fresh(),
            types: set.into_iter().collect(),
        }
    }

    /// Start building a node from Rust component types.
    ///
    /// ```rust
    /// use ecs_component::Node;
    ///
    /// let node = Node::builder().with::<String>().with::<i32>().build();
    /// assert_eq!(node.len(), 2);
    /// ```
    #[must_use]
    pub fn builder() -> NodeBuilder {
        NodeBuilder::default()
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The required component types, sorted by tag.
    #[must_use]
    pub fn types(&self) -> &[ComponentTypeId] {
        &self.types
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    #[must_use]
    pub fn requires(&self, type_id: ComponentTypeId) -> bool {
        self.types.binary_search(&type_id).is_ok()
    }

    /// Structural comparison. Equal type sets do not share a cache lineage;
    /// use the same node (or a clone of it) for that.
    #[must_use]
    pub fn same_types(&self, other: &Node) -> bool {
        self.types == other.types
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Collects component types for a [`Node`].
#[derive(Debug, Default, Clone)]
pub struct NodeBuilder {
    types: Vec<ComponentTypeId>,
}

impl NodeBuilder {
    #[must_use]
    pub fn with<T: Component>(mut self) -> Self {
        self.types.push(T::component_type_id());
        self
    }

    #[must_use]
    pub fn with_type(mut self, type_id: ComponentTypeId) -> Self {
        self.types.push(type_id);
        self
    }

    #[must_use]
    pub fn build(self) -> Node {
        Node::of(self.types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_of_collects_types() {
        let node = Node::of([ComponentTypeId(3), ComponentTypeId(1)]);
        assert_eq!(node.types(), &[ComponentTypeId(1), ComponentTypeId(3)]);
        assert!(node.requires(ComponentTypeId(3)));
        assert!(!node.requires(ComponentTypeId(2)));
    }

    #[test]
    fn test_duplicates_collapse() {
        let node = Node::of([ComponentTypeId(1), ComponentTypeId(1)]);
        assert_eq!(node.len(), 1);
    }

    #[test]
    fn test_empty_node_allowed() {
        let node = Node::of(Vec::new());
        assert!(node.is_empty());
        assert_ne!(node, Node::builder().build());
    }

    #[test]
    fn test_identity_not_structure() {
        let a = Node::of([ComponentTypeId(1), ComponentTypeId(2)]);
        let b = Node::of([ComponentTypeId(2), ComponentTypeId(1)]);
        assert_ne!(a, b);
        assert!(a.same_types(&b));

        let a2 = a.clone();
        assert_eq!(a, a2);
        assert_eq!(a.id(), a2.id());
    }

    #[test]
    fn test_builder_uses_component_tags() {
        let node = Node::builder().with::<String>().with::<i32>().build();
        assert!(node.requires(ComponentTypeId::of::<String>()));
        assert!(node.requires(ComponentTypeId::of::<i32>()));
    }
}
