//! Per-entity component storage with a memoizing node cache.
//!
//! The [`ComponentStore`] maps each entity to its components, keyed by
//! [`ComponentTypeId`]. Node queries are answered per `(entity, node)` pair and
//! memoized; any component add or remove on an entity drops every cached
//! result for that entity.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::component::{Component, ComponentTypeId};
use crate::entity::EntityId;
use crate::error::StoreError;
use crate::node::{Node, NodeId};

type BoxedComponent = Box<dyn Any + Send + Sync>;

/// Cached outcome of matching one entity against one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeMatch {
    /// The entity held every type the node requires when the entry was built.
    /// Never produced for an empty node.
    Complete,
    /// At least one required type was missing.
    Incomplete,
}

/// The components attached to a single entity.
#[derive(Default)]
pub struct EntityComponents {
    components: HashMap<ComponentTypeId, BoxedComponent>,
}

impl EntityComponents {
    fn insert(&mut self, type_id: ComponentTypeId, component: BoxedComponent) -> Option<BoxedComponent> {
        self.components.insert(type_id, component)
    }

    fn remove(&mut self, type_id: ComponentTypeId) -> Option<BoxedComponent> {
        self.components.remove(&type_id)
    }

    #[must_use]
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.components
            .get(&T::component_type_id())
            .and_then(|component| component.downcast_ref::<T>())
    }

    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .get_mut(&T::component_type_id())
            .and_then(|component| component.downcast_mut::<T>())
    }

    /// Type-erased access by tag.
    #[must_use]
    pub fn get_raw(&self, type_id: ComponentTypeId) -> Option<&(dyn Any + Send + Sync)> {
        self.components.get(&type_id).map(|component| &**component)
    }

    #[must_use]
    pub fn contains(&self, type_id: ComponentTypeId) -> bool {
        self.components.contains_key(&type_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Tags of every component held, in no particular order.
    pub fn types(&self) -> impl Iterator<Item = ComponentTypeId> + '_ {
        self.components.keys().copied()
    }
}

impl std::fmt::Debug for EntityComponents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.components.keys()).finish()
    }
}

#[derive(Debug, Clone, Copy)]
struct RegisteredType {
    rust_type: TypeId,
    rust_name: &'static str,
}

/// Component storage for every entity of one engine.
#[derive(Debug, Default)]
pub struct ComponentStore {
    /// Components per entity. An entry exists from the first add until the
    /// entity is removed, even if all its components are removed meanwhile.
    components: HashMap<EntityId, EntityComponents>,
    /// Memoized node matches per entity.
    node_cache: HashMap<EntityId, HashMap<NodeId, NodeMatch>>,
    /// Tag -> Rust type, filled on first use of each tag.
    registry: HashMap<ComponentTypeId, RegisteredType>,
}

impl ComponentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `component` to `entity`, creating the entity's map if absent.
    ///
    /// Returns `true` if the entity held no component of this type and
    /// `false` if an existing one was replaced.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TypeTagConflict`] if `T`'s tag is already
    /// registered to a different Rust type.
    pub fn add_component<T: Component>(
        &mut self,
        entity: EntityId,
        component: T,
    ) -> Result<bool, StoreError> {
        let type_id = self.register::<T>()?;
        self.invalidate(entity);
        let previous = self
            .components
            .entry(entity)
            .or_default()
            .insert(type_id, Box::new(component));
        Ok(previous.is_none())
    }

    fn register<T: Component>(&mut self) -> Result<ComponentTypeId, StoreError> {
        let type_id = T::component_type_id();
        let registered = *self.registry.entry(type_id).or_insert(RegisteredType {
            rust_type: TypeId::of::<T>(),
            rust_name: std::any::type_name::<T>(),
        });
        if registered.rust_type != TypeId::of::<T>() {
            return Err(StoreError::TypeTagConflict {
                type_id,
                registered: registered.rust_name,
                requested: std::any::type_name::<T>(),
            });
        }
        Ok(type_id)
    }

    /// Whether `T`'s tag is registered to `T` itself. A type whose tag is
    /// held by another Rust type never sees that type's components.
    fn owns_tag<T: Component>(&self) -> bool {
        self.registry
            .get(&T::component_type_id())
            .is_some_and(|registered| registered.rust_type == TypeId::of::<T>())
    }

    #[must_use]
    pub fn get_component<T: Component>(&self, entity: EntityId) -> Option<&T> {
        if !self.owns_tag::<T>() {
            return None;
        }
        self.components.get(&entity)?.get::<T>()
    }

    /// Mutable access. Changing a value never changes which nodes the entity
    /// matches, so the node cache is left alone.
    pub fn get_component_mut<T: Component>(&mut self, entity: EntityId) -> Option<&mut T> {
        if !self.owns_tag::<T>() {
            return None;
        }
        self.components.get_mut(&entity)?.get_mut::<T>()
    }

    #[must_use]
    pub fn has_component<T: Component>(&self, entity: EntityId) -> bool {
        self.owns_tag::<T>() && self.has_component_type(entity, T::component_type_id())
    }

    #[must_use]
    pub fn has_component_type(&self, entity: EntityId, type_id: ComponentTypeId) -> bool {
        self.components
            .get(&entity)
            .is_some_and(|components| components.contains(type_id))
    }

    /// Remove and return the entity's component of type `T`.
    ///
    /// The entity's node cache is dropped whether or not it held one.
    /// A type whose tag belongs to another Rust type removes nothing.
    pub fn remove_component<T: Component>(&mut self, entity: EntityId) -> Option<T> {
        self.invalidate(entity);
        if !self.owns_tag::<T>() {
            return None;
        }
        let components = self.components.get_mut(&entity)?;
        if !components.get_raw(T::component_type_id())?.is::<T>() {
            return None;
        }
        let component = components.remove(T::component_type_id())?;
        component.downcast::<T>().ok().map(|component| *component)
    }

    /// Tag-based variant of [`Self::remove_component`]. Returns `true` if a
    /// component was removed.
    pub fn remove_component_by_type(&mut self, entity: EntityId, type_id: ComponentTypeId) -> bool {
        self.invalidate(entity);
        self.components
            .get_mut(&entity)
            .and_then(|components| components.remove(type_id))
            .is_some()
    }

    /// Drop every component and cached node result for `entity`.
    ///
    /// Returns `true` if the store knew the entity.
    pub fn remove_entity(&mut self, entity: EntityId) -> bool {
        self.node_cache.remove(&entity);
        self.components.remove(&entity).is_some()
    }

    /// The entity's full component map.
    #[must_use]
    pub fn components(&self, entity: EntityId) -> Option<&EntityComponents> {
        self.components.get(&entity)
    }

    /// Tags of every component the entity holds, sorted.
    #[must_use]
    pub fn components_of(&self, entity: EntityId) -> Vec<ComponentTypeId> {
        let mut types: Vec<ComponentTypeId> = self
            .components
            .get(&entity)
            .map(|components| components.types().collect())
            .unwrap_or_default();
        types.sort_unstable();
        types
    }

    #[must_use]
    pub fn component_count(&self, entity: EntityId) -> usize {
        self.components.get(&entity).map_or(0, EntityComponents::len)
    }

    #[must_use]
    pub fn contains_entity(&self, entity: EntityId) -> bool {
        self.components.contains_key(&entity)
    }

    /// Every entity that has had a component added and has not been removed.
    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.components.keys().copied()
    }

    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.components.len()
    }

    /// Match `entity` against `node`, consulting and filling the cache.
    ///
    /// Unknown entities are `Incomplete` and are not cached.
    pub fn node_match(&mut self, entity: EntityId, node: &Node) -> NodeMatch {
        let Some(components) = self.components.get(&entity) else {
            return NodeMatch::Incomplete;
        };
        *self
            .node_cache
            .entry(entity)
            .or_default()
            .entry(node.id())
            .or_insert_with(|| evaluate(components, node))
    }

    /// The cached result for `(entity, node)`, if one is currently held.
    #[must_use]
    pub fn cached_node_match(&self, entity: EntityId, node: &Node) -> Option<NodeMatch> {
        self.node_cache.get(&entity)?.get(&node.id()).copied()
    }

    /// Number of node results currently cached for `entity`.
    #[must_use]
    pub fn cached_node_count(&self, entity: EntityId) -> usize {
        self.node_cache.get(&entity).map_or(0, HashMap::len)
    }

    /// The subset of the entity's components that `node` requires, or an
    /// empty view if any required type is missing.
    pub fn get_node_components(&mut self, entity: EntityId, node: &Node) -> NodeComponents<'_> {
        let components = match self.node_match(entity, node) {
            NodeMatch::Complete => self.components.get(&entity),
            NodeMatch::Incomplete => None,
        };
        NodeComponents {
            node: node.clone(),
            components,
        }
    }

    /// Every known entity whose components satisfy `node`, in ascending id
    /// order.
    ///
    /// This scans all entities; cached results make repeated scans cheap but
    /// there is no per-type index.
    pub fn get_entities_by_node(&mut self, node: &Node) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.components.keys().copied().collect();
        ids.retain(|&id| self.node_match(id, node) == NodeMatch::Complete);
        ids.sort_unstable();
        ids
    }

    /// Scoped access to one entity's components.
    pub fn entity_mut(&mut self, entity: EntityId) -> EntityMut<'_> {
        EntityMut {
            id: entity,
            store: self,
        }
    }

    fn invalidate(&mut self, entity: EntityId) {
        self.node_cache.remove(&entity);
    }
}

fn evaluate(components: &EntityComponents, node: &Node) -> NodeMatch {
    if !node.is_empty() && node.types().iter().all(|&type_id| components.contains(type_id)) {
        NodeMatch::Complete
    } else {
        NodeMatch::Incomplete
    }
}

/// View of the components a node selects from one entity.
///
/// Empty when the entity is missing any of the node's types.
#[derive(Debug)]
pub struct NodeComponents<'a> {
    node: Node,
    components: Option<&'a EntityComponents>,
}

impl<'a> NodeComponents<'a> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_none()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        if self.components.is_some() {
            self.node.len()
        } else {
            0
        }
    }

    /// The selected component of type `T`. `None` if the view is empty or the
    /// node does not require `T`.
    #[must_use]
    pub fn get<T: Component>(&self) -> Option<&'a T> {
        if !self.node.requires(T::component_type_id()) {
            return None;
        }
        self.components?.get::<T>()
    }

    #[must_use]
    pub fn contains(&self, type_id: ComponentTypeId) -> bool {
        self.components.is_some() && self.node.requires(type_id)
    }

    /// Tags of the selected components.
    #[must_use]
    pub fn types(&self) -> &[ComponentTypeId] {
        if self.components.is_some() {
            self.node.types()
        } else {
            &[]
        }
    }

    /// Selected components, type-erased.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentTypeId, &'a (dyn Any + Send + Sync))> + '_ {
        let components = self.components;
        self.types().iter().filter_map(move |&type_id| {
            components
                .and_then(|components| components.get_raw(type_id))
                .map(|component| (type_id, component))
        })
    }
}

/// Entity-scoped facade over a [`ComponentStore`].
#[derive(Debug)]
pub struct EntityMut<'a> {
    id: EntityId,
    store: &'a mut ComponentStore,
}

impl EntityMut<'_> {
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// # Errors
    ///
    /// See [`ComponentStore::add_component`].
    pub fn add_component<T: Component>(&mut self, component: T) -> Result<bool, StoreError> {
        self.store.add_component(self.id, component)
    }

    #[must_use]
    pub fn get_component<T: Component>(&self) -> Option<&T> {
        self.store.get_component(self.id)
    }

    pub fn get_component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.store.get_component_mut(self.id)
    }

    #[must_use]
    pub fn has_component<T: Component>(&self) -> bool {
        self.store.has_component::<T>(self.id)
    }

    pub fn remove_component<T: Component>(&mut self) -> Option<T> {
        self.store.remove_component(self.id)
    }

    pub fn get_node_components(&mut self, node: &Node) -> NodeComponents<'_> {
        self.store.get_node_components(self.id, node)
    }

    #[must_use]
    pub fn components(&self) -> Vec<ComponentTypeId> {
        self.store.components_of(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Marker;

    impl Component for Marker {
        fn type_name() -> &'static str {
            "Marker"
        }
    }

    #[derive(Debug, PartialEq)]
    struct FakeString;

    impl Component for FakeString {
        fn type_name() -> &'static str {
            "String"
        }
    }

    fn full_node() -> Node {
        Node::builder()
            .with::<String>()
            .with::<i32>()
            .with::<Marker>()
            .build()
    }

    fn populated(store: &mut ComponentStore, entity: EntityId) {
        store.add_component(entity, "s".to_string()).unwrap();
        store.add_component(entity, 5_i32).unwrap();
        store.add_component(entity, Marker).unwrap();
    }

    #[test]
    fn test_add_component() {
        let mut store = ComponentStore::new();
        assert!(store.add_component(EntityId(1), "a string".to_string()).unwrap());
        assert!(store.contains_entity(EntityId(1)));
        assert_eq!(store.component_count(EntityId(1)), 1);
    }

    #[test]
    fn test_add_same_type_twice_replaces() {
        let mut store = ComponentStore::new();
        assert!(store.add_component(EntityId(1), "first".to_string()).unwrap());
        assert!(!store.add_component(EntityId(1), "second".to_string()).unwrap());
        assert_eq!(
            store.get_component::<String>(EntityId(1)).map(String::as_str),
            Some("second")
        );
        assert_eq!(store.component_count(EntityId(1)), 1);
    }

    #[test]
    fn test_get_missing_component() {
        let mut store = ComponentStore::new();
        store.add_component(EntityId(1), "a".to_string()).unwrap();
        assert!(store.get_component::<i32>(EntityId(1)).is_none());
        assert!(store.get_component::<String>(EntityId(2)).is_none());
        // Reads never create an entity entry.
        assert!(!store.contains_entity(EntityId(2)));
    }

    #[test]
    fn test_get_component_mut() {
        let mut store = ComponentStore::new();
        store.add_component(EntityId(1), 3_usize).unwrap();
        if let Some(value) = store.get_component_mut::<usize>(EntityId(1)) {
            *value = 9;
        }
        assert_eq!(store.get_component::<usize>(EntityId(1)), Some(&9));
    }

    #[test]
    fn test_tag_conflict_rejected() {
        let mut store = ComponentStore::new();
        store.add_component(EntityId(1), "real".to_string()).unwrap();
        let err = store.add_component(EntityId(1), FakeString).unwrap_err();
        assert!(matches!(err, StoreError::TypeTagConflict { .. }));
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);
        assert_eq!(
            store.get_component::<String>(EntityId(1)).map(String::as_str),
            Some("real")
        );
    }

    #[test]
    fn test_tag_conflict_cannot_reach_registered_type() {
        let mut store = ComponentStore::new();
        store.add_component(EntityId(1), "real".to_string()).unwrap();
        assert!(store.add_component(EntityId(1), FakeString).is_err());

        assert!(!store.has_component::<FakeString>(EntityId(1)));
        assert!(store.get_component::<FakeString>(EntityId(1)).is_none());
        assert!(store.get_component_mut::<FakeString>(EntityId(1)).is_none());
        assert_eq!(store.remove_component::<FakeString>(EntityId(1)), None);

        assert!(store.has_component::<String>(EntityId(1)));
        assert_eq!(
            store.get_component::<String>(EntityId(1)).map(String::as_str),
            Some("real")
        );
        assert_eq!(store.component_count(EntityId(1)), 1);
    }

    #[test]
    fn test_unregistered_type_is_absent() {
        let mut store = ComponentStore::new();
        store.add_component(EntityId(1), 3_i32).unwrap();
        assert!(!store.has_component::<Marker>(EntityId(1)));
        assert_eq!(store.remove_component::<Marker>(EntityId(1)), None);
        assert_eq!(store.component_count(EntityId(1)), 1);
    }

    #[test]
    fn test_empty_node_matches_nothing() {
        let mut store = ComponentStore::new();
        populated(&mut store, EntityId(1));
        let empty = Node::builder().build();

        assert_eq!(store.node_match(EntityId(1), &empty), NodeMatch::Incomplete);
        assert!(store.get_node_components(EntityId(1), &empty).is_empty());
        assert!(store.get_entities_by_node(&empty).is_empty());
    }

    #[test]
    fn test_remove_component() {
        let mut store = ComponentStore::new();
        store.add_component(EntityId(1), "cool".to_string()).unwrap();
        store.add_component(EntityId(1), 5_i32).unwrap();

        assert_eq!(store.remove_component::<i32>(EntityId(1)), Some(5));
        assert!(store.get_component::<String>(EntityId(1)).is_some());
        assert!(store.get_component::<i32>(EntityId(1)).is_none());
        assert_eq!(store.remove_component::<i32>(EntityId(1)), None);
        assert!(!store.remove_component_by_type(EntityId(1), ComponentTypeId::of::<i32>()));
        assert!(store.remove_component_by_type(EntityId(1), ComponentTypeId::of::<String>()));
        // The entity stays known with an empty map.
        assert!(store.contains_entity(EntityId(1)));
        assert_eq!(store.component_count(EntityId(1)), 0);
    }

    #[test]
    fn test_node_components_complete() {
        let mut store = ComponentStore::new();
        populated(&mut store, EntityId(1));
        let node = full_node();

        let view = store.get_node_components(EntityId(1), &node);
        assert!(!view.is_empty());
        assert_eq!(view.len(), 3);
        assert_eq!(view.get::<String>().map(String::as_str), Some("s"));
        assert_eq!(view.get::<i32>(), Some(&5));
        assert_eq!(view.get::<Marker>(), Some(&Marker));
        assert_eq!(view.iter().count(), 3);
    }

    #[test]
    fn test_node_view_hides_unrequired_components() {
        let mut store = ComponentStore::new();
        populated(&mut store, EntityId(1));
        let node = Node::builder().with::<i32>().build();

        let view = store.get_node_components(EntityId(1), &node);
        assert_eq!(view.len(), 1);
        assert_eq!(view.get::<i32>(), Some(&5));
        assert!(view.get::<String>().is_none());
        assert!(!view.contains(ComponentTypeId::of::<String>()));
    }

    #[test]
    fn test_node_components_empty_after_removal() {
        let mut store = ComponentStore::new();
        populated(&mut store, EntityId(1));
        let node = full_node();

        assert!(!store.get_node_components(EntityId(1), &node).is_empty());
        store.remove_component::<String>(EntityId(1));
        let view = store.get_node_components(EntityId(1), &node);
        assert!(view.is_empty());
        assert_eq!(view.len(), 0);
        assert!(view.types().is_empty());
        assert!(view.get::<i32>().is_none());
    }

    #[test]
    fn test_node_cache_is_memoized_and_invalidated() {
        let mut store = ComponentStore::new();
        populated(&mut store, EntityId(1));
        let node = full_node();
        let other = Node::builder().with::<i32>().build();

        assert_eq!(store.cached_node_match(EntityId(1), &node), None);
        assert_eq!(store.node_match(EntityId(1), &node), NodeMatch::Complete);
        assert_eq!(store.node_match(EntityId(1), &other), NodeMatch::Complete);
        assert_eq!(
            store.cached_node_match(EntityId(1), &node),
            Some(NodeMatch::Complete)
        );

        // Any removal drops every cached node for the entity, even unrelated ones.
        store.remove_component_by_type(EntityId(1), ComponentTypeId(12345));
        assert_eq!(store.cached_node_match(EntityId(1), &node), None);
        assert_eq!(store.cached_node_match(EntityId(1), &other), None);
    }

    #[test]
    fn test_add_component_invalidates_incomplete_entry() {
        let mut store = ComponentStore::new();
        store.add_component(EntityId(1), "s".to_string()).unwrap();
        store.add_component(EntityId(1), 5_i32).unwrap();
        let node = full_node();

        assert!(store.get_node_components(EntityId(1), &node).is_empty());
        assert_eq!(
            store.cached_node_match(EntityId(1), &node),
            Some(NodeMatch::Incomplete)
        );

        store.add_component(EntityId(1), Marker).unwrap();
        assert!(!store.get_node_components(EntityId(1), &node).is_empty());
    }

    #[test]
    fn test_structurally_equal_nodes_have_separate_cache_entries() {
        let mut store = ComponentStore::new();
        populated(&mut store, EntityId(1));
        let a = full_node();
        let b = full_node();

        store.node_match(EntityId(1), &a);
        assert!(store.cached_node_match(EntityId(1), &a).is_some());
        assert!(store.cached_node_match(EntityId(1), &b).is_none());
        assert!(store.cached_node_match(EntityId(1), &a.clone()).is_some());
    }

    #[test]
    fn test_fresh_nodes_accumulate_cache_entries() {
        let mut store = ComponentStore::new();
        populated(&mut store, EntityId(1));

        let reused = Node::builder().with::<i32>().build();
        for _ in 0..3 {
            store.get_entities_by_node(&reused);
        }
        assert_eq!(store.cached_node_count(EntityId(1)), 1);

        for _ in 0..3 {
            store.get_entities_by_node(&Node::builder().with::<i32>().build());
        }
        assert_eq!(store.cached_node_count(EntityId(1)), 4);

        store.add_component(EntityId(1), 1.5_f32).unwrap();
        assert_eq!(store.cached_node_count(EntityId(1)), 0);
    }

    #[test]
    fn test_unknown_entity_is_incomplete_and_uncached() {
        let mut store = ComponentStore::new();
        let node = full_node();
        assert!(store.get_node_components(EntityId(7), &node).is_empty());
        assert_eq!(store.cached_node_match(EntityId(7), &node), None);
    }

    #[test]
    fn test_entities_by_node() {
        let mut store = ComponentStore::new();
        populated(&mut store, EntityId(3));
        populated(&mut store, EntityId(1));
        store.add_component(EntityId(2), 7_i32).unwrap();
        let node = full_node();

        assert_eq!(store.get_entities_by_node(&node), vec![EntityId(1), EntityId(3)]);

        let ints = Node::builder().with::<i32>().build();
        assert_eq!(
            store.get_entities_by_node(&ints),
            vec![EntityId(1), EntityId(2), EntityId(3)]
        );

        store.remove_component::<Marker>(EntityId(3));
        assert_eq!(store.get_entities_by_node(&node), vec![EntityId(1)]);
    }

    #[test]
    fn test_remove_entity() {
        let mut store = ComponentStore::new();
        populated(&mut store, EntityId(1));
        let node = full_node();
        store.node_match(EntityId(1), &node);

        assert!(store.remove_entity(EntityId(1)));
        assert!(!store.contains_entity(EntityId(1)));
        assert_eq!(store.cached_node_match(EntityId(1), &node), None);
        assert!(store.get_entities_by_node(&node).is_empty());
        assert!(!store.remove_entity(EntityId(1)));
    }

    #[test]
    fn test_components_of_is_sorted() {
        let mut store = ComponentStore::new();
        populated(&mut store, EntityId(1));
        let types = store.components_of(EntityId(1));
        assert_eq!(types.len(), 3);
        assert!(types.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(store.components_of(EntityId(9)).is_empty());
    }

    #[test]
    fn test_entity_mut_facade() {
        let mut store = ComponentStore::new();
        let node = Node::builder().with::<i32>().with::<Marker>().build();
        {
            let mut entity = store.entity_mut(EntityId(4));
            assert_eq!(entity.id(), EntityId(4));
            assert!(entity.add_component(1_i32).unwrap());
            assert!(entity.get_node_components(&node).is_empty());
            assert!(entity.add_component(Marker).unwrap());
            assert!(!entity.get_node_components(&node).is_empty());
            *entity.get_component_mut::<i32>().unwrap() += 1;
            assert_eq!(entity.get_component::<i32>(), Some(&2));
            assert!(entity.has_component::<Marker>());
            assert_eq!(entity.remove_component::<Marker>(), Some(Marker));
            assert_eq!(entity.components(), vec![ComponentTypeId::of::<i32>()]);
        }
        assert_eq!(store.get_entities_by_node(&node), Vec::<EntityId>::new());
    }
}
