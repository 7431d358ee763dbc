//! The engine: entity registry, system passes, and deferred entity mutation.
//!
//! The engine is either idle or running a pass. While a pass runs:
//!
//! 1. Entity additions and removals are queued, not applied. A removed entity
//!    is flagged immediately so systems can see the request.
//! 2. Systems can be looked up but not added or removed. The listener list
//!    is locked.
//! 3. Nested `update` / `render` calls fail.
//!
//! When an update pass completes, queued additions are applied first, then
//! queued removals, each as if requested while idle.

use std::collections::BTreeMap;
use std::time::Instant;

use ecs_component::{
    Component, ComponentStore, Entity, EntityId, EntityMut, IdGenerator, Node, NodeComponents,
    SequentialIds,
};
use tracing::{debug, error, trace};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::event::{EntityEvent, ListenerId, Listeners};
use crate::factory::EntityFactory;
use crate::metrics::{MetricsSink, SystemSample, TracingMetrics};
use crate::registry::SystemRegistry;
use crate::system::EntitySystem;

/// The two kinds of pass an engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    /// Runs non-renderer systems, then flushes deferred entity mutations.
    Update,
    /// Runs renderer systems only.
    Render,
}

impl std::fmt::Display for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pass::Update => f.write_str("update"),
            Pass::Render => f.write_str("render"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Updating(Pass),
}

/// Owns the component store, the systems, and the entity lifecycle.
pub struct Engine {
    config: EngineConfig,
    store: ComponentStore,
    factory: EntityFactory,
    systems: SystemRegistry,
    /// Active entities, by id.
    entities: BTreeMap<EntityId, Entity>,
    /// Entities to add once the current update pass finishes.
    add_queue: Vec<Entity>,
    /// Entities to remove once the current update pass finishes.
    remove_queue: Vec<EntityId>,
    listeners: Listeners,
    metrics: Box<dyn MetricsSink>,
    state: EngineState,
    tick: u64,
}

impl Engine {
    /// Create an engine using sequential ids starting at
    /// [`EngineConfig::first_entity_id`].
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let ids = SequentialIds::starting_at(config.first_entity_id);
        Self::with_id_generator(config, ids)
    }

    /// Create an engine that draws entity ids from `ids`.
    #[must_use]
    pub fn with_id_generator(config: EngineConfig, ids: impl IdGenerator + 'static) -> Self {
        Self {
            config,
            store: ComponentStore::new(),
            factory: EntityFactory::new(ids),
            systems: SystemRegistry::default(),
            entities: BTreeMap::new(),
            add_queue: Vec::new(),
            remove_queue: Vec::new(),
            listeners: Listeners::default(),
            metrics: Box::new(TracingMetrics),
            state: EngineState::Idle,
            tick: 0,
        }
    }

    /// Replace the metrics sink (the default logs through `tracing`).
    #[must_use]
    pub fn with_metrics_sink(mut self, sink: impl MetricsSink + 'static) -> Self {
        self.metrics = Box::new(sink);
        self
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_metrics(&mut self, enabled: bool) {
        self.config.metrics = enabled;
    }

    #[must_use]
    pub fn state(&self) -> EngineState {
        self.state
    }

    #[must_use]
    pub fn is_updating(&self) -> bool {
        matches!(self.state, EngineState::Updating(_))
    }

    /// Number of update passes started so far.
    #[must_use]
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    fn ensure_idle(&self, action: &'static str) -> Result<(), EngineError> {
        match self.state {
            EngineState::Idle => Ok(()),
            EngineState::Updating(pass) => Err(EngineError::Locked { action, pass }),
        }
    }

    // --- systems -----------------------------------------------------------

    /// Append a system; systems run in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Locked`] while a pass is running.
    pub fn add_system<S: EntitySystem>(&mut self, system: S) -> Result<(), EngineError> {
        self.ensure_idle("add a system")?;
        self.systems.register(system);
        debug!(
            system = std::any::type_name::<S>(),
            count = self.systems.len(),
            "system added"
        );
        Ok(())
    }

    /// Remove every system of type `S`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Locked`] while a pass is running and
    /// [`EngineError::UnknownSystem`] if no system of that type is registered.
    pub fn remove_system<S: EntitySystem>(&mut self) -> Result<(), EngineError> {
        self.ensure_idle("remove a system")?;
        if self.systems.unregister::<S>() == 0 {
            return Err(EngineError::UnknownSystem(std::any::type_name::<S>()));
        }
        debug!(system = std::any::type_name::<S>(), "system removed");
        Ok(())
    }

    /// The first registered system of type `S`.
    ///
    /// Works during a pass as well, except for the system currently running:
    /// it is checked out of the registry and already has `&mut self`.
    #[must_use]
    pub fn get_system<S: EntitySystem>(&self) -> Option<&S> {
        self.systems.get::<S>()
    }

    pub fn get_system_mut<S: EntitySystem>(&mut self) -> Option<&mut S> {
        self.systems.get_mut::<S>()
    }

    /// Type names of the registered systems, in run order.
    #[must_use]
    pub fn get_systems(&self) -> Vec<&'static str> {
        self.systems.names()
    }

    // --- entities ----------------------------------------------------------

    /// Create a handle with a fresh id. The entity is not added to the engine,
    /// but components can already be attached to its id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IdsExhausted`] once the id generator runs out.
    pub fn create_entity(&mut self) -> Result<Entity, EngineError> {
        self.factory.create()
    }

    /// Create a handle with a fresh id and add it to the engine.
    ///
    /// # Errors
    ///
    /// See [`Engine::create_entity`] and [`Engine::add_entity`].
    pub fn create_entity_and_add_to_engine(&mut self) -> Result<Entity, EngineError> {
        let entity = self.factory.create()?;
        self.add_entity(entity.clone())?;
        Ok(entity)
    }

    /// Add an entity. While idle it becomes active immediately and listeners
    /// are notified; during a pass it is queued until the update pass ends.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicateEntity`] if the id is already active or
    /// already queued.
    pub fn add_entity(&mut self, mut entity: Entity) -> Result<(), EngineError> {
        let id = entity.id();
        if self.entities.contains_key(&id) || self.add_queue.iter().any(|queued| queued.id() == id) {
            return Err(EngineError::DuplicateEntity(id));
        }
        entity.set_removed(false);

        match self.state {
            EngineState::Updating(pass) => {
                trace!(entity = %id, %pass, "entity addition queued");
                self.add_queue.push(entity);
            }
            EngineState::Idle => {
                self.entities.insert(id, entity.clone());
                debug!(entity = %id, active = self.entities.len(), "entity added");
                self.listeners.dispatch(&EntityEvent::Added(entity));
            }
        }
        Ok(())
    }

    /// Remove an active entity. While idle its components are dropped and
    /// listeners are notified at once; during a pass the entity is flagged as
    /// removed immediately and torn down after the update pass ends.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownEntity`] if the id is not active and
    /// [`EngineError::RemovalPending`] if its removal was already requested
    /// during the current pass.
    pub fn remove_entity(&mut self, id: EntityId) -> Result<(), EngineError> {
        match self.state {
            EngineState::Updating(pass) => {
                let entity = self
                    .entities
                    .get_mut(&id)
                    .ok_or(EngineError::UnknownEntity(id))?;
                if entity.is_removed() {
                    return Err(EngineError::RemovalPending(id));
                }
                entity.set_removed(true);
                trace!(entity = %id, %pass, "entity removal queued");
                self.remove_queue.push(id);
            }
            EngineState::Idle => {
                let mut entity = self
                    .entities
                    .remove(&id)
                    .ok_or(EngineError::UnknownEntity(id))?;
                self.remove_queue.retain(|&queued| queued != id);
                self.store.remove_entity(id);
                entity.set_removed(true);
                debug!(entity = %id, active = self.entities.len(), "entity removed");
                self.listeners.dispatch(&EntityEvent::Removed(entity));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn get_entity_by_id(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Active entities in ascending id order. Entities queued for addition are
    /// not included.
    #[must_use]
    pub fn get_all_entities(&self) -> Vec<Entity> {
        self.entities.values().cloned().collect()
    }

    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn pending_additions(&self) -> usize {
        self.add_queue.len()
    }

    #[must_use]
    pub fn pending_removals(&self) -> usize {
        self.remove_queue.len()
    }

    /// Active entities holding every component type of `node`.
    ///
    /// Ids with matching components but no active handle (components attached
    /// before the entity was added) are skipped.
    pub fn get_entities_by_node(&mut self, node: &Node) -> Vec<Entity> {
        self.store
            .get_entities_by_node(node)
            .into_iter()
            .filter_map(|id| self.entities.get(&id).cloned())
            .collect()
    }

    // --- components --------------------------------------------------------

    /// # Errors
    ///
    /// See [`ComponentStore::add_component`].
    pub fn add_component<T: Component>(
        &mut self,
        entity: EntityId,
        component: T,
    ) -> Result<bool, EngineError> {
        Ok(self.store.add_component(entity, component)?)
    }

    #[must_use]
    pub fn get_component<T: Component>(&self, entity: EntityId) -> Option<&T> {
        self.store.get_component(entity)
    }

    pub fn get_component_mut<T: Component>(&mut self, entity: EntityId) -> Option<&mut T> {
        self.store.get_component_mut(entity)
    }

    pub fn remove_component<T: Component>(&mut self, entity: EntityId) -> Option<T> {
        self.store.remove_component(entity)
    }

    pub fn get_node_components(&mut self, entity: EntityId, node: &Node) -> NodeComponents<'_> {
        self.store.get_node_components(entity, node)
    }

    /// Entity-scoped component access. Works for ids that have not been added
    /// to the engine yet.
    pub fn entity_mut(&mut self, entity: EntityId) -> EntityMut<'_> {
        self.store.entity_mut(entity)
    }

    #[must_use]
    pub fn store(&self) -> &ComponentStore {
        &self.store
    }

    // --- listeners ---------------------------------------------------------

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// # Errors
    ///
    /// Returns [`EngineError::Locked`] while a pass is running.
    pub fn add_entity_event_listener(
        &mut self,
        listener: impl FnMut(&EntityEvent) + 'static,
    ) -> Result<ListenerId, EngineError> {
        self.ensure_idle("add an entity event listener")?;
        Ok(self.listeners.add(listener))
    }

    /// # Errors
    ///
    /// Returns [`EngineError::Locked`] while a pass is running and
    /// [`EngineError::UnknownListener`] if `id` is not registered.
    pub fn remove_entity_event_listener(&mut self, id: ListenerId) -> Result<(), EngineError> {
        self.ensure_idle("remove an entity event listener")?;
        if !self.listeners.remove(id) {
            return Err(EngineError::UnknownListener(id));
        }
        Ok(())
    }

    // --- passes ------------------------------------------------------------

    /// Run every non-renderer system whose `should_update` accepts `delta`,
    /// then apply the entity additions and removals queued meanwhile.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AlreadyRunning`] if called during a pass, and
    /// [`EngineError::SystemFailed`] if a system fails. A failed pass leaves
    /// the engine idle; its queued mutations are applied after the next
    /// successful update.
    pub fn update(&mut self, delta: f32) -> Result<(), EngineError> {
        self.run_pass(Pass::Update, delta)?;
        self.flush_pending()
    }

    /// Run every renderer system whose `should_update` accepts `delta`. Queued
    /// entity mutations are left for the next update.
    ///
    /// # Errors
    ///
    /// As for [`Engine::update`].
    pub fn render(&mut self, delta: f32) -> Result<(), EngineError> {
        self.run_pass(Pass::Render, delta)
    }

    fn run_pass(&mut self, pass: Pass, delta: f32) -> Result<(), EngineError> {
        if let EngineState::Updating(current) = self.state {
            return Err(EngineError::AlreadyRunning(current));
        }
        if pass == Pass::Update {
            self.tick += 1;
        }
        self.state = EngineState::Updating(pass);
        debug!(tick = self.tick, %pass, delta, "pass start");

        let outcome = self.run_systems(pass, delta);
        self.state = EngineState::Idle;

        match &outcome {
            Ok(()) => debug!(tick = self.tick, %pass, "pass complete"),
            Err(err) => error!(tick = self.tick, %pass, error = %err, "pass aborted"),
        }
        outcome
    }

    /// Systems cannot be added or removed during a pass, so slot indices are
    /// stable while this runs.
    fn run_systems(&mut self, pass: Pass, delta: f32) -> Result<(), EngineError> {
        for index in 0..self.systems.len() {
            let Some((name, mut system)) = self.systems.checkout(index) else {
                continue;
            };
            let outcome = self.run_system(&mut *system, name, pass, delta);
            self.systems.checkin(index, system);
            outcome?;
        }
        Ok(())
    }

    fn run_system(
        &mut self,
        system: &mut dyn EntitySystem,
        name: &'static str,
        pass: Pass,
        delta: f32,
    ) -> Result<(), EngineError> {
        if system.is_renderer() != (pass == Pass::Render) {
            return Ok(());
        }
        if !system.should_update(delta) {
            trace!(system = name, %pass, "system skipped");
            return Ok(());
        }

        let started = Instant::now();
        system
            .update(self, delta)
            .map_err(|source| EngineError::SystemFailed { name, source })?;

        if self.config.metrics {
            self.metrics.record(&SystemSample {
                tick: self.tick,
                pass,
                system: name,
                duration: started.elapsed(),
            });
        }
        Ok(())
    }

    fn flush_pending(&mut self) -> Result<(), EngineError> {
        for entity in std::mem::take(&mut self.add_queue) {
            self.add_entity(entity)?;
        }
        for id in std::mem::take(&mut self.remove_queue) {
            self.remove_entity(id)?;
        }
        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("tick", &self.tick)
            .field("entities", &self.entities.len())
            .field("pending_additions", &self.add_queue.len())
            .field("pending_removals", &self.remove_queue.len())
            .field("systems", &self.systems)
            .field("listeners", &self.listeners)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
