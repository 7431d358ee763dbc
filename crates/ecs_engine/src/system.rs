//! The [`EntitySystem`] capability.

use std::any::Any;

use crate::engine::Engine;

/// Upcast helper so registered systems can be looked up by concrete type.
/// Implemented for every `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A unit of game logic run once per pass.
///
/// The engine hands itself to [`EntitySystem::update`], so a system can query
/// entities, touch components, and request entity additions or removals.
/// Entity mutations requested during a pass are deferred until the pass ends.
///
/// # Examples
///
/// ```rust
/// use ecs_component::Node;
/// use ecs_engine::{Engine, EntitySystem};
///
/// struct Countdown {
///     node: Node,
/// }
///
/// impl EntitySystem for Countdown {
///     fn update(&mut self, engine: &mut Engine, _delta: f32) -> anyhow::Result<()> {
///         for entity in engine.get_entities_by_node(&self.node) {
///             if let Some(left) = engine.get_component_mut::<u32>(entity.id()) {
///                 *left = left.saturating_sub(1);
///             }
///         }
///         Ok(())
///     }
/// }
///
/// let mut engine = Engine::default();
/// let node = Node::builder().with::<u32>().build();
/// engine.add_system(Countdown { node }).unwrap();
///
/// let entity = engine.create_entity_and_add_to_engine().unwrap();
/// engine.add_component(entity.id(), 3_u32).unwrap();
/// engine.update(0.016).unwrap();
/// assert_eq!(engine.get_component::<u32>(entity.id()), Some(&2));
/// ```
pub trait EntitySystem: AsAny {
    /// Gate for this pass. Systems returning `false` are skipped.
    fn should_update(&mut self, _delta: f32) -> bool {
        true
    }

    /// Run the system.
    ///
    /// # Errors
    ///
    /// Any error aborts the remaining systems of the pass and is returned
    /// from [`Engine::update`] / [`Engine::render`].
    fn update(&mut self, engine: &mut Engine, delta: f32) -> anyhow::Result<()>;

    /// Renderer systems run in [`Engine::render`]; all others in
    /// [`Engine::update`].
    fn is_renderer(&self) -> bool {
        false
    }
}
