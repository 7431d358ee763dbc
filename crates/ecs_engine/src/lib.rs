//! # ecs_engine
//!
//! The lifecycle half of the ECS, built on [`ecs_component`].
//!
//! An [`Engine`] owns the component store, the active entities, and an ordered
//! list of [`EntitySystem`]s. Each call to [`Engine::update`]:
//!
//! 1. Runs every non-renderer system whose `should_update` accepts the delta.
//! 2. Applies the entity additions queued during the pass.
//! 3. Applies the entity removals queued during the pass.
//!
//! [`Engine::render`] runs the renderer systems and leaves the queues alone.
//!
//! ## Usage
//!
//! ```rust
//! use ecs_engine::{Engine, EngineConfig, EntityEvent};
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! engine
//!     .add_entity_event_listener(|event: &EntityEvent| {
//!         tracing::info!(entity = %event.entity(), added = event.is_added(), "entity event");
//!     })
//!     .unwrap();
//!
//! let player = engine.create_entity_and_add_to_engine().unwrap();
//! engine.add_component(player.id(), 100_u32).unwrap();
//! engine.update(1.0 / 60.0).unwrap();
//! assert_eq!(engine.get_all_entities(), vec![player]);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod factory;
pub mod metrics;
mod registry;
pub mod system;

pub use config::EngineConfig;
pub use engine::{Engine, EngineState, Pass};
pub use error::EngineError;
pub use event::{EntityEvent, ListenerId};
pub use factory::EntityFactory;
pub use metrics::{MetricsSink, SystemSample, TracingMetrics};
pub use system::{AsAny, EntitySystem};

pub use ecs_component;
