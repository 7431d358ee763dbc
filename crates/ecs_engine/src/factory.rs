//! Entity handle creation.

use ecs_component::{Entity, EntityId, IdGenerator, SequentialIds};

use crate::error::EngineError;

/// Hands out entity handles with ids drawn from an [`IdGenerator`].
///
/// Creating a handle does not register it anywhere.
pub struct EntityFactory {
    ids: Box<dyn IdGenerator>,
}

impl EntityFactory {
    #[must_use]
    pub fn new(ids: impl IdGenerator + 'static) -> Self {
        Self { ids: Box::new(ids) }
    }

    /// A fresh handle, not yet removed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IdsExhausted`] once the generator runs out.
    pub fn create(&mut self) -> Result<Entity, EngineError> {
        self.next_id().map(Entity::new)
    }

    /// # Errors
    ///
    /// As for [`EntityFactory::create`].
    pub fn next_id(&mut self) -> Result<EntityId, EngineError> {
        self.ids.next_id().ok_or(EngineError::IdsExhausted)
    }
}

impl Default for EntityFactory {
    fn default() -> Self {
        Self::new(SequentialIds::new())
    }
}

impl std::fmt::Debug for EntityFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityFactory").finish_non_exhaustive()
    }
}
