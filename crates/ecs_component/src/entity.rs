//! Entity identifiers, handles, and id generation.
//!
//! An [`EntityId`] is a lightweight `u64` identifier with no inherent data.
//! An [`Entity`] is the handle an engine keeps for a registered id: the id plus
//! a `removed` flag that becomes visible as soon as removal is requested, even
//! when the removal itself is deferred.

use serde::{Deserialize, Serialize};

/// A unique entity identifier.
///
/// Entities are pure identifiers; components are attached to them to give
/// them meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl EntityId {
    /// The null / invalid entity sentinel.
    pub const INVALID: EntityId = EntityId(0);

    /// Create an entity id from a raw `u64` identifier.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` identifier.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns `true` if this is a valid (non-zero) id.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle for an entity tracked by an engine.
///
/// Two handles are equal when their ids are equal; the `removed` flag is
/// lifecycle state, not identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
    removed: bool,
}

impl Entity {
    /// Create a handle for `id`. The handle is not registered anywhere yet.
    #[must_use]
    pub const fn new(id: EntityId) -> Self {
        Self { id, removed: false }
    }

    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Returns `true` once removal of this entity has been requested.
    #[must_use]
    pub const fn is_removed(&self) -> bool {
        self.removed
    }

    pub fn set_removed(&mut self, removed: bool) {
        self.removed = removed;
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity {}

impl std::hash::Hash for Entity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.id)
    }
}

/// Source of fresh entity ids.
///
/// Each engine owns its own generator, so two engines never share counters.
/// Any `FnMut() -> EntityId` closure is a generator.
pub trait IdGenerator {
    /// Produce the next id, or `None` once the generator has run out.
    /// Implementations must not repeat an id they have already produced.
    fn next_id(&mut self) -> Option<EntityId>;
}

impl<F> IdGenerator for F
where
    F: FnMut() -> EntityId,
{
    fn next_id(&mut self) -> Option<EntityId> {
        Some(self())
    }
}

/// Produces monotonically increasing entity ids, up to and including
/// `u64::MAX`.
#[derive(Debug)]
pub struct SequentialIds {
    /// `None` once `u64::MAX` has been handed out.
    next_id: Option<u64>,
}

impl SequentialIds {
    /// Creates a new generator. IDs start at 1 (0 is reserved for [`EntityId::INVALID`]).
    #[must_use]
    pub fn new() -> Self {
        Self { next_id: Some(1) }
    }

    /// Creates a generator whose first id is `first`. A `first` of zero is
    /// bumped to 1 so the invalid sentinel is never handed out.
    #[must_use]
    pub fn starting_at(first: u64) -> Self {
        Self {
            next_id: Some(first.max(1)),
        }
    }

    /// Returns the id the next call to [`IdGenerator::next_id`] will produce.
    #[must_use]
    pub fn peek(&self) -> Option<EntityId> {
        self.next_id.map(EntityId)
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> Option<EntityId> {
        let id = self.next_id?;
        self.next_id = id.checked_add(1);
        Some(EntityId(id))
    }
}
