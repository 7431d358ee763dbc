//! System registry: the ordered list of systems an engine runs.
//!
//! Systems run in registration order. Several systems of the same type may be
//! registered; lookups return the first, removal drops them all.

use std::any::TypeId;

use crate::system::EntitySystem;

/// A registered system together with the type information captured at
/// registration.
pub(crate) struct RegisteredSystem {
    name: &'static str,
    type_id: TypeId,
    /// Empty while the system is checked out to run.
    system: Option<Box<dyn EntitySystem>>,
}

impl std::fmt::Debug for RegisteredSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredSystem")
            .field("name", &self.name)
            .field("running", &self.system.is_none())
            .finish()
    }
}

#[derive(Debug, Default)]
pub(crate) struct SystemRegistry {
    systems: Vec<RegisteredSystem>,
}

impl SystemRegistry {
    pub(crate) fn register<S: EntitySystem>(&mut self, system: S) {
        self.systems.push(RegisteredSystem {
            name: std::any::type_name::<S>(),
            type_id: TypeId::of::<S>(),
            system: Some(Box::new(system)),
        });
    }

    /// Remove every system of type `S`. Returns how many were removed.
    pub(crate) fn unregister<S: EntitySystem>(&mut self) -> usize {
        let before = self.systems.len();
        self.systems
            .retain(|entry| entry.type_id != TypeId::of::<S>());
        before - self.systems.len()
    }

    /// The first system of type `S` that is not currently checked out.
    pub(crate) fn get<S: EntitySystem>(&self) -> Option<&S> {
        self.systems.iter().find_map(|entry| {
            let system = entry.system.as_deref()?;
            system.as_any().downcast_ref::<S>()
        })
    }

    pub(crate) fn get_mut<S: EntitySystem>(&mut self) -> Option<&mut S> {
        self.systems.iter_mut().find_map(|entry| {
            let system = entry.system.as_deref_mut()?;
            system.as_any_mut().downcast_mut::<S>()
        })
    }

    /// Names of every registered system, checked out or not.
    pub(crate) fn names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|entry| entry.name).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.systems.len()
    }

    /// Take the system at `index` out of its slot so it can run with mutable
    /// access to the engine. The slot keeps its place and name.
    pub(crate) fn checkout(&mut self, index: usize) -> Option<(&'static str, Box<dyn EntitySystem>)> {
        let entry = self.systems.get_mut(index)?;
        entry.system.take().map(|system| (entry.name, system))
    }

    /// Return a system taken with [`SystemRegistry::checkout`].
    pub(crate) fn checkin(&mut self, index: usize, system: Box<dyn EntitySystem>) {
        if let Some(entry) = self.systems.get_mut(index) {
            entry.system = Some(system);
        }
    }
}
