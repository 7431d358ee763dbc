//! # ecs_component
//!
//! The storage half of the ECS: what a component is, how components are kept
//! per entity, and how multi-component "node" queries are answered and cached.
//!
//! This crate provides:
//!
//! - [`Component`] trait and [`ComponentTypeId`]: explicit, name-derived type tags.
//! - [`EntityId`], [`Entity`]: identifiers and lifecycle handles.
//! - [`IdGenerator`], [`SequentialIds`]: pluggable id generation.
//! - [`Node`]: immutable, identity-keyed component-type queries.
//! - [`ComponentStore`]: per-entity component maps plus the node cache.

pub mod component;
pub mod entity;
pub mod error;
pub mod node;
pub mod store;

pub use component::{Component, ComponentTypeId};
pub use entity::{Entity, EntityId, IdGenerator, SequentialIds};
pub use error::{ErrorKind, StoreError};
pub use node::{Node, NodeBuilder, NodeId};
pub use store::{ComponentStore, EntityComponents, EntityMut, NodeComponents, NodeMatch};
