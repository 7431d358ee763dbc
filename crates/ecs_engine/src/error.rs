//! Engine error types.

use ecs_component::{EntityId, ErrorKind, StoreError};

use crate::engine::Pass;
use crate::event::ListenerId;

/// Errors raised by the [`Engine`](crate::Engine).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// `update` or `render` was called while a pass was already running.
    #[error("engine is already in the {0} pass")]
    AlreadyRunning(Pass),

    /// The id is already active or already queued for addition.
    #[error("entity {0} already added")]
    DuplicateEntity(EntityId),

    /// The id is not active in this engine.
    #[error("entity {0} not added to this engine")]
    UnknownEntity(EntityId),

    /// Removal of the id was already requested during the current pass.
    #[error("entity {0} is already pending removal")]
    RemovalPending(EntityId),

    /// The entity id generator has no ids left.
    #[error("entity id generator is exhausted")]
    IdsExhausted,

    /// No system of the requested type is registered.
    #[error("no system of type '{0}' registered")]
    UnknownSystem(&'static str),

    /// The listener handle is not registered.
    #[error("no entity event listener {0}")]
    UnknownListener(ListenerId),

    /// The operation is not allowed while a pass is running.
    #[error("cannot {action} while the engine is running a {pass} pass")]
    Locked { action: &'static str, pass: Pass },

    /// A system returned an error; the pass was aborted.
    #[error("system '{name}' failed: {source}")]
    SystemFailed {
        name: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Classify the error. A failed system is classified by its own error
    /// when that is an engine error, and as an invalid operation otherwise.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::UnknownListener(_) => ErrorKind::InvalidArgument,
            EngineError::Store(err) => err.kind(),
            EngineError::SystemFailed { source, .. } => source
                .downcast_ref::<EngineError>()
                .map_or(ErrorKind::InvalidOperation, EngineError::kind),
            EngineError::AlreadyRunning(_)
            | EngineError::DuplicateEntity(_)
            | EngineError::UnknownEntity(_)
            | EngineError::RemovalPending(_)
            | EngineError::UnknownSystem(_)
            | EngineError::IdsExhausted
            | EngineError::Locked { .. } => ErrorKind::InvalidOperation,
        }
    }
}
