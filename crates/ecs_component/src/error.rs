//! Storage-layer error types.

use crate::component::ComponentTypeId;

/// Broad classification shared by every error in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required argument was missing or malformed.
    InvalidArgument,
    /// The call is not allowed in the current state.
    InvalidOperation,
}

/// Errors raised by the [`ComponentStore`](crate::ComponentStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Two different Rust types declared the same component name.
    #[error(
        "component tag {type_id} is registered to '{registered}', cannot reuse it for '{requested}'"
    )]
    TypeTagConflict {
        type_id: ComponentTypeId,
        registered: &'static str,
        requested: &'static str,
    },
}

impl StoreError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}
