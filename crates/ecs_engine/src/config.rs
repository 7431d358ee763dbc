//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Configuration for an [`Engine`](crate::Engine).
///
/// Every field has a default, so a host can deserialize a partial document
/// from whatever format it already uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Report per-system timings to the metrics sink.
    pub metrics: bool,
    /// First id handed out by the default sequential id generator.
    pub first_entity_id: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            metrics: false,
            first_entity_id: 1,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.metrics = enabled;
        self
    }

    #[must_use]
    pub fn with_first_entity_id(mut self, first: u64) -> Self {
        self.first_entity_id = first;
        self
    }
}
