//! Per-system timing samples.

use std::time::Duration;

use tracing::info;

use crate::engine::Pass;

/// Timing of one system run within a pass.
#[derive(Debug, Clone)]
pub struct SystemSample {
    /// Tick counter at the time of the run.
    pub tick: u64,
    pub pass: Pass,
    /// Type name of the system.
    pub system: &'static str,
    pub duration: Duration,
}

/// Receives timing samples while metrics are enabled on the engine.
pub trait MetricsSink {
    fn record(&mut self, sample: &SystemSample);
}

/// Default sink: emits each sample as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMetrics;

impl MetricsSink for TracingMetrics {
    fn record(&mut self, sample: &SystemSample) {
        info!(
            tick = sample.tick,
            pass = %sample.pass,
            system = sample.system,
            duration_us = sample.duration.as_micros() as u64,
            "system timing"
        );
    }
}
