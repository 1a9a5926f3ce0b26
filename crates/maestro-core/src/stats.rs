//! Performance counters for orchestras.
//!
//! An injected, explicitly owned store rather than state mutated in place on
//! the orchestras themselves. Updates are serialized behind a `RwLock`, so
//! concurrent tasks using the same orchestra never lose an EMA update.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Smoothing constant for the exponential moving averages.
pub const EMA_ALPHA: f64 = 0.1;

/// Running performance counters for one orchestra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestraStats {
    /// Total executions recorded, success or failure.
    pub tasks_completed: u64,
    /// Exponential moving average over success observations in {0, 1}.
    pub success_rate: f64,
    /// Exponential moving average over elapsed seconds.
    pub avg_response_time: f64,
}

impl Default for OrchestraStats {
    fn default() -> Self {
        Self { tasks_completed: 0, success_rate: 1.0, avg_response_time: 0.0 }
    }
}

impl OrchestraStats {
    /// Folds one observation into the counters.
    pub fn record(&mut self, success: bool, elapsed_secs: f64) {
        self.tasks_completed += 1;
        let observed = if success { 1.0 } else { 0.0 };
        self.success_rate = EMA_ALPHA * observed + (1.0 - EMA_ALPHA) * self.success_rate;
        self.avg_response_time =
            EMA_ALPHA * elapsed_secs + (1.0 - EMA_ALPHA) * self.avg_response_time;
    }
}

/// Store of performance counters, keyed by orchestra name.
#[derive(Debug, Default)]
pub struct PerformanceStore {
    inner: RwLock<HashMap<String, OrchestraStats>>,
}

impl PerformanceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one execution outcome for an orchestra.
    pub async fn record(&self, orchestra: &str, success: bool, elapsed_secs: f64) {
        let mut inner = self.inner.write().await;
        let stats = inner.entry(orchestra.to_string()).or_default();
        stats.record(success, elapsed_secs);

        debug!(
            orchestra = %orchestra,
            success,
            elapsed_secs,
            success_rate = stats.success_rate,
            "Recorded execution outcome"
        );
    }

    /// Returns the counters for one orchestra (defaults if never recorded).
    pub async fn stats(&self, orchestra: &str) -> OrchestraStats {
        let inner = self.inner.read().await;
        inner.get(orchestra).cloned().unwrap_or_default()
    }

    /// Returns a snapshot of all counters.
    pub async fn snapshot(&self) -> HashMap<String, OrchestraStats> {
        let inner = self.inner.read().await;
        inner.clone()
    }
}
