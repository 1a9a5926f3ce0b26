//! Routing configuration and capability probing.

pub mod config;

pub use config::{CapabilityProfile, CapabilityRule, RoutingConfig, TriggerPlan};

use serde::{Deserialize, Serialize};

/// Result of asking an orchestra whether it can handle a task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probe {
    /// Whether the orchestra qualifies for the task.
    pub can_handle: bool,
    /// Bonus-adjusted confidence in [0, 1]; 0 when no keyword hit.
    pub confidence: f64,
}

impl Probe {
    /// A probe that declines the task.
    #[must_use]
    pub const fn declined() -> Self {
        Self { can_handle: false, confidence: 0.0 }
    }
}
