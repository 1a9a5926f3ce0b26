//! Optimize orchestra: always returns the same fixed performance report.

use crate::consciousness::ConsciousnessLevel;
use crate::error::OrchestraError;
use crate::orchestras::OrchestraKind;
use crate::routing::CapabilityProfile;
use crate::task::{OptimizationReport, StageOutput, Task};
use crate::Orchestra;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

const OPTIMIZE_LATENCY: Duration = Duration::from_millis(150);

const CAPABILITIES: &[&str] = &["improve_performance", "reduce_complexity", "enhance_readability"];

/// Orchestra returning an input-independent performance report.
pub struct OptimizeOrchestra {
    name: String,
    consciousness_level: ConsciousnessLevel,
    profile: CapabilityProfile,
}

impl OptimizeOrchestra {
    /// Creates a new optimize orchestra.
    #[must_use]
    pub fn new(
        name: String,
        consciousness_level: ConsciousnessLevel,
        profile: CapabilityProfile,
    ) -> Self {
        Self { name, consciousness_level, profile }
    }
}

#[async_trait]
impl Orchestra for OptimizeOrchestra {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> OrchestraKind {
        OrchestraKind::Optimize
    }

    fn consciousness_level(&self) -> ConsciousnessLevel {
        self.consciousness_level
    }

    fn capabilities(&self) -> &'static [&'static str] {
        CAPABILITIES
    }

    fn capability_profile(&self) -> &CapabilityProfile {
        &self.profile
    }

    async fn execute(&self, task: &Task) -> Result<StageOutput, OrchestraError> {
        debug!(orchestra = %self.name, task_id = %task.id, "Optimize executing");

        // Simulated optimization time.
        tokio::time::sleep(OPTIMIZE_LATENCY).await;

        Ok(StageOutput::Optimize(OptimizationReport {
            performance_improvements: vec![
                "Reduced complexity from O(n²) to O(n log n)".to_string(),
                "Added caching for frequently accessed data".to_string(),
                "Optimized database queries".to_string(),
            ],
            maintainability_improvements: vec![
                "Extracted reusable components".to_string(),
                "Added type annotations throughout".to_string(),
                "Improved variable naming".to_string(),
            ],
            performance_gain: 0.35,
            maintainability_score: 0.9,
        }))
    }
}
