//! Validate orchestra: always returns the same fixed quality report.

use crate::consciousness::ConsciousnessLevel;
use crate::error::OrchestraError;
use crate::orchestras::OrchestraKind;
use crate::routing::CapabilityProfile;
use crate::task::{StageOutput, Task, ValidationReport};
use crate::Orchestra;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

const VALIDATE_LATENCY: Duration = Duration::from_millis(100);

const CAPABILITIES: &[&str] = &["test_code", "check_syntax", "verify_functionality"];

/// Orchestra returning an input-independent quality report.
pub struct ValidateOrchestra {
    name: String,
    consciousness_level: ConsciousnessLevel,
    profile: CapabilityProfile,
}

impl ValidateOrchestra {
    /// Creates a new validate orchestra.
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
impl Orchestra for ValidateOrchestra {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> OrchestraKind {
        OrchestraKind::Validate
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
        debug!(orchestra = %self.name, task_id = %task.id, "Validate executing");

        // Simulated validation time.
        tokio::time::sleep(VALIDATE_LATENCY).await;

        Ok(StageOutput::Validate(ValidationReport {
            syntax_valid: true,
            functionality_tested: true,
            security_checked: true,
            performance_analyzed: true,
            issues_found: Vec::new(),
            recommendations: vec![
                "Add error handling for edge cases".to_string(),
                "Consider adding unit tests".to_string(),
                "Document public interfaces".to_string(),
            ],
            overall_quality_score: 0.85,
        }))
    }
}
