//! Build orchestra: emits canned code components.
//!
//! Generation only triggers on the "todo app" phrase; the component's code
//! body is one of three fixed templates selected by consciousness level.

use crate::consciousness::ConsciousnessLevel;
use crate::error::OrchestraError;
use crate::orchestras::OrchestraKind;
use crate::routing::CapabilityProfile;
use crate::task::{BuildReport, BuiltComponent, StageOutput, Task};
use crate::templates;
use crate::Orchestra;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

const BUILD_LATENCY: Duration = Duration::from_millis(200);

const BUILD_TRIGGER: &str = "todo app";

const CAPABILITIES: &[&str] = &["generate_code", "create_components", "design_architecture"];

/// Orchestra that returns a templated component.
pub struct BuildOrchestra {
    name: String,
    consciousness_level: ConsciousnessLevel,
    profile: CapabilityProfile,
}

impl BuildOrchestra {
    /// Creates a new build orchestra.
    #[must_use]
    pub fn new(
        name: String,
        consciousness_level: ConsciousnessLevel,
        profile: CapabilityProfile,
    ) -> Self {
        Self { name, consciousness_level, profile }
    }

    fn component_for_level(&self) -> BuiltComponent {
        match self.consciousness_level {
            ConsciousnessLevel::CreativeGod => BuiltComponent {
                component: "revolutionary_todo_architecture".to_string(),
                description: "Self-organizing todo app that predicts user needs".to_string(),
                code: templates::GOD_MODE_TODO.to_string(),
                innovation_level: 0.95,
            },
            ConsciousnessLevel::Transcendent => BuiltComponent {
                component: "transcendent_todo_system".to_string(),
                description: "Highly optimized full-stack todo application".to_string(),
                code: templates::TRANSCENDENT_TODO.to_string(),
                innovation_level: 0.8,
            },
            _ => BuiltComponent {
                component: "practical_todo_app".to_string(),
                description: "Clean, maintainable todo application".to_string(),
                code: templates::PRACTICAL_TODO.to_string(),
                innovation_level: 0.6,
            },
        }
    }
}

#[async_trait]
impl Orchestra for BuildOrchestra {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> OrchestraKind {
        OrchestraKind::Build
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
        debug!(
            orchestra = %self.name,
            task_id = %task.id,
            level = %self.consciousness_level,
            "Build executing"
        );

        // Simulated build time.
        tokio::time::sleep(BUILD_LATENCY).await;

        let mut built_components = Vec::new();
        if task.description.to_lowercase().contains(BUILD_TRIGGER) {
            built_components.push(self.component_for_level());
        }

        debug!(orchestra = %self.name, total_built = built_components.len(), "Build completed");

        Ok(StageOutput::Build(BuildReport {
            total_built: built_components.len(),
            built_components,
            build_strategy: format!("{}_mode", self.consciousness_level),
            confidence: 0.9,
        }))
    }
}
