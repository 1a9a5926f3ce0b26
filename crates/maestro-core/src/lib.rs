//! Maestro orchestration core.
//!
//! A master orchestrator routes free-text problem descriptions to a fixed set
//! of named worker stubs ("orchestras") by keyword-overlap scoring, runs the
//! selected stages sequentially, and merges their canned outputs into one
//! solution object. The routing constants live in a declarative rule table
//! ([`RoutingConfig`]); the only cross-task shared state is the injected
//! performance-counter store ([`PerformanceStore`]).

pub mod aggregator;
pub mod consciousness;
pub mod error;
pub mod master;
pub mod orchestras;
pub mod planner;
pub mod registry;
pub mod routing;
pub mod stats;
pub mod task;
pub mod templates;

use async_trait::async_trait;

pub use aggregator::combine_results;
pub use consciousness::ConsciousnessLevel;
pub use error::{MaestroError, OrchestraError, Result};
pub use master::{Maestro, MaestroBuilder, OrchestraStatus, SystemStatus, TaskReport};
pub use orchestras::{
    BuildOrchestra, OptimizeOrchestra, OrchestraKind, SearchOrchestra, ValidateOrchestra,
};
pub use planner::{build_plan, ExecutionPlan, PlannedStage};
pub use registry::OrchestraRegistry;
pub use routing::{CapabilityProfile, CapabilityRule, Probe, RoutingConfig, TriggerPlan};
pub use stats::{OrchestraStats, PerformanceStore, EMA_ALPHA};
pub use task::{
    BuildReport, BuiltComponent, FoundBlock, OptimizationReport, Requirements, SearchReport,
    Solution, SolutionStatus, StageOutput, StageResult, StageStatus, Task, TaskStatus,
    ValidationReport,
};

/// A named worker stub exposing a capability probe and an execute operation.
#[async_trait]
pub trait Orchestra: Send + Sync {
    /// Returns the orchestra's display name.
    fn name(&self) -> &str;

    /// Returns the orchestra's kind.
    fn kind(&self) -> OrchestraKind;

    /// Returns the orchestra's consciousness level (template selector).
    fn consciousness_level(&self) -> ConsciousnessLevel;

    /// Returns the orchestra's capability tags.
    fn capabilities(&self) -> &'static [&'static str];

    /// Returns the probe inputs assigned to this orchestra at construction.
    fn capability_profile(&self) -> &CapabilityProfile;

    /// Scores the task against this orchestra's capability profile.
    fn probe(&self, task: &Task) -> Probe {
        self.capability_profile().probe(&task.description)
    }

    /// Executes the task and returns the kind-specific output.
    ///
    /// # Errors
    /// Returns an `OrchestraError` if execution fails; the caller records the
    /// failure as a stage result and keeps going.
    async fn execute(&self, task: &Task) -> std::result::Result<StageOutput, OrchestraError>;
}
