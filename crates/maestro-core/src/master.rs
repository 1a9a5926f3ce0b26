//! Master orchestrator.
//!
//! `Maestro` owns the orchestra registry, the performance store, the routing
//! rule table, and the task map for its lifetime. Solving is synchronous from
//! the caller's view: the returned task id refers to a plan that has already
//! executed. Stages run strictly sequentially within a task; tasks may run
//! concurrently with each other.

use crate::aggregator::combine_results;
use crate::consciousness::ConsciousnessLevel;
use crate::error::{MaestroError, Result};
use crate::orchestras::{
    BuildOrchestra, OptimizeOrchestra, OrchestraKind, SearchOrchestra, ValidateOrchestra,
};
use crate::planner::{build_plan, ExecutionPlan};
use crate::registry::OrchestraRegistry;
use crate::routing::RoutingConfig;
use crate::stats::{OrchestraStats, PerformanceStore};
use crate::task::{Requirements, Solution, StageResult, StageStatus, Task, TaskStatus};
use crate::Orchestra;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Snapshot of a task returned by status queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskReport {
    /// Task id.
    pub id: String,
    /// Problem description as submitted.
    pub description: String,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Merged solution, present once execution finished.
    pub solution: Option<Solution>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Read-only status of one orchestra.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestraStatus {
    /// Orchestra name.
    pub name: String,
    /// Orchestra kind.
    pub kind: OrchestraKind,
    /// Template-selector level.
    pub consciousness_level: ConsciousnessLevel,
    /// Capability tags.
    pub capabilities: Vec<String>,
    /// Running performance counters.
    pub performance: OrchestraStats,
}

/// Read-only status of the whole system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStatus {
    /// Per-orchestra status in registration order.
    pub orchestras: Vec<OrchestraStatus>,
    /// Tasks currently executing.
    pub active_tasks: usize,
    /// Tasks that have finished.
    pub completed_tasks: usize,
}

/// Master orchestrator coordinating the orchestras.
pub struct Maestro {
    registry: Arc<OrchestraRegistry>,
    stats: Arc<PerformanceStore>,
    routing: RoutingConfig,
    tasks: RwLock<HashMap<String, Task>>,
}

impl Maestro {
    /// Creates a master with the default orchestras and routing table.
    pub async fn new() -> Self {
        MaestroBuilder::default().build().await
    }

    /// Returns a builder for customizing routing and orchestras.
    #[must_use]
    pub fn builder() -> MaestroBuilder {
        MaestroBuilder::default()
    }

    /// Solves a problem: plans, executes every stage, stores the merged
    /// solution, and returns the task id.
    ///
    /// # Errors
    /// Returns `MaestroError::InvalidInput` for an empty description. A plan
    /// with no qualifying orchestras and per-stage failures are not errors;
    /// they are reported inside the solution.
    pub async fn solve(&self, description: &str, requirements: Requirements) -> Result<String> {
        self.solve_with_cancellation(description, requirements, CancellationToken::new()).await
    }

    /// Like [`solve`](Self::solve), but stops scheduling further stages once
    /// the token is cancelled. Stages already run are kept; with an
    /// uncancelled token the behavior is identical to `solve`.
    pub async fn solve_with_cancellation(
        &self,
        description: &str,
        requirements: Requirements,
        cancel: CancellationToken,
    ) -> Result<String> {
        if description.trim().is_empty() {
            return Err(MaestroError::InvalidInput("description must not be empty".to_string()));
        }

        let mut task = Task::new(description.to_string(), requirements);
        let task_id = task.id.clone();
        info!(task_id = %task_id, description = %description, "Solving problem");

        task.status = TaskStatus::InProgress;
        {
            let mut tasks = self.tasks.write().await;
            tasks.insert(task_id.clone(), task.clone());
        }

        let plan = build_plan(&self.registry, &self.routing, &task).await;
        if plan.is_empty() {
            warn!(task_id = %task_id, "No orchestra qualified for the description");
        }

        let results = self.execute_plan(&task, &plan, &cancel).await;
        let solution = combine_results(&results);

        info!(
            task_id = %task_id,
            orchestras_used = ?solution.orchestras_used,
            total_execution_time = solution.total_execution_time,
            "Task completed"
        );

        task.solution = Some(solution);
        task.status = TaskStatus::Completed;
        {
            let mut tasks = self.tasks.write().await;
            tasks.insert(task_id.clone(), task);
        }

        Ok(task_id)
    }

    /// Returns the status snapshot for a task.
    ///
    /// Idempotent: repeated calls for a completed task serialize to
    /// byte-identical content.
    pub async fn task_status(&self, task_id: &str) -> Result<TaskReport> {
        let tasks = self.tasks.read().await;
        tasks
            .get(task_id)
            .map(|task| TaskReport {
                id: task.id.clone(),
                description: task.description.clone(),
                status: task.status,
                solution: task.solution.clone(),
                created_at: task.created_at,
            })
            .ok_or_else(|| MaestroError::TaskNotFound(task_id.to_string()))
    }

    /// Returns the read-only system status: orchestra roster with counters
    /// plus task counts.
    pub async fn system_status(&self) -> SystemStatus {
        let mut orchestras = Vec::new();
        for orchestra in self.registry.all().await {
            orchestras.push(OrchestraStatus {
                name: orchestra.name().to_string(),
                kind: orchestra.kind(),
                consciousness_level: orchestra.consciousness_level(),
                capabilities: orchestra.capabilities().iter().map(|c| (*c).to_string()).collect(),
                performance: self.stats.stats(orchestra.name()).await,
            });
        }

        let tasks = self.tasks.read().await;
        let completed =
            tasks.values().filter(|t| t.status == TaskStatus::Completed).count();
        SystemStatus {
            orchestras,
            active_tasks: tasks.len() - completed,
            completed_tasks: completed,
        }
    }

    /// Runs the plan's stages strictly in order. Stage failures are caught,
    /// recorded, and fed into the performance counters; they never abort the
    /// remaining stages or propagate to the caller.
    async fn execute_plan(
        &self,
        task: &Task,
        plan: &ExecutionPlan,
        cancel: &CancellationToken,
    ) -> Vec<StageResult> {
        let mut results = Vec::with_capacity(plan.stages.len());

        for stage in &plan.stages {
            if cancel.is_cancelled() {
                warn!(task_id = %task.id, stage = %stage.name, "Cancelled before stage");
                break;
            }

            info!(task_id = %task.id, stage = %stage.name, "Executing stage");
            let started = Instant::now();
            let outcome = stage.orchestra.execute(task).await;
            let elapsed = started.elapsed().as_secs_f64();

            let result = match outcome {
                Ok(output) => StageResult {
                    stage: stage.orchestra.kind(),
                    orchestra: stage.orchestra.name().to_string(),
                    status: StageStatus::Success,
                    output: Some(output),
                    error: None,
                    execution_time: elapsed,
                },
                Err(e) => {
                    error!(task_id = %task.id, stage = %stage.name, error = %e, "Stage failed");
                    StageResult {
                        stage: stage.orchestra.kind(),
                        orchestra: stage.orchestra.name().to_string(),
                        status: StageStatus::Error,
                        output: None,
                        error: Some(e.to_string()),
                        execution_time: elapsed,
                    }
                }
            };

            self.stats
                .record(stage.orchestra.name(), result.status == StageStatus::Success, elapsed)
                .await;
            results.push(result);
        }

        results
    }
}

/// Builder for [`Maestro`].
pub struct MaestroBuilder {
    routing: RoutingConfig,
    levels: HashMap<OrchestraKind, ConsciousnessLevel>,
    custom: Vec<Arc<dyn Orchestra>>,
}

impl Default for MaestroBuilder {
    fn default() -> Self {
        Self { routing: RoutingConfig::default(), levels: HashMap::new(), custom: Vec::new() }
    }
}

impl MaestroBuilder {
    /// Replaces the routing rule table.
    #[must_use]
    pub fn routing(mut self, routing: RoutingConfig) -> Self {
        self.routing = routing;
        self
    }

    /// Overrides the consciousness level of one default orchestra.
    #[must_use]
    pub fn consciousness(mut self, kind: OrchestraKind, level: ConsciousnessLevel) -> Self {
        self.levels.insert(kind, level);
        self
    }

    /// Registers a custom orchestra instead of the default roster.
    ///
    /// Once any custom orchestra is given, none of the defaults are created.
    #[must_use]
    pub fn orchestra(mut self, orchestra: Arc<dyn Orchestra>) -> Self {
        self.custom.push(orchestra);
        self
    }

    /// Builds the master and registers its orchestras.
    pub async fn build(self) -> Maestro {
        let registry = Arc::new(OrchestraRegistry::new());

        if self.custom.is_empty() {
            let level = |kind, default| self.levels.get(&kind).copied().unwrap_or(default);
            registry
                .register(Arc::new(SearchOrchestra::new(
                    "SearchMaster".to_string(),
                    level(OrchestraKind::Search, ConsciousnessLevel::Cosmic),
                    self.routing.profile(OrchestraKind::Search),
                )))
                .await;
            registry
                .register(Arc::new(BuildOrchestra::new(
                    "BuildMaster".to_string(),
                    level(OrchestraKind::Build, ConsciousnessLevel::CreativeGod),
                    self.routing.profile(OrchestraKind::Build),
                )))
                .await;
            registry
                .register(Arc::new(ValidateOrchestra::new(
                    "ValidateMaster".to_string(),
                    level(OrchestraKind::Validate, ConsciousnessLevel::Transcendent),
                    self.routing.profile(OrchestraKind::Validate),
                )))
                .await;
            registry
                .register(Arc::new(OptimizeOrchestra::new(
                    "OptimizeMaster".to_string(),
                    level(OrchestraKind::Optimize, ConsciousnessLevel::Omniscient),
                    self.routing.profile(OrchestraKind::Optimize),
                )))
                .await;
        } else {
            for orchestra in self.custom {
                registry.register(orchestra).await;
            }
        }

        Maestro {
            registry,
            stats: Arc::new(PerformanceStore::new()),
            routing: self.routing,
            tasks: RwLock::new(HashMap::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrchestraError;
    use crate::routing::CapabilityProfile;
    use crate::task::{SolutionStatus, StageOutput, ValidationReport};
    use async_trait::async_trait;

    /// Test orchestra whose execution always raises.
    struct FailingOrchestra {
        profile: CapabilityProfile,
    }

    impl FailingOrchestra {
        fn new() -> Self {
            Self {
                profile: CapabilityProfile {
                    keywords: vec!["validate".to_string()],
                    bonus: 0.9,
                    threshold: 0.2,
                },
            }
        }
    }

    #[async_trait]
    impl Orchestra for FailingOrchestra {
        fn name(&self) -> &str {
            "FaultyValidator"
        }

        fn kind(&self) -> OrchestraKind {
            OrchestraKind::Validate
        }

        fn consciousness_level(&self) -> ConsciousnessLevel {
            ConsciousnessLevel::Lucid
        }

        fn capabilities(&self) -> &'static [&'static str] {
            &["test_code"]
        }

        fn capability_profile(&self) -> &CapabilityProfile {
            &self.profile
        }

        async fn execute(
            &self,
            _task: &Task,
        ) -> std::result::Result<StageOutput, OrchestraError> {
            Err(OrchestraError::ExecutionFailed {
                orchestra: "FaultyValidator".to_string(),
                reason: "simulated fault".to_string(),
            })
        }
    }

    /// Test orchestra that always succeeds with a fixed report.
    struct ConstantValidator {
        profile: CapabilityProfile,
    }

    impl ConstantValidator {
        fn new() -> Self {
            Self {
                profile: CapabilityProfile {
                    keywords: vec!["validate".to_string()],
                    bonus: 0.1,
                    threshold: 0.2,
                },
            }
        }
    }

    #[async_trait]
    impl Orchestra for ConstantValidator {
        fn name(&self) -> &str {
            "SteadyValidator"
        }

        fn kind(&self) -> OrchestraKind {
            OrchestraKind::Validate
        }

        fn consciousness_level(&self) -> ConsciousnessLevel {
            ConsciousnessLevel::Lucid
        }

        fn capabilities(&self) -> &'static [&'static str] {
            &["test_code"]
        }

        fn capability_profile(&self) -> &CapabilityProfile {
            &self.profile
        }

        async fn execute(
            &self,
            _task: &Task,
        ) -> std::result::Result<StageOutput, OrchestraError> {
            Ok(StageOutput::Validate(ValidationReport {
                syntax_valid: true,
                functionality_tested: true,
                security_checked: true,
                performance_analyzed: true,
                issues_found: vec![],
                recommendations: vec![],
                overall_quality_score: 0.85,
            }))
        }
    }

    #[tokio::test]
    async fn test_empty_description_is_rejected_before_planning() {
        let maestro = Maestro::new().await;
        let result = maestro.solve("", Requirements::new()).await;
        assert!(matches!(result, Err(MaestroError::InvalidInput(_))));

        let result = maestro.solve("   ", Requirements::new()).await;
        assert!(matches!(result, Err(MaestroError::InvalidInput(_))));

        // Nothing was recorded anywhere.
        let status = maestro.system_status().await;
        assert_eq!(status.completed_tasks, 0);
        assert_eq!(status.orchestras[0].performance.tasks_completed, 0);
    }

    #[tokio::test]
    async fn test_unknown_task_id_is_not_found() {
        let maestro = Maestro::new().await;
        let result = maestro.task_status("no-such-task").await;
        assert!(matches!(result, Err(MaestroError::TaskNotFound(_))));
    }

    #[tokio::test]
    async fn test_unhandled_description_yields_empty_solution() {
        let maestro = Maestro::new().await;
        let task_id = maestro.solve("water the plants", Requirements::new()).await.unwrap();
        let report = maestro.task_status(&task_id).await.unwrap();

        assert_eq!(report.status, TaskStatus::Completed);
        let solution = report.solution.unwrap();
        assert_eq!(solution.status, SolutionStatus::Unhandled);
        assert!(solution.orchestras_used.is_empty());
        assert!(solution.existing_blocks.is_none());
        assert!(solution.generated_code.is_none());
        assert!(solution.validation.is_none());
        assert!(solution.optimizations.is_none());
    }

    #[tokio::test]
    async fn test_stage_failure_is_recorded_not_propagated() {
        let maestro = Maestro::builder()
            .orchestra(Arc::new(FailingOrchestra::new()))
            .orchestra(Arc::new(ConstantValidator::new()))
            .build()
            .await;

        let task_id = maestro.solve("validate this", Requirements::new()).await.unwrap();
        let report = maestro.task_status(&task_id).await.unwrap();
        let solution = report.solution.unwrap();

        // Both stages ran; the failed one still counts as used.
        assert_eq!(solution.status, SolutionStatus::Completed);
        assert_eq!(solution.orchestras_used, vec!["validate", "validate"]);
        // The surviving validator contributed the report.
        assert!(solution.validation.is_some());

        // The failure fed the EMA with success = 0.
        let status = maestro.system_status().await;
        let faulty = status
            .orchestras
            .iter()
            .find(|o| o.name == "FaultyValidator")
            .unwrap();
        assert_eq!(faulty.performance.tasks_completed, 1);
        assert!((faulty.performance.success_rate - 0.9).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_cancellation_skips_remaining_stages() {
        let maestro = Maestro::new().await;
        let cancel = CancellationToken::new();
        cancel.cancel();

        let task_id = maestro
            .solve_with_cancellation("build me a todo app", Requirements::new(), cancel)
            .await
            .unwrap();
        let report = maestro.task_status(&task_id).await.unwrap();
        let solution = report.solution.unwrap();

        // Cancelled before the first stage: nothing ran.
        assert!(solution.orchestras_used.is_empty());
        assert_eq!(solution.status, SolutionStatus::Unhandled);
    }

    #[tokio::test]
    async fn test_system_status_roster() {
        let maestro = Maestro::new().await;
        let status = maestro.system_status().await;

        assert_eq!(status.orchestras.len(), 4);
        assert_eq!(status.active_tasks, 0);
        assert_eq!(status.completed_tasks, 0);

        let names: Vec<&str> = status.orchestras.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["SearchMaster", "BuildMaster", "ValidateMaster", "OptimizeMaster"]);
        assert_eq!(status.orchestras[1].consciousness_level, ConsciousnessLevel::CreativeGod);
        assert_eq!(status.orchestras[0].capabilities.len(), 3);
    }

    #[tokio::test]
    async fn test_consciousness_override() {
        let maestro = Maestro::builder()
            .consciousness(OrchestraKind::Build, ConsciousnessLevel::Lucid)
            .build()
            .await;
        let status = maestro.system_status().await;
        assert_eq!(status.orchestras[1].consciousness_level, ConsciousnessLevel::Lucid);
    }
}
