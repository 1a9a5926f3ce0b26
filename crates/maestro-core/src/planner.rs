//! Execution plan construction.
//!
//! Probes every registered orchestra against the task, orders qualifying
//! candidates by confidence, and applies the trigger-phrase overrides from
//! the routing rule table. Plans are built fresh per task and discarded
//! after use.

use crate::orchestras::OrchestraKind;
use crate::registry::OrchestraRegistry;
use crate::routing::RoutingConfig;
use crate::task::Task;
use crate::Orchestra;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, info};

/// One stage of an execution plan.
#[derive(Clone)]
pub struct PlannedStage {
    /// Stage name (the orchestra kind string).
    pub name: String,
    /// The orchestra assigned to the stage.
    pub orchestra: Arc<dyn Orchestra>,
}

/// Ordered sequence of stages selected for one task.
#[derive(Clone, Default)]
pub struct ExecutionPlan {
    /// Stages in execution order.
    pub stages: Vec<PlannedStage>,
}

impl ExecutionPlan {
    /// Whether no orchestra qualified for the task.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in execution order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<String> {
        self.stages.iter().map(|s| s.name.clone()).collect()
    }
}

/// Builds the execution plan for a task.
///
/// Trigger phrases short-circuit to their fixed pipeline. Otherwise every
/// orchestra is probed in registration order, qualifying candidates are
/// stable-sorted descending by confidence (ties keep probe order), and the
/// top `max_stages` form the plan. An empty plan means no orchestra
/// qualified; the caller reports that as a distinct outcome.
pub async fn build_plan(
    registry: &OrchestraRegistry,
    config: &RoutingConfig,
    task: &Task,
) -> ExecutionPlan {
    if let Some(stages) = config.trigger_plan(&task.description) {
        let plan = fixed_plan(registry, stages).await;
        info!(task_id = %task.id, stages = ?plan.stage_names(), "Using trigger-phrase plan");
        return plan;
    }

    let mut candidates: Vec<(f64, Arc<dyn Orchestra>)> = Vec::new();
    for orchestra in registry.all().await {
        let probe = orchestra.probe(task);
        debug!(
            orchestra = %orchestra.name(),
            can_handle = probe.can_handle,
            confidence = probe.confidence,
            "Probed orchestra"
        );
        if probe.can_handle {
            candidates.push((probe.confidence, orchestra));
        }
    }

    // sort_by is stable: equal confidences keep probe (registration) order.
    candidates.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    let stages = candidates
        .into_iter()
        .take(config.max_stages)
        .map(|(_, orchestra)| PlannedStage {
            name: orchestra.kind().as_str().to_string(),
            orchestra,
        })
        .collect();

    let plan = ExecutionPlan { stages };
    info!(task_id = %task.id, stages = ?plan.stage_names(), "Built execution plan");
    plan
}

async fn fixed_plan(registry: &OrchestraRegistry, kinds: &[OrchestraKind]) -> ExecutionPlan {
    let mut stages = Vec::with_capacity(kinds.len());
    for kind in kinds {
        if let Some(orchestra) = registry.by_kind(*kind).await {
            stages.push(PlannedStage { name: kind.as_str().to_string(), orchestra });
        } else {
            debug!(kind = %kind, "Trigger plan stage has no registered orchestra, skipping");
        }
    }
    ExecutionPlan { stages }
}
