//! Task model and per-stage result types.
//!
//! A `Task` is owned by the master orchestrator for its lifetime: created per
//! incoming request, mutated as each stage finishes, immutable once completed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::orchestras::OrchestraKind;

/// Open-ended key/value requirements attached to a task.
///
/// `serde_json::Map` is BTreeMap-backed by default, so repeated serialization
/// of the same task is byte-identical.
pub type Requirements = serde_json::Map<String, Value>;

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created, no stage has run yet.
    Pending,
    /// Plan execution in progress.
    InProgress,
    /// All planned stages have run and the solution is final.
    Completed,
    /// Task-level failure (unused by the stub orchestras, kept for the model).
    Failed,
}

/// A problem submitted to the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Opaque task id.
    pub id: String,
    /// Free-text problem description.
    pub description: String,
    /// Open-ended requirements mapping.
    pub requirements: Requirements,
    /// Current lifecycle status.
    pub status: TaskStatus,
    /// Merged solution, present once the plan has executed.
    pub solution: Option<Solution>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending task with a fresh v4 id.
    #[must_use]
    pub fn new(description: String, requirements: Requirements) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            description,
            requirements,
            status: TaskStatus::Pending,
            solution: None,
            created_at: Utc::now(),
        }
    }
}

/// Outcome status of a single executed stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// The orchestra produced its result.
    Success,
    /// The orchestra raised; recorded here, not propagated.
    Error,
}

/// Result of one stage of an execution plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageResult {
    /// Stage name (the orchestra kind).
    pub stage: OrchestraKind,
    /// Name of the orchestra that ran.
    pub orchestra: String,
    /// Success or error.
    pub status: StageStatus,
    /// Kind-specific output, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<StageOutput>,
    /// Failure reason, present on error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Elapsed wall time in seconds.
    pub execution_time: f64,
}

/// Kind-specific stage output.
///
/// The variants carry disjoint payloads; the aggregator relies on this to
/// merge stages without conflict resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageOutput {
    /// Search stage: existing blocks found by keyword match.
    Search(SearchReport),
    /// Build stage: generated components.
    Build(BuildReport),
    /// Validate stage: fixed quality report.
    Validate(ValidationReport),
    /// Optimize stage: fixed performance report.
    Optimize(OptimizationReport),
}

/// A reusable code block surfaced by the search orchestra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundBlock {
    /// Block identifier.
    pub id: String,
    /// Human description of the block.
    pub description: String,
    /// Block kind (component, function, class, snippet).
    #[serde(rename = "type")]
    pub block_type: String,
    /// Implementation language of the block.
    pub language: String,
    /// Fixed relevance score for this match.
    pub relevance_score: f64,
}

/// Search stage report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    /// Blocks matched against the description.
    pub found_blocks: Vec<FoundBlock>,
    /// Count of matched blocks.
    pub total_found: usize,
    /// Strategy label (always keyword matching in the stub).
    pub search_strategy: String,
    /// Fixed confidence of the search stub.
    pub confidence: f64,
}

/// A component emitted by the build orchestra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltComponent {
    /// Component identifier.
    pub component: String,
    /// Human description.
    pub description: String,
    /// Canned code body.
    pub code: String,
    /// Template tier constant (0.95 god, 0.8 transcendent, 0.6 practical).
    pub innovation_level: f64,
}

/// Build stage report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildReport {
    /// Generated components (at most one in the stub).
    pub built_components: Vec<BuiltComponent>,
    /// Count of generated components.
    pub total_built: usize,
    /// Template selection mode, derived from the consciousness level.
    pub build_strategy: String,
    /// Fixed confidence of the build stub.
    pub confidence: f64,
}

/// Fixed quality report returned by the validate orchestra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Syntax check outcome.
    pub syntax_valid: bool,
    /// Functional test outcome.
    pub functionality_tested: bool,
    /// Security review outcome.
    pub security_checked: bool,
    /// Performance analysis outcome.
    pub performance_analyzed: bool,
    /// Issues discovered (always empty in the stub).
    pub issues_found: Vec<String>,
    /// Fixed recommendation list.
    pub recommendations: Vec<String>,
    /// Fixed quality score.
    pub overall_quality_score: f64,
}

/// Fixed performance report returned by the optimize orchestra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationReport {
    /// Performance improvement claims.
    pub performance_improvements: Vec<String>,
    /// Maintainability improvement claims.
    pub maintainability_improvements: Vec<String>,
    /// Fixed relative performance gain.
    pub performance_gain: f64,
    /// Fixed maintainability score.
    pub maintainability_score: f64,
}

/// Overall outcome of a solved task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionStatus {
    /// At least one stage ran; the solution body holds the stage results.
    Completed,
    /// No orchestra qualified for the description; the body is empty.
    /// A distinct outcome, not a failure and not a silent success.
    Unhandled,
}

/// Merged, per-stage-keyed result object for a completed task.
///
/// Each orchestra kind contributes under its own fixed key, so the keys are
/// disjoint by construction and no stage can overwrite another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// Completed or unhandled.
    pub status: SolutionStatus,
    /// Stage names that actually ran, success or failure, in plan order.
    pub orchestras_used: Vec<String>,
    /// Sum of all stage elapsed times in seconds.
    pub total_execution_time: f64,
    /// Search contribution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_blocks: Option<Vec<FoundBlock>>,
    /// Build contribution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_code: Option<Vec<BuiltComponent>>,
    /// Validate contribution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationReport>,
    /// Optimize contribution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimizations: Option<OptimizationReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_is_pending() {
        let task = Task::new("build something".to_string(), Requirements::new());
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.solution.is_none());
        assert!(!task.id.is_empty());
    }

    #[test]
    fn test_task_ids_are_unique() {
        let a = Task::new("a".to_string(), Requirements::new());
        let b = Task::new("a".to_string(), Requirements::new());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_found_block_serializes_type_key() {
        let block = FoundBlock {
            id: "react_component_block".to_string(),
            description: "React component template with TypeScript".to_string(),
            block_type: "component".to_string(),
            language: "typescript".to_string(),
            relevance_score: 0.9,
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "component");
    }

    #[test]
    fn test_solution_omits_absent_stage_keys() {
        let solution = Solution {
            status: SolutionStatus::Unhandled,
            orchestras_used: vec![],
            total_execution_time: 0.0,
            existing_blocks: None,
            generated_code: None,
            validation: None,
            optimizations: None,
        };
        let json = serde_json::to_value(&solution).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("existing_blocks"));
        assert!(!obj.contains_key("generated_code"));
        assert!(!obj.contains_key("validation"));
        assert!(!obj.contains_key("optimizations"));
    }
}
