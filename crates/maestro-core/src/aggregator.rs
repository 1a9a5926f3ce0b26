//! Result aggregation.
//!
//! Merges per-stage execution results into one `Solution`. Each kind
//! contributes under its own fixed key, so the merge needs no conflict
//! resolution; absent or failed stages contribute nothing.

use crate::task::{Solution, SolutionStatus, StageOutput, StageResult, StageStatus};

/// Combines stage results into the final solution for a task.
///
/// `orchestras_used` lists every stage that actually ran (failed stages
/// count); `total_execution_time` sums all stage elapsed times. An empty
/// result set produces an `Unhandled` solution with no stage keys.
#[must_use]
pub fn combine_results(results: &[StageResult]) -> Solution {
    let status = if results.is_empty() {
        SolutionStatus::Unhandled
    } else {
        SolutionStatus::Completed
    };

    let mut solution = Solution {
        status,
        orchestras_used: results.iter().map(|r| r.stage.to_string()).collect(),
        total_execution_time: results.iter().map(|r| r.execution_time).sum(),
        existing_blocks: None,
        generated_code: None,
        validation: None,
        optimizations: None,
    };

    for result in results {
        if result.status != StageStatus::Success {
            continue;
        }
        match &result.output {
            Some(StageOutput::Search(report)) => {
                solution.existing_blocks = Some(report.found_blocks.clone());
            }
            Some(StageOutput::Build(report)) => {
                solution.generated_code = Some(report.built_components.clone());
            }
            Some(StageOutput::Validate(report)) => {
                solution.validation = Some(report.clone());
            }
            Some(StageOutput::Optimize(report)) => {
                solution.optimizations = Some(report.clone());
            }
            None => {}
        }
    }

    solution
}
