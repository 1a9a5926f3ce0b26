//! End-to-end orchestration scenarios.

use maestro_core::{
    Maestro, Requirements, SolutionStatus, TaskStatus,
};
use serde_json::json;

fn todo_requirements() -> Requirements {
    let mut requirements = Requirements::new();
    requirements.insert("frontend".to_string(), json!("React with TypeScript"));
    requirements.insert("backend".to_string(), json!("Python FastAPI"));
    requirements.insert("database".to_string(), json!("PostgreSQL"));
    requirements
}

#[tokio::test]
async fn full_stack_todo_app_runs_the_fixed_pipeline() {
    let maestro = Maestro::new().await;
    let task_id = maestro
        .solve(
            "Build a full-stack todo application with React frontend, Python FastAPI backend, \
             and PostgreSQL database",
            todo_requirements(),
        )
        .await
        .unwrap();

    let report = maestro.task_status(&task_id).await.unwrap();
    assert_eq!(report.status, TaskStatus::Completed);

    let solution = report.solution.unwrap();
    assert_eq!(solution.status, SolutionStatus::Completed);
    assert_eq!(solution.orchestras_used, vec!["search", "build", "validate", "optimize"]);

    // Three domain words matched: frontend, backend, database.
    let blocks = solution.existing_blocks.unwrap();
    assert_eq!(blocks.len(), 3);

    // BuildMaster defaults to the god tier.
    let components = solution.generated_code.unwrap();
    assert_eq!(components.len(), 1);
    assert_eq!(components[0].innovation_level, 0.95);

    assert_eq!(solution.validation.unwrap().overall_quality_score, 0.85);
    assert_eq!(solution.optimizations.unwrap().performance_gain, 0.35);
    assert!(solution.total_execution_time > 0.0);
}

#[tokio::test]
async fn optimize_request_routes_to_optimize_without_generated_code() {
    let maestro = Maestro::new().await;
    let task_id = maestro.solve("optimize my code", Requirements::new()).await.unwrap();

    let solution = maestro.task_status(&task_id).await.unwrap().solution.unwrap();
    // Only the optimize orchestra qualifies, and it ranks first.
    assert_eq!(solution.orchestras_used.first().map(String::as_str), Some("optimize"));
    assert!(solution.optimizations.is_some());
    // No "todo app" trigger, so no generated code even if build had run.
    assert!(solution.generated_code.is_none());
}

#[tokio::test]
async fn unhandled_description_is_a_distinct_outcome() {
    let maestro = Maestro::new().await;
    let task_id = maestro.solve("water the office plants", Requirements::new()).await.unwrap();

    let solution = maestro.task_status(&task_id).await.unwrap().solution.unwrap();
    assert_eq!(solution.status, SolutionStatus::Unhandled);
    assert!(solution.orchestras_used.is_empty());

    let json = serde_json::to_value(&solution).unwrap();
    let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
    for stage_key in ["existing_blocks", "generated_code", "validation", "optimizations"] {
        assert!(!keys.iter().any(|k| *k == stage_key));
    }
}

#[tokio::test]
async fn task_status_is_idempotent_and_byte_stable() {
    let maestro = Maestro::new().await;
    let task_id = maestro
        .solve("create a todo app with a backend", todo_requirements())
        .await
        .unwrap();

    let first = serde_json::to_string(&maestro.task_status(&task_id).await.unwrap()).unwrap();
    let second = serde_json::to_string(&maestro.task_status(&task_id).await.unwrap()).unwrap();
    let third = serde_json::to_string(&maestro.task_status(&task_id).await.unwrap()).unwrap();
    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[tokio::test]
async fn performance_counters_accumulate_across_tasks() {
    let maestro = Maestro::new().await;
    maestro.solve("build me a todo app", Requirements::new()).await.unwrap();
    maestro.solve("build me a todo app", Requirements::new()).await.unwrap();

    let status = maestro.system_status().await;
    assert_eq!(status.completed_tasks, 2);
    assert_eq!(status.active_tasks, 0);
    for orchestra in &status.orchestras {
        // Every orchestra ran twice via the fixed pipeline, successfully.
        assert_eq!(orchestra.performance.tasks_completed, 2);
        assert!((orchestra.performance.success_rate - 1.0).abs() < 1e-12);
        assert!(orchestra.performance.avg_response_time > 0.0);
    }
}

#[tokio::test]
async fn concurrent_tasks_share_only_the_performance_store() {
    let maestro = std::sync::Arc::new(Maestro::new().await);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let maestro = std::sync::Arc::clone(&maestro);
            tokio::spawn(async move {
                maestro.solve("verify and test the service", Requirements::new()).await.unwrap()
            })
        })
        .collect();

    let mut ids: Vec<String> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    // Each task got its own id and its own solution.
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 4);

    // The validate orchestra saw all four executions.
    let status = maestro.system_status().await;
    let validate = status.orchestras.iter().find(|o| o.name == "ValidateMaster").unwrap();
    assert_eq!(validate.performance.tasks_completed, 4);
}
