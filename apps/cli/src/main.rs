//! Maestro CLI - Command-line interface for the orchestration system
//!
//! A thin adapter over the core's two operations (solve, task status) plus
//! the read-only system-status query, and a scripted demo scenario.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use maestro_core::{
    ConsciousnessLevel, Maestro, MaestroBuilder, OrchestraKind, Requirements, RoutingConfig,
    Solution, SolutionStatus, SystemStatus, TaskReport,
};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Maestro - AI orchestration demo system
#[derive(Parser, Debug)]
#[command(
    name = "maestro",
    author,
    version,
    about = "Maestro - keyword-routed AI orchestration demo"
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// Path to a routing rule-table TOML file (defaults are built in)
    #[arg(long, global = true)]
    routing: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve a problem description and print the merged solution
    Solve {
        /// Free-text problem description
        description: String,

        /// Requirement entries as key=value pairs (repeatable)
        #[arg(long = "req", value_parser = parse_key_val)]
        requirements: Vec<(String, String)>,

        /// Consciousness level for the build orchestra
        /// (lucid, transcendent, cosmic, omniscient, creative_god)
        #[arg(long)]
        consciousness: Option<String>,

        /// Output raw JSON instead of the human summary
        #[arg(long)]
        json: bool,
    },

    /// Show the orchestra roster and performance counters
    System {
        /// Output raw JSON instead of the human summary
        #[arg(long)]
        json: bool,
    },

    /// Run the scripted full-stack todo-app demo scenario
    Demo,
}

fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("invalid key=value pair: '{s}'"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let maestro = builder(args.routing.as_deref())?.build().await;

    match args.command {
        Command::Solve { description, requirements, consciousness, json } => {
            // A --consciousness flag needs the orchestra rebuilt with the
            // requested level, so handle it before solving.
            let maestro = match consciousness {
                Some(level) => {
                    let level = ConsciousnessLevel::from_str(&level)
                        .ok_or_else(|| anyhow!("unknown consciousness level: '{level}'"))?;
                    builder(args.routing.as_deref())?
                        .consciousness(OrchestraKind::Build, level)
                        .build()
                        .await
                }
                None => maestro,
            };

            let task_id = maestro.solve(&description, to_requirements(requirements)).await?;
            let report = maestro.task_status(&task_id).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Command::System { json } => {
            let status = maestro.system_status().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print_system_status(&status);
            }
        }
        Command::Demo => run_demo(&maestro).await?,
    }

    Ok(())
}

fn init_logging(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => return Err(anyhow!("unknown log level: '{other}'")),
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;
    Ok(())
}

fn builder(routing: Option<&Path>) -> Result<MaestroBuilder> {
    let mut builder = Maestro::builder();
    if let Some(path) = routing {
        let routing = RoutingConfig::load(path)
            .with_context(|| format!("failed to load routing config from {}", path.display()))?;
        builder = builder.routing(routing);
    }
    Ok(builder)
}

fn to_requirements(pairs: Vec<(String, String)>) -> Requirements {
    let mut requirements = Requirements::new();
    for (key, value) in pairs {
        // Values that parse as JSON keep their type; everything else is a string.
        let value = serde_json::from_str(&value).unwrap_or(serde_json::Value::String(value));
        requirements.insert(key, value);
    }
    requirements
}

fn print_report(report: &TaskReport) {
    println!("{} {}", "Task:".bold(), report.id);
    println!("{} {}", "Description:".bold(), report.description);

    let Some(solution) = &report.solution else {
        println!("{}", "No solution recorded".yellow());
        return;
    };
    print_solution(solution);
}

fn print_solution(solution: &Solution) {
    match solution.status {
        SolutionStatus::Unhandled => {
            println!("{}", "No orchestra could handle this description".yellow().bold());
            return;
        }
        SolutionStatus::Completed => {
            println!("{}", "Solution completed".green().bold());
        }
    }

    println!(
        "{} {} ({:.2}s total)",
        "Orchestras used:".bold(),
        solution.orchestras_used.join(", "),
        solution.total_execution_time
    );

    if let Some(blocks) = &solution.existing_blocks {
        println!("{} {}", "Existing blocks found:".bold(), blocks.len());
        for block in blocks {
            println!("  - {} ({}, relevance {:.2})", block.id, block.language, block.relevance_score);
        }
    }

    if let Some(components) = &solution.generated_code {
        println!("{} {}", "Generated components:".bold(), components.len());
        for component in components {
            println!(
                "  - {}: {} (innovation {:.2})",
                component.component, component.description, component.innovation_level
            );
        }
    }

    if let Some(validation) = &solution.validation {
        println!(
            "{} quality score {:.0}%",
            "Validation:".bold(),
            validation.overall_quality_score * 100.0
        );
        for recommendation in &validation.recommendations {
            println!("  - {recommendation}");
        }
    }

    if let Some(optimizations) = &solution.optimizations {
        println!(
            "{} {:.0}% performance gain",
            "Optimizations:".bold(),
            optimizations.performance_gain * 100.0
        );
        for improvement in &optimizations.performance_improvements {
            println!("  - {improvement}");
        }
    }
}

fn print_system_status(status: &SystemStatus) {
    println!("{}", "System status".bold());
    println!(
        "  active tasks: {}, completed tasks: {}",
        status.active_tasks, status.completed_tasks
    );
    for orchestra in &status.orchestras {
        println!(
            "  {} [{}] level={} tasks={} success={:.0}% avg={:.3}s",
            orchestra.name.cyan(),
            orchestra.kind,
            orchestra.consciousness_level,
            orchestra.performance.tasks_completed,
            orchestra.performance.success_rate * 100.0,
            orchestra.performance.avg_response_time
        );
    }
}

async fn run_demo(maestro: &Maestro) -> Result<()> {
    println!("{}", "Maestro demo".bold());
    println!("{}", "=".repeat(50));

    let description = "Build a full-stack todo application with React frontend, \
                       Python FastAPI backend, and PostgreSQL database";
    let requirements = to_requirements(vec![
        ("frontend".to_string(), "React with TypeScript".to_string()),
        ("backend".to_string(), "Python FastAPI".to_string()),
        ("database".to_string(), "PostgreSQL".to_string()),
        (
            "features".to_string(),
            r#"["CRUD operations", "user authentication", "priority levels"]"#.to_string(),
        ),
    ]);

    println!("{} {description}", "Problem:".bold());

    let task_id = maestro.solve(description, requirements).await?;
    let report = maestro.task_status(&task_id).await?;
    print_report(&report);

    println!();
    print_system_status(&maestro.system_status().await);
    Ok(())
}
