use anyhow::{Context, Result};
use chores_core::project_manager::ProjectManager;
use chores_core::tasks::TaskOptions;
use colored::*;

pub fn execute(manager: &ProjectManager, task: &str, options: &TaskOptions) -> Result<()> {
    let label = format!("{} {}", task, options);
    println!("{} {}", "Running task".bold(), label.trim_end().cyan());

    let summary = manager
        .run_task(task, options)
        .with_context(|| format!("Failed to run task '{}'", task))?;

    println!();
    println!(
        "{} {}",
        "✓".green().bold(),
        format!(
            "{} completed successfully ({} tasks, {} commands)",
            summary.task_name,
            summary.tasks_run.len(),
            summary.commands_run.len()
        )
        .green()
        .bold()
    );

    Ok(())
}
