use anyhow::{Context, Result};
use chores_core::project_manager::ProjectManager;
use chores_core::tasks::TaskOptions;
use colored::*;

pub fn execute(manager: &ProjectManager, task: &str, options: &TaskOptions) -> Result<()> {
    println!("{} {}", "Execution plan for".bold(), task.cyan());

    let execution_plan = manager
        .get_execution_plan(task, options)
        .with_context(|| format!("Failed to get execution plan for '{}'", task))?;

    println!("\n{}:", "Execution order".bold());
    for (i, planned) in execution_plan.tasks.iter().enumerate() {
        println!("  {}. {}", i + 1, planned);
    }

    Ok(())
}
