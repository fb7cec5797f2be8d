use anyhow::Result;
use chores_core::project_manager::ProjectManager;
use chores_core::tasks::get_task_color;
use colored::*;

pub fn execute(manager: &ProjectManager) -> Result<()> {
    println!("{}", "Tasks".bold().underline());

    let tasks = manager.list_tasks();
    if tasks.is_empty() {
        println!("  {}", "No tasks registered".dimmed());
        return Ok(());
    }

    let width = tasks.iter().map(|t| t.name.len()).max().unwrap_or(0);
    for task in tasks {
        println!(
            "  {}  {}",
            format!("{:width$}", task.name, width = width)
                .color(get_task_color(&task.name))
                .bold(),
            task.description
        );

        for (flag, help) in &task.flags {
            println!("  {:width$}    {} {}", "", format!("--{}", flag).cyan(), help.dimmed());
        }

        if !task.prerequisites.is_empty() {
            println!(
                "  {:width$}    {} {}",
                "",
                "runs first:".dimmed(),
                task.prerequisites.join(", ")
            );
        }
    }

    Ok(())
}
