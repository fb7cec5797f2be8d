//! High-level task runner
//!
//! This module turns an execution plan into action: prerequisites run first, then each
//! task's steps run in order, and the first failure stops the whole invocation.

use std::io::ErrorKind;
use std::path::Path;

use colored::*;

use crate::context::ExecutionContext;
use crate::execution::command::CommandInvocation;
use crate::results::RunSummary;
use crate::task_execution::PlannedTask;
use crate::tasks::{get_task_color, Step, TaskOptions, TaskRegistry};
use crate::types::{ChoresError, ChoresResult};

/// Runs tasks from a registry against one execution context
pub struct TaskRunner<'a> {
    registry: &'a TaskRegistry,
    context: &'a ExecutionContext<'a>,
}

impl<'a> TaskRunner<'a> {
    pub fn new(registry: &'a TaskRegistry, context: &'a ExecutionContext<'a>) -> Self {
        Self { registry, context }
    }

    /// Run a task and its prerequisites, stopping at the first failure
    pub fn run(&self, task_name: &str, options: &TaskOptions) -> ChoresResult<RunSummary> {
        let plan = self.registry.plan(task_name, options)?;
        tracing::info!(
            task = task_name,
            runs = plan.len(),
            dry_run = self.context.dry_run,
            "resolved execution plan"
        );

        let mut summary = RunSummary::new(task_name);
        for planned in &plan.tasks {
            self.run_planned(planned, &mut summary)?;
            summary.tasks_run.push(planned.to_string());
        }

        Ok(summary)
    }

    fn run_planned(&self, planned: &PlannedTask, summary: &mut RunSummary) -> ChoresResult<()> {
        let task = self.registry.get(&planned.name)?;
        let task_color = get_task_color(&task.name);

        println!();
        println!(
            "┌─ {}",
            format!("Running task '{}'", planned).color(task_color).bold()
        );
        println!("└─ {}", task.description.bright_black());

        for step in &task.steps {
            self.run_step(step, &planned.options, summary)?;
        }
        Ok(())
    }

    fn run_step(
        &self,
        step: &Step,
        options: &TaskOptions,
        summary: &mut RunSummary,
    ) -> ChoresResult<()> {
        match step {
            Step::Run(template) => {
                let line = template.render(options, |p| self.context.resolve(p))?;
                self.execute_command(&line)?;
                summary.commands_run.push(line);
                Ok(())
            }
            Step::RemoveFile(path) => {
                let path = self.context.project_path(path)?;
                self.remove(&path, |p| std::fs::remove_file(p))
            }
            Step::RemoveDir(path) => {
                let path = self.context.project_path(path)?;
                self.remove(&path, |p| std::fs::remove_dir_all(p))
            }
        }
    }

    fn execute_command(&self, line: &str) -> ChoresResult<()> {
        println!("{} {}", "$".bright_black(), line);
        if self.context.dry_run {
            return Ok(());
        }

        let code = self
            .context
            .shell
            .run(&CommandInvocation::new(line, self.context.tty))?;
        tracing::debug!(command = line, code, "command finished");

        if code != 0 {
            return Err(ChoresError::CommandFailed {
                command: line.to_string(),
                code,
            });
        }
        Ok(())
    }

    /// Delete a path, treating an already missing path as success
    fn remove(&self, path: &Path, remove: fn(&Path) -> std::io::Result<()>) -> ChoresResult<()> {
        println!("{} {}", "rm".bright_black(), path.display());
        if self.context.dry_run {
            return Ok(());
        }

        match remove(path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "already absent");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
