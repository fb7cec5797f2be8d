//! Result types for project manager operations
//!
//! This module contains the result types returned to the CLI layer, keeping
//! presentation concerns out of the task model.

use crate::tasks::Task;

/// Listing entry for one registered task
#[derive(Debug, Clone)]
pub struct TaskInfo {
    pub name: String,
    pub description: String,
    pub prerequisites: Vec<String>,
    /// Flags the task accepts, with their help text
    pub flags: Vec<(String, String)>,
}

impl From<&Task> for TaskInfo {
    fn from(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            description: task.description.clone(),
            prerequisites: task
                .prerequisites
                .iter()
                .map(|pre| {
                    let options = pre.options.to_string();
                    if options.is_empty() {
                        pre.name.clone()
                    } else {
                        format!("{} {}", pre.name, options)
                    }
                })
                .collect(),
            flags: task
                .flags
                .iter()
                .map(|flag| (flag.name.clone(), flag.help.clone()))
                .collect(),
        }
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub task_name: String,
    /// Task runs in the order they completed
    pub tasks_run: Vec<String>,
    /// Rendered command lines in the order they ran
    pub commands_run: Vec<String>,
}

impl RunSummary {
    pub fn new(task_name: &str) -> Self {
        Self {
            task_name: task_name.to_string(),
            tasks_run: Vec::new(),
            commands_run: Vec::new(),
        }
    }
}
