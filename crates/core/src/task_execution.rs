use std::fmt;

use crate::tasks::TaskOptions;

/// One task run inside an execution plan
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlannedTask {
    pub name: String,
    pub options: TaskOptions,
}

impl fmt::Display for PlannedTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = self.options.to_string();
        if options.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.name, options)
        }
    }
}

/// Result of resolving which task runs an invocation needs, in order
#[derive(Debug, Clone)]
pub struct TaskExecutionPlan {
    pub task_name: String,
    pub options: TaskOptions,
    /// Prerequisites first; the requested task is last
    pub tasks: Vec<PlannedTask>,
}

impl TaskExecutionPlan {
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
