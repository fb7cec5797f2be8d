//! High-level project management interface
//!
//! This module provides the [`ProjectManager`] which serves as the primary interface
//! for the CLI. It loads the project settings once per invocation, builds the task
//! registry, and runs or plans tasks against the project root.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chores_core::project_manager::{ProjectManager, ProjectManagerConfig};
//! use chores_core::tasks::TaskOptions;
//! use std::path::PathBuf;
//!
//! # fn example() -> chores_core::types::ChoresResult<()> {
//! let manager = ProjectManager::new(ProjectManagerConfig {
//!     project_root: PathBuf::from("."),
//!     dry_run: false,
//! })?;
//!
//! // Show what `lint` would run
//! let plan = manager.get_execution_plan("lint", &TaskOptions::new())?;
//!
//! // Run it
//! manager.run_task("lint", &TaskOptions::new())?;
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use crate::configs::{load_project_config, ProjectConfig};
use crate::context::ExecutionContext;
use crate::execution::command::{Shell, SystemShell};
use crate::execution::runner::TaskRunner;
use crate::platform::PlatformInfo;
use crate::results::{RunSummary, TaskInfo};
use crate::task_execution::TaskExecutionPlan;
use crate::tasks::{TaskOptions, TaskRegistry};
use crate::types::{ChoresError, ChoresResult};

/// Configuration for initializing a project manager
pub struct ProjectManagerConfig {
    pub project_root: PathBuf,
    pub dry_run: bool,
}

/// High-level manager that encapsulates all task operations for one project
pub struct ProjectManager {
    pub root: PathBuf,
    pub config: ProjectConfig,
    pub registry: TaskRegistry,
    pub platform: PlatformInfo,
    dry_run: bool,
}

impl ProjectManager {
    /// Initialize a project manager for the given root
    pub fn new(config: ProjectManagerConfig) -> ChoresResult<Self> {
        let root = config.project_root.canonicalize().map_err(|e| {
            ChoresError::Config(format!(
                "Project root {} is not accessible: {}",
                config.project_root.display(),
                e
            ))
        })?;

        let project_config = load_project_config(&root)?;
        let registry = TaskRegistry::builtin(&project_config)?;
        let platform = PlatformInfo::current();
        tracing::debug!(root = %root.display(), platform = %platform.identifier, "project loaded");

        Ok(Self {
            root,
            config: project_config,
            registry,
            platform,
            dry_run: config.dry_run,
        })
    }

    /// List all registered tasks in declaration order
    pub fn list_tasks(&self) -> Vec<TaskInfo> {
        self.registry.tasks().iter().map(TaskInfo::from).collect()
    }

    /// Get execution plan for a task without running anything
    pub fn get_execution_plan(
        &self,
        task_name: &str,
        options: &TaskOptions,
    ) -> ChoresResult<TaskExecutionPlan> {
        self.registry.plan(task_name, options)
    }

    /// Run a task, spawning real processes in the project root
    pub fn run_task(&self, task_name: &str, options: &TaskOptions) -> ChoresResult<RunSummary> {
        let shell = SystemShell::new(&self.root);
        self.run_task_with_shell(task_name, options, &shell)
    }

    /// Run a task through the given shell
    pub fn run_task_with_shell(
        &self,
        task_name: &str,
        options: &TaskOptions,
        shell: &dyn Shell,
    ) -> ChoresResult<RunSummary> {
        let context = ExecutionContext::new(
            self.root.clone(),
            self.platform.clone(),
            self.config.clone(),
            shell,
        )
        .with_dry_run(self.dry_run);

        TaskRunner::new(&self.registry, &context).run(task_name, options)
    }
}
