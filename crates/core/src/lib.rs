//! Chores Core Library
//!
//! This is the core library for the chores workflow runner. It sequences calls to a
//! project's external tools (dependency manager, formatters, linters, type checker,
//! packager, version control and release CLI) into named tasks with prerequisites.
//!
//! ## Architecture
//!
//! - [`project_manager`] - High-level interface used by the CLI
//! - [`tasks`] - Task model and the built-in task registry
//! - [`tools`] - Command templates for each wrapped tool
//! - [`template`] - Flag-conditional command templates and placeholder rendering
//! - [`execution`] - Process execution, dependency ordering and the fail-fast runner
//! - [`context`] - Values fixed for one invocation (root, platform, version, artifact)
//! - [`configs`] - `chores.yml` parsing
//! - [`task_execution`] - Execution plan types
//! - [`results`] - Result types for manager operations
//! - [`types`] - Error type and result alias
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chores_core::project_manager::{ProjectManager, ProjectManagerConfig};
//! use chores_core::tasks::TaskOptions;
//! use std::path::PathBuf;
//!
//! # fn example() -> chores_core::types::ChoresResult<()> {
//! let manager = ProjectManager::new(ProjectManagerConfig {
//!     project_root: PathBuf::from("."),
//!     dry_run: true,
//! })?;
//!
//! manager.run_task("clean", &TaskOptions::new())?;
//! # Ok(())
//! # }
//! ```

pub mod configs;
pub mod context;
pub mod execution;
pub mod platform;
pub mod project_manager;
pub mod results;
pub mod task_execution;
pub mod tasks;
pub mod template;
pub mod tools;
pub mod types;

// Re-export the main types for easier usage
pub use project_manager::{ProjectManager, ProjectManagerConfig};
pub use types::{ChoresError, ChoresResult};
