//! Task execution module
//!
//! This module handles the actual execution of tasks: process invocation, dependency
//! ordering, and the fail-fast runner.

pub mod command;
pub mod dependencies;
pub mod runner;

pub use command::{CommandInvocation, Shell, SystemShell};
pub use dependencies::TaskGraph;
pub use runner::TaskRunner;
