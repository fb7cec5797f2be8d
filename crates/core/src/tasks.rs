//! Task definitions and the built-in task registry
//!
//! A [`Task`] is a named list of prerequisite tasks plus an ordered list of [`Step`]s.
//! [`TaskRegistry::builtin`] declares the project's workflow: cleaning, formatting,
//! type-checking, linting, packaging and publishing.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use colored::Color;

use crate::configs::ProjectConfig;
use crate::execution::dependencies::TaskGraph;
use crate::task_execution::TaskExecutionPlan;
use crate::template::CommandTemplate;
use crate::tools::{Toolchain, CHECK_FLAG};
use crate::types::{ChoresError, ChoresResult};

/// Boolean flags passed to a task, e.g. `check` for `format`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskOptions(BTreeMap<String, bool>);

impl TaskOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, flag: &str, value: bool) -> Self {
        self.set(flag, value);
        self
    }

    pub fn set(&mut self, flag: &str, value: bool) {
        self.0.insert(flag.to_string(), value);
    }

    /// Value of a flag; unset flags are false
    pub fn get(&self, flag: &str) -> bool {
        self.0.get(flag).copied().unwrap_or(false)
    }

    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Options reduced to the flags that are set, so `{}` and `{check: false}`
    /// identify the same run of a task.
    pub fn normalized(&self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(_, value)| **value)
                .map(|(flag, value)| (flag.clone(), *value))
                .collect(),
        )
    }
}

impl fmt::Display for TaskOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let enabled: Vec<String> = self
            .0
            .iter()
            .filter(|(_, value)| **value)
            .map(|(flag, _)| format!("--{}", flag))
            .collect();
        write!(f, "{}", enabled.join(" "))
    }
}

/// A flag a task accepts on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    pub name: String,
    pub help: String,
}

/// Reference to another task that must succeed first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prerequisite {
    pub name: String,
    pub options: TaskOptions,
}

impl Prerequisite {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            options: TaskOptions::new(),
        }
    }

    pub fn with_options(name: &str, options: TaskOptions) -> Self {
        Self {
            name: name.to_string(),
            options,
        }
    }
}

/// One unit of work inside a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Run a command through the shell
    Run(CommandTemplate),
    /// Delete a file relative to the project root; a missing file is fine
    RemoveFile(String),
    /// Recursively delete a directory relative to the project root; a missing directory is fine
    RemoveDir(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub name: String,
    pub description: String,
    pub flags: Vec<FlagSpec>,
    pub prerequisites: Vec<Prerequisite>,
    pub steps: Vec<Step>,
}

impl Task {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            flags: Vec::new(),
            prerequisites: Vec::new(),
            steps: Vec::new(),
        }
    }

    pub fn flag(mut self, name: &str, help: &str) -> Self {
        self.flags.push(FlagSpec {
            name: name.to_string(),
            help: help.to_string(),
        });
        self
    }

    pub fn pre(mut self, prerequisite: Prerequisite) -> Self {
        self.prerequisites.push(prerequisite);
        self
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn run(self, template: CommandTemplate) -> Self {
        self.step(Step::Run(template))
    }

    pub fn accepts(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f.name == flag)
    }

    /// Reject set flags this task does not declare
    pub fn validate_options(&self, options: &TaskOptions) -> ChoresResult<()> {
        let options = options.normalized();
        let unknown = options
            .flags()
            .find(|flag| !self.accepts(flag))
            .map(str::to_string);

        match unknown {
            Some(option) => Err(ChoresError::UnknownOption {
                task: self.name.clone(),
                option,
            }),
            None => Ok(()),
        }
    }
}

/// The set of registered tasks and the dependency graph between them
#[derive(Debug)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
    graph: TaskGraph,
}

impl TaskRegistry {
    /// Build a registry, rejecting duplicate names, unknown prerequisites, invalid
    /// prerequisite options and dependency cycles.
    pub fn new(tasks: Vec<Task>) -> ChoresResult<Self> {
        let mut seen = HashSet::new();
        for task in &tasks {
            if !seen.insert(task.name.as_str()) {
                return Err(ChoresError::Config(format!(
                    "Task '{}' is registered more than once",
                    task.name
                )));
            }
        }

        let graph = TaskGraph::new(&tasks)?;
        for task in &tasks {
            for pre in &task.prerequisites {
                if let Some(target) = tasks.iter().find(|t| t.name == pre.name) {
                    target.validate_options(&pre.options)?;
                }
            }
        }
        Ok(Self { tasks, graph })
    }

    /// The project workflow tasks
    pub fn builtin(config: &ProjectConfig) -> ChoresResult<Self> {
        let tools = Toolchain::new(config.clone());

        let mut format = Task::new("format", "Format code").flag(
            CHECK_FLAG,
            "Checks if source is formatted without applying changes",
        );
        for template in tools.format() {
            format = format.run(template);
        }

        let mut tag = Task::new("tag", "Create GitHub tag");
        for template in tools.tag() {
            tag = tag.run(template);
        }

        Self::new(vec![
            Task::new("clean-build", "Clean up build")
                .step(Step::RemoveFile(tools.packager_spec_file()))
                .step(Step::RemoveDir(config.build_dir().to_string()))
                .step(Step::RemoveDir(config.dist_dir().to_string())),
            Task::new("clean-python", "Clean up python file artifacts").run(tools.clean_python()),
            Task::new("clean-type-checking", "Clean up files from type-checking")
                .step(Step::RemoveDir(config.type_check_cache().to_string())),
            Task::new("clean", "Run all clean sub-tasks")
                .pre(Prerequisite::new("clean-build"))
                .pre(Prerequisite::new("clean-python"))
                .pre(Prerequisite::new("clean-type-checking")),
            format,
            Task::new("type-check", "Run type-checking").run(tools.type_check()),
            Task::new("lint", "Run all linting")
                .pre(Prerequisite::with_options(
                    "format",
                    TaskOptions::new().with(CHECK_FLAG, true),
                ))
                .pre(Prerequisite::new("type-check"))
                .run(tools.lint()),
            Task::new("build", "Build project distributable")
                .pre(Prerequisite::new("clean-build"))
                .run(tools.package()),
            tag,
            Task::new("release", "Create GitHub release").run(tools.release()),
            Task::new("upload", "Upload build as GitHub release").run(tools.upload()),
        ])
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, name: &str) -> ChoresResult<&Task> {
        self.tasks
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| self.unknown_task(name))
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    /// Resolve the ordered list of task runs needed for `name`
    pub fn plan(&self, name: &str, options: &TaskOptions) -> ChoresResult<TaskExecutionPlan> {
        let task = self.get(name)?;
        task.validate_options(options)?;

        let tasks = self.graph.execution_order(name, options)?;
        Ok(TaskExecutionPlan {
            task_name: name.to_string(),
            options: options.normalized(),
            tasks,
        })
    }

    pub(crate) fn unknown_task(&self, name: &str) -> ChoresError {
        let mut available: Vec<&str> = self.tasks.iter().map(|t| t.name.as_str()).collect();
        available.sort_unstable();
        ChoresError::UnknownTask {
            name: name.to_string(),
            available: available.join(", "),
        }
    }
}

/// Jewel tones, kept clear of the red/yellow/green used for status
const TASK_PALETTE: [(u8, u8, u8); 6] = [
    (147, 112, 219),
    (64, 224, 208),
    (255, 140, 0),
    (199, 21, 133),
    (72, 209, 204),
    (138, 43, 226),
];

/// Banner color for a task, stable across runs
pub fn get_task_color(task_name: &str) -> Color {
    let hash = task_name
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
    let (r, g, b) = TASK_PALETTE[(hash % TASK_PALETTE.len() as u64) as usize];
    Color::TrueColor { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> TaskRegistry {
        TaskRegistry::builtin(&ProjectConfig::default()).unwrap()
    }

    fn labels(plan: &TaskExecutionPlan) -> Vec<String> {
        plan.tasks.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn builtin_registers_every_task() {
        let registry = builtin();
        let names: Vec<&str> = registry.tasks().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "clean-build",
                "clean-python",
                "clean-type-checking",
                "clean",
                "format",
                "type-check",
                "lint",
                "build",
                "tag",
                "release",
                "upload",
            ]
        );
    }

    #[test]
    fn clean_is_pure_aggregation() {
        let registry = builtin();
        assert!(registry.get("clean").unwrap().steps.is_empty());

        let plan = registry.plan("clean", &TaskOptions::new()).unwrap();
        assert_eq!(
            labels(&plan),
            vec!["clean-build", "clean-python", "clean-type-checking", "clean"]
        );
    }

    #[test]
    fn lint_checks_formatting_first() {
        let plan = builtin().plan("lint", &TaskOptions::new()).unwrap();
        assert_eq!(labels(&plan), vec!["format --check", "type-check", "lint"]);
    }

    #[test]
    fn build_cleans_first() {
        let plan = builtin().plan("build", &TaskOptions::new()).unwrap();
        assert_eq!(labels(&plan), vec!["clean-build", "build"]);
    }

    #[test]
    fn duplicate_task_names_are_rejected() {
        let err = TaskRegistry::new(vec![
            Task::new("format", "first"),
            Task::new("lint", ""),
            Task::new("format", "second"),
        ])
        .unwrap_err();

        assert!(matches!(err, ChoresError::Config(ref msg) if msg.contains("'format'")));
    }

    #[test]
    fn unknown_task_lists_available() {
        let err = builtin().plan("deploy", &TaskOptions::new()).unwrap_err();
        match err {
            ChoresError::UnknownTask { name, available } => {
                assert_eq!(name, "deploy");
                assert!(available.starts_with("build, clean, clean-build"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn undeclared_flag_is_rejected() {
        let err = builtin()
            .plan("lint", &TaskOptions::new().with("check", true))
            .unwrap_err();
        assert!(matches!(err, ChoresError::UnknownOption { .. }));
    }

    #[test]
    fn unset_flags_are_ignored() {
        let plan = builtin()
            .plan("lint", &TaskOptions::new().with("check", false))
            .unwrap();
        assert_eq!(plan.len(), 3);
    }

    #[test]
    fn prerequisite_options_are_validated() {
        let tasks = vec![
            Task::new("a", "a"),
            Task::new("b", "b").pre(Prerequisite::with_options(
                "a",
                TaskOptions::new().with("fast", true),
            )),
        ];
        assert!(matches!(
            TaskRegistry::new(tasks),
            Err(ChoresError::UnknownOption { .. })
        ));
    }

    #[test]
    fn normalized_options_drop_unset_flags() {
        let explicit = TaskOptions::new().with("check", false);
        assert_eq!(explicit.normalized(), TaskOptions::new());
        assert_eq!(TaskOptions::new().with("check", true).to_string(), "--check");
    }

    #[test]
    fn task_color_is_stable() {
        assert_eq!(get_task_color("lint"), get_task_color("lint"));
    }
}
