use std::path::PathBuf;

use thiserror::Error;

/// The main error type for chores operations
#[derive(Debug, Error)]
pub enum ChoresError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown task '{name}'. Available tasks: {available}")]
    UnknownTask { name: String, available: String },

    #[error("Task '{task}' does not accept option '--{option}'")]
    UnknownOption { task: String, option: String },

    #[error("Circular dependency detected: {0}")]
    CircularDependency(String),

    #[error("Command '{command}' failed with exit code {code}")]
    CommandFailed { command: String, code: i32 },

    #[error("Failed to execute command '{command}': {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Version query returned no output: {0}")]
    VersionQuery(String),

    #[error("No artifact found in {}", .0.display())]
    NoArtifact(PathBuf),

    #[error("Expected exactly one artifact in {}, found: {}", dir.display(), found.join(", "))]
    MultipleArtifacts { dir: PathBuf, found: Vec<String> },
}

impl ChoresError {
    /// Exit code the invoking shell should see for this failure.
    ///
    /// A failing child process surfaces its own code verbatim; everything else is `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            ChoresError::CommandFailed { code, .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}

/// Result type alias for chores operations
pub type ChoresResult<T> = Result<T, ChoresError>;
