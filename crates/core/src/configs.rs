//! Configuration parsing for the runner's optional `chores.yml`

pub mod lint;
pub mod project;

pub use lint::LintConfig;
pub use project::{load_project_config, parse_project_config, ProjectConfig, CONFIG_FILE_NAME};
