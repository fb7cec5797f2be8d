use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::configs::lint::LintConfig;
use crate::types::{ChoresError, ChoresResult};

pub const CONFIG_FILE_NAME: &str = "chores.yml";

const DEFAULT_PROJECT_NAME: &str = "PROJECT_NAME";
const DEFAULT_ENTRY_POINT: &str = "src/main.py";
const DEFAULT_DIST_DIR: &str = "dist";
const DEFAULT_BUILD_DIR: &str = "build";
const DEFAULT_TYPE_CHECK_CACHE: &str = ".mypy_cache";

/// Project-level settings read from `chores.yml` at the project root.
///
/// Every key is optional; an absent file behaves like an empty one.
#[derive(Debug, Default, Deserialize, Serialize, JsonSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectConfig {
    /// Name embedded in artifact file names and release titles
    pub project_name: Option<String>,
    /// Source file handed to the packager, relative to the project root
    pub entry_point: Option<String>,
    pub dist_dir: Option<String>,
    pub build_dir: Option<String>,
    pub type_check_cache: Option<String>,
    pub lint: Option<LintConfig>,
    /// Attach child processes to the invoking terminal. Defaults to on, except on Windows.
    pub tty: Option<bool>,
}

impl ProjectConfig {
    pub fn project_name(&self) -> &str {
        self.project_name.as_deref().unwrap_or(DEFAULT_PROJECT_NAME)
    }

    pub fn entry_point(&self) -> &str {
        self.entry_point.as_deref().unwrap_or(DEFAULT_ENTRY_POINT)
    }

    pub fn dist_dir(&self) -> &str {
        self.dist_dir.as_deref().unwrap_or(DEFAULT_DIST_DIR)
    }

    pub fn build_dir(&self) -> &str {
        self.build_dir.as_deref().unwrap_or(DEFAULT_BUILD_DIR)
    }

    pub fn type_check_cache(&self) -> &str {
        self.type_check_cache
            .as_deref()
            .unwrap_or(DEFAULT_TYPE_CHECK_CACHE)
    }

    pub fn lint(&self) -> LintConfig {
        self.lint.clone().unwrap_or_default()
    }
}

pub fn parse_project_config(yaml_str: &str) -> ChoresResult<ProjectConfig> {
    if yaml_str.trim().is_empty() {
        return Ok(ProjectConfig::default());
    }
    let config: ProjectConfig = serde_yaml::from_str(yaml_str)?;
    Ok(config)
}

/// Load `chores.yml` from the project root, falling back to defaults when it is absent
pub fn load_project_config(root: &Path) -> ChoresResult<ProjectConfig> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        ChoresError::Config(format!(
            "Failed to read config {}: {}",
            config_path.display(),
            e
        ))
    })?;

    parse_project_config(&content).map_err(|e| {
        ChoresError::Config(format!(
            "Failed to parse config {}: {}",
            config_path.display(),
            e
        ))
    })
}
