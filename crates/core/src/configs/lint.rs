use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const DEFAULT_MAX_LINE_LENGTH: u32 = 119;
const DEFAULT_IGNORE: &[&str] = &["E203", "W503"];
const DEFAULT_EXCLUDE: &[&str] = &[".venv"];

/// Settings for the style linter run by the `lint` task
#[derive(Debug, Default, Deserialize, Serialize, JsonSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LintConfig {
    pub max_line_length: Option<u32>,
    /// Rule codes appended to the linter's ignore list
    pub ignore: Option<Vec<String>>,
    /// Directories the linter skips
    pub exclude: Option<Vec<String>>,
}

impl LintConfig {
    pub fn max_line_length(&self) -> u32 {
        self.max_line_length.unwrap_or(DEFAULT_MAX_LINE_LENGTH)
    }

    pub fn ignore(&self) -> Vec<String> {
        self.ignore
            .clone()
            .unwrap_or_else(|| DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect())
    }

    pub fn exclude(&self) -> Vec<String> {
        self.exclude
            .clone()
            .unwrap_or_else(|| DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect())
    }
}
