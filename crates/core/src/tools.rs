//! Invocations of the external tools the tasks wrap
//!
//! Every tool the runner shells out to is described here, once, as a command template.
//! Project settings from `chores.yml` are baked in when the toolchain is built; values
//! that are only known at run time stay as placeholders (`{root}`, `{version}`,
//! `{platform}`, `{artifact}`).

use crate::configs::ProjectConfig;
use crate::template::CommandTemplate;

/// Flag accepted by the `format` task
pub const CHECK_FLAG: &str = "check";

/// Dependency manager query that prints the project version
pub const VERSION_QUERY: &str = "poetry version -s";

/// Builds command templates for the wrapped tools from the project settings
#[derive(Debug, Clone)]
pub struct Toolchain {
    config: ProjectConfig,
}

impl Toolchain {
    pub fn new(config: ProjectConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Base name of the packaged executable: `<project>-<version>-<platform>`
    pub fn artifact_name(&self) -> String {
        format!("{}-{{version}}-{{platform}}", self.config.project_name())
    }

    /// Spec file the packager leaves next to the sources
    pub fn packager_spec_file(&self) -> String {
        format!("{}.spec", self.artifact_name())
    }

    /// Remove interpreter caches and file artifacts below the root
    pub fn clean_python(&self) -> CommandTemplate {
        CommandTemplate::new("dustpan {root}")
    }

    /// Unused-import remover, import sorter and formatter, in that order.
    ///
    /// With the check flag none of them writes; each prints a diff and fails if
    /// anything would change.
    pub fn format(&self) -> Vec<CommandTemplate> {
        vec![
            CommandTemplate::new("autoflake {root} -r --remove-all-unused-imports")
                .unless(CHECK_FLAG, "-i"),
            CommandTemplate::new("isort {root}").when(CHECK_FLAG, "--check-only --diff"),
            CommandTemplate::new("black {root} --quiet").when(CHECK_FLAG, "--diff --check"),
        ]
    }

    pub fn type_check(&self) -> CommandTemplate {
        CommandTemplate::new("mypy {root} --ignore-missing-imports")
    }

    pub fn lint(&self) -> CommandTemplate {
        let lint = self.config.lint();
        CommandTemplate::new(format!(
            "flake8 {{root}} --max-line-length {} --extend-ignore {} --exclude {}",
            lint.max_line_length(),
            lint.ignore().join(","),
            lint.exclude().join(","),
        ))
    }

    /// Single-file, optimized, non-interactive packaging of the entry point
    pub fn package(&self) -> CommandTemplate {
        CommandTemplate::new(format!(
            "python -O -m PyInstaller --clean --onefile --name {} -y {}",
            self.artifact_name(),
            self.config.entry_point(),
        ))
    }

    /// Create the version tag locally, then publish it
    pub fn tag(&self) -> Vec<CommandTemplate> {
        vec![
            CommandTemplate::new("git tag v{version}"),
            CommandTemplate::new("git push origin v{version}"),
        ]
    }

    pub fn release(&self) -> CommandTemplate {
        CommandTemplate::new(format!(
            "gh release create v{{version}} -t \"{} v{{version}}\"",
            self.config.project_name()
        ))
    }

    pub fn upload(&self) -> CommandTemplate {
        CommandTemplate::new("gh release upload v{version} {artifact}")
    }
}
