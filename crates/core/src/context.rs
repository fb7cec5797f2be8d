//! Per-invocation execution context
//!
//! The project root, platform, settings and shell are fixed when an invocation starts and
//! handed to every step. The project version and the release artifact are looked up on
//! first use and then reused for the rest of the invocation.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use crate::configs::ProjectConfig;
use crate::execution::command::{CommandInvocation, Shell};
use crate::platform::PlatformInfo;
use crate::template::unknown_placeholder;
use crate::tools::VERSION_QUERY;
use crate::types::{ChoresError, ChoresResult};

pub struct ExecutionContext<'a> {
    pub root: PathBuf,
    pub platform: PlatformInfo,
    pub config: ProjectConfig,
    pub shell: &'a dyn Shell,
    /// Print commands and removals instead of performing them
    pub dry_run: bool,
    /// Attach child processes to the invoking terminal
    pub tty: bool,
    version: OnceCell<String>,
    artifact: OnceCell<String>,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(
        root: impl Into<PathBuf>,
        platform: PlatformInfo,
        config: ProjectConfig,
        shell: &'a dyn Shell,
    ) -> Self {
        let tty = config.tty.unwrap_or(platform.default_tty);
        Self {
            root: root.into(),
            platform,
            config,
            shell,
            dry_run: false,
            tty,
            version: OnceCell::new(),
            artifact: OnceCell::new(),
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Project version from the dependency manager, queried at most once
    pub fn version(&self) -> ChoresResult<String> {
        if let Some(version) = self.version.get() {
            return Ok(version.clone());
        }

        let version = self
            .shell
            .capture(&CommandInvocation::new(VERSION_QUERY, false))?;
        if version.is_empty() {
            return Err(ChoresError::VersionQuery(VERSION_QUERY.to_string()));
        }
        tracing::debug!(%version, "resolved project version");

        Ok(self.version.get_or_init(|| version).clone())
    }

    /// Path of the single file in the dist directory, relative to the root.
    ///
    /// An empty or missing directory and a directory holding several files are both
    /// errors; the artifact to publish must be unambiguous.
    pub fn artifact(&self) -> ChoresResult<String> {
        if let Some(artifact) = self.artifact.get() {
            return Ok(artifact.clone());
        }

        let artifact = select_artifact(&self.root, self.config.dist_dir())?;
        tracing::debug!(%artifact, "selected artifact");

        Ok(self.artifact.get_or_init(|| artifact).clone())
    }

    /// Value for a `{placeholder}` in a command or path template
    pub fn resolve(&self, placeholder: &str) -> ChoresResult<String> {
        match placeholder {
            "root" => Ok(shell_quote(&self.root.display().to_string())),
            "version" => self.version(),
            "platform" => Ok(self.platform.identifier.clone()),
            "artifact" => Ok(shell_quote(&self.artifact()?)),
            other => Err(unknown_placeholder(other)),
        }
    }

    /// Absolute path for a path template relative to the root
    pub fn project_path(&self, relative: &str) -> ChoresResult<PathBuf> {
        let rendered = crate::template::render_placeholders(relative, |p| match p {
            "root" => Ok(self.root.display().to_string()),
            other => self.resolve(other),
        })?;
        Ok(self.root.join(rendered))
    }
}

fn select_artifact(root: &Path, dist_dir: &str) -> ChoresResult<String> {
    let dir = root.join(dist_dir);
    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ChoresError::NoArtifact(dir));
        }
        Err(e) => return Err(e.into()),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    files.sort();

    match files.as_slice() {
        [] => Err(ChoresError::NoArtifact(dir)),
        [single] => Ok(format!("{}/{}", dist_dir, single)),
        _ => Err(ChoresError::MultipleArtifacts { dir, found: files }),
    }
}

/// Quote a value so the shell passes it through as one literal word
fn shell_quote(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-:,+=@%".contains(c));
    if plain {
        return value.to_string();
    }

    if cfg!(windows) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        format!("'{}'", value.replace('\'', "'\\''"))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    struct VersionShell {
        version: String,
        queries: RefCell<usize>,
    }

    impl Shell for VersionShell {
        fn run(&self, _: &CommandInvocation) -> ChoresResult<i32> {
            Ok(0)
        }

        fn capture(&self, invocation: &CommandInvocation) -> ChoresResult<String> {
            assert_eq!(invocation.line, VERSION_QUERY);
            *self.queries.borrow_mut() += 1;
            Ok(self.version.clone())
        }
    }

    fn shell(version: &str) -> VersionShell {
        VersionShell {
            version: version.to_string(),
            queries: RefCell::new(0),
        }
    }

    fn context<'a>(root: &Path, shell: &'a VersionShell) -> ExecutionContext<'a> {
        ExecutionContext::new(
            root,
            PlatformInfo::from_os("linux"),
            ProjectConfig::default(),
            shell,
        )
    }

    #[test]
    fn version_is_queried_once() {
        let dir = tempfile::tempdir().unwrap();
        let shell = shell("2.0.1");
        let ctx = context(dir.path(), &shell);

        assert_eq!(ctx.resolve("version").unwrap(), "2.0.1");
        assert_eq!(ctx.resolve("version").unwrap(), "2.0.1");
        assert_eq!(*shell.queries.borrow(), 1);
    }

    #[test]
    fn empty_version_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let shell = shell("");
        let ctx = context(dir.path(), &shell);

        assert!(matches!(ctx.version(), Err(ChoresError::VersionQuery(_))));
    }

    #[test]
    fn tty_follows_platform_unless_configured() {
        let dir = tempfile::tempdir().unwrap();
        let shell = shell("1.0.0");

        let windows = ExecutionContext::new(
            dir.path(),
            PlatformInfo::from_os("windows"),
            ProjectConfig::default(),
            &shell,
        );
        assert!(!windows.tty);

        let forced = ExecutionContext::new(
            dir.path(),
            PlatformInfo::from_os("linux"),
            ProjectConfig {
                tty: Some(false),
                ..ProjectConfig::default()
            },
            &shell,
        );
        assert!(!forced.tty);
    }

    #[test]
    fn single_artifact_is_selected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("dist")).unwrap();
        std::fs::write(dir.path().join("dist/app-1.0.0-linux"), "").unwrap();
        let shell = shell("1.0.0");

        assert_eq!(
            context(dir.path(), &shell).artifact().unwrap(),
            "dist/app-1.0.0-linux"
        );
    }

    #[test]
    fn missing_or_empty_dist_has_no_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let shell = shell("1.0.0");
        let ctx = context(dir.path(), &shell);
        assert!(matches!(ctx.artifact(), Err(ChoresError::NoArtifact(_))));

        std::fs::create_dir(dir.path().join("dist")).unwrap();
        std::fs::create_dir(dir.path().join("dist/nested")).unwrap();
        assert!(matches!(ctx.artifact(), Err(ChoresError::NoArtifact(_))));
    }

    #[test]
    fn several_artifacts_are_ambiguous() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("dist")).unwrap();
        std::fs::write(dir.path().join("dist/b"), "").unwrap();
        std::fs::write(dir.path().join("dist/a"), "").unwrap();
        let shell = shell("1.0.0");

        match context(dir.path(), &shell).artifact() {
            Err(ChoresError::MultipleArtifacts { found, .. }) => {
                assert_eq!(found, vec!["a", "b"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn paths_render_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        let shell = shell("3.1.4");
        let ctx = context(dir.path(), &shell);

        assert_eq!(
            ctx.project_path("app-{version}-{platform}.spec").unwrap(),
            dir.path().join("app-3.1.4-linux.spec")
        );
    }

    #[cfg(unix)]
    #[test]
    fn special_characters_are_single_quoted() {
        assert_eq!(shell_quote("/tmp/project"), "/tmp/project");
        assert_eq!(shell_quote("/tmp/my project"), "'/tmp/my project'");
        assert_eq!(shell_quote("/tmp/it's"), "'/tmp/it'\\''s'");
    }

    #[cfg(unix)]
    #[test]
    fn roots_with_shell_syntax_reach_commands_intact() {
        use crate::execution::command::SystemShell;
        use crate::template::render_placeholders;

        let dir = tempfile::tempdir().unwrap();
        let version = shell("1.0.0");
        let system = SystemShell::new(dir.path());

        for name in ["my $proj", "app(1)", "a;b&c", "it's `here`"] {
            let root = dir.path().join(name);
            std::fs::create_dir(&root).unwrap();
            let ctx = context(&root, &version);

            let line = render_placeholders("test -d {root}", |p| ctx.resolve(p)).unwrap();
            let code = system.run(&CommandInvocation::new(&line, false)).unwrap();
            assert_eq!(code, 0, "{line}");
        }
    }
}
