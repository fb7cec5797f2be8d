use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use chores_core::project_manager::{ProjectManager, ProjectManagerConfig};
use chores_core::tasks::TaskOptions;
use chores_core::tools::CHECK_FLAG;
use chores_core::ChoresError;
use clap::{Parser, Subcommand};
use colored::*;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

mod commands;

/// Chores - development workflow tasks for a Python project
#[derive(Parser)]
#[command(name = "chores")]
#[command(about = "Run the project's clean, format, lint, build and release tasks")]
#[command(version)]
struct Cli {
    /// Path to the project root (defaults to current directory)
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    /// Print commands and removals instead of performing them
    #[arg(long, global = true)]
    dry_run: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean up build
    CleanBuild,
    /// Clean up python file artifacts
    CleanPython,
    /// Clean up files from type-checking
    CleanTypeChecking,
    /// Run all clean sub-tasks
    Clean,
    /// Format code
    Format {
        /// Checks if source is formatted without applying changes
        #[arg(long)]
        check: bool,
    },
    /// Run type-checking
    TypeCheck,
    /// Run all linting
    Lint,
    /// Build project distributable
    Build,
    /// Create GitHub tag
    Tag,
    /// Create GitHub release
    Release,
    /// Upload build as GitHub release
    Upload,
    /// List available tasks
    List,
    /// Show execution order for a task without running it
    Plan {
        /// Task name, e.g. "lint"
        task: String,
        /// Plan the task with its check flag set
        #[arg(long)]
        check: bool,
    },
    /// Print the JSON schema of chores.yml
    Schema,
}

impl Commands {
    /// Task name and options for subcommands that run a task
    fn task(&self) -> Option<(&'static str, TaskOptions)> {
        let task = match self {
            Commands::CleanBuild => ("clean-build", TaskOptions::new()),
            Commands::CleanPython => ("clean-python", TaskOptions::new()),
            Commands::CleanTypeChecking => ("clean-type-checking", TaskOptions::new()),
            Commands::Clean => ("clean", TaskOptions::new()),
            Commands::Format { check } => ("format", TaskOptions::new().with(CHECK_FLAG, *check)),
            Commands::TypeCheck => ("type-check", TaskOptions::new()),
            Commands::Lint => ("lint", TaskOptions::new()),
            Commands::Build => ("build", TaskOptions::new()),
            Commands::Tag => ("tag", TaskOptions::new()),
            Commands::Release => ("release", TaskOptions::new()),
            Commands::Upload => ("upload", TaskOptions::new()),
            Commands::List | Commands::Plan { .. } | Commands::Schema => return None,
        };
        Some(task)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            let code = e
                .downcast_ref::<ChoresError>()
                .map(ChoresError::exit_code)
                .unwrap_or(1);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Schema = cli.command {
        return commands::schema::execute();
    }

    // Settings and the task registry are loaded once per invocation
    let manager = ProjectManager::new(ProjectManagerConfig {
        project_root: cli.root,
        dry_run: cli.dry_run,
    })?;

    if let Some((task, options)) = cli.command.task() {
        return commands::run::execute(&manager, task, &options);
    }

    match cli.command {
        Commands::List => commands::list::execute(&manager),
        Commands::Plan { task, check } => {
            let options = TaskOptions::new().with(CHECK_FLAG, check);
            commands::plan::execute(&manager, &task, &options)
        }
        _ => Ok(()),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
