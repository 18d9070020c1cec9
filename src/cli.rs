//! Command-line interface for bundlegate.
//!
//! Three commands: `init` creates a fresh task bundle, `validate` runs the
//! quality-gate pipeline, `status` prints the bundle status record.
//! Library errors never call `process::exit`; `run` maps every outcome to
//! an [`ExitCode`] at the very end.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::{
    create_validation_summary, load_quality_config, ExitCode, FsBundleStore, ValidationEngine,
};
use bundlegate_store::BundleStore as _;

/// bundlegate - quality-gate orchestrator for task bundles
#[derive(Parser)]
#[command(name = "bundlegate")]
#[command(about = "Runs quality gates for task bundles and commits validated changes")]
#[command(long_about = r#"
bundlegate validates the changes produced for a task against the project's
quality gates — tests, linting, type checking, and security scanning — in a
fixed fail-fast order. When every gate passes, the changes are committed as
TASK-<id>. Every run is recorded in the task's bundle directory under
.task_bundles/TASK-<id>/.

EXAMPLES:
  # Initialize a bundle for task 017
  bundlegate init 017

  # Run the full validation pipeline
  bundlegate validate 017 --description "Implement retry logic"

  # Validate with an explicit config and project root
  bundlegate validate 017 --config quality.toml --project-root /path/to/project

  # Inspect the bundle status record
  bundlegate status 017

EXIT CODES:
  0  validation succeeded
  1  unexpected internal error
  2  configuration error
  3  a quality gate failed
"#)]
#[command(version)]
pub struct Cli {
    /// Path to the quality configuration file (relative paths resolve
    /// against the project root)
    #[arg(long, global = true, default_value = "quality.toml")]
    pub config: Utf8PathBuf,

    /// Project root containing .task_bundles/
    #[arg(long, global = true, default_value = ".")]
    pub project_root: Utf8PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize a fresh task bundle
    Init {
        /// Task identifier (e.g. 017 for TASK-017)
        task_id: String,
    },

    /// Run the full validation pipeline for a task
    Validate {
        /// Task identifier (e.g. 017 for TASK-017)
        task_id: String,

        /// Description used in the commit message if a commit is created
        #[arg(long, default_value = "Apply validated task changes")]
        description: String,
    },

    /// Print the bundle status record for a task
    Status {
        /// Task identifier (e.g. 017 for TASK-017)
        task_id: String,
    },
}

/// Parse arguments, dispatch, and map the outcome to an exit code.
pub fn run() -> ExitCode {
    match dispatch() {
        Ok(()) => ExitCode::Success,
        Err(code) => code,
    }
}

fn dispatch() -> Result<(), ExitCode> {
    let cli = Cli::parse();

    // A second init (e.g. under tests) is harmless; the first wins.
    let _ = bundlegate_utils::logging::init_tracing(cli.verbose);

    let config_path = if cli.config.is_absolute() {
        cli.config.clone()
    } else {
        cli.project_root.join(&cli.config)
    };

    match &cli.command {
        Command::Init { task_id } => {
            let store = FsBundleStore::new(&cli.project_root);
            match store.init(task_id) {
                Ok(_) => {
                    println!("Initialized bundle at {}", store.paths(task_id).bundle_dir());
                    Ok(())
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    Err(ExitCode::ConfigError)
                }
            }
        }

        Command::Validate {
            task_id,
            description,
        } => {
            let config = load_quality_config(config_path.as_std_path()).map_err(|e| {
                eprintln!("Error: {e}");
                ExitCode::ConfigError
            })?;
            debug!(task_id, config = %config_path, "loaded quality config");

            let engine = ValidationEngine::new(config, &cli.project_root);
            let outcome = engine.run_full_validation(task_id, description);
            println!("{}", create_validation_summary(&outcome));

            match outcome {
                Ok(_) => Ok(()),
                Err(err) => Err(ExitCode::from(err.category)),
            }
        }

        Command::Status { task_id } => {
            let store = FsBundleStore::new(&cli.project_root);
            match store.read(task_id) {
                Ok(status) => {
                    let rendered = serde_json::to_string_pretty(&status).map_err(|e| {
                        eprintln!("Error: {e}");
                        ExitCode::Error
                    })?;
                    println!("{rendered}");
                    Ok(())
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    Err(ExitCode::ConfigError)
                }
            }
        }
    }
}
