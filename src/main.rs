//! Login-triggered task runner.
//!
//! Registered in an OS "run at login" location. Each invocation:
//!
//! ```text
//!   config ──▶ enter working dir ──▶ grace delay ──▶ sync tool ──▶ exit code
//!   (toml +       (fail fast,          (30 s by        (inherits      (child's own,
//!    env)          exit 3)              default)         console)       or 2/3/4/5)
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use startup_runner::config::{resolve_config, LoadedConfig};
use startup_runner::error::EXIT_CONFIG;
use startup_runner::lifecycle::startup::verify_working_dir;
use startup_runner::lifecycle::{enter_working_dir, executable_dir, pause_on_exit, resolve_working_dir};
use startup_runner::observability::init_logging;
use startup_runner::{RunnerError, StartupRunner};

#[derive(Parser)]
#[command(name = "startup-runner")]
#[command(about = "Wait for the network after login, then run the playlist sync tool", long_about = None)]
struct Cli {
    /// TOML configuration file (default: startup-runner.toml next to the executable).
    #[arg(short, long, env = "STARTUP_RUNNER_CONFIG")]
    config: Option<PathBuf>,

    /// Validate configuration and print the effective settings without running.
    #[arg(long)]
    check: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let exe_dir = match executable_dir() {
        Ok(dir) => dir,
        Err(e) => return fail_early(&e.to_string(), e.exit_code()),
    };

    let loaded = match resolve_config(cli.config.as_deref(), Some(&exe_dir), |key| {
        std::env::var(key).ok()
    }) {
        Ok(loaded) => loaded,
        Err(e) => return fail_early(&e.to_string(), EXIT_CONFIG),
    };

    let base = match loaded.base_dir() {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let working_dir = resolve_working_dir(&loaded.config.working_directory, &base, &exe_dir);

    let log_file = init_logging(&loaded.config.logging, &working_dir);

    tracing::info!(
        config = ?loaded.source,
        log_file = ?log_file,
        "startup-runner v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    if cli.check {
        return check(&loaded, &working_dir);
    }

    if let Err(e) = enter_working_dir(&working_dir) {
        return fail(e);
    }

    let pause = loaded.config.pause_on_exit;
    let runner = StartupRunner::new(loaded.config, working_dir);
    let result = runner.run().await;

    pause_on_exit(pause);

    match result {
        Ok(outcome) => {
            tracing::info!(run_id = %outcome.run_id, "Run complete");
            ExitCode::SUCCESS
        }
        Err(e) => ExitCode::from(e.exit_code()),
    }
}

fn check(loaded: &LoadedConfig, working_dir: &Path) -> ExitCode {
    match toml::to_string_pretty(&loaded.config) {
        Ok(rendered) => {
            match &loaded.source {
                Some(path) => println!("# config: {}", path.display()),
                None => println!("# config: built-in defaults"),
            }
            println!("# working directory: {}", working_dir.display());
            println!("{rendered}");
        }
        Err(e) => tracing::warn!(error = %e, "Could not render configuration"),
    }

    match verify_working_dir(working_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(e),
    }
}

fn fail(e: RunnerError) -> ExitCode {
    tracing::error!(error = %e, "startup-runner failed");
    ExitCode::from(e.exit_code())
}

/// Report an error raised before logging is configured.
fn fail_early(message: &str, code: u8) -> ExitCode {
    eprintln!("startup-runner: {message}");
    ExitCode::from(code)
}
