//! exepack CLI
//!
//! Turns `getLabel.py` into a standalone `getLabel` executable using
//! PyInstaller.
//!
//! # Usage
//!
//! ```bash
//! # Build dist/getLabel from ./getLabel.py
//! exepack
//!
//! # Same, for a project somewhere else, copying config.json into dist/
//! exepack --project-dir /srv/labels build --copy-config
//!
//! # Report what is missing without installing or building anything
//! exepack check
//! ```
//!
//! Exit status is 0 on success and 1 on any failed step.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use exepack::config::{resolve_project_dir, BuildConfig};
use exepack::console::{self, ConsoleLogger};
use exepack::orchestrator::{report_success, run_build, BuildOptions};
use exepack::preflight::PreflightChecker;

#[derive(Parser)]
#[command(name = "exepack")]
#[command(author, version, about = "Package getLabel.py as a standalone executable", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory containing getLabel.py (default: current directory)
    #[arg(long, global = true, value_name = "DIR")]
    project_dir: Option<PathBuf>,

    /// Exit without waiting for Enter
    #[arg(long, global = true)]
    no_pause: bool,

    /// Show every external command before it runs
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Copy config.json next to the built executable
    #[arg(long, global = true)]
    copy_config: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the executable (default when no subcommand is given)
    Build,

    /// Check prerequisites without installing or building
    Check,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    ConsoleLogger::init(cli.verbose);

    match cli.command {
        None | Some(Commands::Build) => {
            // Every build outcome, including setup errors, waits for acknowledgment.
            let code = match cmd_build(cli.project_dir, cli.copy_config) {
                Ok(code) => code,
                Err(e) => {
                    console::error(&format!("{:#}", e), None);
                    ExitCode::FAILURE
                }
            };
            console::pause(!cli.no_pause);
            code
        }
        Some(Commands::Check) => match cmd_check(cli.project_dir) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn cmd_build(project_dir: Option<PathBuf>, copy_config: bool) -> Result<ExitCode> {
    let config = BuildConfig::from_env(resolve_project_dir(project_dir.as_deref())?);
    let options = BuildOptions {
        copy_companion: copy_config,
    };

    Ok(match run_build(&config, options) {
        Ok(outcome) => {
            report_success(&config, &outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            console::error(&e.to_string(), e.suggestion().as_deref());
            ExitCode::from(e.exit_code() as u8)
        }
    })
}

fn cmd_check(project_dir: Option<PathBuf>) -> Result<ExitCode> {
    let config = BuildConfig::from_env(resolve_project_dir(project_dir.as_deref())?);
    let report = PreflightChecker::new(config).run_all();
    report.print_summary();

    Ok(if report.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
