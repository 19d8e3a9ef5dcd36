//! PyInstaller invocation.
//!
//! The option set is fixed: one-file output, console attached, custom
//! output name, and a clean of PyInstaller's cache and `build/` directory
//! before every run. `--noconfirm` lets a rebuild replace the previous
//! `dist/` output without prompting, so repeated runs land on the same path.

use std::path::{Path, PathBuf};

use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::process::{Cmd, ProcessError};

/// Options passed between `<runtime> -m <module>` and the source file.
pub fn packager_options(config: &BuildConfig) -> [&'static str; 6] {
    [
        "--onefile",
        "--console",
        "--clean",
        "--noconfirm",
        "--name",
        config.output_name,
    ]
}

/// Full command line for the packaging run.
///
/// The source is passed relative to the project directory, which is the
/// child's working directory.
pub fn packager_command(config: &BuildConfig) -> Cmd {
    Cmd::new(&config.runtime)
        .args(["-m", config.packager_module])
        .args(packager_options(config))
        .arg_path(Path::new(config.source_file))
        .current_dir(&config.project_dir)
        .error_msg(format!("{} failed", config.packager_module))
}

/// Run the packaging tool once and return the expected artifact path.
///
/// Output streams straight to the terminal. Only the exit status decides
/// success; the artifact is not re-checked on disk.
pub fn build_executable(config: &BuildConfig) -> Result<PathBuf, BuildError> {
    let cmd = packager_command(config);
    println!("Running {}...", config.packager_module);
    println!("  {}", cmd.display());

    cmd.run_interactive().map_err(|e| {
        let start_error = match &e {
            ProcessError::Spawn { source, .. } => Some(source.to_string()),
            _ => None,
        };
        BuildError::PackagingFailed {
            tool: config.packager_module.to_string(),
            code: e.code(),
            start_error,
        }
    })?;

    Ok(config.artifact_path())
}
