//! Failure taxonomy for a packaging run.
//!
//! Every variant is terminal: the orchestrator stops at the first one and
//! the CLI exits with [`BuildError::exit_code`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the build sequence.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Python runtime '{runtime}' is not available: {reason}")]
    RuntimeMissing { runtime: String, reason: String },

    #[error("Failed to install {package}: {reason}")]
    InstallFailed { package: String, reason: String },

    #[error("Source file not found: {}", .path.display())]
    SourceMissing { path: PathBuf },

    #[error("{tool} failed{}", failure_suffix(.code, .start_error))]
    PackagingFailed {
        tool: String,
        code: Option<i32>,
        /// Set when the packaging command never started.
        start_error: Option<String>,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// One-line hint printed under the error, if we have one.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            BuildError::RuntimeMissing { .. } => Some(
                "Install Python and make sure it is on PATH, or set EXEPACK_PYTHON".to_string(),
            ),
            BuildError::InstallFailed { package, .. } => {
                Some(format!("Try installing it manually: pip install {}", package))
            }
            BuildError::SourceMissing { .. } => {
                Some("Run from the project directory or pass --project-dir".to_string())
            }
            BuildError::PackagingFailed {
                start_error: Some(_),
                ..
            } => Some(
                "Check that the Python runtime is still installed and executable".to_string(),
            ),
            BuildError::PackagingFailed { .. } => {
                Some("Check the PyInstaller output above for the cause".to_string())
            }
            BuildError::Io { .. } => None,
        }
    }
}

fn failure_suffix(code: &Option<i32>, start_error: &Option<String>) -> String {
    match (start_error, *code) {
        (Some(reason), _) => format!(" to start: {}", reason),
        (None, Some(code)) => format!(" with exit code {}", code),
        (None, None) => " (terminated by signal)".to_string(),
    }
}
