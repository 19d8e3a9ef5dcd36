//! External command execution.
//!
//! [`Cmd`] is a small builder around [`std::process::Command`] that logs the
//! command line, captures or inherits output, and turns non-zero exits into
//! [`ProcessError`] unless the caller opts out with [`Cmd::allow_fail`].
//!
//! ```rust,ignore
//! use exepack::process::Cmd;
//!
//! let result = Cmd::new("python")
//!     .arg("--version")
//!     .error_msg("Python not found")
//!     .run()?;
//! println!("{}", result.stdout.trim());
//! ```

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

/// Errors from running an external command.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{message} ('{program}' exited with {status})")]
    Failed {
        program: String,
        status: ExitStatus,
        message: String,
        stderr: String,
    },
}

impl ProcessError {
    /// Exit code of the failed command, if it ran and exited normally.
    pub fn code(&self) -> Option<i32> {
        match self {
            ProcessError::Spawn { .. } => None,
            ProcessError::Failed { status, .. } => status.code(),
        }
    }
}

/// Output of a finished command.
///
/// `stdout` and `stderr` are empty for [`Cmd::run_interactive`], whose
/// output goes straight to the terminal.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// First non-empty line across stdout then stderr.
    ///
    /// Older Python releases print `--version` output to stderr.
    pub fn first_line(&self) -> Option<&str> {
        self.stdout
            .lines()
            .chain(self.stderr.lines())
            .map(str::trim)
            .find(|line| !line.is_empty())
    }
}

/// Builder for an external command.
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    dir: Option<PathBuf>,
    allow_fail: bool,
    error_msg: Option<String>,
}

impl Cmd {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            dir: None,
            allow_fail: false,
            error_msg: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn arg_path(self, path: &Path) -> Self {
        self.arg(path.as_os_str())
    }

    /// Working directory for the child process.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Return non-zero exits as a normal [`CommandResult`] instead of an error.
    pub fn allow_fail(mut self) -> Self {
        self.allow_fail = true;
        self
    }

    /// Message used when the command exits non-zero.
    pub fn error_msg(mut self, msg: impl Into<String>) -> Self {
        self.error_msg = Some(msg.into());
        self
    }

    /// Run with captured stdout/stderr.
    pub fn run(self) -> Result<CommandResult, ProcessError> {
        let mut command = self.command();
        command.stdin(Stdio::null());
        let output = command.output().map_err(|source| self.spawn_error(source))?;

        let result = CommandResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        self.finish(result)
    }

    /// Run with stdio inherited so the user sees the tool's own progress.
    pub fn run_interactive(self) -> Result<CommandResult, ProcessError> {
        let mut command = self.command();
        command.stdin(Stdio::null());
        let status = command.status().map_err(|source| self.spawn_error(source))?;

        self.finish(CommandResult {
            status,
            stdout: String::new(),
            stderr: String::new(),
        })
    }

    /// Shell-like rendering of the command line, for logs.
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|part| {
                let part = part.to_string_lossy();
                if part.is_empty() || part.contains(char::is_whitespace) {
                    format!("\"{}\"", part)
                } else {
                    part.into_owned()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn command(&self) -> Command {
        log::debug!("running: {}", self.display());
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.dir {
            log::debug!("  in: {}", dir.display());
            command.current_dir(dir);
        }
        command
    }

    fn spawn_error(&self, source: io::Error) -> ProcessError {
        ProcessError::Spawn {
            program: self.program.to_string_lossy().into_owned(),
            source,
        }
    }

    fn finish(self, result: CommandResult) -> Result<CommandResult, ProcessError> {
        if result.success() || self.allow_fail {
            return Ok(result);
        }
        let program = self.program.to_string_lossy().into_owned();
        Err(ProcessError::Failed {
            message: self
                .error_msg
                .unwrap_or_else(|| format!("{} failed", program)),
            program,
            status: result.status,
            stderr: result.stderr,
        })
    }
}

/// Locate a program on `PATH`.
///
/// A program given with a directory component is resolved against the
/// current directory instead.
pub fn which(program: &str) -> Option<PathBuf> {
    ::which::which(program).ok()
}
