//! Build configuration for packaging `getLabel.py`.
//!
//! The packaging options are fixed. Only the runtime program and the
//! project directory can be changed, via `EXEPACK_PYTHON` and
//! `--project-dir` respectively.
//!
//! # Example
//!
//! ```rust
//! use exepack::config::BuildConfig;
//!
//! let config = BuildConfig::new("/srv/labels");
//! assert_eq!(config.source_file, "getLabel.py");
//! assert!(config.source_path().ends_with("getLabel.py"));
//! ```

use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable overriding the Python runtime program.
pub const RUNTIME_ENV: &str = "EXEPACK_PYTHON";

/// Runtime invoked when `EXEPACK_PYTHON` is unset.
pub const DEFAULT_RUNTIME: &str = "python";

/// Python module name of the packaging tool (`python -m PyInstaller`).
pub const PACKAGER_MODULE: &str = "PyInstaller";

/// Package name passed to pip when the packaging tool is missing.
pub const PACKAGER_PACKAGE: &str = "pyinstaller";

/// Script that gets packaged.
pub const SOURCE_FILE: &str = "getLabel.py";

/// Name of the produced executable (without platform suffix).
pub const OUTPUT_NAME: &str = "getLabel";

/// Directory PyInstaller writes finished artifacts to.
pub const DIST_DIR: &str = "dist";

/// Configuration file the executable reads from its own directory at startup.
pub const COMPANION_CONFIG: &str = "config.json";

/// Top-level keys `getLabel.py` reads from the companion config without a default.
pub const COMPANION_REQUIRED_KEYS: &[&str] = &[
    "shop_client_key",
    "shop_secret_key",
    "test_uri",
    "live_uri",
    "sql",
];

/// Resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub runtime: String,
    pub packager_module: &'static str,
    pub packager_package: &'static str,
    pub source_file: &'static str,
    pub output_name: &'static str,
    pub dist_dir: &'static str,
    pub companion_config: &'static str,
    /// Directory that holds the source file and receives `dist/`.
    pub project_dir: PathBuf,
}

impl BuildConfig {
    /// Configuration with the default runtime.
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            runtime: DEFAULT_RUNTIME.to_string(),
            packager_module: PACKAGER_MODULE,
            packager_package: PACKAGER_PACKAGE,
            source_file: SOURCE_FILE,
            output_name: OUTPUT_NAME,
            dist_dir: DIST_DIR,
            companion_config: COMPANION_CONFIG,
            project_dir: project_dir.into(),
        }
    }

    /// Configuration honoring `EXEPACK_PYTHON`.
    ///
    /// A relative runtime path is anchored at the launch directory here,
    /// before any command runs in the project directory.
    pub fn from_env(project_dir: impl Into<PathBuf>) -> Self {
        let config = Self::new(project_dir);
        let runtime = match env::var(RUNTIME_ENV) {
            Ok(runtime) if !runtime.trim().is_empty() => runtime.trim().to_string(),
            _ => return config,
        };
        match env::current_dir() {
            Ok(cwd) => config.with_runtime(anchor_runtime(&runtime, &cwd)),
            Err(_) => config.with_runtime(runtime),
        }
    }

    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = runtime.into();
        self
    }

    pub fn source_path(&self) -> PathBuf {
        self.project_dir.join(self.source_file)
    }

    pub fn companion_path(&self) -> PathBuf {
        self.project_dir.join(self.companion_config)
    }

    /// Where PyInstaller puts the one-file executable.
    pub fn artifact_path(&self) -> PathBuf {
        self.project_dir
            .join(self.dist_dir)
            .join(format!("{}{}", self.output_name, env::consts::EXE_SUFFIX))
    }

    /// Where the companion config belongs once deployed.
    pub fn deployed_companion_path(&self) -> PathBuf {
        self.project_dir
            .join(self.dist_dir)
            .join(self.companion_config)
    }
}

/// Join a runtime given as a relative path (`./bin/python`) onto `cwd`.
///
/// Bare program names are left alone for the `PATH` lookup.
pub fn anchor_runtime(runtime: &str, cwd: &Path) -> String {
    let path = Path::new(runtime);
    if path.is_relative() && path.components().count() > 1 {
        cwd.join(path).display().to_string()
    } else {
        runtime.to_string()
    }
}

/// Resolve the project directory: explicit path if given, else the current directory.
///
/// Relative paths are anchored at the current directory so that log and
/// success messages show a stable absolute location. The directory must exist.
pub fn resolve_project_dir(explicit: Option<&Path>) -> io::Result<PathBuf> {
    let cwd = env::current_dir()?;
    let dir = match explicit {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => cwd.join(dir),
        None => cwd,
    };
    if !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("project directory {} does not exist", dir.display()),
        ));
    }
    Ok(dir)
}
