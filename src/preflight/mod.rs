//! Preflight checks for packaging `getLabel.py`.
//!
//! Each check has two faces: a step function returning
//! `Result<_, BuildError>` that the build sequence stops on, and a
//! [`CheckResult`] form collected into a [`PreflightReport`] for
//! `exepack check`.
//!
//! # Checks Performed
//!
//! - **Runtime**: the Python interpreter answers `--version`
//! - **Packaging tool**: `import PyInstaller` succeeds
//! - **Source file**: `getLabel.py` exists in the project directory
//! - **Companion config**: `config.json` exists and has the keys the
//!   executable reads at startup
//!
//! # Usage
//!
//! ```rust,ignore
//! use exepack::config::BuildConfig;
//! use exepack::preflight::PreflightChecker;
//!
//! let checker = PreflightChecker::new(BuildConfig::from_env(project_dir));
//! let report = checker.run_all();
//! report.print_summary();
//! if !report.is_ok() {
//!     std::process::exit(1);
//! }
//! ```

mod companion;
mod packager;
mod runtime;
mod source;

pub use companion::{check_companion_config, validate_companion, CompanionError};
pub use packager::{check_packager, ensure_packager, packager_available, PackagerStatus};
pub use runtime::{check_runtime, query_runtime_version};
pub use source::{check_source, require_source};

use crate::config::BuildConfig;

/// Result of a single preflight check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Human-readable message
    pub message: String,
    /// Optional suggestion for fixing the issue
    pub suggestion: Option<String>,
}

impl CheckResult {
    /// Create a passing check result.
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Create a failing check result.
    pub fn fail(
        name: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            passed: false,
            message: message.into(),
            suggestion: Some(suggestion.into()),
        }
    }
}

/// Collected preflight results.
#[derive(Debug, Default)]
pub struct PreflightReport {
    pub checks: Vec<CheckResult>,
}

impl PreflightReport {
    /// Check if all preflight checks passed.
    pub fn is_ok(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Get all failing checks.
    pub fn errors(&self) -> Vec<&CheckResult> {
        self.checks.iter().filter(|c| !c.passed).collect()
    }

    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn total_count(&self) -> usize {
        self.checks.len()
    }

    /// Print a summary of the preflight checks.
    pub fn print_summary(&self) {
        println!("=== Preflight Check Results ===\n");

        for check in &self.checks {
            let status = if check.passed { "[OK]" } else { "[FAIL]" };
            println!("{} {}: {}", status, check.name, check.message);
            if let Some(suggestion) = &check.suggestion {
                println!("     Suggestion: {}", suggestion);
            }
        }

        println!();
        if self.is_ok() {
            println!(
                "All preflight checks passed ({}/{})",
                self.passed_count(),
                self.total_count()
            );
        } else {
            let failed: Vec<&str> = self.errors().iter().map(|c| c.name.as_str()).collect();
            println!(
                "Preflight checks failed: {} of {} passed (failing: {})",
                self.passed_count(),
                self.total_count(),
                failed.join(", ")
            );
        }
    }
}

/// Runs every check without changing the environment.
pub struct PreflightChecker {
    config: BuildConfig,
}

impl PreflightChecker {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Run all checks. The packaging tool is probed, never installed.
    pub fn run_all(&self) -> PreflightReport {
        let mut report = PreflightReport::default();

        let runtime = check_runtime(&self.config);
        let runtime_ok = runtime.passed;
        report.checks.push(runtime);

        // The import probe needs a working interpreter.
        if runtime_ok {
            report.checks.push(check_packager(&self.config));
        } else {
            report.checks.push(CheckResult::fail(
                "Packaging tool",
                format!("Skipped ({} unavailable)", self.config.runtime),
                "Fix the runtime check first",
            ));
        }

        report.checks.push(check_source(&self.config));
        report.checks.push(check_companion_config(&self.config));

        report
    }
}
