//! Python runtime check.

use super::CheckResult;
use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::process::{which, Cmd, ProcessError};

/// Ask the runtime for its version; any failure means it is unusable.
pub fn query_runtime_version(config: &BuildConfig) -> Result<String, BuildError> {
    let result = Cmd::new(&config.runtime)
        .arg("--version")
        .error_msg("version query failed")
        .run()
        .map_err(|e| BuildError::RuntimeMissing {
            runtime: config.runtime.clone(),
            reason: describe(&e),
        })?;

    Ok(result
        .first_line()
        .unwrap_or("unknown version")
        .to_string())
}

/// Runtime check for the preflight report.
pub fn check_runtime(config: &BuildConfig) -> CheckResult {
    let name = "Runtime";
    let suggestion = format!(
        "Install Python 3 and add it to PATH, or set {}",
        crate::config::RUNTIME_ENV
    );

    let Some(path) = which(&config.runtime) else {
        return CheckResult::fail(
            name,
            format!("'{}' not found on PATH", config.runtime),
            suggestion,
        );
    };

    match query_runtime_version(config) {
        Ok(version) => CheckResult::pass(name, format!("{} at {}", version, path.display())),
        Err(e) => CheckResult::fail(name, e.to_string(), suggestion),
    }
}

fn describe(err: &ProcessError) -> String {
    match err {
        ProcessError::Spawn { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
            "command not found".to_string()
        }
        ProcessError::Spawn { source, .. } => source.to_string(),
        ProcessError::Failed { status, stderr, .. } => {
            match stderr.lines().map(str::trim).find(|l| !l.is_empty()) {
                Some(line) => format!("--version exited with {} ({})", status, line),
                None => format!("--version exited with {}", status),
            }
        }
    }
}
