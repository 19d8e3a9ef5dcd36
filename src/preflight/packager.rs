//! Packaging tool (PyInstaller) probe and installation.

use super::CheckResult;
use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::process::{Cmd, ProcessError};

/// What [`ensure_packager`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackagerStatus {
    AlreadyInstalled,
    Installed,
}

/// Probe by importing the module in the runtime.
pub fn packager_available(config: &BuildConfig) -> bool {
    Cmd::new(&config.runtime)
        .arg("-c")
        .arg(format!("import {}", config.packager_module))
        .allow_fail()
        .run()
        .map(|r| r.success())
        .unwrap_or(false)
}

/// Make sure the packaging tool is importable, installing it with pip if not.
///
/// Installation output is shown to the user. No retry on failure.
pub fn ensure_packager(config: &BuildConfig) -> Result<PackagerStatus, BuildError> {
    if packager_available(config) {
        println!("[OK] {} is installed", config.packager_module);
        return Ok(PackagerStatus::AlreadyInstalled);
    }

    println!(
        "{} not found, installing {}...",
        config.packager_module, config.packager_package
    );
    Cmd::new(&config.runtime)
        .args(["-m", "pip", "install", config.packager_package])
        .error_msg("pip install failed")
        .run_interactive()
        .map_err(|e| BuildError::InstallFailed {
            package: config.packager_package.to_string(),
            reason: match &e {
                ProcessError::Failed { status, .. } => format!("pip exited with {}", status),
                ProcessError::Spawn { .. } => e.to_string(),
            },
        })?;

    println!("[OK] {} installed", config.packager_package);
    Ok(PackagerStatus::Installed)
}

/// Packaging tool check for the preflight report. Never installs.
pub fn check_packager(config: &BuildConfig) -> CheckResult {
    let name = "Packaging tool";
    if packager_available(config) {
        CheckResult::pass(
            name,
            format!("{} importable by {}", config.packager_module, config.runtime),
        )
    } else {
        CheckResult::fail(
            name,
            format!("{} is not installed", config.packager_module),
            format!("{} -m pip install {}", config.runtime, config.packager_package),
        )
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_probe_succeeds_when_runtime_exits_zero() {
        // `true` accepts any arguments and succeeds
        let config = BuildConfig::new(".").with_runtime("true");
        assert!(packager_available(&config));
        assert_eq!(
            ensure_packager(&config).unwrap(),
            PackagerStatus::AlreadyInstalled
        );
        assert!(check_packager(&config).passed);
    }

    #[test]
    fn test_install_failure_is_fatal() {
        // `false` fails both the import probe and the pip install
        let config = BuildConfig::new(".").with_runtime("false");
        assert!(!packager_available(&config));
        let err = ensure_packager(&config).unwrap_err();
        assert!(matches!(err, BuildError::InstallFailed { .. }));
        assert!(err.to_string().contains("pyinstaller"));
    }

    #[test]
    fn test_check_suggests_pip_install() {
        let config = BuildConfig::new(".").with_runtime("false");
        let result = check_packager(&config);
        assert!(!result.passed);
        assert_eq!(
            result.suggestion.as_deref(),
            Some("false -m pip install pyinstaller")
        );
    }
}
