//! Source file presence.

use std::path::PathBuf;

use super::CheckResult;
use crate::config::BuildConfig;
use crate::error::BuildError;

/// The source script must be a regular file in the project directory.
pub fn require_source(config: &BuildConfig) -> Result<PathBuf, BuildError> {
    let path = config.source_path();
    if path.is_file() {
        Ok(path)
    } else {
        Err(BuildError::SourceMissing { path })
    }
}

pub fn check_source(config: &BuildConfig) -> CheckResult {
    match require_source(config) {
        Ok(path) => CheckResult::pass("Source file", format!("Found {}", path.display())),
        Err(_) => CheckResult::fail(
            "Source file",
            format!(
                "{} not found in {}",
                config.source_file,
                config.project_dir.display()
            ),
            "Run from the project directory or pass --project-dir",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_source_present() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("getLabel.py"), "print('hi')\n").unwrap();
        let config = BuildConfig::new(dir.path());

        assert_eq!(require_source(&config).unwrap(), dir.path().join("getLabel.py"));
        assert!(check_source(&config).passed);
    }

    #[test]
    fn test_source_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = BuildConfig::new(dir.path());

        assert!(matches!(
            require_source(&config),
            Err(BuildError::SourceMissing { .. })
        ));
        assert!(!check_source(&config).passed);
    }

    #[test]
    fn test_directory_is_not_a_source() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("getLabel.py")).unwrap();
        let config = BuildConfig::new(dir.path());

        assert!(require_source(&config).is_err());
    }
}
