//! Companion `config.json` validation.
//!
//! The packaged executable reads `config.json` from its working directory
//! and aborts at startup if it is missing or lacks one of
//! [`COMPANION_REQUIRED_KEYS`].

use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use super::CheckResult;
use crate::config::{BuildConfig, COMPANION_REQUIRED_KEYS};

#[derive(Error, Debug)]
pub enum CompanionError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("top-level value must be an object")]
    NotAnObject,

    #[error("missing keys: {}", .0.join(", "))]
    MissingKeys(Vec<String>),
}

/// Parse the companion file and verify the startup keys are present.
pub fn validate_companion(path: &Path) -> Result<(), CompanionError> {
    let text = fs::read_to_string(path).map_err(|source| CompanionError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text)?;
    let object = value.as_object().ok_or(CompanionError::NotAnObject)?;

    let missing: Vec<String> = COMPANION_REQUIRED_KEYS
        .iter()
        .filter(|key| !object.contains_key(**key))
        .map(|key| key.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CompanionError::MissingKeys(missing))
    }
}

pub fn check_companion_config(config: &BuildConfig) -> CheckResult {
    let name = "Companion config";
    let path = config.companion_path();

    if !path.exists() {
        return CheckResult::fail(
            name,
            format!("{} not found", config.companion_config),
            format!(
                "Create {} next to {} before deploying",
                config.companion_config, config.source_file
            ),
        );
    }

    match validate_companion(&path) {
        Ok(()) => CheckResult::pass(name, format!("{} is valid", path.display())),
        Err(e) => CheckResult::fail(
            name,
            format!("{}: {}", config.companion_config, e),
            format!("Required keys: {}", COMPANION_REQUIRED_KEYS.join(", ")),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPLETE: &str = r#"{
        "shop_client_key": "client",
        "shop_secret_key": "secret",
        "sandbox": true,
        "test_uri": "https://sellerapi.kaufland.com/v2/test",
        "live_uri": "https://sellerapi.kaufland.com/v2/live",
        "label_path": "labels",
        "sql": { "server": "db01", "database": "erp" }
    }"#;

    #[test]
    fn test_complete_config_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.json"), COMPLETE).unwrap();

        assert!(validate_companion(&dir.path().join("config.json")).is_ok());
        assert!(check_companion_config(&BuildConfig::new(dir.path())).passed);
    }

    #[test]
    fn test_missing_keys_are_listed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"shop_client_key": "client", "sql": {}}"#).unwrap();

        match validate_companion(&path) {
            Err(CompanionError::MissingKeys(keys)) => {
                assert_eq!(keys, vec!["shop_secret_key", "test_uri", "live_uri"]);
            }
            other => panic!("expected MissingKeys, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            validate_companion(&path),
            Err(CompanionError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_array_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "[]").unwrap();

        assert!(matches!(
            validate_companion(&path),
            Err(CompanionError::NotAnObject)
        ));
    }

    #[test]
    fn test_missing_file_fails_check() {
        let dir = tempfile::tempdir().unwrap();
        let result = check_companion_config(&BuildConfig::new(dir.path()));
        assert!(!result.passed);
        assert!(result.message.contains("config.json"));
    }
}
