//! The build sequence.
//!
//! ```text
//! runtime --version ──► import PyInstaller ──► getLabel.py exists ──► PyInstaller ──► report
//!                            │ (absent)
//!                            └─► pip install pyinstaller
//! ```
//!
//! Strictly linear. The first failing step ends the run with its
//! [`BuildError`]; nothing is retried and nothing is rolled back.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::BuildConfig;
use crate::console;
use crate::error::BuildError;
use crate::package::build_executable;
use crate::preflight::{ensure_packager, query_runtime_version, require_source, PackagerStatus};
use crate::timing::{format_duration, Timer};

/// Switches that change what happens after a successful packaging run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Copy the companion config next to the artifact.
    pub copy_companion: bool,
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub artifact: PathBuf,
    pub runtime_version: String,
    pub packager: PackagerStatus,
    /// Where the companion config has to end up.
    pub companion_target: PathBuf,
    /// True if `--copy-config` put it there.
    pub companion_copied: bool,
}

/// Run every step in order, stopping at the first failure.
pub fn run_build(config: &BuildConfig, options: BuildOptions) -> Result<BuildOutcome, BuildError> {
    let build_start = Instant::now();
    println!("=== Packaging {} ===\n", config.source_file);
    log::debug!("project directory: {}", config.project_dir.display());

    // 1. Runtime
    let runtime_version = query_runtime_version(config)?;
    println!("[OK] {} ({})", runtime_version, config.runtime);

    // 2. Packaging tool, installed on demand
    let packager = ensure_packager(config)?;

    // 3. Source file
    let source = require_source(config)?;
    println!("[OK] Source file {}", source.display());

    // 4. Packaging run
    println!();
    let t = Timer::start(config.packager_module);
    let artifact = build_executable(config)?;
    t.finish();

    let companion_target = config.deployed_companion_path();
    let companion_copied = options.copy_companion && copy_companion(config)?;

    println!(
        "\n=== Build Complete ({}) ===",
        format_duration(build_start.elapsed())
    );

    Ok(BuildOutcome {
        artifact,
        runtime_version,
        packager,
        companion_target,
        companion_copied,
    })
}

/// Print the artifact location and the companion-config reminder.
pub fn report_success(config: &BuildConfig, outcome: &BuildOutcome) {
    console::success(&format!("Executable: {}", outcome.artifact.display()));
    if outcome.companion_copied {
        println!(
            "  {} copied to {}",
            config.companion_config,
            outcome.companion_target.display()
        );
    } else {
        println!(
            "\nIMPORTANT: copy {} into the same directory as the executable:",
            config.companion_config
        );
        println!("  {}", outcome.companion_target.display());
    }
}

/// Returns false (with a warning) when there is nothing to copy.
fn copy_companion(config: &BuildConfig) -> Result<bool, BuildError> {
    let from = config.companion_path();
    if !from.is_file() {
        console::warn(&format!(
            "{} not found in {}, nothing to copy",
            config.companion_config,
            config.project_dir.display()
        ));
        return Ok(false);
    }

    let to = config.deployed_companion_path();
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(|source| BuildError::Io {
            context: format!("Failed to create {}", parent.display()),
            source,
        })?;
    }
    fs::copy(&from, &to).map_err(|source| BuildError::Io {
        context: format!("Failed to copy {} to {}", from.display(), to.display()),
        source,
    })?;
    log::debug!("copied {} -> {}", from.display(), to.display());
    Ok(true)
}
