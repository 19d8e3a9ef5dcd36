use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Stand-in for the Python runtime.
///
/// Handles the four invocations the builder makes. Behavior is driven by
/// files in `$FAKE_PY_STATE` and `FAKE_PY_*` variables; every call is
/// appended to `$FAKE_PY_LOG`.
const FAKE_PYTHON: &str = r#"#!/bin/sh
echo "$*" >> "$FAKE_PY_LOG"
case "$1" in
  --version)
    [ -n "$FAKE_PY_VERSION_FAIL" ] && { echo "broken interpreter" >&2; exit 1; }
    echo "Python 3.12.1"
    exit 0
    ;;
  -c)
    [ -f "$FAKE_PY_STATE/pyinstaller" ] && exit 0
    echo "ModuleNotFoundError: No module named 'PyInstaller'" >&2
    exit 1
    ;;
  -m)
    case "$2" in
      pip)
        [ -n "$FAKE_PY_INSTALL_FAIL" ] && { echo "ERROR: no network" >&2; exit 1; }
        touch "$FAKE_PY_STATE/pyinstaller"
        echo "Successfully installed pyinstaller"
        exit 0
        ;;
      PyInstaller)
        [ -n "$FAKE_PY_PACKAGE_FAIL" ] && { echo "Syntax error in getLabel.py" >&2; exit 2; }
        name=""
        clean=""
        prev=""
        for arg in "$@"; do
          [ "$prev" = "--name" ] && name="$arg"
          [ "$arg" = "--clean" ] && clean=1
          prev="$arg"
        done
        [ -n "$clean" ] && rm -rf build
        mkdir -p build dist
        echo "stale" > "build/$name.toc"
        echo "binary" > "dist/$name"
        exit 0
        ;;
    esac
    ;;
esac
exit 64
"#;

pub struct TestEnv {
    _tmp: TempDir,
    /// Holds `project/`, `bin/python` and the fake runtime's state.
    pub root: PathBuf,
    pub project: PathBuf,
    pub python: PathBuf,
    pub state: PathBuf,
    pub log: PathBuf,
}

impl TestEnv {
    /// Project with `getLabel.py` and a runtime that already has PyInstaller.
    pub fn new() -> Self {
        let env = Self::bare();
        fs::write(env.project.join("getLabel.py"), "print('label')\n").expect("write source");
        env.mark_packager_installed();
        env
    }

    /// Empty project, runtime without PyInstaller.
    pub fn bare() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let project = tmp.path().join("project");
        let state = tmp.path().join("state");
        let bin = tmp.path().join("bin");
        fs::create_dir_all(&project).expect("create project dir");
        fs::create_dir_all(&state).expect("create state dir");
        fs::create_dir_all(&bin).expect("create bin dir");

        let python = bin.join("python");
        write_executable(&python, FAKE_PYTHON);
        let log = tmp.path().join("calls.log");

        Self {
            root: tmp.path().to_path_buf(),
            _tmp: tmp,
            project,
            python,
            state,
            log,
        }
    }

    pub fn mark_packager_installed(&self) {
        fs::write(self.state.join("pyinstaller"), "").expect("mark installed");
    }

    pub fn write_companion(&self, contents: &str) {
        fs::write(self.project.join("config.json"), contents).expect("write config.json");
    }

    /// `exepack` running in the project directory against the fake runtime.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("exepack");
        cmd.current_dir(&self.project)
            .env("EXEPACK_PYTHON", &self.python)
            .env("FAKE_PY_STATE", &self.state)
            .env("FAKE_PY_LOG", &self.log)
            .env("NO_COLOR", "1")
            .env_remove("FAKE_PY_VERSION_FAIL")
            .env_remove("FAKE_PY_INSTALL_FAIL")
            .env_remove("FAKE_PY_PACKAGE_FAIL");
        cmd
    }

    /// Runtime invocations so far, one per line.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn artifact(&self) -> PathBuf {
        self.project.join("dist").join("getLabel")
    }
}

fn write_executable(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write script");
    let mut perms = fs::metadata(path).expect("script metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).expect("chmod script");
}
