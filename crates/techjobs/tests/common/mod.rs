//! Common test utilities shared across integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Path of the `techjobs` binary built for this test run.
pub fn techjobs_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_techjobs"))
}

/// Run the techjobs binary in `dir` with a clean environment.
///
/// The data file variable is cleared so the caller's shell cannot leak a
/// source into the test, and colour is disabled so output can be matched as
/// plain text.
pub fn run_techjobs_in_dir(dir: &Path, args: &[&str]) -> Output {
    run_techjobs_with_env(dir, args, &[])
}

/// Like [`run_techjobs_in_dir`], with extra environment variables set.
pub fn run_techjobs_with_env(dir: &Path, args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(techjobs_binary());
    cmd.args(args)
        .current_dir(dir)
        .env_remove("TECHJOBS_DATA")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd.output().expect("Failed to execute techjobs binary")
}

/// Write a CSV file named `name` into `dir` and return its path.
pub fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create data directory");
    }
    fs::write(&path, content).expect("Failed to write CSV file");
    path
}

/// Write a YAML config pointing at `data_file` and return its path.
pub fn write_config(dir: &Path, data_file: &Path) -> PathBuf {
    let path = dir.join("techjobs.yaml");
    fs::write(&path, format!("data-file: '{}'\n", data_file.display()))
        .expect("Failed to write config file");
    path
}

/// Stdout of a finished command as text.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of a finished command as text.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
