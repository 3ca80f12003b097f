//! Common test utilities for CLI integration tests.
//!
//! Provides an isolated environment per test: a temporary project
//! directory, a separate user configuration directory, and a command
//! builder that scrubs `FLATLINT_*` variables from the child process.

use assert_cmd::Command;
use flatlint::config::env_vars;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with isolated project and data directories.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Project directory commands run in
    pub project_dir: PathBuf,
    /// User configuration directory passed via --data-dir
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path().join("project");
        let data_dir = temp_dir.path().join("flatlint-data");
        std::fs::create_dir_all(&project_dir).expect("Failed to create project dir");

        Self {
            temp_dir,
            project_dir,
            data_dir,
        }
    }

    /// Command with only the binary and a scrubbed environment.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("flatlint").expect("Failed to find flatlint binary");
        for name in env_vars::ALL {
            cmd.env_remove(name);
        }
        cmd.env_remove("FLATLINT_DATA_DIR")
            .env_remove("FLATLINT_OUTPUT_FORMAT")
            .env_remove("FLATLINT_LOG_MODE");
        cmd.current_dir(&self.project_dir);
        cmd
    }

    /// Command with --data-dir pointing at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// The project directory.
    pub fn path(&self) -> &Path {
        &self.project_dir
    }

    /// Create a subdirectory of the project.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.project_dir.join(name);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Write `flatlint.yaml` into `dir`.
    pub fn write_project_config(&self, dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("flatlint.yaml");
        std::fs::write(&path, contents).expect("Failed to write project config");
        path
    }

    /// Write the user configuration file.
    pub fn write_user_config(&self, contents: &str) -> PathBuf {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        let path = self.data_dir.join("config.yaml");
        std::fs::write(&path, contents).expect("Failed to write user config");
        path
    }

    /// Run `generate --format json` with extra arguments and parse stdout.
    pub fn generate_json(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .command()
            .arg("generate")
            .arg("--format")
            .arg("json")
            .args(args)
            .output()
            .expect("Failed to run generate");

        assert!(
            output.status.success(),
            "generate failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("generate did not print JSON")
    }
}

/// Find a fragment by name in generated JSON output.
#[allow(dead_code)]
pub fn fragment<'a>(fragments: &'a serde_json::Value, name: &str) -> Option<&'a serde_json::Value> {
    fragments
        .as_array()?
        .iter()
        .find(|fragment| fragment["name"] == name)
}
