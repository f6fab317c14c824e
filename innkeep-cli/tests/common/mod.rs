//! Common test utilities for CLI integration tests.
//!
//! Every test runs the real binary against its own temporary data
//! directory, with inherited `INNKEEP_*` variables removed.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables the binary reads.
const INNKEEP_ENV: [&str; 7] = [
    "INNKEEP_BACKEND",
    "INNKEEP_API_URL",
    "INNKEEP_STORAGE_SLOT",
    "INNKEEP_DATA_DIR",
    "INNKEEP_REQUEST_TIMEOUT_SECONDS",
    "INNKEEP_OUTPUT_FORMAT",
    "INNKEEP_LOG_MODE",
];

/// Test environment with an isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the innkeep data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; the first write creates it.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("innkeep-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// The binary with a clean environment and no flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("innkeep").expect("Failed to find innkeep binary");
        cmd.current_dir(&self.temp_path);
        for var in INNKEEP_ENV {
            cmd.env_remove(var);
        }
        cmd
    }

    /// The binary with `--data-dir` pointing at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Creates a reservation and returns its id.
    pub fn create(&self, name: &str, check_in: &str, check_out: &str, room: u32) -> String {
        let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
        let output = self
            .command()
            .arg("--quiet")
            .arg("new")
            .arg("--guest-name")
            .arg(name)
            .arg("--guest-email")
            .arg(email)
            .arg("--check-in")
            .arg(check_in)
            .arg("--check-out")
            .arg(check_out)
            .arg("--room")
            .arg(room.to_string())
            .output()
            .expect("Failed to run innkeep new");

        assert!(
            output.status.success(),
            "new failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout)
            .expect("id is UTF-8")
            .trim()
            .to_string()
    }

    /// Reservations as JSON, via `list --format json`.
    pub fn list_json(&self) -> Vec<serde_json::Value> {
        let output = self
            .command()
            .arg("list")
            .arg("--format")
            .arg("json")
            .output()
            .expect("Failed to run innkeep list");

        assert!(output.status.success());
        serde_json::from_slice(&output.stdout).expect("list output is JSON")
    }

    /// Writes `config.yaml` into the data directory.
    pub fn write_user_config(&self, contents: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        std::fs::write(self.data_dir.join("config.yaml"), contents)
            .expect("Failed to write config");
    }

    /// Writes `innkeep.yaml` into the working directory.
    pub fn write_project_config(&self, contents: &str) {
        std::fs::write(self.temp_path.join("innkeep.yaml"), contents)
            .expect("Failed to write project config");
    }
}
