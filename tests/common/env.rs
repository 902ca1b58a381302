//! Isolated project + home directories and a CLI runner.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Result of running the backsync binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Parsed NDJSON lines from stdout
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).expect("stdout line is JSON"))
            .collect()
    }

    pub fn event_names(&self) -> Vec<String> {
        self.events()
            .iter()
            .filter_map(|e| e["event"].as_str().map(str::to_string))
            .collect()
    }
}

pub struct TestEnv {
    _dir: TempDir,
    project: PathBuf,
    home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let project = dir.path().join("app");
        let home = dir.path().join("home");
        fs::create_dir_all(&project).unwrap();
        fs::create_dir_all(home.join(".config")).unwrap();
        Self {
            _dir: dir,
            project,
            home,
        }
    }

    pub fn project(&self) -> &Path {
        &self.project
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.project.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.project.join(rel)).unwrap()
    }

    pub fn project_info(&self) -> serde_json::Value {
        serde_json::from_str(&self.read(".backsync/project-info.json")).unwrap()
    }

    /// Point the project at `endpoint` and poll without sleeping
    pub fn configure_remote(&self, endpoint: &str) {
        self.write(
            ".backsync/config.toml",
            &format!(
                "[remote]\nendpoint = \"{endpoint}\"\ntimeout_secs = 5\n\n[poll]\nmax_attempts = 3\ninterval_secs = 0\n"
            ),
        );
    }

    /// Lay down a built package so push has something to upload
    pub fn write_package(&self) {
        self.write(".backsync/build/backend-content.zip", "PK\u{3}\u{4}fake");
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_in(&self.project, args)
    }

    pub fn run_in(&self, dir: &Path, args: &[&str]) -> TestResult {
        let output = Command::new(env!("CARGO_BIN_EXE_backsync"))
            .current_dir(dir)
            .env("HOME", &self.home)
            .env("XDG_CONFIG_HOME", self.home.join(".config"))
            .env("NO_COLOR", "1")
            .env_remove("BACKSYNC_ENDPOINT")
            .env_remove("BACKSYNC_TOKEN")
            .env_remove("BACKSYNC_POLL_MAX_ATTEMPTS")
            .env_remove("BACKSYNC_POLL_INTERVAL_SECS")
            .env_remove("BACKSYNC_VERBOSITY")
            .env_remove("RUST_LOG")
            .env_remove("HTTP_PROXY")
            .env_remove("http_proxy")
            .env_remove("ALL_PROXY")
            .env_remove("all_proxy")
            .env("NO_PROXY", "127.0.0.1,localhost")
            .args(args)
            .output()
            .expect("run backsync");

        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}
