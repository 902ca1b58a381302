//! Project Layout
//!
//! Where everything lives inside a backsync project.

use std::path::{Path, PathBuf};

use crate::config::PROJECT_CONFIG;

/// Tool state directory, relative to the project root
pub const STATE_DIR: &str = ".backsync";

/// Paths of one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn state_dir(&self) -> PathBuf {
        self.root.join(STATE_DIR)
    }

    pub fn project_info(&self) -> PathBuf {
        self.state_dir().join("project-info.json")
    }

    pub fn backend_details(&self) -> PathBuf {
        self.state_dir().join("backend-details.json")
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(PROJECT_CONFIG)
    }

    pub fn lock_file(&self) -> PathBuf {
        self.state_dir().join("push.lock")
    }

    /// Backend definitions edited by the user
    pub fn backend_dir(&self) -> PathBuf {
        self.root.join("backend")
    }

    pub fn build_dir(&self) -> PathBuf {
        self.state_dir().join("build")
    }

    /// Archive uploaded on push
    pub fn package_path(&self) -> PathBuf {
        self.build_dir().join("backend-content.zip")
    }

    /// Client configuration exported into the app sources
    pub fn app_config(&self) -> PathBuf {
        self.root.join("src").join("backend-config.json")
    }

    /// Walk up from `start` to the first directory holding a project record
    pub fn discover(start: &Path) -> Option<Self> {
        start
            .ancestors()
            .map(Self::new)
            .find(|layout| layout.project_info().is_file())
    }
}
