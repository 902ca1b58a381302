//! BackendBuilder port - local build and packaging of backend definitions

use std::path::{Path, PathBuf};

use crate::domain::value_objects::Timestamp;

/// Build errors
#[derive(Debug)]
pub enum BuildError {
    /// Build command exited unsuccessfully
    CommandFailed { command: String, status: String },
    /// Package archive missing after the build
    PackageMissing(PathBuf),
    /// I/O error
    Io(std::io::Error),
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CommandFailed { command, status } => {
                write!(f, "Build command '{}' failed: {}", command, status)
            }
            Self::PackageMissing(path) => {
                write!(f, "Backend package not found: {}", path.display())
            }
            Self::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for BuildError {}

impl From<std::io::Error> for BuildError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Builds and packages the local backend definitions
pub trait BackendBuilder {
    /// Run the build over the project's backend definitions
    fn build(&self, project_path: &Path) -> Result<(), BuildError>;

    /// Newest modification time of anything in the build directory.
    ///
    /// `None` when the build directory does not exist.
    fn build_dir_mod_time(&self, project_path: &Path) -> Option<Timestamp>;

    /// Packaged backend content, ready to upload
    fn package(&self, project_path: &Path) -> Result<Vec<u8>, BuildError>;
}
