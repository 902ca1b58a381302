//! ProjectRepository port - persistence of the local project record
//!
//! The record is read once at the start of a push and written once at the
//! end of each outcome branch.

use std::path::PathBuf;

use crate::domain::entities::ProjectState;

/// Result type for project repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Project repository errors
#[derive(Debug)]
pub enum RepositoryError {
    /// The record exists but could not be parsed
    InvalidFormat { path: PathBuf, message: String },
    /// Another run holds the project lock
    Locked(PathBuf),
    /// I/O error
    Io(std::io::Error),
}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryError::InvalidFormat { path, message } => {
                write!(f, "Invalid project record {}: {}", path.display(), message)
            }
            RepositoryError::Locked(path) => {
                write!(f, "Another push is running for {}", path.display())
            }
            RepositoryError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for RepositoryError {}

impl From<std::io::Error> for RepositoryError {
    fn from(err: std::io::Error) -> Self {
        RepositoryError::Io(err)
    }
}

/// Load and save the project record
pub trait ProjectRepository {
    /// Load the record; `Ok(None)` when the project was never initialized
    fn load(&self) -> RepositoryResult<Option<ProjectState>>;

    /// Persist the record
    fn save(&self, state: &ProjectState) -> RepositoryResult<()>;
}
