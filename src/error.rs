//! Error types for backsync
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for backsync operations
pub type BacksyncResult<T> = Result<T, BacksyncError>;

/// General error type (configuration, project files, I/O)
#[derive(Error, Debug)]
pub enum BacksyncError {
    /// Config file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Project has no record yet
    #[error("no backsync project at {path} - run 'backsync init' first")]
    ProjectNotInitialized { path: PathBuf },

    /// Project record already exists
    #[error("project already initialized at {path}")]
    AlreadyInitialized { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a push did not complete
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PushError {
    /// User declined a prompt that gated the run
    #[error("push cancelled by user")]
    UserCancelled,

    /// Remote is ahead and the user did not override
    #[error("the backend project is ahead of your local copy")]
    RemoteConflictUnresolved,

    /// Upload was rejected
    #[error("failed to update backend project: {0}")]
    SubmissionFailed(String),

    /// Status query failed while waiting
    #[error("wait interrupted (code {code}): {message}")]
    PollInterrupted { code: i32, message: String },

    /// Operation still running after the whole retry budget
    #[error("gave up waiting after {attempts} status checks; the update may still be in progress")]
    PollExhausted { attempts: u32 },

    /// Status response carried no formation state
    #[error("wait interrupted: provisioning status missing from response")]
    MalformedRemoteResponse,

    /// Formation state not in the stage table
    #[error("wait interrupted: unrecognized status code {0}")]
    UnrecognizedRemoteStatus(String),

    /// Provisioning finished in a failure state
    #[error("backend update finished with status {0}")]
    ProvisioningFailed(String),

    /// No project record
    #[error("no backsync project found - run 'backsync init' first")]
    ProjectNotInitialized,

    /// Remote could not be reached before the upload
    #[error("backend project unavailable: {0}")]
    RemoteUnavailable(String),

    /// Local build failed
    #[error("backend build failed: {0}")]
    BuildFailed(String),

    /// A pre-update hook failed or never reported back
    #[error("pre-update hook for '{feature}' failed: {message}")]
    HookFailed { feature: String, message: String },

    /// Hook completion handles were dropped without reporting
    #[error("{pending} pre-update hook(s) never reported completion")]
    HookAbandoned { pending: usize },

    /// Project record could not be read or written
    #[error("project state error: {0}")]
    StateIo(String),
}
