//! BackendService port - the remote backend project API
//!
//! Every call is a blocking request; the use case treats each one as a
//! sequential suspension point.

use crate::domain::entities::RemoteBackendSnapshot;

/// Result type for remote calls
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Remote service errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// Request never produced a response
    Transport(String),
    /// Service answered with a non-success status
    Api { status: u16, body: String },
    /// Response body did not have the expected shape
    Malformed(String),
    /// No endpoint configured
    NotConfigured,
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "Connection error: {}", msg),
            Self::Api { status, body } => write!(f, "API error ({}): {}", status, body),
            Self::Malformed(msg) => write!(f, "Malformed response: {}", msg),
            Self::NotConfigured => write!(f, "No remote endpoint configured"),
        }
    }
}

impl std::error::Error for RemoteError {}

/// Identifies an accepted update operation
#[derive(Debug, Clone, PartialEq)]
pub struct OperationHandle {
    pub project_id: String,
    /// Snapshot returned when the update was accepted
    pub accepted: RemoteBackendSnapshot,
}

/// Remote backend project API
pub trait BackendService {
    /// Create a new backend project
    fn create_project(&self, name: &str) -> RemoteResult<RemoteBackendSnapshot>;

    /// Current remote state of a backend project
    fn describe_project(&self, project_id: &str) -> RemoteResult<RemoteBackendSnapshot>;

    /// Upload packaged backend content, starting an asynchronous update
    fn update_project(&self, project_id: &str, contents: &[u8]) -> RemoteResult<OperationHandle>;

    /// Query the state of an accepted update.
    ///
    /// The returned snapshot carries the raw status in `formation_state`,
    /// which may be absent.
    fn query_operation(&self, handle: &OperationHandle) -> RemoteResult<RemoteBackendSnapshot>;
}
