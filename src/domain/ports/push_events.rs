//! Push Event Port
//!
//! Provides an observable interface for push operations.
//! Enables progress reporting, JSON event streams, and debugging.

/// Event emitted during a push
#[derive(Debug, Clone, PartialEq)]
pub enum PushEvent {
    /// Push started for a project
    Started { project: String, backend: String },

    /// No backend project is recorded for this project
    BackendUnknown,

    /// A backend project was created
    BackendCreated { id: String, name: String },

    /// Remote project changed independently of this copy
    RemoteAhead { console_url: String },

    /// User chose to push over the remote changes
    ForcedPush,

    /// Local build finished
    Built,

    /// Nothing changed since the last successful push
    UpToDate,

    /// Pre-update hooks are starting
    HooksStarted { count: usize },

    /// One hook reported back
    HookFinished { feature: String, error: Option<String> },

    /// Package is being uploaded
    Submitting {
        backend: String,
        bytes: usize,
        digest: String,
    },

    /// Upload accepted; `waiting` is false in no-wait mode
    Submitted { waiting: bool },

    /// Upload rejected
    SubmissionFailed { error: String },

    /// Poll observed an in-progress operation
    PollProgress { attempt: u32, status: String },

    /// Poll stopped
    PollFinished { status: Option<String>, code: i32 },

    /// Push completed
    Completed { success: bool, message: String },
}

/// Trait for receiving push events
///
/// Implementations can be:
/// - ConsoleEventSink: Progress display in terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait PushEventSink: Send + Sync {
    /// Handle a push event
    fn on_event(&self, event: PushEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl PushEventSink for NoopEventSink {
    fn on_event(&self, _event: PushEvent) {}
}
