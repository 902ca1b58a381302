//! JSON Event Sink
//!
//! Outputs push events as NDJSON for CI/automation consumption.

use crate::domain::ports::{PushEvent, PushEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl PushEventSink for JsonEventSink {
    fn on_event(&self, event: PushEvent) {
        let json = match event {
            PushEvent::Started { project, backend } => {
                serde_json::json!({
                    "event": "start",
                    "command": "push",
                    "project": project,
                    "backend": backend,
                })
            }

            PushEvent::BackendUnknown => {
                serde_json::json!({
                    "event": "backend_unknown",
                    "command": "push",
                })
            }

            PushEvent::BackendCreated { id, name } => {
                serde_json::json!({
                    "event": "backend_created",
                    "command": "push",
                    "id": id,
                    "name": name,
                })
            }

            PushEvent::RemoteAhead { console_url } => {
                serde_json::json!({
                    "event": "remote_ahead",
                    "command": "push",
                    "console_url": console_url,
                })
            }

            PushEvent::ForcedPush => {
                serde_json::json!({
                    "event": "forced_push",
                    "command": "push",
                })
            }

            PushEvent::Built => {
                serde_json::json!({
                    "event": "built",
                    "command": "push",
                })
            }

            PushEvent::UpToDate => {
                serde_json::json!({
                    "event": "up_to_date",
                    "command": "push",
                })
            }

            PushEvent::HooksStarted { count } => {
                serde_json::json!({
                    "event": "hooks_start",
                    "command": "push",
                    "count": count,
                })
            }

            PushEvent::HookFinished { feature, error } => {
                serde_json::json!({
                    "event": "hook_finished",
                    "command": "push",
                    "feature": feature,
                    "error": error,
                })
            }

            PushEvent::Submitting {
                backend,
                bytes,
                digest,
            } => {
                serde_json::json!({
                    "event": "submitting",
                    "command": "push",
                    "backend": backend,
                    "bytes": bytes,
                    "digest": digest,
                })
            }

            PushEvent::Submitted { waiting } => {
                serde_json::json!({
                    "event": "submitted",
                    "command": "push",
                    "waiting": waiting,
                })
            }

            PushEvent::SubmissionFailed { error } => {
                serde_json::json!({
                    "event": "submission_failed",
                    "command": "push",
                    "error": error,
                })
            }

            PushEvent::PollProgress { attempt, status } => {
                serde_json::json!({
                    "event": "poll",
                    "command": "push",
                    "attempt": attempt,
                    "status": status,
                })
            }

            PushEvent::PollFinished { status, code } => {
                serde_json::json!({
                    "event": "poll_finished",
                    "command": "push",
                    "status": status,
                    "code": code,
                })
            }

            PushEvent::Completed { success, message } => {
                serde_json::json!({
                    "event": "complete",
                    "command": "push",
                    "status": if success { "success" } else { "failure" },
                    "message": message,
                })
            }
        };

        self.write_event(json);
    }
}
