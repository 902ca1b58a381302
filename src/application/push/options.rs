//! Push Options
//!
//! Per-run flags for the push use case.

use crate::domain::services::{PollMode, PollPolicy};

/// Options for the push use case
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushOptions {
    /// Negative: do not wait for provisioning. Positive: maximum number of
    /// status checks. Zero or absent: configured default.
    pub wait_override: Option<i64>,
    /// Export the refreshed backend snapshot into the app's source tree
    pub sync_to_app: bool,
    /// Push even when the remote is ahead or nothing changed locally
    pub force: bool,
}

impl PushOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wait_override(mut self, wait: Option<i64>) -> Self {
        self.wait_override = wait;
        self
    }

    pub fn with_sync_to_app(mut self, sync: bool) -> Self {
        self.sync_to_app = sync;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Poll mode for this run, given the configured policy
    pub fn poll_mode(&self, configured: PollPolicy) -> PollMode {
        match self.wait_override {
            Some(n) if n < 0 => PollMode::NoWait,
            Some(n) if n > 0 => PollMode::Wait(PollPolicy::new(
                u32::try_from(n).unwrap_or(u32::MAX),
                configured.interval,
            )),
            _ => PollMode::Wait(configured),
        }
    }
}
