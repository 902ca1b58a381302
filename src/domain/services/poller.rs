//! Operation poller
//!
//! Drives an accepted remote update to a terminal state. The loop is a pure
//! transition function ([`transition`]) plus a driver that performs the
//! queries, sleeps between attempts and reports progress.
//!
//! ```text
//! Polling(1) --query error-----------------> Failed(0)
//!            --status missing--------------> Failed(-2)
//!            --unrecognized----------------> Failed(-1)
//!            --in progress, attempt < max--> sleep, Polling(attempt + 1)
//!            --in progress, attempt >= max-> Failed(0)
//!            --terminal success------------> Success
//!            --terminal failure------------> Failed(2)
//! ```

use std::time::Duration;

use crate::domain::entities::RemoteBackendSnapshot;
use crate::domain::ports::{
    BackendService, Clock, OperationHandle, PushEvent, PushEventSink, StageClassifier,
};
use crate::domain::value_objects::StageGroup;

/// Default number of status queries before giving up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// Default delay between status queries
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Retry budget and cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl PollPolicy {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            interval,
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Whether to wait for the remote operation at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollMode {
    /// Poll until a terminal state or the budget runs out
    Wait(PollPolicy),
    /// Return right after the submission was acknowledged
    NoWait,
}

/// How a poll ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollResult {
    /// Terminal success, or the caller chose not to wait
    Success,
    /// A status query failed
    InterruptedByError(String),
    /// Still in progress after the whole budget
    ExhaustedRetries { attempts: u32 },
    /// Response carried no status
    StatusMissing,
    /// Status not in the stage table
    Unrecognized(String),
    /// Terminal failure state
    TerminalFailure(String),
}

impl PollResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Internal failure code (0 interrupted/exhausted, -1 unrecognized,
    /// -2 missing status, 2 terminal failure); `None` on success.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Success => None,
            Self::InterruptedByError(_) | Self::ExhaustedRetries { .. } => Some(0),
            Self::Unrecognized(_) => Some(-1),
            Self::StatusMissing => Some(-2),
            Self::TerminalFailure(_) => Some(2),
        }
    }
}

/// Final snapshot plus result
#[derive(Debug, Clone, PartialEq)]
pub struct PollOutcome {
    pub final_snapshot: RemoteBackendSnapshot,
    pub result: PollResult,
    /// Status queries issued
    pub queries: u32,
}

/// What a single status query produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    QueryFailed(String),
    StatusMissing,
    Status { raw: String, group: StageGroup },
}

/// Poller state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    Polling(u32),
    Done(PollResult),
}

/// Next state after observing `observation` on `attempt`.
pub fn transition(attempt: u32, max_attempts: u32, observation: Observation) -> PollState {
    match observation {
        Observation::QueryFailed(error) => PollState::Done(PollResult::InterruptedByError(error)),
        Observation::StatusMissing => PollState::Done(PollResult::StatusMissing),
        Observation::Status { raw, group } => match group {
            StageGroup::Unrecognized(_) => PollState::Done(PollResult::Unrecognized(raw)),
            StageGroup::InProgress if attempt >= max_attempts => {
                PollState::Done(PollResult::ExhaustedRetries { attempts: attempt })
            }
            StageGroup::InProgress => PollState::Polling(attempt + 1),
            StageGroup::CompletedSuccess => PollState::Done(PollResult::Success),
            StageGroup::CompletedFailure => PollState::Done(PollResult::TerminalFailure(raw)),
        },
    }
}

/// Polls one accepted operation
pub struct OperationPoller<'a> {
    service: &'a dyn BackendService,
    classifier: &'a dyn StageClassifier,
    clock: &'a dyn Clock,
    events: &'a dyn PushEventSink,
}

impl<'a> OperationPoller<'a> {
    pub fn new(
        service: &'a dyn BackendService,
        classifier: &'a dyn StageClassifier,
        clock: &'a dyn Clock,
        events: &'a dyn PushEventSink,
    ) -> Self {
        Self {
            service,
            classifier,
            clock,
            events,
        }
    }

    /// Poll `handle` according to `mode`
    pub fn poll(&self, handle: &OperationHandle, mode: PollMode) -> PollOutcome {
        let policy = match mode {
            PollMode::NoWait => {
                return PollOutcome {
                    final_snapshot: handle.accepted.clone(),
                    result: PollResult::Success,
                    queries: 0,
                }
            }
            PollMode::Wait(policy) => policy,
        };

        let mut snapshot = handle.accepted.clone();
        let mut attempt = 1;
        loop {
            let (observation, status) = self.observe(handle, &mut snapshot);
            tracing::debug!(attempt, ?observation, "status query");

            match transition(attempt, policy.max_attempts, observation) {
                PollState::Polling(next) => {
                    self.events.on_event(PushEvent::PollProgress {
                        attempt,
                        status: status.unwrap_or_default(),
                    });
                    self.clock.sleep(policy.interval);
                    attempt = next;
                }
                PollState::Done(result) => {
                    self.events.on_event(PushEvent::PollFinished {
                        status,
                        code: result.code().unwrap_or(1),
                    });
                    return PollOutcome {
                        final_snapshot: snapshot,
                        result,
                        queries: attempt,
                    };
                }
            }
        }
    }

    fn observe(
        &self,
        handle: &OperationHandle,
        snapshot: &mut RemoteBackendSnapshot,
    ) -> (Observation, Option<String>) {
        match self.service.query_operation(handle) {
            Err(err) => (Observation::QueryFailed(err.to_string()), None),
            Ok(latest) => {
                *snapshot = latest;
                match snapshot.formation_state() {
                    None => (Observation::StatusMissing, None),
                    Some(raw) => {
                        let raw = raw.to_string();
                        let group = self.classifier.classify(&raw);
                        (
                            Observation::Status {
                                raw: raw.clone(),
                                group,
                            },
                            Some(raw),
                        )
                    }
                }
            }
        }
    }
}
