//! Push Result
//!
//! Result types for push operations.

use crate::domain::entities::RemoteBackendSnapshot;
use crate::domain::services::{PollOutcome, PollResult};
use crate::domain::value_objects::ContentHash;
use crate::error::PushError;

/// How a push run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// Content uploaded and provisioning succeeded (or was not waited for)
    Pushed,
    /// No local changes since the last successful push
    UpToDate,
    /// User declined to continue
    Cancelled(PushError),
    /// Something went wrong
    Failed(PushError),
}

impl PushOutcome {
    pub fn error(&self) -> Option<&PushError> {
        match self {
            Self::Cancelled(err) | Self::Failed(err) => Some(err),
            Self::Pushed | Self::UpToDate => None,
        }
    }

    /// Map a finished poll onto a run outcome
    pub fn from_poll(result: &PollResult) -> Self {
        match result {
            PollResult::Success => Self::Pushed,
            PollResult::InterruptedByError(message) => Self::Failed(PushError::PollInterrupted {
                code: 0,
                message: message.clone(),
            }),
            PollResult::ExhaustedRetries { attempts } => Self::Failed(PushError::PollExhausted {
                attempts: *attempts,
            }),
            PollResult::StatusMissing => Self::Failed(PushError::MalformedRemoteResponse),
            PollResult::Unrecognized(status) => {
                Self::Failed(PushError::UnrecognizedRemoteStatus(status.clone()))
            }
            PollResult::TerminalFailure(status) => {
                Self::Failed(PushError::ProvisioningFailed(status.clone()))
            }
        }
    }
}

/// Result of a push operation
#[derive(Debug, Clone)]
pub struct PushResult {
    pub outcome: PushOutcome,
    /// Latest known remote snapshot
    pub snapshot: Option<RemoteBackendSnapshot>,
    /// Present once an update was accepted
    pub poll: Option<PollOutcome>,
    /// Whether the conflict or staleness checks were overridden
    pub forced: bool,
    /// Digest of the uploaded package
    pub digest: Option<ContentHash>,
}

impl PushResult {
    pub fn new(outcome: PushOutcome) -> Self {
        Self {
            outcome,
            snapshot: None,
            poll: None,
            forced: false,
            digest: None,
        }
    }

    /// Pushed or already up to date
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, PushOutcome::Pushed | PushOutcome::UpToDate)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.outcome, PushOutcome::Cancelled(_))
    }
}
