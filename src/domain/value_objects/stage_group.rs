//! Stage Group Value Object
//!
//! Four-way classification of a raw formation state reported by the remote
//! provisioning subsystem.

use std::fmt;

/// Classification of a formation state string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageGroup {
    /// Operation is still running remotely
    InProgress,
    /// Operation finished and the resources are usable
    CompletedSuccess,
    /// Operation finished and the resources are not usable
    CompletedFailure,
    /// State string is not in the stage table
    Unrecognized(String),
}

impl StageGroup {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::CompletedSuccess | Self::CompletedFailure)
    }

    /// Legacy integer group (-1 unrecognized, 0 in progress, 1 success, 2 failure).
    pub fn code(&self) -> i32 {
        match self {
            Self::Unrecognized(_) => -1,
            Self::InProgress => 0,
            Self::CompletedSuccess => 1,
            Self::CompletedFailure => 2,
        }
    }
}

impl fmt::Display for StageGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "in-progress"),
            Self::CompletedSuccess => write!(f, "success"),
            Self::CompletedFailure => write!(f, "failure"),
            Self::Unrecognized(raw) => write!(f, "unrecognized ({})", raw),
        }
    }
}

/// Feature whose provisioning reports a formation state. Projects without
/// it have nothing to wait for after an accepted upload.
pub const PROVISIONED_FEATURE: &str = "cloud-api";

/// Raw stack states and the group each belongs to.
pub const STAGE_TABLE: &[(&str, StageKind)] = &[
    ("CREATE_IN_PROGRESS", StageKind::InProgress),
    ("UPDATE_IN_PROGRESS", StageKind::InProgress),
    ("UPDATE_COMPLETE_CLEANUP_IN_PROGRESS", StageKind::InProgress),
    ("DELETE_IN_PROGRESS", StageKind::InProgress),
    ("REVIEW_IN_PROGRESS", StageKind::InProgress),
    ("ROLLBACK_IN_PROGRESS", StageKind::InProgress),
    ("UPDATE_ROLLBACK_IN_PROGRESS", StageKind::InProgress),
    (
        "UPDATE_ROLLBACK_COMPLETE_CLEANUP_IN_PROGRESS",
        StageKind::InProgress,
    ),
    ("CREATE_COMPLETE", StageKind::Success),
    ("UPDATE_COMPLETE", StageKind::Success),
    ("CREATE_FAILED", StageKind::Failure),
    ("ROLLBACK_FAILED", StageKind::Failure),
    ("ROLLBACK_COMPLETE", StageKind::Failure),
    ("DELETE_FAILED", StageKind::Failure),
    ("DELETE_COMPLETE", StageKind::Failure),
    ("UPDATE_ROLLBACK_FAILED", StageKind::Failure),
    ("UPDATE_ROLLBACK_COMPLETE", StageKind::Failure),
];

/// Table entry kind (the table cannot hold `Unrecognized`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    InProgress,
    Success,
    Failure,
}

/// Look a raw state up in [`STAGE_TABLE`].
///
/// Matching ignores surrounding whitespace and ASCII case.
pub fn classify_formation_state(raw: &str) -> StageGroup {
    let needle = raw.trim();
    STAGE_TABLE
        .iter()
        .find(|(state, _)| state.eq_ignore_ascii_case(needle))
        .map(|(_, kind)| match kind {
            StageKind::InProgress => StageGroup::InProgress,
            StageKind::Success => StageGroup::CompletedSuccess,
            StageKind::Failure => StageGroup::CompletedFailure,
        })
        .unwrap_or_else(|| StageGroup::Unrecognized(raw.to_string()))
}
