//! Conflict guard
//!
//! Detects a remote backend project that was modified outside this copy
//! (by a teammate, or through the web console).

use crate::domain::entities::RemoteBackendSnapshot;
use crate::domain::value_objects::Timestamp;

/// True when the remote is ahead of the locally recorded state.
///
/// The remote counts as unchanged only when both the recorded time and the
/// remote's last-updated time are valid and equal to the second (the local
/// record is persisted without sub-second precision).
pub fn check_remote_ahead(
    local_recorded_update_time: &Timestamp,
    remote: &RemoteBackendSnapshot,
) -> bool {
    match (
        local_recorded_update_time.as_datetime(),
        remote.last_updated.as_datetime(),
    ) {
        (Some(local), Some(remote)) => local.timestamp() != remote.timestamp(),
        _ => true,
    }
}
