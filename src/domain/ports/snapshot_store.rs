//! SnapshotStore port - local copy of the remote backend snapshot

use std::path::Path;

use crate::domain::entities::RemoteBackendSnapshot;

use super::project_repository::RepositoryResult;

/// Keeps the last pulled remote snapshot next to the project
pub trait SnapshotStore {
    /// Record `snapshot` as the last known remote state.
    ///
    /// `mark_synced` records that the local project has caught up with it.
    fn record(
        &self,
        project_path: &Path,
        snapshot: &RemoteBackendSnapshot,
        mark_synced: bool,
    ) -> RepositoryResult<()>;

    /// Write the snapshot into the app's source tree as client configuration
    fn export_to_app(
        &self,
        project_path: &Path,
        snapshot: &RemoteBackendSnapshot,
    ) -> RepositoryResult<()>;
}
