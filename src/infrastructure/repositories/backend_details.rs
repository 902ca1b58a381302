//! JSON Snapshot Store
//!
//! Implements the SnapshotStore port:
//! - `.backsync/backend-details.json` keeps the last recorded remote snapshot
//! - `src/backend-config.json` is the client configuration exported into the app

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::RemoteBackendSnapshot;
use crate::domain::ports::{RepositoryError, RepositoryResult, SnapshotStore};
use crate::infrastructure::fs::{write_atomic, ProjectLayout};

/// On-disk form of the recorded snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedSnapshot {
    /// Local project has caught up with `details`
    pub synced: bool,
    pub recorded_at: DateTime<Utc>,
    pub details: RemoteBackendSnapshot,
}

/// Snapshot store writing JSON files under the project root
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSnapshotStore;

impl JsonSnapshotStore {
    pub fn new() -> Self {
        Self
    }

    /// Read back the recorded snapshot, if any
    pub fn load(&self, project_path: &Path) -> RepositoryResult<Option<RecordedSnapshot>> {
        let path = ProjectLayout::new(project_path).backend_details();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| RepositoryError::InvalidFormat {
                path,
                message: e.to_string(),
            })
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> RepositoryResult<()> {
    let content =
        serde_json::to_string_pretty(value).map_err(|e| RepositoryError::InvalidFormat {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    write_atomic(path, content.as_bytes())?;
    Ok(())
}

impl SnapshotStore for JsonSnapshotStore {
    fn record(
        &self,
        project_path: &Path,
        snapshot: &RemoteBackendSnapshot,
        mark_synced: bool,
    ) -> RepositoryResult<()> {
        let path = ProjectLayout::new(project_path).backend_details();
        let recorded = RecordedSnapshot {
            synced: mark_synced,
            recorded_at: Utc::now(),
            details: snapshot.clone(),
        };
        write_json(&path, &recorded)?;
        tracing::debug!(path = %path.display(), synced = mark_synced, "recorded backend details");
        Ok(())
    }

    fn export_to_app(
        &self,
        project_path: &Path,
        snapshot: &RemoteBackendSnapshot,
    ) -> RepositoryResult<()> {
        let path = ProjectLayout::new(project_path).app_config();
        // The app only needs the service fields, not the operation status.
        let mut exported = snapshot.clone();
        exported.formation_state = None;
        write_json(&path, &exported)?;
        tracing::info!(path = %path.display(), "exported backend config to app");
        Ok(())
    }
}
