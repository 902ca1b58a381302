//! JSON Project Repository
//!
//! Implements the ProjectRepository port on `.backsync/project-info.json`.

use std::fs;

use crate::domain::entities::ProjectState;
use crate::domain::ports::{ProjectRepository, RepositoryError, RepositoryResult};
use crate::infrastructure::fs::{write_atomic, ProjectLayout};

/// Project record stored as pretty-printed JSON
#[derive(Debug, Clone)]
pub struct JsonProjectRepository {
    layout: ProjectLayout,
}

impl JsonProjectRepository {
    pub fn new(layout: ProjectLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }
}

impl ProjectRepository for JsonProjectRepository {
    fn load(&self) -> RepositoryResult<Option<ProjectState>> {
        let path = self.layout.project_info();
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let mut state: ProjectState =
            serde_json::from_str(&content).map_err(|e| RepositoryError::InvalidFormat {
                path: path.clone(),
                message: e.to_string(),
            })?;
        state.project_path = self.layout.root().to_path_buf();
        Ok(Some(state))
    }

    fn save(&self, state: &ProjectState) -> RepositoryResult<()> {
        let path = self.layout.project_info();
        let content =
            serde_json::to_string_pretty(state).map_err(|e| RepositoryError::InvalidFormat {
                path: path.clone(),
                message: e.to_string(),
            })?;
        write_atomic(&path, content.as_bytes())?;
        tracing::debug!(path = %path.display(), "saved project record");
        Ok(())
    }
}
