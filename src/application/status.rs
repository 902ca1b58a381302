//! Status Use Case
//!
//! Reads the project record and answers "would a push do anything right
//! now?" without building, prompting, or talking to the remote service.

use crate::domain::entities::ProjectState;
use crate::domain::ports::{BackendBuilder, ProjectRepository, RepositoryError};
use crate::domain::services::is_update_needed;
use crate::domain::value_objects::Timestamp;

/// Snapshot of the local push state
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub state: ProjectState,
    /// Newest build output change; `None` when nothing has been built
    pub build_dir_mod_time: Option<Timestamp>,
    pub update_needed: bool,
}

impl StatusReport {
    pub fn has_backend(&self) -> bool {
        self.state.has_backend()
    }
}

/// Status use case
pub struct StatusUseCase<PR, BB>
where
    PR: ProjectRepository,
    BB: BackendBuilder,
{
    project_repo: PR,
    builder: BB,
}

impl<PR, BB> StatusUseCase<PR, BB>
where
    PR: ProjectRepository,
    BB: BackendBuilder,
{
    pub fn new(project_repo: PR, builder: BB) -> Self {
        Self {
            project_repo,
            builder,
        }
    }

    /// `Ok(None)` when the project was never initialized
    pub fn execute(&self) -> Result<Option<StatusReport>, RepositoryError> {
        let Some(state) = self.project_repo.load()? else {
            return Ok(None);
        };

        let build_dir_mod_time = self.builder.build_dir_mod_time(&state.project_path);
        let update_needed = is_update_needed(
            state.last_update_successful,
            &state.last_update_time,
            build_dir_mod_time.is_some(),
            build_dir_mod_time.as_ref().unwrap_or(&Timestamp::invalid()),
        );

        Ok(Some(StatusReport {
            state,
            build_dir_mod_time,
            update_needed,
        }))
    }
}
