//! Domain Entities
//!
//! Core domain objects with identity.

mod backend_snapshot;
mod project_state;

pub use backend_snapshot::RemoteBackendSnapshot;
pub use project_state::ProjectState;
