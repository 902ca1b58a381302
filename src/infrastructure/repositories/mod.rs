//! Repository implementations

mod backend_details;
mod project_info;

pub use backend_details::{JsonSnapshotStore, RecordedSnapshot};
pub use project_info::JsonProjectRepository;
