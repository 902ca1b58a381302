//! File system support for the project layout

mod layout;
mod local;

pub use layout::{ProjectLayout, STATE_DIR};
pub use local::{newest_mod_time, write_atomic, ProjectLock};
