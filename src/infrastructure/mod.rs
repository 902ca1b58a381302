//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Project layout, atomic writes, push lock
//! - `repositories/` - Project record and backend snapshot persistence
//! - `remote/` - HTTP client for the backend project API
//! - `events/` - Event sinks
//! - `build` - Build command and package reader
//! - `hooks` - Command-backed feature hooks
//! - `interaction` - Terminal prompts and console opener

pub mod build;
pub mod events;
pub mod fs;
pub mod hooks;
pub mod interaction;
pub mod remote;
pub mod repositories;

// Re-export for convenience
pub use build::CommandBuilder;
pub use events::JsonEventSink;
pub use fs::{ProjectLayout, ProjectLock};
pub use hooks::CommandHookRegistry;
pub use interaction::{DialoguerPrompter, SystemOpener};
pub use remote::HttpBackendService;
pub use repositories::{JsonProjectRepository, JsonSnapshotStore};
