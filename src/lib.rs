//! backsync - push local backend definitions to a remote backend project
//!
//! A push builds the backend sources, checks that nobody changed the remote
//! project behind our back, uploads the package, and waits for the remote
//! service to finish provisioning it.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{PushOptions, PushOutcome, PushResult, StatusReport};
pub use config::Config;
pub use domain::entities::{ProjectState, RemoteBackendSnapshot};
pub use domain::value_objects::{StageGroup, Timestamp};
pub use error::{BacksyncError, BacksyncResult, PushError};
