//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod backend_builder;
pub mod backend_service;
pub mod clock;
pub mod console_opener;
pub mod feature_hook;
pub mod project_repository;
pub mod prompter;
pub mod push_events;
pub mod snapshot_store;
pub mod stage_classifier;

pub use backend_builder::{BackendBuilder, BuildError};
pub use backend_service::{BackendService, OperationHandle, RemoteError, RemoteResult};
pub use clock::{Clock, SystemClock};
pub use console_opener::{ConsoleOpener, NoopOpener};
pub use feature_hook::{
    FeatureHook, FeatureHookRegistry, HookCompletion, HookContext, HookReport, NoopHook,
    NoopHookRegistry,
};
pub use project_repository::{ProjectRepository, RepositoryError, RepositoryResult};
pub use prompter::{DefaultAnswerPrompter, Prompter, YesPrompter};
pub use push_events::{NoopEventSink, PushEvent, PushEventSink};
pub use snapshot_store::SnapshotStore;
pub use stage_classifier::{StageClassifier, TableStageClassifier};
