//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::sync::Arc;

use crate::application::{PushUseCase, StatusUseCase};
use crate::config::Config;
use crate::domain::ports::{
    ConsoleOpener, DefaultAnswerPrompter, NoopOpener, Prompter, PushEventSink, RemoteError,
    YesPrompter,
};
use crate::infrastructure::{
    CommandBuilder, CommandHookRegistry, DialoguerPrompter, HttpBackendService,
    JsonProjectRepository, JsonSnapshotStore, ProjectLayout, SystemOpener,
};

/// Type alias for the concrete PushUseCase with all dependencies
pub type ConcretePushUseCase =
    PushUseCase<JsonProjectRepository, JsonSnapshotStore, HttpBackendService, CommandBuilder>;

/// Type alias for the concrete StatusUseCase
pub type ConcreteStatusUseCase = StatusUseCase<JsonProjectRepository, CommandBuilder>;

/// How push questions get answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    /// Ask on the terminal
    Interactive,
    /// No terminal: take every default, never open a browser
    Defaults,
    /// `--yes`: confirm everything
    AssumeYes,
}

/// Create a push use case with all dependencies wired up
///
/// # Errors
///
/// Fails when no remote endpoint is configured.
pub fn create_push_use_case(
    layout: &ProjectLayout,
    config: &Config,
    prompts: PromptMode,
    events: Arc<dyn PushEventSink>,
) -> Result<ConcretePushUseCase, RemoteError> {
    let service = HttpBackendService::new(&config.remote)?;
    let (prompter, opener): (Box<dyn Prompter>, Box<dyn ConsoleOpener>) = match prompts {
        PromptMode::Interactive => (Box::new(DialoguerPrompter), Box::new(SystemOpener)),
        PromptMode::Defaults => (Box::new(DefaultAnswerPrompter), Box::new(NoopOpener)),
        PromptMode::AssumeYes => (Box::new(YesPrompter), Box::new(NoopOpener)),
    };

    Ok(PushUseCase::new(
        JsonProjectRepository::new(layout.clone()),
        JsonSnapshotStore::new(),
        service,
        CommandBuilder::new(&config.build),
        config.clone(),
    )
    .with_prompter(prompter)
    .with_hooks(Box::new(CommandHookRegistry::new(config.hooks.clone())))
    .with_opener(opener)
    .with_events(events))
}

/// Create a status use case
pub fn create_status_use_case(layout: &ProjectLayout, config: &Config) -> ConcreteStatusUseCase {
    StatusUseCase::new(
        JsonProjectRepository::new(layout.clone()),
        CommandBuilder::new(&config.build),
    )
}
