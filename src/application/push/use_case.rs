//! Push Use Case
//!
//! Orchestrates the push flow:
//! 1. Load the project record (offer to create a backend project if none)
//! 2. Compare the recorded remote state with the live one (conflict guard)
//! 3. Build the local backend definitions
//! 4. Skip the push when nothing changed since the last successful one
//! 5. Run the pre-update hooks of every enabled feature
//! 6. Upload the packaged content
//! 7. Wait for provisioning to finish (only when `cloud-api` is enabled)
//! 8. Record the outcome and the refreshed remote snapshot
//!
//! Every path ends in a `PushResult`; nothing escapes as a panic or error.

use std::sync::mpsc;
use std::sync::Arc;

use crate::config::Config;
use crate::domain::entities::{ProjectState, RemoteBackendSnapshot};
use crate::domain::ports::{
    BackendBuilder, BackendService, Clock, ConsoleOpener, DefaultAnswerPrompter,
    FeatureHookRegistry, HookCompletion, HookContext, NoopEventSink, NoopHookRegistry,
    NoopOpener, ProjectRepository, Prompter, PushEvent, PushEventSink, RemoteError,
    RepositoryError, SnapshotStore, StageClassifier, SystemClock, TableStageClassifier,
};
use crate::domain::services::{check_remote_ahead, is_update_needed, OperationPoller, PollMode};
use crate::domain::value_objects::{ContentHash, Timestamp, PROVISIONED_FEATURE};
use crate::error::PushError;

use super::options::PushOptions;
use super::result::{PushOutcome, PushResult};

const PROMPT_CREATE_BACKEND: &str = "create a new backend project as the backend";
const PROMPT_FORCE_PUSH: &str = "do you want to continue with the push";
const PROMPT_OPEN_CONSOLE: &str = "do you want to open the web console of the backend project";

/// State owned by a single run
#[derive(Debug)]
struct PushContext {
    state: ProjectState,
    snapshot: Option<RemoteBackendSnapshot>,
    /// Set by `--force` or by confirming over a remote conflict; suppresses
    /// the conflict and staleness checks for the rest of the run
    forced_push: bool,
}

/// Push use case - orchestrates the push flow
///
/// Repositories, remote service and builder are generic; the interactive
/// and observational collaborators are swappable trait objects.
pub struct PushUseCase<PR, SS, BS, BB>
where
    PR: ProjectRepository,
    SS: SnapshotStore,
    BS: BackendService,
    BB: BackendBuilder,
{
    project_repo: PR,
    snapshot_store: SS,
    service: BS,
    builder: BB,
    config: Config,
    prompter: Box<dyn Prompter>,
    hooks: Box<dyn FeatureHookRegistry>,
    classifier: Box<dyn StageClassifier>,
    opener: Box<dyn ConsoleOpener>,
    clock: Box<dyn Clock>,
    events: Arc<dyn PushEventSink>,
}

impl<PR, SS, BS, BB> PushUseCase<PR, SS, BS, BB>
where
    PR: ProjectRepository,
    SS: SnapshotStore,
    BS: BackendService,
    BB: BackendBuilder,
{
    pub fn new(
        project_repo: PR,
        snapshot_store: SS,
        service: BS,
        builder: BB,
        config: Config,
    ) -> Self {
        Self {
            project_repo,
            snapshot_store,
            service,
            builder,
            config,
            prompter: Box::new(DefaultAnswerPrompter),
            hooks: Box::new(NoopHookRegistry),
            classifier: Box::new(TableStageClassifier),
            opener: Box::new(NoopOpener),
            clock: Box::new(SystemClock),
            events: Arc::new(NoopEventSink),
        }
    }

    pub fn with_prompter(mut self, prompter: Box<dyn Prompter>) -> Self {
        self.prompter = prompter;
        self
    }

    pub fn with_hooks(mut self, hooks: Box<dyn FeatureHookRegistry>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_classifier(mut self, classifier: Box<dyn StageClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_opener(mut self, opener: Box<dyn ConsoleOpener>) -> Self {
        self.opener = opener;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_events(mut self, events: Arc<dyn PushEventSink>) -> Self {
        self.events = events;
        self
    }

    /// Execute the push and hand the result to `on_complete` exactly once
    pub fn run<F>(&self, options: &PushOptions, on_complete: F) -> PushResult
    where
        F: FnOnce(&PushResult),
    {
        let result = self.execute(options);
        on_complete(&result);
        result
    }

    /// Execute the push use case
    pub fn execute(&self, options: &PushOptions) -> PushResult {
        let result = self.execute_inner(options);
        self.events.on_event(PushEvent::Completed {
            success: result.is_success(),
            message: match &result.outcome {
                PushOutcome::Pushed => "backend project updated".to_string(),
                PushOutcome::UpToDate => {
                    "no local backend changes detected since last push".to_string()
                }
                PushOutcome::Cancelled(err) | PushOutcome::Failed(err) => err.to_string(),
            },
        });
        result
    }

    fn execute_inner(&self, options: &PushOptions) -> PushResult {
        // Step 1: Load project record
        let state = match self.project_repo.load() {
            Ok(Some(state)) => state,
            Ok(None) => {
                return PushResult::new(PushOutcome::Failed(PushError::ProjectNotInitialized))
            }
            Err(err) => {
                return PushResult::new(PushOutcome::Failed(PushError::StateIo(err.to_string())))
            }
        };

        let mut ctx = PushContext {
            state,
            snapshot: None,
            forced_push: options.force,
        };

        self.events.on_event(PushEvent::Started {
            project: ctx.state.project_name.clone(),
            backend: ctx.state.backend_display_name().to_string(),
        });

        // Step 2: Make sure a backend exists and is not ahead of us
        let gate = if ctx.state.has_backend() {
            self.check_latest_in_cloud(&mut ctx)
        } else {
            self.create_backend(&mut ctx)
        };
        if let Err(outcome) = gate {
            return self.finish(&ctx, outcome);
        }

        // Step 3: Build
        if let Err(err) = self.builder.build(&ctx.state.project_path) {
            let outcome = PushOutcome::Failed(PushError::BuildFailed(err.to_string()));
            return self.finish(&ctx, outcome);
        }
        self.events.on_event(PushEvent::Built);

        // Step 4: Anything to push?
        if !ctx.forced_push && !self.is_new_update_needed(&ctx.state) {
            self.events.on_event(PushEvent::UpToDate);
            return self.finish(&ctx, PushOutcome::UpToDate);
        }

        // Step 5: Pre-update hooks
        if let Err(err) = self.run_pre_update_hooks(&ctx) {
            return self.finish(&ctx, PushOutcome::Failed(err));
        }

        // Steps 6-8: Upload, wait, record
        self.update_backend_project(&mut ctx, options)
    }

    fn finish(&self, ctx: &PushContext, outcome: PushOutcome) -> PushResult {
        PushResult {
            outcome,
            snapshot: ctx.snapshot.clone(),
            poll: None,
            forced: ctx.forced_push,
            digest: None,
        }
    }

    fn create_backend(&self, ctx: &mut PushContext) -> Result<(), PushOutcome> {
        self.events.on_event(PushEvent::BackendUnknown);
        if !self.prompter.confirm(PROMPT_CREATE_BACKEND, true) {
            return Err(PushOutcome::Cancelled(PushError::UserCancelled));
        }

        let name = if ctx.state.backend_project_name.is_empty() {
            ctx.state.project_name.clone()
        } else {
            ctx.state.backend_project_name.clone()
        };
        let snapshot = match self.service.create_project(&name) {
            Ok(snapshot) => snapshot,
            Err(err) => return Err(self.record_remote_failure(ctx, err)),
        };

        ctx.state.backend_project_id = snapshot.project_id.clone();
        ctx.state.backend_project_name = snapshot.name.clone();
        ctx.state.remote_last_updated = snapshot.last_updated.clone();
        self.project_repo
            .save(&ctx.state)
            .map_err(|e| PushOutcome::Failed(PushError::StateIo(e.to_string())))?;
        self.snapshot_store
            .record(&ctx.state.project_path, &snapshot, true)
            .map_err(|e| PushOutcome::Failed(PushError::StateIo(e.to_string())))?;

        self.events.on_event(PushEvent::BackendCreated {
            id: snapshot.project_id.clone(),
            name: snapshot.name.clone(),
        });
        ctx.snapshot = Some(snapshot);
        Ok(())
    }

    fn check_latest_in_cloud(&self, ctx: &mut PushContext) -> Result<(), PushOutcome> {
        let snapshot = match self.service.describe_project(&ctx.state.backend_project_id) {
            Ok(snapshot) => snapshot,
            Err(err) => return Err(self.record_remote_failure(ctx, err)),
        };

        if !ctx.forced_push && check_remote_ahead(&ctx.state.remote_last_updated, &snapshot) {
            self.events.on_event(PushEvent::RemoteAhead {
                console_url: snapshot.console_url.clone(),
            });

            if !self.prompter.confirm(PROMPT_FORCE_PUSH, false) {
                if !snapshot.console_url.is_empty()
                    && self.prompter.confirm(PROMPT_OPEN_CONSOLE, true)
                {
                    if let Err(err) = self.opener.open(&snapshot.console_url) {
                        tracing::warn!(url = %snapshot.console_url, %err, "failed to open console");
                    }
                }
                ctx.snapshot = Some(snapshot);
                return Err(PushOutcome::Cancelled(PushError::RemoteConflictUnresolved));
            }

            ctx.forced_push = true;
            self.events.on_event(PushEvent::ForcedPush);
        }

        // Hooks read the recorded copy, so refresh it even when nothing changed.
        self.snapshot_store
            .record(&ctx.state.project_path, &snapshot, true)
            .map_err(|e| PushOutcome::Failed(PushError::StateIo(e.to_string())))?;
        ctx.snapshot = Some(snapshot);
        Ok(())
    }

    /// A remote call that ends the run still counts as a failed update.
    fn record_remote_failure(&self, ctx: &mut PushContext, err: RemoteError) -> PushOutcome {
        tracing::warn!(%err, "remote call failed");
        ctx.state.record_update(false, Timestamp::from(self.clock.now()));
        match self.project_repo.save(&ctx.state) {
            Ok(()) => PushOutcome::Failed(PushError::RemoteUnavailable(err.to_string())),
            Err(save_err) => PushOutcome::Failed(PushError::StateIo(save_err.to_string())),
        }
    }

    fn is_new_update_needed(&self, state: &ProjectState) -> bool {
        let build_dir_mod_time = self.builder.build_dir_mod_time(&state.project_path);
        let needed = is_update_needed(
            state.last_update_successful,
            &state.last_update_time,
            build_dir_mod_time.is_some(),
            build_dir_mod_time.as_ref().unwrap_or(&Timestamp::invalid()),
        );
        tracing::debug!(
            last_update = %state.last_update_time,
            build_dir = ?build_dir_mod_time,
            needed,
            "staleness check"
        );
        needed
    }

    /// Start every enabled hook, then wait until each has reported.
    fn run_pre_update_hooks(&self, ctx: &PushContext) -> Result<(), PushError> {
        let hooks = self.hooks.enabled_hooks(&ctx.state);
        if hooks.is_empty() {
            return Ok(());
        }

        self.events.on_event(PushEvent::HooksStarted { count: hooks.len() });

        let (tx, rx) = mpsc::channel();
        let context = HookContext {
            state: &ctx.state,
            config: &self.config,
            snapshot: ctx.snapshot.as_ref(),
        };
        for hook in &hooks {
            hook.pre_update(&context, HookCompletion::new(hook.feature(), tx.clone()));
        }
        drop(tx);

        let mut pending = hooks.len();
        let mut first_error = None;
        while pending > 0 {
            let report = rx
                .recv()
                .map_err(|_| PushError::HookAbandoned { pending })?;
            pending -= 1;
            self.events.on_event(PushEvent::HookFinished {
                feature: report.feature.clone(),
                error: report.error.clone(),
            });
            if let Some(message) = report.error {
                first_error.get_or_insert(PushError::HookFailed {
                    feature: report.feature,
                    message,
                });
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    fn update_backend_project(&self, ctx: &mut PushContext, options: &PushOptions) -> PushResult {
        let contents = match self.builder.package(&ctx.state.project_path) {
            Ok(contents) => contents,
            Err(err) => {
                return self.finish(ctx, PushOutcome::Failed(PushError::BuildFailed(err.to_string())))
            }
        };
        let digest = ContentHash::from_bytes(&contents);

        self.events.on_event(PushEvent::Submitting {
            backend: ctx.state.backend_display_name().to_string(),
            bytes: contents.len(),
            digest: digest.to_string(),
        });
        tracing::info!(project = %ctx.state.backend_project_id, bytes = contents.len(), %digest, "submitting update");

        let submitted = self
            .service
            .update_project(&ctx.state.backend_project_id, &contents);

        // Hooks may have rewritten the record; start from what is on disk.
        self.reload_state(ctx);

        let handle = match submitted {
            Ok(handle) => handle,
            Err(err) => {
                tracing::warn!(%err, "update rejected");
                self.events.on_event(PushEvent::SubmissionFailed {
                    error: err.to_string(),
                });
                ctx.state.record_update(false, Timestamp::from(self.clock.now()));
                let outcome = match self.project_repo.save(&ctx.state) {
                    Ok(()) => PushOutcome::Failed(PushError::SubmissionFailed(err.to_string())),
                    Err(save_err) => PushOutcome::Failed(PushError::StateIo(save_err.to_string())),
                };
                let mut result = self.finish(ctx, outcome);
                result.digest = Some(digest);
                return result;
            }
        };

        let mode = if ctx.state.has_feature(PROVISIONED_FEATURE) {
            options.poll_mode(self.config.poll.policy())
        } else {
            tracing::debug!(
                feature = PROVISIONED_FEATURE,
                "feature not enabled, nothing to wait for"
            );
            PollMode::NoWait
        };
        self.events.on_event(PushEvent::Submitted {
            waiting: mode != PollMode::NoWait,
        });

        let poller = OperationPoller::new(
            &self.service,
            self.classifier.as_ref(),
            self.clock.as_ref(),
            self.events.as_ref(),
        );
        let poll = poller.poll(&handle, mode);
        let mut outcome = PushOutcome::from_poll(&poll.result);

        ctx.state
            .record_update(poll.result.is_success(), Timestamp::from(self.clock.now()));

        let refreshed = match self.service.describe_project(&ctx.state.backend_project_id) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(%err, "could not refresh backend details, using last poll result");
                poll.final_snapshot.clone()
            }
        };
        if refreshed.last_updated.is_valid() {
            ctx.state.remote_last_updated = refreshed.last_updated.clone();
        }

        if let Err(err) = self.persist_outcome(ctx, &refreshed, options.sync_to_app) {
            if outcome == PushOutcome::Pushed {
                outcome = PushOutcome::Failed(err);
            } else {
                tracing::warn!(%err, "failed to persist push outcome");
            }
        }

        ctx.snapshot = Some(refreshed);
        PushResult {
            outcome,
            snapshot: ctx.snapshot.clone(),
            poll: Some(poll),
            forced: ctx.forced_push,
            digest: Some(digest),
        }
    }

    fn persist_outcome(
        &self,
        ctx: &PushContext,
        refreshed: &RemoteBackendSnapshot,
        sync_to_app: bool,
    ) -> Result<(), PushError> {
        let io = |e: RepositoryError| PushError::StateIo(e.to_string());

        self.project_repo.save(&ctx.state).map_err(io)?;
        self.snapshot_store
            .record(&ctx.state.project_path, refreshed, true)
            .map_err(io)?;
        if sync_to_app {
            self.snapshot_store
                .export_to_app(&ctx.state.project_path, refreshed)
                .map_err(io)?;
        }
        Ok(())
    }

    fn reload_state(&self, ctx: &mut PushContext) {
        match self.project_repo.load() {
            Ok(Some(mut latest)) => {
                if latest.project_path.as_os_str().is_empty() {
                    latest.project_path = ctx.state.project_path.clone();
                }
                ctx.state = latest;
            }
            Ok(None) => {}
            Err(err) => tracing::warn!(%err, "could not reload project record"),
        }
    }
}
