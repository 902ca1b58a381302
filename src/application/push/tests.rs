//! Push Use Case Tests

use super::*;
use crate::config::Config;
use crate::domain::entities::{ProjectState, RemoteBackendSnapshot};
use crate::domain::ports::{
    BackendBuilder, BackendService, BuildError, Clock, ConsoleOpener, FeatureHook,
    FeatureHookRegistry, HookCompletion, HookContext, OperationHandle, ProjectRepository,
    Prompter, PushEvent, PushEventSink, RemoteError, RemoteResult, RepositoryResult,
    SnapshotStore,
};
use crate::domain::services::PollResult;
use crate::domain::value_objects::Timestamp;
use crate::error::PushError;
use chrono::{DateTime, TimeZone, Utc};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::Path;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// Mock implementations for testing

#[derive(Clone, Default)]
struct MemoryProjectRepository {
    state: Rc<RefCell<Option<ProjectState>>>,
    saves: Rc<Cell<usize>>,
}

impl ProjectRepository for MemoryProjectRepository {
    fn load(&self) -> RepositoryResult<Option<ProjectState>> {
        Ok(self.state.borrow().clone())
    }

    fn save(&self, state: &ProjectState) -> RepositoryResult<()> {
        self.saves.set(self.saves.get() + 1);
        *self.state.borrow_mut() = Some(state.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
struct MemorySnapshotStore {
    recorded: Rc<RefCell<Vec<(RemoteBackendSnapshot, bool)>>>,
    exported: Rc<RefCell<Vec<RemoteBackendSnapshot>>>,
}

impl SnapshotStore for MemorySnapshotStore {
    fn record(
        &self,
        _project_path: &Path,
        snapshot: &RemoteBackendSnapshot,
        mark_synced: bool,
    ) -> RepositoryResult<()> {
        self.recorded
            .borrow_mut()
            .push((snapshot.clone(), mark_synced));
        Ok(())
    }

    fn export_to_app(
        &self,
        _project_path: &Path,
        snapshot: &RemoteBackendSnapshot,
    ) -> RepositoryResult<()> {
        self.exported.borrow_mut().push(snapshot.clone());
        Ok(())
    }
}

#[derive(Clone)]
struct FakeService {
    remote: RemoteBackendSnapshot,
    update_error: Option<RemoteError>,
    describe_error: Option<RemoteError>,
    statuses: Rc<RefCell<VecDeque<&'static str>>>,
    calls: Rc<RefCell<Vec<String>>>,
}

impl FakeService {
    fn new(remote: RemoteBackendSnapshot) -> Self {
        Self {
            remote,
            update_error: None,
            describe_error: None,
            statuses: Rc::new(RefCell::new(VecDeque::new())),
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn with_statuses(self, statuses: &[&'static str]) -> Self {
        self.statuses.borrow_mut().extend(statuses.iter().copied());
        self
    }

    fn count(&self, call: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }
}

impl BackendService for FakeService {
    fn create_project(&self, name: &str) -> RemoteResult<RemoteBackendSnapshot> {
        self.calls.borrow_mut().push("create".to_string());
        Ok(RemoteBackendSnapshot::new("p-new", name)
            .with_last_updated(Timestamp::parse("2024-06-01T11:00:00Z")))
    }

    fn describe_project(&self, _project_id: &str) -> RemoteResult<RemoteBackendSnapshot> {
        self.calls.borrow_mut().push("describe".to_string());
        match &self.describe_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.remote.clone()),
        }
    }

    fn update_project(&self, project_id: &str, contents: &[u8]) -> RemoteResult<OperationHandle> {
        self.calls.borrow_mut().push("update".to_string());
        assert_eq!(contents, b"zip-bytes");
        match &self.update_error {
            Some(err) => Err(err.clone()),
            None => Ok(OperationHandle {
                project_id: project_id.to_string(),
                accepted: self.remote.clone(),
            }),
        }
    }

    fn query_operation(&self, _handle: &OperationHandle) -> RemoteResult<RemoteBackendSnapshot> {
        self.calls.borrow_mut().push("query".to_string());
        let status = self
            .statuses
            .borrow_mut()
            .pop_front()
            .expect("queried more often than scripted");
        Ok(self.remote.clone().with_formation_state(status))
    }
}

#[derive(Clone)]
struct FakeBuilder {
    mod_time: Option<Timestamp>,
    builds: Rc<Cell<usize>>,
}

impl BackendBuilder for FakeBuilder {
    fn build(&self, _project_path: &Path) -> Result<(), BuildError> {
        self.builds.set(self.builds.get() + 1);
        Ok(())
    }

    fn build_dir_mod_time(&self, _project_path: &Path) -> Option<Timestamp> {
        self.mod_time.clone()
    }

    fn package(&self, _project_path: &Path) -> Result<Vec<u8>, BuildError> {
        Ok(b"zip-bytes".to_vec())
    }
}

struct ScriptedPrompter {
    answers: RefCell<VecDeque<bool>>,
    asked: Rc<RefCell<Vec<String>>>,
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, prompt: &str, _default: bool) -> bool {
        self.asked.borrow_mut().push(prompt.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .expect("unexpected prompt")
    }
}

struct RecordingOpener {
    opened: Rc<RefCell<Vec<String>>>,
}

impl ConsoleOpener for RecordingOpener {
    fn open(&self, url: &str) -> Result<(), String> {
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}

struct FixedClock {
    sleeps: Rc<RefCell<Vec<Duration>>>,
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        now()
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
    }
}

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<PushEvent>>,
}

impl PushEventSink for RecordingSink {
    fn on_event(&self, event: PushEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl RecordingSink {
    fn position(&self, pred: impl Fn(&PushEvent) -> bool) -> Option<usize> {
        self.events.lock().unwrap().iter().position(pred)
    }
}

/// Completes from a background thread after a short delay
struct ThreadedHook {
    feature: String,
    delay_ms: u64,
}

impl FeatureHook for ThreadedHook {
    fn feature(&self) -> &str {
        &self.feature
    }

    fn pre_update(&self, _context: &HookContext<'_>, done: HookCompletion) {
        let delay = Duration::from_millis(self.delay_ms);
        std::thread::spawn(move || {
            std::thread::sleep(delay);
            done.complete();
        });
    }
}

/// Drops its completion handle without reporting
struct ForgetfulHook;

impl FeatureHook for ForgetfulHook {
    fn feature(&self) -> &str {
        "analytics"
    }

    fn pre_update(&self, _context: &HookContext<'_>, done: HookCompletion) {
        drop(done);
    }
}

struct FailingHook;

impl FeatureHook for FailingHook {
    fn feature(&self) -> &str {
        "database"
    }

    fn pre_update(&self, _context: &HookContext<'_>, done: HookCompletion) {
        done.fail("table schema invalid");
    }
}

enum HookKind {
    Threaded(u64),
    Forgetful,
    Failing,
}

struct ScriptedHooks {
    kinds: Vec<HookKind>,
}

impl FeatureHookRegistry for ScriptedHooks {
    fn enabled_hooks(&self, state: &ProjectState) -> Vec<Box<dyn FeatureHook>> {
        state
            .enabled_features
            .iter()
            .zip(&self.kinds)
            .map(|(feature, kind)| -> Box<dyn FeatureHook> {
                match kind {
                    HookKind::Threaded(delay_ms) => Box::new(ThreadedHook {
                        feature: feature.clone(),
                        delay_ms: *delay_ms,
                    }),
                    HookKind::Forgetful => Box::new(ForgetfulHook),
                    HookKind::Failing => Box::new(FailingHook),
                }
            })
            .collect()
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn project() -> ProjectState {
    let mut state = ProjectState::new("/work/notes", "notes").with_backend("p-1", "notes-backend");
    state.last_update_time = Timestamp::parse("2024-05-01-00-00-00");
    state.last_update_successful = true;
    state.remote_last_updated = Timestamp::parse("2024-05-01-00-00-00");
    state.enabled_features = vec!["cloud-api".to_string()];
    state
}

fn remote() -> RemoteBackendSnapshot {
    RemoteBackendSnapshot::new("p-1", "notes-backend")
        .with_console_url("https://console.example.invalid/p-1")
        .with_last_updated(Timestamp::parse("2024-05-01T00:00:00Z"))
}

struct Harness {
    repo: MemoryProjectRepository,
    store: MemorySnapshotStore,
    service: FakeService,
    builder: FakeBuilder,
    answers: Vec<bool>,
    asked: Rc<RefCell<Vec<String>>>,
    opened: Rc<RefCell<Vec<String>>>,
    sleeps: Rc<RefCell<Vec<Duration>>>,
    sink: Arc<RecordingSink>,
    hooks: Option<Vec<HookKind>>,
}

impl Harness {
    fn new(state: Option<ProjectState>, service: FakeService) -> Self {
        let repo = MemoryProjectRepository::default();
        *repo.state.borrow_mut() = state;
        Self {
            repo,
            store: MemorySnapshotStore::default(),
            service,
            builder: FakeBuilder {
                mod_time: Some(Timestamp::parse("2024-05-02-00-00-00")),
                builds: Rc::new(Cell::new(0)),
            },
            answers: Vec::new(),
            asked: Rc::new(RefCell::new(Vec::new())),
            opened: Rc::new(RefCell::new(Vec::new())),
            sleeps: Rc::new(RefCell::new(Vec::new())),
            sink: Arc::new(RecordingSink::default()),
            hooks: None,
        }
    }

    fn answers(mut self, answers: &[bool]) -> Self {
        self.answers = answers.to_vec();
        self
    }

    fn build_mod_time(mut self, mod_time: Option<&str>) -> Self {
        self.builder.mod_time = mod_time.map(Timestamp::parse);
        self
    }

    fn hooks(mut self, kinds: Vec<HookKind>) -> Self {
        self.hooks = Some(kinds);
        self
    }

    fn run(&mut self, options: &PushOptions) -> PushResult {
        let mut use_case = PushUseCase::new(
            self.repo.clone(),
            self.store.clone(),
            self.service.clone(),
            self.builder.clone(),
            Config::default(),
        )
        .with_prompter(Box::new(ScriptedPrompter {
            answers: RefCell::new(self.answers.clone().into()),
            asked: self.asked.clone(),
        }))
        .with_opener(Box::new(RecordingOpener {
            opened: self.opened.clone(),
        }))
        .with_clock(Box::new(FixedClock {
            sleeps: self.sleeps.clone(),
        }))
        .with_events(self.sink.clone());
        if let Some(kinds) = self.hooks.take() {
            use_case = use_case.with_hooks(Box::new(ScriptedHooks { kinds }));
        }

        let calls = Cell::new(0);
        let result = use_case.run(options, |_| calls.set(calls.get() + 1));
        assert_eq!(calls.get(), 1, "completion callback must fire exactly once");
        result
    }

    fn saved(&self) -> ProjectState {
        self.repo.state.borrow().clone().expect("state saved")
    }
}

#[test]
fn uninitialized_project_fails() {
    let mut h = Harness::new(None, FakeService::new(remote()));
    let result = h.run(&PushOptions::new());

    assert_eq!(
        result.outcome,
        PushOutcome::Failed(PushError::ProjectNotInitialized)
    );
    assert!(h.service.calls.borrow().is_empty());
}

#[test]
fn unchanged_build_is_up_to_date() {
    let mut h = Harness::new(Some(project()), FakeService::new(remote()))
        .build_mod_time(Some("2024-04-30-00-00-00"));

    let result = h.run(&PushOptions::new());

    assert_eq!(result.outcome, PushOutcome::UpToDate);
    assert!(result.is_success());
    assert_eq!(h.service.count("update"), 0);
    assert_eq!(h.builder.builds.get(), 1);
    // Matching remote is re-recorded as synced.
    assert_eq!(h.store.recorded.borrow().len(), 1);
    assert!(h.store.recorded.borrow()[0].1);
    assert_eq!(h.repo.saves.get(), 0);
}

#[test]
fn missing_build_dir_is_up_to_date() {
    let mut h = Harness::new(Some(project()), FakeService::new(remote())).build_mod_time(None);
    let result = h.run(&PushOptions::new());
    assert_eq!(result.outcome, PushOutcome::UpToDate);
}

#[test]
fn stale_build_is_pushed_and_polled_to_completion() {
    let service = FakeService::new(remote()).with_statuses(&[
        "UPDATE_IN_PROGRESS",
        "UPDATE_IN_PROGRESS",
        "UPDATE_IN_PROGRESS",
        "UPDATE_COMPLETE",
    ]);
    let mut h = Harness::new(Some(project()), service);

    let result = h.run(&PushOptions::new());

    assert_eq!(result.outcome, PushOutcome::Pushed);
    assert_eq!(h.service.count("update"), 1);
    assert_eq!(h.service.count("query"), 4);
    assert_eq!(*h.sleeps.borrow(), vec![Duration::from_secs(5); 3]);

    let saved = h.saved();
    assert!(saved.last_update_successful);
    assert_eq!(saved.last_update_time, Timestamp::from(now()));
    assert_eq!(result.poll.unwrap().result, PollResult::Success);
    assert!(result.digest.is_some());
    assert!(h.store.exported.borrow().is_empty());
}

#[test]
fn failed_previous_push_is_retried_even_when_build_is_old() {
    let mut state = project();
    state.last_update_successful = false;
    let service = FakeService::new(remote()).with_statuses(&["UPDATE_COMPLETE"]);
    let mut h = Harness::new(Some(state), service).build_mod_time(Some("2020-01-01-00-00-00"));

    let result = h.run(&PushOptions::new());

    assert_eq!(result.outcome, PushOutcome::Pushed);
}

#[test]
fn empty_hooks_upload_immediately() {
    let service = FakeService::new(remote()).with_statuses(&["UPDATE_COMPLETE"]);
    let mut h = Harness::new(Some(project()), service).hooks(vec![]);

    let result = h.run(&PushOptions::new());

    assert_eq!(result.outcome, PushOutcome::Pushed);
    assert!(h
        .sink
        .position(|e| matches!(e, PushEvent::HooksStarted { .. }))
        .is_none());
}

#[test]
fn upload_waits_for_every_hook() {
    let mut state = project();
    state.enabled_features = vec!["cloud-api".to_string(), "user-files".to_string()];
    let service = FakeService::new(remote()).with_statuses(&["UPDATE_COMPLETE"]);
    let mut h = Harness::new(Some(state), service)
        .hooks(vec![HookKind::Threaded(30), HookKind::Threaded(5)]);

    let result = h.run(&PushOptions::new());

    assert_eq!(result.outcome, PushOutcome::Pushed);
    let submitting = h
        .sink
        .position(|e| matches!(e, PushEvent::Submitting { .. }))
        .unwrap();
    let finished: Vec<usize> = h
        .sink
        .events
        .lock()
        .unwrap()
        .iter()
        .enumerate()
        .filter(|(_, e)| matches!(e, PushEvent::HookFinished { .. }))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(finished.len(), 2);
    assert!(finished.iter().all(|i| *i < submitting));
}

#[test]
fn abandoned_hook_fails_instead_of_stalling() {
    let mut state = project();
    state.enabled_features = vec!["cloud-api".to_string(), "analytics".to_string()];
    let mut h = Harness::new(Some(state), FakeService::new(remote()))
        .hooks(vec![HookKind::Threaded(0), HookKind::Forgetful]);

    let result = h.run(&PushOptions::new());

    assert_eq!(
        result.outcome,
        PushOutcome::Failed(PushError::HookAbandoned { pending: 1 })
    );
    assert_eq!(h.service.count("update"), 0);
}

#[test]
fn failing_hook_blocks_upload() {
    let mut state = project();
    state.enabled_features = vec!["database".to_string()];
    let mut h = Harness::new(Some(state), FakeService::new(remote())).hooks(vec![HookKind::Failing]);

    let result = h.run(&PushOptions::new());

    assert_eq!(
        result.outcome,
        PushOutcome::Failed(PushError::HookFailed {
            feature: "database".to_string(),
            message: "table schema invalid".to_string(),
        })
    );
    assert_eq!(h.service.count("update"), 0);
}

#[test]
fn remote_ahead_declined_opens_console_and_stops() {
    let ahead = remote().with_last_updated(Timestamp::parse("2024-05-20T09:00:00Z"));
    let mut h = Harness::new(Some(project()), FakeService::new(ahead)).answers(&[false, true]);

    let result = h.run(&PushOptions::new());

    assert_eq!(
        result.outcome,
        PushOutcome::Cancelled(PushError::RemoteConflictUnresolved)
    );
    assert_eq!(
        *h.opened.borrow(),
        vec!["https://console.example.invalid/p-1".to_string()]
    );
    assert_eq!(h.builder.builds.get(), 0);
    assert!(h.store.recorded.borrow().is_empty());
}

#[test]
fn remote_ahead_declined_without_console() {
    let ahead = remote().with_last_updated(Timestamp::parse("2024-05-20T09:00:00Z"));
    let mut h = Harness::new(Some(project()), FakeService::new(ahead)).answers(&[false, false]);

    let result = h.run(&PushOptions::new());

    assert!(result.is_cancelled());
    assert!(h.opened.borrow().is_empty());
}

#[test]
fn remote_ahead_confirmed_forces_push_of_unchanged_build() {
    let ahead = remote().with_last_updated(Timestamp::parse("2024-05-20T09:00:00Z"));
    let service = FakeService::new(ahead).with_statuses(&["UPDATE_COMPLETE"]);
    let mut h = Harness::new(Some(project()), service)
        .answers(&[true])
        .build_mod_time(Some("2024-04-01-00-00-00"));

    let result = h.run(&PushOptions::new());

    assert_eq!(result.outcome, PushOutcome::Pushed);
    assert!(result.forced);
    assert_eq!(h.asked.borrow().len(), 1);
    // Our own push is now the recorded remote state.
    assert_eq!(
        h.saved().remote_last_updated,
        Timestamp::parse("2024-05-20T09:00:00Z")
    );
}

#[test]
fn force_flag_skips_conflict_prompt() {
    let ahead = remote().with_last_updated(Timestamp::parse("2024-05-20T09:00:00Z"));
    let service = FakeService::new(ahead).with_statuses(&["UPDATE_COMPLETE"]);
    let mut h = Harness::new(Some(project()), service).build_mod_time(Some("2024-04-01-00-00-00"));

    let result = h.run(&PushOptions::new().with_force(true));

    assert_eq!(result.outcome, PushOutcome::Pushed);
    assert!(h.asked.borrow().is_empty());
}

#[test]
fn submission_failure_records_unsuccessful_update() {
    let mut service = FakeService::new(remote());
    service.update_error = Some(RemoteError::Api {
        status: 400,
        body: "bad archive".to_string(),
    });
    let mut h = Harness::new(Some(project()), service);

    let result = h.run(&PushOptions::new());

    assert!(matches!(
        result.outcome,
        PushOutcome::Failed(PushError::SubmissionFailed(_))
    ));
    let saved = h.saved();
    assert!(!saved.last_update_successful);
    assert_eq!(saved.last_update_time, Timestamp::from(now()));
    assert_eq!(h.service.count("query"), 0);
    assert!(result.poll.is_none());
}

#[test]
fn no_wait_mode_reports_success_without_queries() {
    let mut h = Harness::new(Some(project()), FakeService::new(remote()));

    let result = h.run(&PushOptions::new().with_wait_override(Some(-1)));

    assert_eq!(result.outcome, PushOutcome::Pushed);
    assert_eq!(h.service.count("query"), 0);
    assert!(h.saved().last_update_successful);
    assert!(h
        .sink
        .events
        .lock()
        .unwrap()
        .contains(&PushEvent::Submitted { waiting: false }));
}

#[test]
fn terminal_failure_still_records_outcome_and_snapshot() {
    let service = FakeService::new(remote()).with_statuses(&["UPDATE_IN_PROGRESS", "UPDATE_ROLLBACK_COMPLETE"]);
    let mut h = Harness::new(Some(project()), service);

    let result = h.run(&PushOptions::new().with_sync_to_app(true));

    assert_eq!(
        result.outcome,
        PushOutcome::Failed(PushError::ProvisioningFailed(
            "UPDATE_ROLLBACK_COMPLETE".to_string()
        ))
    );
    let saved = h.saved();
    assert!(!saved.last_update_successful);
    assert_eq!(saved.last_update_time, Timestamp::from(now()));
    // Once after the conflict check, once after the push.
    assert_eq!(h.store.recorded.borrow().len(), 2);
    assert_eq!(h.store.exported.borrow().len(), 1);
}

#[test]
fn wait_override_limits_attempts() {
    let service = FakeService::new(remote()).with_statuses(&[
        "UPDATE_IN_PROGRESS",
        "UPDATE_IN_PROGRESS",
    ]);
    let mut h = Harness::new(Some(project()), service);

    let result = h.run(&PushOptions::new().with_wait_override(Some(2)));

    assert_eq!(
        result.outcome,
        PushOutcome::Failed(PushError::PollExhausted { attempts: 2 })
    );
    assert_eq!(h.service.count("query"), 2);
}

#[test]
fn missing_backend_is_created_then_pushed() {
    let mut state = project();
    state.backend_project_id.clear();
    state.backend_project_name.clear();
    let service = FakeService::new(remote()).with_statuses(&["CREATE_COMPLETE"]);
    let mut h = Harness::new(Some(state), service).answers(&[true]);

    let result = h.run(&PushOptions::new());

    assert_eq!(result.outcome, PushOutcome::Pushed);
    assert_eq!(h.service.count("create"), 1);
    assert_eq!(h.saved().backend_project_id, "p-new");
    assert_eq!(h.saved().backend_project_name, "notes");
}

#[test]
fn missing_backend_declined_is_cancelled() {
    let mut state = project();
    state.backend_project_id.clear();
    let mut h = Harness::new(Some(state), FakeService::new(remote())).answers(&[false]);

    let result = h.run(&PushOptions::new());

    assert_eq!(result.outcome, PushOutcome::Cancelled(PushError::UserCancelled));
    assert_eq!(h.service.count("create"), 0);
    assert_eq!(h.builder.builds.get(), 0);
}

#[test]
fn completed_event_is_last() {
    let mut h = Harness::new(Some(project()), FakeService::new(remote()))
        .build_mod_time(Some("2024-04-30-00-00-00"));

    h.run(&PushOptions::new());

    let events = h.sink.events.lock().unwrap();
    assert!(matches!(
        events.last(),
        Some(PushEvent::Completed { success: true, .. })
    ));
}

#[test]
fn push_without_cloud_api_skips_waiting() {
    let mut state = project();
    state.enabled_features = vec!["user-files".to_string()];
    // No statuses scripted: any query would panic.
    let mut h = Harness::new(Some(state), FakeService::new(remote()));

    let result = h.run(&PushOptions::new());

    assert_eq!(result.outcome, PushOutcome::Pushed);
    assert_eq!(h.service.count("update"), 1);
    assert_eq!(h.service.count("query"), 0);
    assert!(h.saved().last_update_successful);
    assert!(h
        .sink
        .events
        .lock()
        .unwrap()
        .contains(&PushEvent::Submitted { waiting: false }));
}

#[test]
fn unreachable_remote_records_unsuccessful_update() {
    let mut service = FakeService::new(remote());
    service.describe_error = Some(RemoteError::Api {
        status: 503,
        body: "maintenance".to_string(),
    });
    let mut h = Harness::new(Some(project()), service);

    let result = h.run(&PushOptions::new());

    assert!(matches!(
        result.outcome,
        PushOutcome::Failed(PushError::RemoteUnavailable(_))
    ));
    let saved = h.saved();
    assert!(!saved.last_update_successful);
    assert_eq!(saved.last_update_time, Timestamp::from(now()));
    assert_eq!(h.builder.builds.get(), 0);
    assert_eq!(h.service.count("update"), 0);
}
