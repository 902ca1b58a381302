//! Feature Hook port
//!
//! Every enabled backend feature gets a chance to prepare before the upload.
//! Hooks are started one after another without waiting on each other; each
//! reports back through its [`HookCompletion`] whenever it is done, possibly
//! from another thread.

use std::sync::mpsc::Sender;

use crate::config::Config;
use crate::domain::entities::{ProjectState, RemoteBackendSnapshot};

/// Everything a hook may look at
#[derive(Debug, Clone)]
pub struct HookContext<'a> {
    pub state: &'a ProjectState,
    pub config: &'a Config,
    /// Remote snapshot fetched at the start of the run, if any
    pub snapshot: Option<&'a RemoteBackendSnapshot>,
}

/// What a hook reports when it finishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookReport {
    pub feature: String,
    pub error: Option<String>,
}

/// One-shot completion handle handed to a hook.
///
/// Dropping it without calling [`HookCompletion::complete`] or
/// [`HookCompletion::fail`] counts as an abandoned hook.
#[derive(Debug)]
pub struct HookCompletion {
    feature: String,
    tx: Sender<HookReport>,
}

impl HookCompletion {
    pub fn new(feature: impl Into<String>, tx: Sender<HookReport>) -> Self {
        Self {
            feature: feature.into(),
            tx,
        }
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }

    pub fn complete(self) {
        let _ = self.tx.send(HookReport {
            feature: self.feature,
            error: None,
        });
    }

    pub fn fail(self, error: impl Into<String>) {
        let _ = self.tx.send(HookReport {
            feature: self.feature,
            error: Some(error.into()),
        });
    }
}

/// Pre-update hook for one backend feature
pub trait FeatureHook: Send + Sync {
    /// Feature this hook belongs to
    fn feature(&self) -> &str;

    /// Prepare for the upload and report through `done`
    fn pre_update(&self, context: &HookContext<'_>, done: HookCompletion);
}

/// Hands out the hooks of the enabled features
pub trait FeatureHookRegistry {
    /// Hooks for `state.enabled_features`, in the same order
    fn enabled_hooks(&self, state: &ProjectState) -> Vec<Box<dyn FeatureHook>>;
}

/// Hook that completes immediately.
///
/// Used for features with nothing to prepare.
pub struct NoopHook {
    feature: String,
}

impl NoopHook {
    pub fn new(feature: impl Into<String>) -> Self {
        Self {
            feature: feature.into(),
        }
    }
}

impl FeatureHook for NoopHook {
    fn feature(&self) -> &str {
        &self.feature
    }

    fn pre_update(&self, _context: &HookContext<'_>, done: HookCompletion) {
        done.complete();
    }
}

/// Registry that gives every enabled feature a [`NoopHook`]
pub struct NoopHookRegistry;

impl FeatureHookRegistry for NoopHookRegistry {
    fn enabled_hooks(&self, state: &ProjectState) -> Vec<Box<dyn FeatureHook>> {
        state
            .enabled_features
            .iter()
            .map(|f| Box::new(NoopHook::new(f.clone())) as Box<dyn FeatureHook>)
            .collect()
    }
}
