//! Feature hooks backed by configured shell commands
//!
//! `[hooks]` in the config maps a feature name to a command line. Enabled
//! features without an entry get a hook that completes immediately.

use std::collections::BTreeMap;
use std::thread;

use crate::domain::entities::ProjectState;
use crate::domain::ports::{FeatureHook, FeatureHookRegistry, HookCompletion, HookContext, NoopHook};

use super::build::shell;

/// Runs one feature's pre-update command on a background thread
pub struct CommandHook {
    feature: String,
    command: String,
}

impl CommandHook {
    pub fn new(feature: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            feature: feature.into(),
            command: command.into(),
        }
    }
}

impl FeatureHook for CommandHook {
    fn feature(&self) -> &str {
        &self.feature
    }

    fn pre_update(&self, context: &HookContext<'_>, done: HookCompletion) {
        let mut cmd = shell(&self.command);
        cmd.current_dir(&context.state.project_path)
            .env("BACKSYNC_FEATURE", &self.feature)
            .env("BACKSYNC_PROJECT_ID", &context.state.backend_project_id);
        let command = self.command.clone();

        thread::spawn(move || {
            tracing::debug!(feature = done.feature(), %command, "running pre-update hook");
            match cmd.status() {
                Ok(status) if status.success() => done.complete(),
                Ok(status) => done.fail(format!("'{}' exited with {}", command, status)),
                Err(err) => done.fail(format!("'{}' could not start: {}", command, err)),
            }
        });
    }
}

/// Registry built from the `[hooks]` config table
#[derive(Debug, Clone, Default)]
pub struct CommandHookRegistry {
    commands: BTreeMap<String, String>,
}

impl CommandHookRegistry {
    pub fn new(commands: BTreeMap<String, String>) -> Self {
        Self { commands }
    }
}

impl FeatureHookRegistry for CommandHookRegistry {
    fn enabled_hooks(&self, state: &ProjectState) -> Vec<Box<dyn FeatureHook>> {
        state
            .enabled_features
            .iter()
            .map(|feature| -> Box<dyn FeatureHook> {
                match self.commands.get(feature) {
                    Some(command) => Box::new(CommandHook::new(feature.clone(), command.clone())),
                    None => Box::new(NoopHook::new(feature.clone())),
                }
            })
            .collect()
    }
}
