//! Push command handler
//!
//! Builds the backend, uploads it, and waits for the remote to finish
//! provisioning. Exits non-zero unless the push succeeded or there was
//! nothing to push.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use backsync::application::{PushOptions, PushOutcome};
use backsync::domain::ports::PushEventSink;
use backsync::infrastructure::{JsonEventSink, ProjectLock};
use backsync::presentation::{create_push_use_case, PromptMode};
use backsync::BacksyncError;

use crate::commands::project_root::{load_config, resolve_layout};
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::terminal::stdin_is_interactive;
use crate::ui::views::push::ConsoleEventSink;

/// Execute the push command
#[allow(clippy::too_many_arguments)]
pub fn cmd_push(
    project: Option<&Path>,
    wait: Option<i64>,
    sync: bool,
    force: bool,
    yes: bool,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let layout = resolve_layout(project)?;
    if !layout.project_info().is_file() {
        return Err(BacksyncError::ProjectNotInitialized {
            path: layout.root().to_path_buf(),
        }
        .into());
    }

    let config = load_config(&layout, json)?;
    let ui = UiContext::new(json, verbose, &config);

    // Held until the process exits or the run finishes
    let lock = ProjectLock::acquire(&layout.lock_file())?;
    install_interrupt_notice(json, ui.unicode);

    let events: Arc<dyn PushEventSink> = if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::new(ui))
    };

    let use_case = create_push_use_case(&layout, &config, prompt_mode(yes, json), events)?;
    let options = PushOptions::new()
        .with_wait_override(wait)
        .with_sync_to_app(sync)
        .with_force(force);

    tracing::info!(project = %layout.root().display(), ?options, "starting push");
    let result = use_case.execute(&options);
    drop(lock);

    match &result.outcome {
        PushOutcome::Pushed | PushOutcome::UpToDate => Ok(()),
        PushOutcome::Cancelled(err) | PushOutcome::Failed(err) => {
            tracing::debug!(%err, "push did not complete");
            std::process::exit(1);
        }
    }
}

fn prompt_mode(yes: bool, json: bool) -> PromptMode {
    if yes {
        PromptMode::AssumeYes
    } else if json || !stdin_is_interactive() {
        PromptMode::Defaults
    } else {
        PromptMode::Interactive
    }
}

/// Ctrl+C leaves the remote operation running; say so before exiting.
fn install_interrupt_notice(json: bool, unicode: bool) {
    let handler = move || {
        if json {
            let _ = crate::ui::json::emit(serde_json::json!({
                "event": "interrupted",
                "command": "push",
                "message": "the backend update may still be in progress",
            }));
        } else {
            eprintln!(
                "\n{} Interrupted. The backend update may still be in progress; run 'backsync status' to check.",
                Icon::Warning.render(unicode)
            );
        }
        std::process::exit(130);
    };

    if let Err(err) = ctrlc::set_handler(handler) {
        tracing::warn!(%err, "failed to install Ctrl+C handler");
    }
}
