//! Status command handler

use std::path::Path;

use anyhow::Result;

use backsync::application::StatusReport;
use backsync::presentation::create_status_use_case;
use backsync::BacksyncError;

use crate::commands::project_root::{load_config, resolve_layout};
use crate::ui::context::UiContext;
use crate::ui::views::status::render_status;

pub fn cmd_status(project: Option<&Path>, json: bool, verbose: u8) -> Result<()> {
    let layout = resolve_layout(project)?;
    let config = load_config(&layout, json)?;
    let ui = UiContext::new(json, verbose, &config);

    let report = create_status_use_case(&layout, &config)
        .execute()?
        .ok_or_else(|| BacksyncError::ProjectNotInitialized {
            path: layout.root().to_path_buf(),
        })?;

    if json {
        let _ = crate::ui::json::emit(status_json(&report));
    } else {
        print!("{}", render_status(&report, ui.color, ui.unicode));
    }
    Ok(())
}

fn status_json(report: &StatusReport) -> serde_json::Value {
    let state = &report.state;
    serde_json::json!({
        "event": "status",
        "command": "status",
        "project": state.project_name,
        "backend_id": state.backend_project_id,
        "backend_name": state.backend_project_name,
        "last_update_time": state.last_update_time.to_string(),
        "last_update_successful": state.last_update_successful,
        "remote_last_updated": state.remote_last_updated.to_string(),
        "build_dir_mod_time": report.build_dir_mod_time.as_ref().map(ToString::to_string),
        "features": state.enabled_features,
        "update_needed": report.update_needed,
    })
}
