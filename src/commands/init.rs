//! Init command - create the project record

use std::path::Path;

use anyhow::{Context, Result};

use backsync::domain::entities::ProjectState;
use backsync::domain::ports::ProjectRepository;
use backsync::infrastructure::{JsonProjectRepository, ProjectLayout};
use backsync::BacksyncError;

use crate::ui::primitives::icon::Icon;
use crate::ui::terminal::detect_capabilities;

/// Create `.backsync/project-info.json` for a project that has no backend yet
pub fn cmd_init(project: Option<&Path>, name: &str, features: &[String], json: bool) -> Result<()> {
    let root = match project {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };
    let layout = ProjectLayout::new(&root);

    if layout.project_info().exists() {
        return Err(BacksyncError::AlreadyInitialized {
            path: layout.project_info(),
        }
        .into());
    }

    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Project name must not be empty");
    }

    let state = ProjectState::new(&root, name).with_features(dedup(features));
    JsonProjectRepository::new(layout.clone()).save(&state)?;
    tracing::info!(path = %layout.project_info().display(), "initialized project");

    if json {
        let _ = crate::ui::json::emit(serde_json::json!({
            "event": "init_complete",
            "command": "init",
            "path": layout.project_info().display().to_string(),
            "project": state.project_name,
            "features": state.enabled_features,
        }));
    } else {
        let caps = detect_capabilities();
        println!(
            "{} Initialized backsync project '{}' in {}",
            Icon::Success.colored(caps.supports_color, caps.supports_unicode),
            state.project_name,
            layout.state_dir().display()
        );
        println!("  Next: set remote.endpoint in .backsync/config.toml, then run 'backsync push'.");
    }
    Ok(())
}

/// Keep declaration order, drop repeats and blanks
fn dedup(features: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for feature in features.iter().map(|f| f.trim()) {
        if !feature.is_empty() && !out.iter().any(|f| f == feature) {
            out.push(feature.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn dedup_keeps_first_occurrence() {
        let features = vec![
            "database".to_string(),
            " cloud-api ".to_string(),
            "database".to_string(),
            String::new(),
        ];
        assert_eq!(dedup(&features), vec!["database", "cloud-api"]);
    }

    #[test]
    fn init_twice_fails() {
        let dir = tempdir().unwrap();
        cmd_init(Some(dir.path()), "notes", &[], true).unwrap();
        let err = cmd_init(Some(dir.path()), "notes", &[], true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BacksyncError>(),
            Some(BacksyncError::AlreadyInitialized { .. })
        ));
    }
}
