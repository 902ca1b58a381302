use std::path::Path;

use anyhow::{Context, Result};

use backsync::config::Config;
use backsync::infrastructure::ProjectLayout;

use crate::ui::output::print_config_warnings;
use crate::ui::terminal::detect_capabilities;

/// Resolve the project a command operates on.
///
/// An explicit `--project` wins. Otherwise walk upward from the current
/// directory to the nearest project record, falling back to the current
/// directory itself.
pub(crate) fn resolve_layout(project: Option<&Path>) -> Result<ProjectLayout> {
    if let Some(dir) = project {
        return Ok(ProjectLayout::new(dir));
    }
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    Ok(discover_layout(&cwd))
}

pub(crate) fn discover_layout(start: &Path) -> ProjectLayout {
    ProjectLayout::discover(start).unwrap_or_else(|| ProjectLayout::new(start))
}

/// Load configuration for a project, printing unknown-key warnings.
///
/// An unreadable project config is fatal; a missing one falls back to the
/// user config and then defaults.
pub(crate) fn load_config(layout: &ProjectLayout, json: bool) -> Result<Config> {
    let path = layout.config_file();
    if !path.is_file() {
        return Ok(Config::load_or_default(Some(layout.root())));
    }

    let (config, warnings) = Config::load_with_warnings(&path)?;
    if !json && !warnings.is_empty() {
        print_config_warnings(&path, &warnings, detect_capabilities().supports_unicode);
    }
    for w in &warnings {
        tracing::warn!(key = %w.key, file = %path.display(), "unknown config key");
    }
    Ok(config.with_env_overrides())
}
