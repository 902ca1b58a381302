//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BacksyncError, BacksyncResult};

use super::types::{Config, Verbosity};

/// Project config location, relative to the project root
pub const PROJECT_CONFIG: &str = ".backsync/config.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> BacksyncResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| BacksyncError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from project config, user config, or defaults
pub fn load_or_default(project_root: Option<&Path>) -> Config {
    if let Some(root) = project_root {
        let project_config = root.join(PROJECT_CONFIG);
        if project_config.exists() {
            match Config::load(&project_config) {
                Ok(config) => return with_env_overrides(config),
                Err(err) => tracing::warn!(%err, "ignoring project config"),
            }
        }
    }

    if let Some(user_config_dir) = dirs::config_dir() {
        let user_config = user_config_dir.join("backsync/config.toml");
        if user_config.exists() {
            match Config::load(&user_config) {
                Ok(config) => return with_env_overrides(config),
                Err(err) => tracing::warn!(%err, "ignoring user config"),
            }
        }
    }

    with_env_overrides(Config::default())
}

/// Apply environment variable overrides (BACKSYNC_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_overrides_from(config, |key| std::env::var(key).ok())
}

/// Apply overrides read through `lookup` (environment in production)
pub fn with_overrides_from<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(endpoint) = lookup("BACKSYNC_ENDPOINT").filter(|v| !v.trim().is_empty()) {
        config.remote.endpoint = Some(endpoint);
    }

    if let Some(token) = lookup("BACKSYNC_TOKEN").filter(|v| !v.trim().is_empty()) {
        config.remote.token = Some(token);
    }

    if let Some(raw) = lookup("BACKSYNC_POLL_MAX_ATTEMPTS") {
        match raw.trim().parse::<u32>() {
            Ok(n) if n > 0 => config.poll.max_attempts = n,
            _ => tracing::warn!(value = %raw, "invalid BACKSYNC_POLL_MAX_ATTEMPTS, keeping {}", config.poll.max_attempts),
        }
    }

    if let Some(raw) = lookup("BACKSYNC_POLL_INTERVAL_SECS") {
        match raw.trim().parse::<u64>() {
            Ok(n) => config.poll.interval_secs = n,
            Err(_) => tracing::warn!(value = %raw, "invalid BACKSYNC_POLL_INTERVAL_SECS, keeping {}", config.poll.interval_secs),
        }
    }

    if let Some(verbosity) = lookup("BACKSYNC_VERBOSITY") {
        config.output.verbosity = match verbosity.to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            "debug" => Verbosity::Debug,
            _ => Verbosity::Normal,
        };
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "remote",
        "endpoint",
        "token",
        "timeout_secs",
        "poll",
        "max_attempts",
        "interval_secs",
        "build",
        "command",
        "hooks",
        "output",
        "verbosity",
        "color",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 && candidate != unknown => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
