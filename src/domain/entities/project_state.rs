//! Project State entity
//!
//! What the tool remembers about a local project between runs: which remote
//! backend project it pushes to, and how the last push went.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectState {
    /// Project root; filled in by the repository on load, never persisted
    #[serde(skip)]
    pub project_path: PathBuf,
    /// Local project name (used when creating a backend project)
    #[serde(default)]
    pub project_name: String,
    /// Remote backend project id; empty when no backend exists yet
    #[serde(default)]
    pub backend_project_id: String,
    #[serde(default)]
    pub backend_project_name: String,
    /// When the last push finished (successfully or not)
    #[serde(default)]
    pub last_update_time: Timestamp,
    #[serde(default)]
    pub last_update_successful: bool,
    /// Remote's last-modified time as of the last pull or push
    #[serde(default)]
    pub remote_last_updated: Timestamp,
    /// Enabled backend features, in declaration order
    #[serde(default)]
    pub enabled_features: Vec<String>,
}

impl ProjectState {
    pub fn new(project_path: impl Into<PathBuf>, project_name: impl Into<String>) -> Self {
        Self {
            project_path: project_path.into(),
            project_name: project_name.into(),
            backend_project_id: String::new(),
            backend_project_name: String::new(),
            last_update_time: Timestamp::invalid(),
            last_update_successful: false,
            remote_last_updated: Timestamp::invalid(),
            enabled_features: Vec::new(),
        }
    }

    pub fn with_features(mut self, features: Vec<String>) -> Self {
        self.enabled_features = features;
        self
    }

    pub fn with_backend(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.backend_project_id = id.into();
        self.backend_project_name = name.into();
        self
    }

    pub fn has_backend(&self) -> bool {
        !self.backend_project_id.trim().is_empty()
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.enabled_features.iter().any(|f| f == feature)
    }

    /// Record the outcome of a push attempt
    pub fn record_update(&mut self, successful: bool, at: Timestamp) {
        self.last_update_successful = successful;
        self.last_update_time = at;
    }

    /// Name shown to the user for the remote backend
    pub fn backend_display_name(&self) -> &str {
        if self.backend_project_name.is_empty() {
            &self.backend_project_id
        } else {
            &self.backend_project_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_feature_matches_exact_names() {
        let state = ProjectState::new("/tmp/app", "app")
            .with_features(vec!["cloud-api".to_string(), "user-files".to_string()]);
        assert!(state.has_feature("cloud-api"));
        assert!(!state.has_feature("cloud"));
        assert!(!ProjectState::new("/tmp/app", "app").has_feature("cloud-api"));
    }

    #[test]
    fn new_state_has_no_backend_and_invalid_times() {
        let state = ProjectState::new("/tmp/app", "app");
        assert!(!state.has_backend());
        assert!(!state.last_update_time.is_valid());
        assert!(!state.last_update_successful);
    }

    #[test]
    fn whitespace_id_is_not_a_backend() {
        let state = ProjectState::new("/tmp/app", "app").with_backend("  ", "");
        assert!(!state.has_backend());
    }

    #[test]
    fn record_update_sets_both_fields() {
        let mut state = ProjectState::new("/tmp/app", "app");
        let at = Timestamp::parse("2024-05-01-10-00-00");
        state.record_update(true, at.clone());
        assert!(state.last_update_successful);
        assert_eq!(state.last_update_time, at);
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let state: ProjectState = serde_json::from_str(r#"{"project_name":"app"}"#).unwrap();
        assert_eq!(state.project_name, "app");
        assert!(!state.last_update_time.is_valid());
        assert!(state.enabled_features.is_empty());
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let state = ProjectState::new("/tmp/app", "app").with_backend("abc-123", "");
        assert_eq!(state.backend_display_name(), "abc-123");
    }
}
