//! Remote Backend Snapshot entity
//!
//! The state of a remote backend project as last reported by the service.
//! The same shape is used for the locally recorded copy and for fresh
//! responses, which is what the conflict guard compares.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteBackendSnapshot {
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub console_url: String,
    /// When the remote project was last modified
    #[serde(default)]
    pub last_updated: Timestamp,
    /// Raw provisioning state of the in-flight operation, if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formation_state: Option<String>,
    /// Remaining service fields, kept for exporting into the app
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl RemoteBackendSnapshot {
    pub fn new(project_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            name: name.into(),
            console_url: String::new(),
            last_updated: Timestamp::invalid(),
            formation_state: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_console_url(mut self, url: impl Into<String>) -> Self {
        self.console_url = url.into();
        self
    }

    pub fn with_last_updated(mut self, at: Timestamp) -> Self {
        self.last_updated = at;
        self
    }

    pub fn with_formation_state(mut self, state: impl Into<String>) -> Self {
        self.formation_state = Some(state.into());
        self
    }

    /// Formation state, treating blank strings as absent
    pub fn formation_state(&self) -> Option<&str> {
        self.formation_state
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
