//! StageClassifier port - maps raw formation states to stage groups

use crate::domain::value_objects::{classify_formation_state, StageGroup};

pub trait StageClassifier {
    fn classify(&self, raw_status: &str) -> StageGroup;
}

/// Classifier backed by the built-in stack state table
#[derive(Debug, Default, Clone, Copy)]
pub struct TableStageClassifier;

impl StageClassifier for TableStageClassifier {
    fn classify(&self, raw_status: &str) -> StageGroup {
        classify_formation_state(raw_status)
    }
}
