//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod content_hash;
mod stage_group;
mod timestamp;

pub use content_hash::ContentHash;
pub use stage_group::{
    classify_formation_state, StageGroup, StageKind, PROVISIONED_FEATURE, STAGE_TABLE,
};
pub use timestamp::{Timestamp, TIMESTAMP_FORMAT};
