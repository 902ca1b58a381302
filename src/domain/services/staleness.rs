//! Staleness evaluation
//!
//! Decides whether local backend artifacts changed since the last successful
//! push. Anything that prevents establishing recency counts as "changed".

use crate::domain::value_objects::Timestamp;

/// Whether a push is needed.
///
/// - no successful push on record: always needed
/// - no build directory: not needed (nothing to compare)
/// - otherwise needed when either time is invalid or the build directory is
///   strictly newer than the last update
pub fn is_update_needed(
    last_update_successful: bool,
    last_update_time: &Timestamp,
    build_dir_exists: bool,
    build_dir_mod_time: &Timestamp,
) -> bool {
    if !last_update_successful {
        return true;
    }
    if !build_dir_exists {
        return false;
    }
    last_update_time
        .is_before(build_dir_mod_time)
        .unwrap_or(true)
}
