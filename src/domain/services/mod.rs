//! Domain Services
//!
//! Stateless decision logic for the push workflow:
//!
//! - `staleness` - does the local build need pushing?
//! - `conflict_guard` - did the remote change behind our back?
//! - `poller` - wait for an accepted update to finish

pub mod conflict_guard;
pub mod poller;
pub mod staleness;

pub use conflict_guard::check_remote_ahead;
pub use poller::{
    transition, Observation, OperationPoller, PollMode, PollOutcome, PollPolicy, PollResult,
    PollState, DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL,
};
pub use staleness::is_update_needed;
