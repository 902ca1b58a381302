//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `PushUseCase` - Orchestrates the push flow (load, conflict check, build, hooks, upload, poll, record)
//! - `StatusUseCase` - Reports the recorded state and whether a push is needed

pub mod push;
pub mod status;

pub use push::{PushOptions, PushOutcome, PushResult, PushUseCase};
pub use status::{StatusReport, StatusUseCase};
