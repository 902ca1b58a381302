//! Domain Layer
//!
//! This is the core of backsync - the push decisions without I/O.
//!
//! ## Structure
//!
//! - `entities/` - Project state and remote snapshots
//! - `value_objects/` - Timestamps, stage groups, content hashes
//! - `services/` - Staleness, conflict guard, operation poller
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or network directly
//! 2. **Pure Functions** - Decisions are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
