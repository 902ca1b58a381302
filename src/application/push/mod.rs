//! Push Module
//!
//! Orchestrates pushing local backend definitions to the remote backend
//! project.
//!
//! ## Structure
//!
//! - `options` - Per-run flags (`PushOptions`)
//! - `result` - Result types (`PushResult`, `PushOutcome`)
//! - `use_case` - Core use case logic (`PushUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use backsync::application::push::{PushOptions, PushUseCase};
//!
//! let use_case = PushUseCase::new(project_repo, snapshot_store, service, builder, config);
//! use_case.run(&PushOptions::new(), |result| println!("{:?}", result.outcome));
//! ```

mod options;
mod result;
mod use_case;

pub use options::PushOptions;
pub use result::{PushOutcome, PushResult};
pub use use_case::PushUseCase;

#[cfg(test)]
mod tests;
