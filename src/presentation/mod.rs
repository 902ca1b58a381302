//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//!
//! ## Structure
//!
//! - `cli` - Command-line definition
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//!
//! ## Usage
//!
//! ```ignore
//! use backsync::presentation::factory;
//!
//! let use_case = factory::create_push_use_case(&layout, &config, PromptMode::Interactive, events)?;
//! let result = use_case.execute(&options);
//! ```

pub mod cli;
pub mod factory;

pub use cli::{Cli, Commands};
pub use factory::{create_push_use_case, create_status_use_case, PromptMode};
