//! Configuration module for backsync
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (BACKSYNC_*)
//! 3. Project config (.backsync/config.toml)
//! 4. User config (~/.config/backsync/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{with_overrides_from, ConfigWarning, PROJECT_CONFIG};
pub use types::{BuildConfig, ColorMode, Config, OutputConfig, PollConfig, RemoteConfig, Verbosity};
