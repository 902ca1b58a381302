//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --verbose) are inherited by all subcommands
//! - Every subcommand takes `--project` and otherwise searches upward from
//!   the current directory

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// backsync - push local backend definitions to a remote backend project
#[derive(Parser, Debug)]
#[command(name = "backsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build, upload, and wait for the backend project to update
    Push {
        /// Negative: don't wait for provisioning. Positive: maximum number of status checks
        #[arg(long, allow_negative_numbers = true, value_name = "N")]
        wait: Option<i64>,

        /// Export the refreshed backend config into the app's source tree
        #[arg(long)]
        sync: bool,

        /// Push even if the remote changed or nothing changed locally
        #[arg(short, long)]
        force: bool,

        /// Skip interactive prompts (accept default answers)
        #[arg(short, long)]
        yes: bool,

        /// Project root (default: search upward from the current directory)
        #[arg(long, value_name = "DIR")]
        project: Option<PathBuf>,
    },

    /// Show the recorded push state and whether a push is needed
    Status {
        /// Project root (default: search upward from the current directory)
        #[arg(long, value_name = "DIR")]
        project: Option<PathBuf>,
    },

    /// Create a fresh project record
    Init {
        /// Local project name
        #[arg(long)]
        name: String,

        /// Enabled backend feature (can be specified multiple times)
        #[arg(long = "feature", value_name = "FEATURE")]
        features: Vec<String>,

        /// Project root (default: current directory)
        #[arg(long, value_name = "DIR")]
        project: Option<PathBuf>,
    },
}
