//! backsync CLI - push local backend definitions to a remote backend project
//!
//! Usage: backsync <COMMAND>
//!
//! Commands:
//!   push    Build, upload, and wait for the backend project to update
//!   status  Show the recorded push state
//!   init    Create a fresh project record

use clap::Parser;
use tracing_subscriber::EnvFilter;

use backsync::presentation::{Cli, Commands};

mod commands;
mod ui;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json = cli.json;
    let result = match cli.command {
        Commands::Push {
            wait,
            sync,
            force,
            yes,
            project,
        } => commands::cmd_push(
            project.as_deref(),
            wait,
            sync,
            force,
            yes,
            json,
            cli.verbose,
        ),
        Commands::Status { project } => commands::cmd_status(project.as_deref(), json, cli.verbose),
        Commands::Init {
            name,
            features,
            project,
        } => commands::cmd_init(project.as_deref(), &name, &features, json),
    };

    if let Err(err) = result {
        ui::error::print_error(&err, json);
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the `-v` count.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("backsync={}", level_for(verbose))));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
