//! Command Builder
//!
//! Implements the BackendBuilder port by running the configured build
//! command in the project root. The command is expected to turn `backend/`
//! into `.backsync/build/`, including the `backend-content.zip` package.

use std::fs;
use std::path::Path;
use std::process::Command;

use crate::config::BuildConfig;
use crate::domain::ports::{BackendBuilder, BuildError};
use crate::domain::value_objects::Timestamp;
use crate::infrastructure::fs::{newest_mod_time, ProjectLayout};

#[derive(Debug, Clone, Default)]
pub struct CommandBuilder {
    command: Option<String>,
}

impl CommandBuilder {
    pub fn new(config: &BuildConfig) -> Self {
        Self {
            command: config
                .command
                .clone()
                .filter(|command| !command.trim().is_empty()),
        }
    }
}

/// Platform shell invocation for a command line
pub(crate) fn shell(command_line: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command_line]);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command_line]);
        cmd
    }
}

impl BackendBuilder for CommandBuilder {
    fn build(&self, project_path: &Path) -> Result<(), BuildError> {
        let Some(command) = &self.command else {
            tracing::debug!("no build command configured, using existing build output");
            return Ok(());
        };

        tracing::info!(%command, "running build command");
        let status = shell(command).current_dir(project_path).status()?;
        if status.success() {
            Ok(())
        } else {
            Err(BuildError::CommandFailed {
                command: command.clone(),
                status: status.to_string(),
            })
        }
    }

    fn build_dir_mod_time(&self, project_path: &Path) -> Option<Timestamp> {
        let build_dir = ProjectLayout::new(project_path).build_dir();
        build_dir.is_dir().then(|| newest_mod_time(&build_dir))
    }

    fn package(&self, project_path: &Path) -> Result<Vec<u8>, BuildError> {
        let package = ProjectLayout::new(project_path).package_path();
        if !package.is_file() {
            return Err(BuildError::PackageMissing(package));
        }
        Ok(fs::read(&package)?)
    }
}
