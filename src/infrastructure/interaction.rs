//! Terminal prompts and the system browser

use std::process::{Command, Stdio};

use dialoguer::Confirm;

use crate::domain::ports::{ConsoleOpener, Prompter};

/// Yes/no prompts on the terminal.
///
/// Falls back to the default answer when the terminal cannot be read.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn confirm(&self, prompt: &str, default: bool) -> bool {
        let mut chars = prompt.chars();
        let prompt: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        match Confirm::new()
            .with_prompt(format!("{}?", prompt))
            .default(default)
            .interact()
        {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!(%err, default, "prompt failed, using default answer");
                default
            }
        }
    }
}

/// Opens URLs with the platform's default handler
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl SystemOpener {
    fn command(url: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        } else if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

impl ConsoleOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<(), String> {
        Self::command(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
