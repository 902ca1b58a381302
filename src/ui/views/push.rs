//! Push command UI views
//!
//! Human-readable rendering of push events, plus the console event sink that
//! writes them to stderr as they happen.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::spinner::Spinner;
use backsync::domain::ports::{PushEvent, PushEventSink};

/// Render one event for the console
pub fn render_push_event(event: &PushEvent, color: bool, unicode: bool) -> String {
    match event {
        PushEvent::Started { project, backend } => {
            let target = if backend.is_empty() {
                ColoredText::dim("no backend yet").render(color)
            } else {
                ColoredText::info(backend).render(color)
            };
            format!(
                "{} Pushing {} {} {}",
                Icon::Push.colored(color, unicode),
                ColoredText::info(project).bold().render(color),
                Icon::Arrow.render(unicode),
                target
            )
        }
        PushEvent::BackendUnknown => format!(
            "{} No backend project is linked to this project",
            Icon::Warning.colored(color, unicode)
        ),
        PushEvent::BackendCreated { id, name } => format!(
            "{} Created backend project {} ({})",
            Icon::Success.colored(color, unicode),
            name,
            ColoredText::dim(id).render(color)
        ),
        PushEvent::RemoteAhead { console_url } => {
            let mut line = format!(
                "{} The backend project was modified after your last pull",
                Icon::Warning.colored(color, unicode)
            );
            if !console_url.is_empty() {
                line.push_str(&format!(
                    "\n  {} {}",
                    Icon::Remote.render(unicode),
                    ColoredText::dim(console_url).render(color)
                ));
            }
            line
        }
        PushEvent::ForcedPush => format!(
            "{} Pushing over remote changes",
            Icon::Warning.colored(color, unicode)
        ),
        PushEvent::Built => format!(
            "{} Backend built",
            Icon::Success.colored(color, unicode)
        ),
        PushEvent::UpToDate => format!(
            "{} No local backend changes detected since last push",
            Icon::Success.colored(color, unicode)
        ),
        PushEvent::HooksStarted { count } => format!(
            "{} Running {} pre-update hook{}",
            Icon::Progress.colored(color, unicode),
            count,
            if *count == 1 { "" } else { "s" }
        ),
        PushEvent::HookFinished {
            feature,
            error: None,
        } => format!("  {} {}", Icon::Success.colored(color, unicode), feature),
        PushEvent::HookFinished {
            feature,
            error: Some(error),
        } => format!(
            "  {} {}: {}",
            Icon::Error.colored(color, unicode),
            feature,
            ColoredText::error(error).render(color)
        ),
        PushEvent::Submitting {
            backend,
            bytes,
            digest,
        } => format!(
            "{} Uploading {} bytes to {} {}",
            Icon::Progress.colored(color, unicode),
            bytes,
            backend,
            ColoredText::dim(short_digest(digest)).render(color)
        ),
        PushEvent::Submitted { waiting: true } => format!(
            "{} Update accepted, waiting for provisioning",
            Icon::Success.colored(color, unicode)
        ),
        PushEvent::Submitted { waiting: false } => format!(
            "{} Update accepted (not waiting for provisioning)",
            Icon::Success.colored(color, unicode)
        ),
        PushEvent::SubmissionFailed { error } => format!(
            "{} Upload failed: {}",
            Icon::Error.colored(color, unicode),
            ColoredText::error(error).render(color)
        ),
        PushEvent::PollProgress { attempt, status } => {
            let mut spinner = Spinner::new(format!("[{}] {}", attempt, status));
            for _ in 1..*attempt {
                spinner.tick();
            }
            spinner.render(unicode)
        }
        PushEvent::PollFinished { status, code } => {
            let status = status.as_deref().unwrap_or("no status");
            if *code == 1 {
                Spinner::new("").succeed(status, color, unicode)
            } else {
                Spinner::new("").fail(&format!("{} (code {})", status, code), color, unicode)
            }
        }
        PushEvent::Completed { success, message } => {
            let text = if *success {
                ColoredText::success(message).bold()
            } else {
                ColoredText::error(message).bold()
            };
            let icon = if *success { Icon::Success } else { Icon::Error };
            format!("{} {}", icon.colored(color, unicode), text.render(color))
        }
    }
}

/// Events still printed with `verbosity = "quiet"`
fn shown_when_quiet(event: &PushEvent) -> bool {
    match event {
        PushEvent::RemoteAhead { .. }
        | PushEvent::SubmissionFailed { .. }
        | PushEvent::Completed { .. } => true,
        PushEvent::HookFinished { error, .. } => error.is_some(),
        PushEvent::PollFinished { code, .. } => *code != 1,
        _ => false,
    }
}

fn short_digest(digest: &str) -> &str {
    let hex = digest.strip_prefix("sha256:").unwrap_or(digest);
    &hex[..hex.len().min(12)]
}

/// Writes rendered events to stderr.
///
/// On a terminal, consecutive poll progress lines overwrite each other.
pub struct ConsoleEventSink {
    ui: UiContext,
    progress_open: Mutex<bool>,
}

impl ConsoleEventSink {
    pub fn new(ui: UiContext) -> Self {
        Self {
            ui,
            progress_open: Mutex::new(false),
        }
    }
}

impl PushEventSink for ConsoleEventSink {
    fn on_event(&self, event: PushEvent) {
        if self.ui.quiet && !shown_when_quiet(&event) {
            return;
        }
        let line = render_push_event(&event, self.ui.color, self.ui.unicode);
        let Ok(mut progress_open) = self.progress_open.lock() else {
            return;
        };
        let mut err = io::stderr().lock();

        let is_progress = matches!(event, PushEvent::PollProgress { .. });
        if is_progress && self.ui.caps.is_tty {
            let _ = write!(
                err,
                "\r{}{}",
                crossterm::terminal::Clear(crossterm::terminal::ClearType::CurrentLine),
                line
            );
            *progress_open = true;
        } else {
            if *progress_open {
                let _ = write!(
                    err,
                    "\r{}",
                    crossterm::terminal::Clear(crossterm::terminal::ClearType::CurrentLine)
                );
                *progress_open = false;
            }
            let _ = writeln!(err, "{}", line);
        }
        let _ = err.flush();
    }
}
