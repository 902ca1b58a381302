use backsync::BacksyncError;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn format_error(err: &anyhow::Error, color: bool, unicode: bool) -> String {
    let mut out = format!(
        "{} {}\n",
        Icon::Error.colored(color, unicode),
        ColoredText::error(&err.to_string()).render(color)
    );

    if let Some(hint) = err.downcast_ref::<BacksyncError>().and_then(fix_hint) {
        out.push_str(&format!("  {}\n", ColoredText::dim(hint).render(color)));
    }
    out
}

fn fix_hint(err: &BacksyncError) -> Option<&'static str> {
    match err {
        BacksyncError::InvalidConfig { .. } => Some("Fix the TOML syntax and try again."),
        BacksyncError::AlreadyInitialized { .. } => {
            Some("Remove .backsync/project-info.json to start over.")
        }
        _ => None,
    }
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let _ = crate::ui::json::emit(serde_json::json!({
            "event": "error",
            "message": err.to_string(),
        }));
        return;
    }

    let caps = crate::ui::terminal::detect_capabilities();
    eprint!(
        "{}",
        format_error(err, caps.supports_color && !caps.is_ci, caps.supports_unicode)
    );
}
