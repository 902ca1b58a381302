//! Status command UI view

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use backsync::application::StatusReport;

pub fn render_status(report: &StatusReport, color: bool, unicode: bool) -> String {
    let state = &report.state;
    let mut out = String::new();

    out.push_str(&format!(
        "{} {}\n",
        Icon::Push.colored(color, unicode),
        ColoredText::info(&state.project_name).bold().render(color)
    ));

    let backend = if report.has_backend() {
        format!("{} ({})", state.backend_display_name(), state.backend_project_id)
    } else {
        ColoredText::dim("none").render(color)
    };
    out.push_str(&format!("  Backend:       {}\n", backend));

    let outcome = if state.last_update_successful {
        ColoredText::success("succeeded")
    } else {
        ColoredText::warning("failed or never pushed")
    };
    out.push_str(&format!(
        "  Last push:     {} ({})\n",
        state.last_update_time,
        outcome.render(color)
    ));
    out.push_str(&format!("  Remote as of:  {}\n", state.remote_last_updated));

    let build = report
        .build_dir_mod_time
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "not built".to_string());
    out.push_str(&format!("  Build output:  {}\n", build));

    if !state.enabled_features.is_empty() {
        out.push_str(&format!(
            "  Features:      {}\n",
            state.enabled_features.join(", ")
        ));
    }

    let verdict = if report.update_needed {
        format!(
            "{} Local changes are waiting to be pushed",
            Icon::Progress.colored(color, unicode)
        )
    } else {
        format!(
            "{} Up to date",
            Icon::Success.colored(color, unicode)
        )
    };
    out.push('\n');
    out.push_str(&verdict);
    out.push('\n');
    out
}
