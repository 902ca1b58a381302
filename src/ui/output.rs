use std::path::Path;

use backsync::config::ConfigWarning;

use crate::ui::primitives::icon::Icon;

pub fn print_config_warnings(path: &Path, warnings: &[ConfigWarning], unicode: bool) {
    for line in render_config_warnings(path, warnings, unicode) {
        eprintln!("{}", line);
    }
}

fn render_config_warnings(path: &Path, warnings: &[ConfigWarning], unicode: bool) -> Vec<String> {
    let icon = Icon::Warning.render(unicode);
    let mut lines = Vec::new();
    for w in warnings {
        match w.line {
            Some(line) => lines.push(format!(
                "{} Unknown config key '{}' in {}:{}",
                icon,
                w.key,
                path.display(),
                line
            )),
            None => lines.push(format!(
                "{} Unknown config key '{}' in {}",
                icon,
                w.key,
                path.display()
            )),
        }

        if let Some(suggestion) = &w.suggestion {
            lines.push(format!("   Did you mean '{}'?", suggestion));
        }
    }
    lines
}
