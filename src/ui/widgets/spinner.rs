use crate::ui::primitives::icon::Icon;

const SPINNER_FRAMES_BRAILLE: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const SPINNER_FRAMES_ASCII: &[char] = &['-', '\\', '|', '/'];

/// One spinner line, advanced once per poll attempt
#[derive(Debug, Clone)]
pub struct Spinner {
    current: usize,
    message: String,
}

impl Spinner {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            current: 0,
            message: message.into(),
        }
    }

    pub fn tick(&mut self) {
        self.current = self.current.wrapping_add(1);
    }

    pub fn render(&self, supports_unicode: bool) -> String {
        let frames = if supports_unicode {
            SPINNER_FRAMES_BRAILLE
        } else {
            SPINNER_FRAMES_ASCII
        };
        let frame = frames[self.current % frames.len()];
        format!("{} {}", frame, self.message)
    }

    pub fn succeed(&self, message: &str, supports_color: bool, supports_unicode: bool) -> String {
        format!(
            "{} {}",
            Icon::Success.colored(supports_color, supports_unicode),
            message
        )
    }

    pub fn fail(&self, message: &str, supports_color: bool, supports_unicode: bool) -> String {
        format!(
            "{} {}",
            Icon::Error.colored(supports_color, supports_unicode),
            message
        )
    }
}
