//! Prompter port - interactive yes/no questions

/// Asks the user to confirm something
pub trait Prompter {
    /// Ask `prompt`; `default` is what a bare Enter answers
    fn confirm(&self, prompt: &str, default: bool) -> bool;
}

/// Answers every question with its default.
///
/// Use this when stdin is not a terminal.
pub struct DefaultAnswerPrompter;

impl Prompter for DefaultAnswerPrompter {
    fn confirm(&self, _prompt: &str, default: bool) -> bool {
        default
    }
}

/// Answers every question with "yes".
///
/// Use this when `--yes` flag is passed.
pub struct YesPrompter;

impl Prompter for YesPrompter {
    fn confirm(&self, _prompt: &str, _default: bool) -> bool {
        true
    }
}
