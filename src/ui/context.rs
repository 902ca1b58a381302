use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};
use backsync::config::{ColorMode, Config, Verbosity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub verbose: u8,
    /// Only problems and the final verdict
    pub quiet: bool,
    pub caps: TerminalCapabilities,
    pub color: bool,
    pub unicode: bool,
}

impl UiContext {
    pub fn new(json: bool, verbose: u8, config: &Config) -> Self {
        Self::from_caps(json, verbose, config, detect_capabilities())
    }

    pub(crate) fn from_caps(
        json: bool,
        verbose: u8,
        config: &Config,
        caps: TerminalCapabilities,
    ) -> Self {
        let unicode = config.output.unicode && caps.supports_unicode;
        let color = match config.output.color {
            ColorMode::Never => false,
            ColorMode::Always => true,
            ColorMode::Auto => caps.supports_color && !caps.is_ci,
        };

        let configured = match config.output.verbosity {
            Verbosity::Quiet | Verbosity::Normal => 0,
            Verbosity::Verbose => 1,
            Verbosity::Debug => 2,
        };
        let quiet = verbose == 0 && config.output.verbosity == Verbosity::Quiet;

        Self {
            json,
            verbose: verbose.max(configured),
            quiet,
            caps,
            color,
            unicode,
        }
    }
}
