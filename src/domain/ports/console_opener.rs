//! ConsoleOpener port - opens the remote web console

pub trait ConsoleOpener {
    /// Open `url` for the user; failures are reported, never fatal
    fn open(&self, url: &str) -> Result<(), String>;
}

/// Opener that does nothing (non-interactive runs)
pub struct NoopOpener;

impl ConsoleOpener for NoopOpener {
    fn open(&self, _url: &str) -> Result<(), String> {
        Ok(())
    }
}
