//! Raw mode and the alternate screen for the lifetime of the wizard.

use anyhow::Result;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Undoes [`TerminalGuard::new`] exactly once: on [`restore`](Self::restore),
/// on drop, or from the panic hook.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        if let Err(err) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }
        Ok(Self { active: true })
    }

    /// Restore now instead of waiting for drop
    pub fn restore(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if std::mem::replace(&mut self.active, false) {
            Self::cleanup();
        }
    }

    /// Best effort; every step runs even if an earlier one fails
    pub fn cleanup() {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        let _ = io::stdout().flush();
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.release();
    }
}

/// Chain a hook that leaves the alternate screen so panic output stays readable
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        TerminalGuard::cleanup();
        previous(info);
    }));
}
