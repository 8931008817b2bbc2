use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::ui::{install_panic_hook, TerminalGuard, WizardResult, WizardScreen};

pub struct App {
    config: Config,
    wizard: WizardScreen,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let size_chart = match config.load_size_chart() {
            Ok(chart) => chart,
            Err(err) => {
                tracing::warn!(error = %err, "Size chart unavailable");
                None
            }
        };
        let wizard = WizardScreen::new(&config, size_chart);

        Ok(Self {
            config,
            wizard,
            should_quit: false,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        install_panic_hook();
        let guard = TerminalGuard::new().context("failed to prepare terminal")?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        let tick_rate = Duration::from_millis(self.config.ui.tick_rate_ms);
        tracing::info!(event = %self.config.event.name, "Registration wizard started");

        while !self.should_quit {
            terminal.draw(|f| self.wizard.render(f))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press
                        && self.wizard.handle_key(key) == WizardResult::Quit
                    {
                        self.should_quit = true;
                    }
                }
            }

            self.wizard.tick(Instant::now());
        }

        guard.restore();
        terminal.show_cursor()?;
        tracing::info!("Registration wizard closed");
        Ok(())
    }
}
