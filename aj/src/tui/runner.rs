//! TUI Runner - main loop that owns the terminal
//!
//! Draws the App, waits for the next terminal event and dispatches it until
//! the App asks to quit. The App (and with it the leave guard) is dropped when
//! the runner finishes.

use std::time::Duration;

use eyre::Result;
use tracing::{debug, info, trace};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views;

/// TUI runner
pub struct TuiRunner {
    app: App,
    terminal: Tui,
    event_handler: EventHandler,
}

impl TuiRunner {
    pub fn new(terminal: Tui, app: App, tick_rate: Duration) -> Self {
        debug!(?tick_rate, "TuiRunner::new: called");
        Self {
            app,
            terminal,
            event_handler: EventHandler::new(tick_rate),
        }
    }

    /// Run until the user leaves
    pub async fn run(&mut self) -> Result<()> {
        info!("TUI started");
        loop {
            self.terminal.draw(|frame| views::render(&self.app, frame))?;

            match self.event_handler.next().await? {
                Event::Tick => {
                    trace!("TuiRunner::run: tick");
                }
                Event::Key(key_event) => {
                    if self.app.handle_key(key_event) {
                        break;
                    }
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "TuiRunner::run: resized");
                }
            }
        }

        info!(
            unsaved = self.app.form().has_unsaved_changes(),
            "TUI exiting"
        );
        Ok(())
    }
}
