//! Terminal user interface
//!
//! - [`app`] - key handling over the journal form
//! - [`state`] - focus, overlays and messages
//! - [`views`] - rendering
//! - [`theme`] - light and dark palettes
//! - [`events`] - terminal input and ticks
//! - [`runner`] - the event loop

pub mod app;
pub mod events;
pub mod runner;
pub mod state;
pub mod theme;
pub mod views;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use eyre::{Context, Result};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, warn};

pub use app::App;
pub use runner::TuiRunner;
pub use theme::Theme;

/// Terminal type used by the runner
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Put the terminal into raw mode on the alternate screen
pub fn init() -> Result<Tui> {
    debug!("tui::init: called");
    enable_raw_mode().context("Failed to enable raw mode")?;
    execute!(io::stdout(), EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let terminal = Terminal::new(CrosstermBackend::new(io::stdout())).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Give the terminal back to the shell
pub fn restore() -> Result<()> {
    debug!("tui::restore: called");
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show)
        .context("Failed to leave alternate screen")?;
    Ok(())
}

/// Restores the terminal on every exit path, including panics and `?`
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = restore() {
            warn!(error = %e, "Failed to restore terminal");
        }
    }
}

/// Run the journal editor until the user leaves
pub async fn run(app: App, tick_rate: Duration) -> Result<()> {
    let terminal = init()?;
    let _guard = TerminalGuard;
    let mut runner = TuiRunner::new(terminal, app, tick_rate);
    runner.run().await
}
