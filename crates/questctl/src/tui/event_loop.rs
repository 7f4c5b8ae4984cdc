//! Event Loop - terminal setup and the draw/poll cycle
//!
//! Single-threaded: each key is fully handled, including the progress write,
//! before the next one is read. The view is pulled from the controller on
//! every redraw.

use super::render::draw_ui;
use super::state::TuiState;
use anyhow::{anyhow, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use quest_common::{ProgressController, Storage};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing::{debug, info};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Run the TUI until the user quits
pub fn run<S: Storage>(controller: &mut ProgressController<S>, emojis: bool) -> Result<()> {
    enable_raw_mode().map_err(|e| {
        anyhow!("Failed to enable raw mode: {}. Ensure you're running in a real terminal (TTY).", e)
    })?;

    let mut stdout = io::stdout();
    undo_on_err(execute!(stdout, EnterAlternateScreen), "Failed to initialize terminal", || {
        let _ = disable_raw_mode();
    })?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = undo_on_err(Terminal::new(backend), "Failed to create terminal", || {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    })?;

    let mut state = TuiState::new(emojis);
    state.focus_next_level(controller);
    info!(selected = state.selected, "tui started");

    let result = run_event_loop(&mut terminal, &mut state, controller);

    // Always attempt cleanup, even when the loop failed
    let cleanup_result = restore_terminal(&mut terminal);

    info!(earned_xp = controller.earned_xp(), "tui stopped");
    result.and(cleanup_result)
}

/// Run `undo` before returning a setup error, so a failed start never leaves
/// the terminal in raw mode
fn undo_on_err<T, E: std::fmt::Display>(
    result: std::result::Result<T, E>,
    what: &str,
    undo: impl FnOnce(),
) -> Result<T> {
    result.map_err(|e| {
        undo();
        anyhow!("{}: {}", what, e)
    })
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_event_loop<S: Storage>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut TuiState,
    controller: &mut ProgressController<S>,
) -> Result<()> {
    loop {
        let view = controller.view();
        terminal.draw(|f| draw_ui(f, state, &view))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                // Windows reports releases too
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    debug!(code = ?key.code, "key");
                    state.handle_key(key, controller);
                }
                _ => {}
            }
        }

        if state.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_undo_runs_only_on_error() {
        let undone = Cell::new(0);

        let ok: std::result::Result<u8, io::Error> = Ok(7);
        assert_eq!(undo_on_err(ok, "setup", || undone.set(undone.get() + 1)).unwrap(), 7);
        assert_eq!(undone.get(), 0);

        let failed: std::result::Result<u8, io::Error> =
            Err(io::Error::new(io::ErrorKind::Other, "no tty"));
        let err = undo_on_err(failed, "Failed to create terminal", || undone.set(undone.get() + 1))
            .unwrap_err();
        assert_eq!(undone.get(), 1);
        assert_eq!(err.to_string(), "Failed to create terminal: no tty");
    }
}
