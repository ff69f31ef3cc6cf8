pub mod picker_view;

use anyhow::{Context, Result};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

use picker_view::{run_app, App};

pub type Term = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode is switched back off if the screen cannot be set up.
pub fn setup_terminal() -> Result<Term> {
    enable_raw_mode().context("failed to enable raw mode")?;
    undo_on_err(enter_screen(), || {
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        let _ = disable_raw_mode();
    })
}

fn undo_on_err<T>(result: Result<T>, undo: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

fn enter_screen() -> Result<Term> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("failed to create terminal")
}

pub fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}

/// Runs `app` full screen and returns the confirmed text, if any. The
/// terminal is restored even when the loop fails or panics.
pub fn run_interactive(app: &mut App) -> Result<Option<String>> {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, app);
    restore_terminal(&mut terminal)?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::cell::Cell;

    #[test]
    fn test_undo_runs_only_on_failure() {
        let undone = Cell::new(0);
        let ok = undo_on_err(Ok(5), || undone.set(undone.get() + 1));
        assert_eq!(ok.unwrap(), 5);
        assert_eq!(undone.get(), 0);

        let failed: Result<()> = undo_on_err(Err(anyhow!("no tty")), || undone.set(undone.get() + 1));
        assert_eq!(failed.unwrap_err().to_string(), "no tty");
        assert_eq!(undone.get(), 1);
    }
}
