use std::io::{self, Stdout, stdout};

use crossterm::{
    cursor::Show,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::error::Result;

pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Switches to the alternate screen in raw mode.
///
/// A panic hook puts the terminal back first so the panic message is
/// readable.
pub fn setup_terminal() -> Result<AppTerminal> {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = leave_screen(&mut stdout());
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut out = stdout();
    crossterm::execute!(out, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(out))?)
}

pub fn restore_terminal(terminal: &mut AppTerminal) -> Result<()> {
    leave_screen(terminal.backend_mut())?;
    Ok(())
}

fn leave_screen(out: &mut impl io::Write) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(out, LeaveAlternateScreen, Show)
}
