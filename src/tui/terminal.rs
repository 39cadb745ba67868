use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use crossterm::execute;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, IsTerminal};

pub type Screen = Terminal<CrosstermBackend<io::Stdout>>;

const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 8;

pub fn check_tui_support() -> Result<()> {
    if !io::stdout().is_terminal() {
        return Err(msg_error_anyhow!(Message::TerminalNotSupported("stdout is not a terminal".to_string())));
    }
    let (width, height) = terminal::size()?;
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        let reason = format!("terminal too small ({}x{}), need at least {}x{}", width, height, MIN_WIDTH, MIN_HEIGHT);
        return Err(msg_error_anyhow!(Message::TerminalNotSupported(reason)));
    }
    Ok(())
}

pub fn setup_terminal() -> Result<Screen> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

pub fn restore_terminal(screen: &mut Screen) {
    let _ = disable_raw_mode();
    let _ = execute!(screen.backend_mut(), terminal::LeaveAlternateScreen);
    let _ = screen.show_cursor();
}
