//! Terminal preview of the panel using half-block characters.

use super::{DisplayError, FrameSink, Framebuffer};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use std::io::{self, Stdout};
use tracing::{info, instrument, warn};

/// Shows frames in the terminal, two pixel rows per text row.
pub struct TerminalPanel {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalPanel {
    /// Switches the terminal to the alternate screen.
    ///
    /// The line discipline is left alone, so Ctrl+C still raises SIGINT
    /// unless a [`TerminalKeypad`](crate::keypad::TerminalKeypad) takes the
    /// keyboard. Fails when stdout is not a terminal.
    #[instrument]
    pub fn open() -> Result<Self, DisplayError> {
        let mut stdout = io::stdout();
        if !stdout.is_tty() {
            return Err(DisplayError::new("stdout is not a terminal"));
        }

        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        info!("Terminal panel ready");
        Ok(Self { terminal })
    }
}

/// Text rows for `frame`: `█` both pixels lit, `▀` top only, `▄` bottom
/// only, space for neither.
pub(crate) fn frame_rows(frame: &Framebuffer) -> Vec<String> {
    (0..Framebuffer::HEIGHT)
        .step_by(2)
        .map(|y| {
            (0..Framebuffer::WIDTH)
                .map(|x| match (frame.pixel(x, y), frame.pixel(x, y + 1)) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                })
                .collect()
        })
        .collect()
}

impl FrameSink for TerminalPanel {
    fn present(&mut self, frame: &Framebuffer) -> Result<(), DisplayError> {
        let lines: Vec<Line<'static>> = frame_rows(frame).into_iter().map(Line::from).collect();

        self.terminal.draw(|f| {
            let [panel] = Layout::vertical([Constraint::Length(Framebuffer::HEIGHT as u16 / 2 + 2)])
                .areas(f.area());
            let [panel] = Layout::horizontal([Constraint::Length(Framebuffer::WIDTH as u16 + 2)])
                .areas(panel);
            let widget = Paragraph::new(lines)
                .style(Style::default().fg(Color::Cyan))
                .block(Block::default().borders(Borders::ALL).title("Tic-Tac-Toe"));
            f.render_widget(widget, panel);
        })?;
        Ok(())
    }
}

impl Drop for TerminalPanel {
    fn drop(&mut self) {
        if let Err(e) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen) {
            warn!(error = %e, "Failed to leave alternate screen");
        }
        if let Err(e) = self.terminal.show_cursor() {
            warn!(error = %e, "Failed to restore cursor");
        }
    }
}
