//! Output sinks: where the game state is shown.
//!
//! - [`ConsoleDisplay`]: plain text dump, always available
//! - [`PanelDisplay`]: 128x64 monochrome frames pushed to a [`FrameSink`]
//! - [`Ssd1306`]: a [`FrameSink`] driving the OLED controller over I2C
//! - [`TerminalPanel`]: a [`FrameSink`] that previews frames in the terminal

mod console;
mod font;
mod framebuffer;
mod panel;
mod ssd1306;
mod terminal;

pub use console::ConsoleDisplay;
pub use framebuffer::Framebuffer;
pub use panel::{AnimationTiming, FrameSink, PanelDisplay};
pub use ssd1306::{I2cBus, I2cDevBus, SSD1306_ADDRESS, Ssd1306};
pub use terminal::TerminalPanel;

use crate::config::GameConfig;
use derive_more::{Display, Error};
use keypad_tictactoe_core::{Board, Line};
use std::io::Write;
use tracing::{info, instrument, warn};

/// Which output sink to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DisplayKind {
    /// Monochrome panel, previewed in the terminal.
    Panel,
    /// SSD1306 OLED on the configured I2C bus.
    Oled,
    /// Text dump on stdout.
    Console,
}

/// Consumer of game state updates.
#[async_trait::async_trait]
pub trait OutputSink: Send {
    /// Shows the title and the keypad controls.
    async fn render_welcome_message(&mut self) -> Result<(), DisplayError>;

    /// Shows the board and status line.
    async fn render_idle_state(&mut self, board: &Board, status: &str) -> Result<(), DisplayError>;

    /// Shows a won game, highlighting the winning line.
    async fn render_win_animation(
        &mut self,
        board: &Board,
        status: &str,
        line: &Line,
    ) -> Result<(), DisplayError>;
}

/// Display error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Display error: {} at {}:{}", message, file, line)]
pub struct DisplayError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DisplayError {
    /// Creates a new display error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for DisplayError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {err}"))
    }
}

/// Opens the requested sink, degrading to console output on stdout when
/// the panel cannot be brought up.
pub fn create_display(kind: DisplayKind, config: &GameConfig) -> Box<dyn OutputSink> {
    create_display_with_fallback(kind, config, ConsoleDisplay::stdout())
}

/// Opens the requested sink, using `console` for console output and as the
/// fallback when the panel cannot be brought up.
#[instrument(skip(config, console))]
pub fn create_display_with_fallback<W>(
    kind: DisplayKind,
    config: &GameConfig,
    console: ConsoleDisplay<W>,
) -> Box<dyn OutputSink>
where
    W: Write + Send + 'static,
{
    let animation = config.animation();
    let opened = match kind {
        DisplayKind::Console => {
            info!("Using console output");
            return Box::new(console);
        }
        DisplayKind::Panel => TerminalPanel::open()
            .map(|panel| Box::new(PanelDisplay::new(panel, animation)) as Box<dyn OutputSink>),
        DisplayKind::Oled => Ssd1306::open(config.i2c_bus(), *config.i2c_address())
            .map(|oled| Box::new(PanelDisplay::new(oled, animation)) as Box<dyn OutputSink>),
    };

    match opened {
        Ok(sink) => {
            info!(?kind, "Using panel output");
            sink
        }
        Err(e) => {
            warn!(error = %e, ?kind, "Panel unavailable, falling back to console output");
            Box::new(console)
        }
    }
}
