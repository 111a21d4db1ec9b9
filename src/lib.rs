//! Keypad Tic-Tac-Toe device runtime.
//!
//! Connects the game rules from [`keypad_tictactoe_core`] to hardware:
//!
//! - **Keypad**: a 4x4 matrix scanned over GPIO, or the terminal keyboard
//! - **Display**: a 128x64 SSD1306 OLED, its terminal preview, or plain
//!   console text
//! - **Coordinator**: the polling loop that turns key presses into moves
//!
//! # Example
//!
//! ```no_run
//! use keypad_tictactoe::{
//!     Coordinator, DisplayKind, GameConfig, InputKind, create_display, open_input,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GameConfig::default();
//! let output = create_display(DisplayKind::Console, &config);
//! let input = open_input(InputKind::Terminal, &config)?;
//!
//! let mut coordinator = Coordinator::new(input, output, config.timing());
//! let reason = coordinator.run_session().await;
//! println!("{reason:?}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod coordinator;
pub mod display;
pub mod keypad;

pub use config::{ConfigError, GameConfig};
pub use coordinator::{Coordinator, ExitReason, Timing};
pub use display::{
    AnimationTiming, ConsoleDisplay, DisplayError, DisplayKind, OutputSink, create_display,
    create_display_with_fallback,
};
pub use keypad::{Debounced, InputKind, KeySource, KeypadError};

pub use keypad_tictactoe_core::{
    Action, Board, Coord, GameState, KeyCoord, Line, Outcome, Player, Square, map_key,
};

use keypad::{MatrixKeypad, SysfsPins, TerminalKeypad};
use tracing::{info, instrument};

/// Opens the requested keypad, wrapped so a held key counts once.
#[instrument(skip(config))]
pub fn open_input(kind: InputKind, config: &GameConfig) -> Result<Box<dyn KeySource>, KeypadError> {
    match kind {
        InputKind::Terminal => {
            info!("Using terminal keypad");
            Ok(Box::new(Debounced::new(TerminalKeypad::open()?)))
        }
        InputKind::Gpio => {
            info!(rows = ?config.row_pins(), cols = ?config.col_pins(), "Using GPIO keypad");
            let pins = SysfsPins::open(config.row_pins(), config.col_pins())?;
            Ok(Box::new(Debounced::new(MatrixKeypad::new(
                pins,
                config.scan_settle(),
            ))))
        }
    }
}
