//! Keyboard emulation of the keypad for development machines.

use super::{KeySource, KeypadError};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use keypad_tictactoe_core::KeyCoord;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Reads keypad presses from the terminal keyboard.
///
/// Keys are matched against the printed keypad legend (`1`-`9`, `A`-`D`,
/// `0`, `*`, `#`); everything else is dropped. Ctrl+C surfaces as
/// [`KeypadError::Interrupted`] because raw mode swallows the signal.
pub struct TerminalKeypad {
    raw_mode: bool,
}

impl TerminalKeypad {
    /// Puts the terminal in raw mode and starts reading keys.
    #[instrument]
    pub fn open() -> Result<Self, KeypadError> {
        enable_raw_mode()?;
        info!("Terminal keypad ready");
        Ok(Self { raw_mode: true })
    }
}

#[async_trait::async_trait]
impl KeySource for TerminalKeypad {
    async fn read_key(&mut self) -> Result<Option<KeyCoord>, KeypadError> {
        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                info!("Ctrl+C pressed");
                return Err(KeypadError::Interrupted);
            }
            if let KeyCode::Char(c) = key.code {
                match KeyCoord::from_label(c) {
                    Some(coord) => {
                        debug!(label = %c, %coord, "Key pressed");
                        return Ok(Some(coord));
                    }
                    None => debug!(label = %c, "Key not on keypad"),
                }
            }
        }
        Ok(None)
    }

    fn release(&mut self) {
        if self.raw_mode {
            if let Err(e) = disable_raw_mode() {
                warn!(error = %e, "Failed to leave raw mode");
            }
            self.raw_mode = false;
        }
    }
}

impl Drop for TerminalKeypad {
    fn drop(&mut self) {
        KeySource::release(self);
    }
}
