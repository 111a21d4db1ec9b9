//! Keypad input sources.
//!
//! Every source implements [`KeySource`]: one non-blocking read of the
//! currently pressed key per poll. Wrap a raw source in [`Debounced`] so a
//! held key produces a single event.

mod debounce;
mod matrix;
mod sysfs;
mod terminal;

pub use debounce::Debounced;
pub use matrix::{MatrixKeypad, MatrixPins};
pub use sysfs::SysfsPins;
pub use terminal::TerminalKeypad;

use derive_more::{Display, Error, From};
use keypad_tictactoe_core::KeyCoord;

/// Which input source to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputKind {
    /// Keyboard emulation of the keypad legend in the current terminal.
    Terminal,
    /// Physical 4x4 matrix wired to sysfs GPIO lines.
    Gpio,
}

/// A source of physical key presses.
#[async_trait::async_trait]
pub trait KeySource: Send {
    /// Reads the key currently pressed, or `None` when no key is down.
    async fn read_key(&mut self) -> Result<Option<KeyCoord>, KeypadError>;

    /// Releases any hardware held by the source. Safe to call twice.
    fn release(&mut self) {}
}

/// Keypad failure.
#[derive(Debug, Display, Error, From)]
pub enum KeypadError {
    /// The user asked to stop (Ctrl+C on the terminal keypad).
    #[display("keypad input interrupted")]
    Interrupted,

    /// Terminal or device I/O failed.
    #[display("keypad I/O error: {_0}")]
    #[from]
    Io(#[error(source)] std::io::Error),

    /// A GPIO line could not be configured or read.
    #[display("GPIO {pin}: {message}")]
    Gpio {
        /// BCM pin number.
        pin: u32,
        /// What went wrong.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_io_error_converts_and_keeps_source() {
        let err: KeypadError = std::io::Error::other("bus fault").into();
        assert!(matches!(err, KeypadError::Io(_)));
        assert_eq!(err.to_string(), "keypad I/O error: bus fault");
        assert!(err.source().is_some());
    }
}
