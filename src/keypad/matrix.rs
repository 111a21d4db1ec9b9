//! Row-scanning driver for a 4x4 membrane keypad.

use super::{KeySource, KeypadError};
use keypad_tictactoe_core::KeyCoord;
use std::time::Duration;
use tracing::{debug, instrument};

/// Electrical access to the keypad matrix: driven rows, sensed columns.
pub trait MatrixPins: Send {
    /// Number of row lines.
    fn rows(&self) -> usize;

    /// Number of column lines.
    fn cols(&self) -> usize;

    /// Drives a row line high or low.
    fn set_row(&mut self, row: usize, high: bool) -> Result<(), KeypadError>;

    /// Samples a column line.
    fn is_col_high(&mut self, col: usize) -> Result<bool, KeypadError>;

    /// Returns the lines to the system.
    fn release(&mut self) {}
}

/// Scans a key matrix one row at a time.
///
/// Each row is driven high, given `settle` to propagate, sampled, then
/// driven low again, so at most one row is high at any moment.
pub struct MatrixKeypad<P> {
    pins: P,
    settle: Duration,
}

impl<P: MatrixPins> MatrixKeypad<P> {
    /// Creates a scanner over `pins`.
    pub fn new(pins: P, settle: Duration) -> Self {
        Self { pins, settle }
    }

    /// Borrows the pin driver.
    pub fn pins(&self) -> &P {
        &self.pins
    }

    fn first_high_col(&mut self) -> Result<Option<usize>, KeypadError> {
        for col in 0..self.pins.cols() {
            if self.pins.is_col_high(col)? {
                return Ok(Some(col));
            }
        }
        Ok(None)
    }
}

#[async_trait::async_trait]
impl<P: MatrixPins> KeySource for MatrixKeypad<P> {
    #[instrument(skip(self))]
    async fn read_key(&mut self) -> Result<Option<KeyCoord>, KeypadError> {
        for row in 0..self.pins.rows() {
            self.pins.set_row(row, true)?;
            tokio::time::sleep(self.settle).await;
            let hit = self.first_high_col();
            self.pins.set_row(row, false)?;

            if let Some(col) = hit? {
                debug!(row, col, "Key pressed");
                return Ok(Some(KeyCoord::new(row, col)));
            }
        }
        Ok(None)
    }

    fn release(&mut self) {
        self.pins.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Simulated matrix: a pressed key connects its row to its column.
    #[derive(Default)]
    struct FakePins {
        pressed: Vec<(usize, usize)>,
        rows_high: [bool; 4],
        max_rows_high: usize,
        released: bool,
    }

    impl MatrixPins for FakePins {
        fn rows(&self) -> usize {
            4
        }

        fn cols(&self) -> usize {
            4
        }

        fn set_row(&mut self, row: usize, high: bool) -> Result<(), KeypadError> {
            self.rows_high[row] = high;
            let count = self.rows_high.iter().filter(|h| **h).count();
            self.max_rows_high = self.max_rows_high.max(count);
            Ok(())
        }

        fn is_col_high(&mut self, col: usize) -> Result<bool, KeypadError> {
            Ok(self
                .pressed
                .iter()
                .any(|&(r, c)| c == col && self.rows_high[r]))
        }

        fn release(&mut self) {
            self.released = true;
        }
    }

    fn keypad(pressed: &[(usize, usize)]) -> MatrixKeypad<FakePins> {
        let pins = FakePins {
            pressed: pressed.to_vec(),
            ..FakePins::default()
        };
        MatrixKeypad::new(pins, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_no_key_pressed() {
        let mut keys = keypad(&[]);
        assert_eq!(keys.read_key().await.unwrap(), None);
        assert!(keys.pins().rows_high.iter().all(|h| !h));
    }

    #[tokio::test]
    async fn test_reports_pressed_key() {
        let mut keys = keypad(&[(3, 2)]);
        assert_eq!(keys.read_key().await.unwrap(), Some(KeyCoord::new(3, 2)));
        assert!(keys.pins().rows_high.iter().all(|h| !h));
        assert_eq!(keys.pins().max_rows_high, 1);
    }

    #[tokio::test]
    async fn test_first_key_in_row_major_order_wins() {
        let mut keys = keypad(&[(2, 0), (1, 3), (1, 1)]);
        assert_eq!(keys.read_key().await.unwrap(), Some(KeyCoord::new(1, 1)));
    }

    #[tokio::test]
    async fn test_release_forwards_to_pins() {
        let mut keys = keypad(&[]);
        KeySource::release(&mut keys);
        assert!(keys.pins().released);
    }
}
