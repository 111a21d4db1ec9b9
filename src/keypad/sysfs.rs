//! Keypad lines over the Linux sysfs GPIO interface.

use super::{KeypadError, MatrixPins};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Default sysfs GPIO root.
pub const SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";

/// Matrix lines exported through `/sys/class/gpio`.
///
/// Rows are configured as outputs, columns as inputs; the columns need
/// external pull-down resistors. Pins exported by this driver are
/// unexported again on [`MatrixPins::release`] or drop.
#[derive(Debug)]
pub struct SysfsPins {
    root: PathBuf,
    rows: Vec<u32>,
    cols: Vec<u32>,
    exported: Vec<u32>,
}

impl SysfsPins {
    /// Exports and configures the given BCM pins under the default root.
    pub fn open(rows: &[u32], cols: &[u32]) -> Result<Self, KeypadError> {
        Self::open_at(SYSFS_GPIO_ROOT, rows, cols)
    }

    /// Exports and configures the given pins under `root`.
    #[instrument(skip(root), fields(root = %root.as_ref().display()))]
    pub fn open_at(
        root: impl AsRef<Path>,
        rows: &[u32],
        cols: &[u32],
    ) -> Result<Self, KeypadError> {
        let mut pins = Self {
            root: root.as_ref().to_path_buf(),
            rows: rows.to_vec(),
            cols: cols.to_vec(),
            exported: Vec::new(),
        };

        // On failure `pins` drops here and unexports whatever was exported.
        for &pin in rows {
            pins.export(pin)?;
            pins.write(pin, "direction", "out")?;
            pins.write(pin, "value", "0")?;
        }
        for &pin in cols {
            pins.export(pin)?;
            pins.write(pin, "direction", "in")?;
        }

        info!(?rows, ?cols, "GPIO keypad lines configured");
        Ok(pins)
    }

    fn pin_dir(&self, pin: u32) -> PathBuf {
        self.root.join(format!("gpio{pin}"))
    }

    fn export(&mut self, pin: u32) -> Result<(), KeypadError> {
        if self.pin_dir(pin).exists() {
            debug!(pin, "GPIO already exported");
            return Ok(());
        }
        fs::write(self.root.join("export"), pin.to_string())
            .map_err(|e| gpio_error(pin, "export", e))?;
        self.exported.push(pin);
        Ok(())
    }

    fn write(&self, pin: u32, attribute: &str, value: &str) -> Result<(), KeypadError> {
        fs::write(self.pin_dir(pin).join(attribute), value)
            .map_err(|e| gpio_error(pin, attribute, e))
    }

    fn read_value(&self, pin: u32) -> Result<bool, KeypadError> {
        let raw = fs::read_to_string(self.pin_dir(pin).join("value"))
            .map_err(|e| gpio_error(pin, "value", e))?;
        Ok(raw.trim() == "1")
    }

    fn line(pins: &[u32], index: usize, kind: &str) -> Result<u32, KeypadError> {
        pins.get(index).copied().ok_or_else(|| KeypadError::Gpio {
            pin: u32::MAX,
            message: format!("no {kind} line at index {index}"),
        })
    }
}

fn gpio_error(pin: u32, attribute: &str, err: std::io::Error) -> KeypadError {
    KeypadError::Gpio {
        pin,
        message: format!("{attribute}: {err}"),
    }
}

impl MatrixPins for SysfsPins {
    fn rows(&self) -> usize {
        self.rows.len()
    }

    fn cols(&self) -> usize {
        self.cols.len()
    }

    fn set_row(&mut self, row: usize, high: bool) -> Result<(), KeypadError> {
        let pin = Self::line(&self.rows, row, "row")?;
        self.write(pin, "value", if high { "1" } else { "0" })
    }

    fn is_col_high(&mut self, col: usize) -> Result<bool, KeypadError> {
        let pin = Self::line(&self.cols, col, "column")?;
        self.read_value(pin)
    }

    #[instrument(skip(self))]
    fn release(&mut self) {
        for &pin in &self.rows {
            if let Err(e) = self.write(pin, "value", "0") {
                debug!(pin, error = %e, "Could not drive row low during release");
            }
        }
        for pin in std::mem::take(&mut self.exported) {
            match fs::write(self.root.join("unexport"), pin.to_string()) {
                Ok(()) => debug!(pin, "GPIO unexported"),
                Err(e) => warn!(pin, error = %e, "Failed to unexport GPIO"),
            }
        }
    }
}

impl Drop for SysfsPins {
    fn drop(&mut self) {
        MatrixPins::release(self);
    }
}
