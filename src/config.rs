//! Device configuration.
//!
//! Every field has a default, so a missing file is not an error. Example:
//!
//! ```toml
//! poll_interval_ms = 50
//! animation_frames = 7
//! row_pins = [16, 20, 21, 5]
//! col_pins = [6, 13, 19, 26]
//! i2c_bus = "/dev/i2c-1"
//! i2c_address = 60
//! ```

use crate::coordinator::Timing;
use crate::display::AnimationTiming;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Keypad rows and columns on the matrix.
pub const MATRIX_LINES: usize = 4;

/// Timing and wiring of the device.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// How long the welcome screen stays up.
    #[serde(default = "default_welcome_delay_ms")]
    welcome_delay_ms: u64,

    /// Minimum time between keypad polls.
    #[serde(default = "default_poll_interval_ms")]
    poll_interval_ms: u64,

    /// Blink frames in the win animation.
    #[serde(default = "default_animation_frames")]
    animation_frames: usize,

    /// Pause after each blink frame.
    #[serde(default = "default_animation_delay_ms")]
    animation_delay_ms: u64,

    /// Settle time after driving a keypad row.
    #[serde(default = "default_scan_settle_ms")]
    scan_settle_ms: u64,

    /// BCM pins driving keypad rows, top to bottom.
    #[serde(default = "default_row_pins")]
    row_pins: Vec<u32>,

    /// BCM pins sensing keypad columns, left to right.
    #[serde(default = "default_col_pins")]
    col_pins: Vec<u32>,

    /// I2C bus device of the OLED panel.
    #[serde(default = "default_i2c_bus")]
    i2c_bus: PathBuf,

    /// 7-bit I2C address of the OLED controller.
    #[serde(default = "default_i2c_address")]
    i2c_address: u16,
}

#[instrument]
fn default_welcome_delay_ms() -> u64 {
    2000
}

#[instrument]
fn default_poll_interval_ms() -> u64 {
    100
}

#[instrument]
fn default_animation_frames() -> usize {
    5
}

#[instrument]
fn default_animation_delay_ms() -> u64 {
    300
}

#[instrument]
fn default_scan_settle_ms() -> u64 {
    10
}

#[instrument]
fn default_row_pins() -> Vec<u32> {
    vec![16, 20, 21, 5]
}

#[instrument]
fn default_col_pins() -> Vec<u32> {
    vec![6, 13, 19, 26]
}

#[instrument]
fn default_i2c_bus() -> PathBuf {
    PathBuf::from("/dev/i2c-1")
}

#[instrument]
fn default_i2c_address() -> u16 {
    crate::display::SSD1306_ADDRESS
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            welcome_delay_ms: default_welcome_delay_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            animation_frames: default_animation_frames(),
            animation_delay_ms: default_animation_delay_ms(),
            scan_settle_ms: default_scan_settle_ms(),
            row_pins: default_row_pins(),
            col_pins: default_col_pins(),
            i2c_bus: default_i2c_bus(),
            i2c_address: default_i2c_address(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::new("poll_interval_ms must be positive".to_string()));
        }
        for (name, pins) in [("row_pins", &self.row_pins), ("col_pins", &self.col_pins)] {
            if pins.len() != MATRIX_LINES {
                return Err(ConfigError::new(format!(
                    "{name} must list {MATRIX_LINES} pins, got {}",
                    pins.len()
                )));
            }
        }
        if self.i2c_address > 0x7F {
            return Err(ConfigError::new(format!(
                "i2c_address must be a 7-bit address, got {:#x}",
                self.i2c_address
            )));
        }
        Ok(())
    }

    /// Session delays for the coordinator.
    pub fn timing(&self) -> Timing {
        Timing {
            welcome_delay: Duration::from_millis(self.welcome_delay_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }

    /// Win animation pacing for the panel.
    pub fn animation(&self) -> AnimationTiming {
        AnimationTiming {
            frames: self.animation_frames,
            delay: Duration::from_millis(self.animation_delay_ms),
        }
    }

    /// Keypad row settle time.
    pub fn scan_settle(&self) -> Duration {
        Duration::from_millis(self.scan_settle_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.timing(), Timing::default());
        assert_eq!(config.animation(), AnimationTiming::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let file = write_config("poll_interval_ms = 50\nanimation_frames = 7\n");
        let config = GameConfig::load(file.path()).unwrap();

        assert_eq!(*config.poll_interval_ms(), 50);
        assert_eq!(config.animation().frames, 7);
        assert_eq!(*config.welcome_delay_ms(), 2000);
        assert_eq!(config.row_pins(), &vec![16, 20, 21, 5]);
        assert_eq!(config.i2c_bus(), &PathBuf::from("/dev/i2c-1"));
        assert_eq!(*config.i2c_address(), 0x3C);
    }

    #[test]
    fn test_ten_bit_address_rejected() {
        let file = write_config("i2c_address = 300\n");
        let err = GameConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.contains("i2c_address"));
    }

    #[test]
    fn test_wrong_pin_count_rejected() {
        let file = write_config("row_pins = [1, 2, 3]\n");
        let err = GameConfig::load(file.path()).unwrap_err();
        assert!(err.message.contains("row_pins"));
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let file = write_config("poll_interval_ms = 0\n");
        assert!(GameConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_malformed_file_reports_parse_error() {
        let file = write_config("poll_interval_ms = \"fast\"\n");
        let err = GameConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
    }
}
