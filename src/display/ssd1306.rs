//! SSD1306 128x64 OLED controller on an I2C bus.

use super::{DisplayError, FrameSink, Framebuffer};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Default 7-bit address of SSD1306 breakout boards.
pub const SSD1306_ADDRESS: u16 = 0x3C;

const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;
const DATA_CHUNK: usize = 32;
const DISPLAY_OFF: u8 = 0xAE;

/// Power-up sequence for a 128x64 panel with the internal charge pump.
const INIT_SEQUENCE: &[u8] = &[
    DISPLAY_OFF,
    0xD5, 0x80, // clock divide
    0xA8, 0x3F, // multiplex 64
    0xD3, 0x00, // no display offset
    0x40,       // start line 0
    0x8D, 0x14, // charge pump on
    0x20, 0x00, // horizontal addressing
    0xA1,       // column 127 mapped to SEG0
    0xC8,       // COM scan from the bottom
    0xDA, 0x12, // alternative COM pins
    0x81, 0xCF, // contrast
    0xD9, 0xF1, // pre-charge
    0xDB, 0x40, // VCOMH deselect
    0xA4,       // follow RAM
    0xA6,       // not inverted
    0xAF,       // display on
];

/// Raw writes to one device on an I2C bus.
pub trait I2cBus: Send {
    /// Sends `bytes` as a single write transaction.
    fn write(&mut self, bytes: &[u8]) -> Result<(), DisplayError>;
}

/// Presents frames on an SSD1306 controller.
///
/// The panel is initialised and cleared on creation and switched off on
/// drop.
pub struct Ssd1306<B: I2cBus> {
    bus: B,
}

impl Ssd1306<I2cDevBus> {
    /// Opens the controller at `address` on the Linux bus device `path`.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn open(path: &Path, address: u16) -> Result<Self, DisplayError> {
        Self::new(I2cDevBus::open(path, address)?)
    }
}

impl<B: I2cBus> Ssd1306<B> {
    /// Initialises the controller behind `bus` and blanks the screen.
    pub fn new(bus: B) -> Result<Self, DisplayError> {
        let mut panel = Self { bus };
        panel.command(INIT_SEQUENCE)?;
        panel.present(&Framebuffer::new())?;
        info!("SSD1306 ready");
        Ok(panel)
    }

    /// Borrows the bus.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    fn command(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        let mut message = Vec::with_capacity(bytes.len() + 1);
        message.push(CONTROL_COMMAND);
        message.extend_from_slice(bytes);
        self.bus.write(&message)
    }
}

impl<B: I2cBus> FrameSink for Ssd1306<B> {
    fn present(&mut self, frame: &Framebuffer) -> Result<(), DisplayError> {
        let last_column = (Framebuffer::WIDTH - 1) as u8;
        let last_page = (Framebuffer::HEIGHT / 8 - 1) as u8;
        self.command(&[0x21, 0, last_column, 0x22, 0, last_page])?;

        for chunk in frame.as_bytes().chunks(DATA_CHUNK) {
            let mut message = Vec::with_capacity(chunk.len() + 1);
            message.push(CONTROL_DATA);
            message.extend_from_slice(chunk);
            self.bus.write(&message)?;
        }
        debug!(lit = frame.lit_count(), "Frame sent to SSD1306");
        Ok(())
    }
}

impl<B: I2cBus> Drop for Ssd1306<B> {
    fn drop(&mut self) {
        if let Err(e) = self.command(&[DISPLAY_OFF]) {
            warn!(error = %e, "Failed to switch the OLED off");
        }
    }
}

/// An I2C device reached through the Linux `i2c-dev` interface.
pub struct I2cDevBus {
    #[cfg(target_os = "linux")]
    device: i2cdev::linux::LinuxI2CDevice,
}

impl I2cDevBus {
    /// Opens `path` and selects the device at `address`.
    #[cfg(target_os = "linux")]
    pub fn open(path: &Path, address: u16) -> Result<Self, DisplayError> {
        let device = i2cdev::linux::LinuxI2CDevice::new(path, address).map_err(|e| {
            DisplayError::new(format!(
                "Failed to open I2C device {:#x} on {}: {e}",
                address,
                path.display()
            ))
        })?;
        Ok(Self { device })
    }

    /// I2C displays are only reachable on Linux.
    #[cfg(not(target_os = "linux"))]
    pub fn open(path: &Path, address: u16) -> Result<Self, DisplayError> {
        Err(DisplayError::new(format!(
            "I2C device {:#x} on {} needs Linux i2c-dev",
            address,
            path.display()
        )))
    }
}

impl I2cBus for I2cDevBus {
    #[cfg(target_os = "linux")]
    fn write(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        use i2cdev::core::I2CDevice;
        self.device
            .write(bytes)
            .map_err(|e| DisplayError::new(format!("I2C write failed: {e}")))
    }

    #[cfg(not(target_os = "linux"))]
    fn write(&mut self, _bytes: &[u8]) -> Result<(), DisplayError> {
        Err(DisplayError::new("I2C is not available on this platform"))
    }
}
