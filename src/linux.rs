//! Opening a display wired to a Linux SPI device node and sysfs GPIO lines, such as a Raspberry Pi
//! with the display's CS on CE0.
//!
//! The SPI device is `/dev/spidev{bus}.{device}`. It has no MISO connection, so it is only ever
//! written. D/C and /RESET are ordinary GPIO outputs, numbered as sysfs numbers them.

use std::fmt;
use std::io;

use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_embedded_hal::sysfs_gpio::{self, Direction};
use linux_embedded_hal::{Spidev, SysfsPin};

pub use linux_embedded_hal::Delay;

use crate::display::{Display, PixelCoord};
use crate::error::Error;
use crate::interface::spi::{SpiInterface, TransportError};

pub type LinuxInterface = SpiInterface<Spidev, SysfsPin, SysfsPin>;
pub type LinuxTransportError = TransportError<io::Error, sysfs_gpio::Error, sysfs_gpio::Error>;
pub type LinuxDisplay = Display<LinuxInterface>;

/// Where the display is connected, and how large it is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceConfig {
    /// SPI bus number.
    pub bus: u8,
    /// Chip select on that bus.
    pub device: u8,
    /// GPIO driving D/C.
    pub dc_pin: u64,
    /// GPIO driving /RESET.
    pub reset_pin: u64,
    /// Display rows.
    pub rows: i16,
    /// Display columns. Must be even.
    pub cols: i16,
    /// SPI clock in Hz.
    pub max_speed_hz: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        DeviceConfig {
            bus: 0,
            device: 0,
            dc_pin: 1,
            reset_pin: 2,
            rows: 64,
            cols: 128,
            max_speed_hz: 32_000_000,
        }
    }
}

/// Failure to bring up the connection to the display.
#[derive(Debug)]
pub enum OpenError {
    /// The SPI device node could not be opened or configured.
    Spi(io::Error),
    /// A GPIO line could not be exported or set up as an output.
    Gpio(sysfs_gpio::Error),
    /// The lines could not be driven to their idle levels, or the size is not supported.
    Display(Error<LinuxTransportError>),
}

impl fmt::Display for OpenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenError::Spi(e) => write!(f, "cannot open SPI device: {}", e),
            OpenError::Gpio(e) => write!(f, "cannot claim GPIO line: {}", e),
            OpenError::Display(e) => write!(f, "cannot set up display: {}", e),
        }
    }
}

impl std::error::Error for OpenError {}

impl DeviceConfig {
    /// The spidev node for `bus` and `device`.
    pub fn spidev_path(&self) -> String {
        format!("/dev/spidev{}.{}", self.bus, self.device)
    }

    /// Open the SPI device, claim the D/C line (driven low) and the /RESET line (driven high),
    /// and return a display driver with a blank framebuffer. Nothing is sent to the display; call
    /// `Display::init` next.
    pub fn open(&self) -> Result<LinuxDisplay, OpenError> {
        let path = self.spidev_path();
        debug!(
            "ssd1325: opening spidev{}.{} at {} Hz",
            self.bus,
            self.device,
            self.max_speed_hz
        );
        let mut spi = Spidev::open(&path).map_err(OpenError::Spi)?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(self.max_speed_hz)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        spi.configure(&options).map_err(OpenError::Spi)?;

        let dc = output_pin(self.dc_pin, Direction::Low)?;
        let rst = output_pin(self.reset_pin, Direction::High)?;

        let iface = SpiInterface::new(spi, dc, rst)
            .map_err(|e| OpenError::Display(Error::Transport(e)))?;
        Display::new(iface, PixelCoord(self.cols, self.rows)).map_err(OpenError::Display)
    }
}

/// Export a sysfs GPIO and make it an output starting at the level given by `initial`.
fn output_pin(number: u64, initial: Direction) -> Result<SysfsPin, OpenError> {
    trace!("ssd1325: exporting gpio {}", number);
    let pin = SysfsPin::new(number);
    pin.export().map_err(OpenError::Gpio)?;
    pin.set_direction(initial).map_err(OpenError::Gpio)?;
    Ok(pin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = DeviceConfig::default();
        assert_eq!(cfg.bus, 0);
        assert_eq!(cfg.device, 0);
        assert_eq!(cfg.dc_pin, 1);
        assert_eq!(cfg.reset_pin, 2);
        assert_eq!((cfg.cols, cfg.rows), (128, 64));
        assert_eq!(cfg.spidev_path(), "/dev/spidev0.0");
    }

    #[test]
    fn spidev_path_follows_bus_and_device() {
        let cfg = DeviceConfig {
            bus: 1,
            device: 2,
            ..DeviceConfig::default()
        };
        assert_eq!(cfg.spidev_path(), "/dev/spidev1.2");
    }
}
