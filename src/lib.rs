//! Driver library for the Solomon Systech SSD1325 dot matrix OLED display driver.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate embedded_hal as hal;

#[macro_use]
mod logging;
// Declared before the modules that use its test macros.
#[macro_use]
pub mod interface;

pub mod command;
pub mod config;
pub mod display;
pub mod error;
#[cfg(feature = "linux")]
pub mod linux;

// Re-exports for primary API.
pub use crate::command::{consts, Command, DisplayMode};
pub use crate::config::VccMode;
pub use crate::display::{Display, PixelCoord};
pub use crate::error::Error;
pub use crate::interface::spi::{SpiInterface, TransportError};
pub use crate::interface::DisplayInterface;
