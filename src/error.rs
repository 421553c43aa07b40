//! Driver error type.

use core::fmt;

use crate::display::PixelCoord;

/// Errors returned by `Display` and `Command` operations. `TE` is the error type of the
/// `DisplayInterface` in use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error<TE> {
    /// The interface failed to drive a line or write a burst. Whatever was sent before the
    /// failure has already reached the display.
    Transport(TE),
    /// The requested display size is not supported by the SSD1325. Columns must be even and at
    /// most 128, rows at most 80.
    UnsupportedGeometry(PixelCoord),
    /// A pixel coordinate lies outside the display.
    OutOfBounds(PixelCoord),
    /// A run of pixel values starting at column `start` with `len` values does not fit in a row
    /// of `cols` pixels.
    BufferLength { start: usize, len: usize, cols: usize },
    /// A command operand is outside the range accepted by the controller.
    InvalidArgument,
}

impl<TE> fmt::Display for Error<TE>
where
    TE: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "display transport error: {:?}", e),
            Error::UnsupportedGeometry(size) => write!(
                f,
                "display size {}x{} not supported by SSD1325",
                size.0, size.1
            ),
            Error::OutOfBounds(at) => write!(f, "pixel ({}, {}) is outside the display", at.0, at.1),
            Error::BufferLength { start, len, cols } => write!(
                f,
                "{} pixels starting at column {} overrun a {} pixel row",
                len, start, cols
            ),
            Error::InvalidArgument => write!(f, "command operand out of range"),
        }
    }
}

#[cfg(feature = "std")]
impl<TE> std::error::Error for Error<TE> where TE: fmt::Debug {}
