//! The command set for the SSD1325.
//!
//! Note 1: The display RAM of the SSD1325 is arranged in 80 rows and 64 columns, where each
//! column is 2 adjacent pixels (segments) in the row for a total max resolution of 128x80. Each
//! pixel is 4 bits/16 levels of intensity, so each column refers to a single byte. Thus, anywhere
//! there is a "column" address, these refer to horizontal pairs of pixels.
//!
//! Unlike the later SSD132x parts, the SSD1325 takes command operands on the command stream: the
//! opcode and all of its operand bytes are sent with D/C low.

use crate::error::Error;
use crate::interface::DisplayInterface;

pub mod consts {
    //! Limits of the SSD1325 display RAM.

    pub const NUM_PIXEL_COLS: u16 = 128;
    pub const NUM_PIXEL_ROWS: u8 = 80;
    pub const NUM_BUF_COLS: u8 = (NUM_PIXEL_COLS / 2) as u8;
    pub const PIXEL_COL_MAX: u16 = NUM_PIXEL_COLS - 1;
    pub const PIXEL_ROW_MAX: u8 = NUM_PIXEL_ROWS - 1;
    pub const BUF_COL_MAX: u8 = NUM_BUF_COLS - 1;
}

use self::consts::*;

/// Setting of the display mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    /// The display operates normally, showing the image in the display RAM.
    Normal,
    /// All pixels are turned ON at grayscale level 15, regardless of display RAM.
    AllOn,
    /// All pixels are turned OFF, regardless of display RAM.
    AllOff,
    /// The display operates with inverse brightness, showing the image in the display RAM with the
    /// grayscale levels inverted (level 0->15, 1->14, ..., 15->0).
    Inverse,
}

/// Segment output current range. The contrast setting scales within the selected range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurrentRange {
    Quarter,
    Half,
    Full,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Set the column start and end address range when writing to the display RAM. The column
    /// address pointer is reset to the start column address. Range is 0-63. (Note 1)
    SetColumnAddress(u8, u8),
    /// Set the row start and end address range when writing to the display RAM. The row address
    /// pointer is reset to the start row address. Range is 0-79.
    SetRowAddress(u8, u8),
    /// Set the contrast current. Range 0-127.
    SetContrastCurrent(u8),
    /// Select the segment output current range.
    SetCurrentRange(CurrentRange),
    /// Set the display start line, "rolling" the displayed image upwards through display RAM.
    /// Range is 0-79.
    SetStartLine(u8),
    /// Set the display COM line offset. Range is 0-79.
    SetDisplayOffset(u8),
    /// Set the re-map and address increment byte: bit 0 column remap, bit 1 nibble remap, bit 2
    /// vertical address increment, bit 4 COM scan direction, bit 6 splits odd/even COM lines.
    /// The bring-up sequence uses 0x56.
    SetRemap(u8),
    /// Set the display operating mode. See enum for details.
    SetDisplayMode(DisplayMode),
    /// Set the MUX ratio, the number of active COM lines. Range 16-80.
    SetMuxRatio(u8),
    /// Control sleep mode. Sleep turns the panel off; waking turns it back on.
    SetSleepMode(bool),
    /// Fill a rectangle of display RAM with a gray pattern byte: start column, start row, end
    /// column, end row, pattern. Columns are in the range 0-63 and rows 0-79, with start <= end.
    DrawRectangle(u8, u8, u8, u8, u8),
}

macro_rules! ok_command {
    ($buf:ident, $cmd:expr, [$($arg:expr),*]) => {{
        #[allow(unused_mut)]
        let mut len = 0;
        $(
            $buf[len] = $arg;
            len += 1;
        )*
        Ok(($cmd, &$buf[..len]))
    }};
}

impl Command {
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), Error<DI::Error>>
    where
        DI: DisplayInterface,
    {
        let mut arg_buf = [0u8; 5];
        let (cmd, data) = match self {
            Command::SetColumnAddress(start, end) => match (start, end) {
                (0..=BUF_COL_MAX, 0..=BUF_COL_MAX) => ok_command!(arg_buf, 0x15, [start, end]),
                _ => Err(Error::InvalidArgument),
            },
            Command::SetRowAddress(start, end) => match (start, end) {
                (0..=PIXEL_ROW_MAX, 0..=PIXEL_ROW_MAX) => ok_command!(arg_buf, 0x75, [start, end]),
                _ => Err(Error::InvalidArgument),
            },
            Command::SetContrastCurrent(current) => match current {
                0..=127 => ok_command!(arg_buf, 0x81, [current]),
                _ => Err(Error::InvalidArgument),
            },
            Command::SetCurrentRange(range) => ok_command!(
                arg_buf,
                match range {
                    CurrentRange::Quarter => 0x84,
                    CurrentRange::Half => 0x85,
                    CurrentRange::Full => 0x86,
                },
                []
            ),
            Command::SetStartLine(line) => match line {
                0..=PIXEL_ROW_MAX => ok_command!(arg_buf, 0xA1, [line]),
                _ => Err(Error::InvalidArgument),
            },
            Command::SetDisplayOffset(line) => match line {
                0..=PIXEL_ROW_MAX => ok_command!(arg_buf, 0xA2, [line]),
                _ => Err(Error::InvalidArgument),
            },
            Command::SetRemap(remap) => ok_command!(arg_buf, 0xA0, [remap]),
            Command::SetDisplayMode(mode) => ok_command!(
                arg_buf,
                match mode {
                    DisplayMode::Normal => 0xA4,
                    DisplayMode::AllOn => 0xA5,
                    DisplayMode::AllOff => 0xA6,
                    DisplayMode::Inverse => 0xA7,
                },
                []
            ),
            Command::SetMuxRatio(ratio) => match ratio {
                16..=NUM_PIXEL_ROWS => ok_command!(arg_buf, 0xA8, [ratio - 1]),
                _ => Err(Error::InvalidArgument),
            },
            Command::SetSleepMode(ena) => ok_command!(
                arg_buf,
                match ena {
                    true => 0xAE,
                    false => 0xAF,
                },
                []
            ),
            Command::DrawRectangle(col_start, row_start, col_end, row_end, pattern) => {
                match (col_start, row_start, col_end, row_end) {
                    (0..=BUF_COL_MAX, 0..=PIXEL_ROW_MAX, 0..=BUF_COL_MAX, 0..=PIXEL_ROW_MAX)
                        if col_start <= col_end && row_start <= row_end =>
                    {
                        ok_command!(
                            arg_buf,
                            0x24,
                            [col_start, row_start, col_end, row_end, pattern]
                        )
                    }
                    _ => Err(Error::InvalidArgument),
                }
            }
        }?;
        iface.send_command(cmd, data).map_err(Error::Transport)
    }
}
