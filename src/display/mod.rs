//! The main API to the display driver. It owns the framebuffer, brings the display up with the
//! vendor register sequence, and transfers the image to display RAM.

mod framebuffer;

use hal::blocking::delay::DelayMs;

use crate::command::consts::*;
use crate::command::*;
use crate::config::{self, VccMode};
use crate::display::framebuffer::{Framebuffer, MAX_ROWS};
use crate::error::Error;
use crate::interface;

/// Time to let the supply settle before pulsing /RESET during `init`, in milliseconds.
const POWER_SETTLE_MS: u8 = 1;

/// A pixel coordinate pair of `column` and `row`. `column` must be in the range [0,
/// `consts::PIXEL_COL_MAX`], and `row` must be in the range [0, `consts::PIXEL_ROW_MAX`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelCoord(pub i16, pub i16);

/// A driver for an SSD1325 display.
pub struct Display<DI>
where
    DI: interface::DisplayInterface,
{
    iface: DI,
    framebuffer: Framebuffer,
}

impl<DI> Display<DI>
where
    DI: interface::DisplayInterface,
{
    /// Construct a new display driver for a display with viewable dimensions `display_size`
    /// (columns, rows), which is connected to the interface `iface`. The framebuffer starts out
    /// blank. Nothing is sent to the display.
    ///
    /// Pixels are addressed in pairs by the controller, so the column count must be even.
    ///
    /// The framebuffer is held inline and sized for the whole controller RAM, so a `Display` is
    /// a little over 5 KiB regardless of `display_size`.
    pub fn new(iface: DI, display_size: PixelCoord) -> Result<Self, Error<DI::Error>> {
        if false
            || display_size.0 < 2
            || display_size.1 < 1
            || display_size.0 > NUM_PIXEL_COLS as i16
            || display_size.1 > NUM_PIXEL_ROWS as i16
            || display_size.0 % 2 != 0
        {
            return Err(Error::UnsupportedGeometry(display_size));
        }
        Ok(Display {
            iface,
            framebuffer: Framebuffer::new(display_size.0 as usize, display_size.1 as usize),
        })
    }

    /// The viewable dimensions given at construction.
    pub fn size(&self) -> PixelCoord {
        PixelCoord(
            self.framebuffer.cols() as i16,
            self.framebuffer.rows() as i16,
        )
    }

    /// Consume the driver and give back the interface.
    pub fn release(self) -> DI {
        self.iface
    }

    /// Pulse the display's hardware reset line. No commands may be sent until this returns.
    pub fn reset<D>(&mut self, delay: &mut D) -> Result<(), Error<DI::Error>>
    where
        D: DelayMs<u8>,
    {
        trace!("ssd1325: hardware reset");
        self.iface.reset(delay).map_err(Error::Transport)
    }

    /// Reset the display and send the bring-up register sequence, leaving the display on in
    /// normal mode with the address window covering the 64x64 RAM area.
    ///
    /// The SSD1325 sequence is the same for both supply modes; the master configuration it sends
    /// keeps the embedded DC-DC converter off either way.
    pub fn init<D>(&mut self, delay: &mut D, vcc: VccMode) -> Result<(), Error<DI::Error>>
    where
        D: DelayMs<u8>,
    {
        match vcc {
            VccMode::External => {
                debug!("ssd1325: init, external VCC");
            }
            VccMode::SwitchCap => {
                debug!("ssd1325: init, switched-capacitor VCC");
            }
        }
        delay.delay_ms(POWER_SETTLE_MS);
        self.reset(delay)?;
        config::send_init_sequence(&mut self.iface).map_err(Error::Transport)
    }

    /// Switch between normal display mode (`true`, 0xA4) and all pixels off (`false`, 0xA6).
    ///
    /// This does not change the panel's power state; see `sleep` for that.
    pub fn set_display_power(&mut self, on: bool) -> Result<(), Error<DI::Error>> {
        let mode = match on {
            true => DisplayMode::Normal,
            false => DisplayMode::AllOff,
        };
        Command::SetDisplayMode(mode).send(&mut self.iface)
    }

    /// Control sleep mode. Entering sleep turns the panel off (0xAE), leaving it turns the panel
    /// on (0xAF).
    pub fn sleep(&mut self, enabled: bool) -> Result<(), Error<DI::Error>> {
        Command::SetSleepMode(enabled).send(&mut self.iface)
    }

    /// Set the display mode.
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Result<(), Error<DI::Error>> {
        Command::SetDisplayMode(mode).send(&mut self.iface)
    }

    /// Control the contrast current, 0-127.
    pub fn contrast(&mut self, contrast: u8) -> Result<(), Error<DI::Error>> {
        Command::SetContrastCurrent(contrast).send(&mut self.iface)
    }

    /// Set the vertical pan, shifting which display RAM row appears at the top of the display.
    pub fn vertical_pan(&mut self, offset: u8) -> Result<(), Error<DI::Error>> {
        Command::SetStartLine(offset).send(&mut self.iface)
    }

    /// Re-issue the 64x64 rectangle fill from the bring-up sequence. Command 0x24 writes pattern
    /// 0x00 over RAM columns 0-63 and rows 0-63, so this blanks that area of the panel as well as
    /// leaving the write pointer at the origin. The framebuffer is untouched and the next `flush`
    /// repaints it. Use `refresh` to re-anchor the write window without clearing RAM.
    pub fn reset_address_window(&mut self) -> Result<(), Error<DI::Error>> {
        Command::DrawRectangle(0, 0, 0x3F, 0x3F, 0x00).send(&mut self.iface)
    }

    /// Write one pixel into the framebuffer. Only the low 4 bits of `intensity` are kept.
    pub fn set_pixel(&mut self, at: PixelCoord, intensity: u8) -> Result<(), Error<DI::Error>> {
        let (x, y) = self.checked(at)?;
        self.framebuffer.set(x, y, intensity);
        Ok(())
    }

    /// Read one pixel back from the framebuffer, or `None` if `at` is outside the display.
    pub fn pixel(&self, at: PixelCoord) -> Option<u8> {
        self.checked(at)
            .ok()
            .map(|(x, y)| self.framebuffer.get(x, y))
    }

    /// Write a run of pixels into the framebuffer, starting at `start` and moving right along the
    /// same row. The run never wraps onto the next row: if it does not fit between `start` and the
    /// right edge, nothing is written. Only the low 4 bits of each intensity are kept.
    pub fn update_region(
        &mut self,
        start: PixelCoord,
        intensities: &[u8],
    ) -> Result<(), Error<DI::Error>> {
        let (x, y) = self.checked(start)?;
        let cols = self.framebuffer.cols();
        if x + intensities.len() > cols {
            return Err(Error::BufferLength {
                start: x,
                len: intensities.len(),
                cols,
            });
        }
        self.framebuffer.set_run(x, y, intensities);
        Ok(())
    }

    /// Set every pixel of the framebuffer to `intensity`.
    pub fn fill(&mut self, intensity: u8) {
        self.framebuffer.fill(intensity);
    }

    /// Set every pixel of the framebuffer to 0.
    pub fn clear(&mut self) {
        self.framebuffer.fill(0);
    }

    /// Transfer the framebuffer to display RAM.
    ///
    /// The bring-up sequence configures vertical address increment, so the image goes out one
    /// column pair at a time: for each pair of columns, left to right, one data burst of one byte
    /// per row, top to bottom, with the left pixel in the upper nibble. The RAM write pointer is
    /// not moved first; use `refresh` or `reset_address_window` for a defined starting point.
    ///
    /// Bursts are not atomic. If one fails, the columns already sent stay on the display.
    pub fn flush(&mut self) -> Result<(), Error<DI::Error>> {
        let rows = self.framebuffer.rows();
        let pairs = self.framebuffer.cols() / 2;
        trace!("ssd1325: flush {} column pairs of {} rows", pairs, rows);
        let mut burst = [0u8; MAX_ROWS];
        for pair in 0..pairs {
            self.framebuffer.pack_column(pair, &mut burst[..rows]);
            self.iface
                .send_data(&burst[..rows])
                .map_err(Error::Transport)?;
        }
        Ok(())
    }

    /// Point the RAM address window at the display area, then `flush`.
    pub fn refresh(&mut self) -> Result<(), Error<DI::Error>> {
        let buf_col_end = (self.framebuffer.cols() / 2 - 1) as u8;
        let row_end = (self.framebuffer.rows() - 1) as u8;
        Command::SetColumnAddress(0, buf_col_end).send(&mut self.iface)?;
        Command::SetRowAddress(0, row_end).send(&mut self.iface)?;
        self.flush()
    }

    /// Convert a coordinate into framebuffer indices, if it lies on the display.
    fn checked(&self, at: PixelCoord) -> Result<(usize, usize), Error<DI::Error>> {
        if at.0 < 0 || at.1 < 0 {
            return Err(Error::OutOfBounds(at));
        }
        let (x, y) = (at.0 as usize, at.1 as usize);
        if !self.framebuffer.contains(x, y) {
            return Err(Error::OutOfBounds(at));
        }
        Ok((x, y))
    }
}
