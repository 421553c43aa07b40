//! Full example code for setting up an SSD1325 display on a Raspberry Pi. This uses a Newhaven
//! Displays NHD-2.7-12864UCY3 connected to SPI0 with CS on CE0, and the default D/C and /RESET
//! GPIO numbers of `DeviceConfig`. Build with `--features linux`.

extern crate ssd1325;

use ssd1325::linux::{Delay, DeviceConfig};
use ssd1325::{PixelCoord, VccMode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut disp = DeviceConfig::default().open()?;
    let mut delay = Delay;

    // Reset and send the Newhaven bring-up sequence.
    disp.init(&mut delay, VccMode::default())
        .map_err(|e| e.to_string())?;

    // Horizontal gradient: 8 columns per gray level, one row at a time.
    let row: Vec<u8> = (0..128).map(|x| (x / 8) as u8).collect();
    for y in 0..64 {
        disp.update_region(PixelCoord(0, y), &row)
            .map_err(|e| e.to_string())?;
    }

    // Brighten a marker in the top left corner.
    disp.set_pixel(PixelCoord(0, 0), 15)
        .map_err(|e| e.to_string())?;

    disp.refresh().map_err(|e| e.to_string())?;
    Ok(())
}
