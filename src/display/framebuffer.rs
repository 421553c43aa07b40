//! The in-memory image: one 4-bit intensity per pixel, kept in the controller's
//! two-pixels-per-byte format.

use crate::command::consts::*;

pub(crate) const MAX_COLS: usize = NUM_PIXEL_COLS as usize;
pub(crate) const MAX_ROWS: usize = NUM_PIXEL_ROWS as usize;

/// Pack two horizontally adjacent intensities into one display RAM byte. The left (even column)
/// pixel occupies the upper nibble.
#[inline]
pub(crate) fn pack_pair(left: u8, right: u8) -> u8 {
    (left << 4) | (right & 0x0F)
}

/// Pixel intensities for a `cols` x `rows` image, already in the controller's packed format:
/// stored row by row, two pixels per byte, the even column in the upper nibble. Sized for the full
/// SSD1325 RAM (5120 bytes) so no allocator is needed; only the first `cols / 2 * rows` bytes are
/// used. `cols` is even.
pub(crate) struct Framebuffer {
    cols: usize,
    rows: usize,
    packed: [u8; MAX_COLS / 2 * MAX_ROWS],
}

impl Framebuffer {
    /// A blank image. Callers guarantee `cols <= MAX_COLS` is even and `rows <= MAX_ROWS`.
    pub(crate) fn new(cols: usize, rows: usize) -> Self {
        Framebuffer {
            cols,
            rows,
            packed: [0; MAX_COLS / 2 * MAX_ROWS],
        }
    }

    pub(crate) fn cols(&self) -> usize {
        self.cols
    }

    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    pub(crate) fn contains(&self, x: usize, y: usize) -> bool {
        x < self.cols && y < self.rows
    }

    #[inline]
    fn byte_index(&self, x: usize, y: usize) -> usize {
        y * (self.cols / 2) + x / 2
    }

    pub(crate) fn get(&self, x: usize, y: usize) -> u8 {
        let byte = self.packed[self.byte_index(x, y)];
        if x % 2 == 0 {
            byte >> 4
        } else {
            byte & 0x0F
        }
    }

    /// Store an intensity, keeping only its low nibble.
    pub(crate) fn set(&mut self, x: usize, y: usize, intensity: u8) {
        let i = self.byte_index(x, y);
        let byte = &mut self.packed[i];
        *byte = if x % 2 == 0 {
            pack_pair(intensity & 0x0F, *byte)
        } else {
            pack_pair(*byte >> 4, intensity)
        };
    }

    /// Store a run of intensities along row `y` starting at column `x`. The run must fit in the
    /// row.
    pub(crate) fn set_run(&mut self, x: usize, y: usize, intensities: &[u8]) {
        for (offset, &intensity) in intensities.iter().enumerate() {
            self.set(x + offset, y, intensity);
        }
    }

    pub(crate) fn fill(&mut self, intensity: u8) {
        let used = self.cols / 2 * self.rows;
        let byte = pack_pair(intensity & 0x0F, intensity);
        for b in self.packed[..used].iter_mut() {
            *b = byte;
        }
    }

    /// Copy the packed pixel pair in columns `2 * pair` and `2 * pair + 1` for every row, top to
    /// bottom, into `out`, which must be exactly `rows` bytes long.
    pub(crate) fn pack_column(&self, pair: usize, out: &mut [u8]) {
        let stride = self.cols / 2;
        for (y, byte) in out.iter_mut().enumerate() {
            *byte = self.packed[y * stride + pair];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::iproduct;

    #[test]
    fn starts_blank() {
        let fb = Framebuffer::new(128, 64);
        assert!(iproduct!(0..128, 0..64).all(|(x, y)| fb.get(x, y) == 0));
    }

    #[test]
    fn set_masks_to_nibble() {
        let mut fb = Framebuffer::new(128, 64);
        fb.set(5, 7, 0x0C);
        fb.set(6, 7, 0x1C);
        fb.set(7, 7, 0xFF);
        assert_eq!(fb.get(5, 7), 0x0C);
        assert_eq!(fb.get(6, 7), 0x0C);
        assert_eq!(fb.get(7, 7), 0x0F);
    }

    #[test]
    fn set_run_stays_on_row() {
        let mut fb = Framebuffer::new(8, 2);
        fb.set_run(6, 0, &[9, 10]);
        assert_eq!(fb.get(6, 0), 9);
        assert_eq!(fb.get(7, 0), 10);
        assert_eq!(fb.get(0, 1), 0);
    }

    #[test]
    fn pack_pair_nibble_order() {
        assert_eq!(pack_pair(0x0A, 0x05), 0xA5);
        assert_eq!(pack_pair(0x00, 0x0F), 0x0F);
        assert_eq!(pack_pair(0x0F, 0x00), 0xF0);
    }

    #[test]
    fn pack_column_uses_even_column_as_high_nibble() {
        let mut fb = Framebuffer::new(4, 4);
        for (x, y) in iproduct!(0..4, 0..4) {
            fb.set(x, y, ((x + y) % 16) as u8);
        }
        let mut packed = [0u8; 4];
        fb.pack_column(0, &mut packed);
        assert_eq!(packed, [0x01, 0x12, 0x23, 0x34]);
        fb.pack_column(1, &mut packed);
        assert_eq!(packed, [0x23, 0x34, 0x45, 0x56]);
    }

    #[test]
    fn fill_only_touches_used_area() {
        let mut fb = Framebuffer::new(4, 2);
        fb.fill(0x17);
        assert!(iproduct!(0..4, 0..2).all(|(x, y)| fb.get(x, y) == 7));
        assert_eq!(&fb.packed[..4], &[0x77; 4]);
        assert_eq!(fb.packed[4], 0);
    }

    #[test]
    fn set_keeps_neighbour_nibble() {
        let mut fb = Framebuffer::new(4, 1);
        fb.set(0, 0, 0x0A);
        fb.set(1, 0, 0x05);
        fb.set(0, 0, 0x13);
        assert_eq!(fb.packed[0], 0x35);
        fb.set(1, 0, 0x0E);
        assert_eq!(fb.packed[0], 0x3E);
        assert_eq!(fb.packed[1], 0);
    }

    #[test]
    fn holds_full_ram_in_half_a_byte_per_pixel() {
        assert!(core::mem::size_of::<Framebuffer>() <= MAX_COLS * MAX_ROWS / 2 + 32);
    }
}
