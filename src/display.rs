use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// The on/off state of every pixel, indexed as `[column][row]`.
pub type FrameBuffer = [[bool; DISPLAY_HEIGHT]; DISPLAY_WIDTH];

/// # Display
/// The Chip-8 display is composed of 64x32 monochrome pixels.
///
/// Pixels only change through `clear` or by XORing sprites onto the screen
/// with `draw`. Sprites that run off an edge wrap around to the opposite side.
#[derive(Copy, Clone)]
pub struct Display {
    pixels: FrameBuffer,
}

impl Display {
    pub fn new() -> Self {
        Display {
            pixels: [[false; DISPLAY_HEIGHT]; DISPLAY_WIDTH],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [[false; DISPLAY_HEIGHT]; DISPLAY_WIDTH];
    }

    #[cfg(test)]
    pub fn pixel(&self, column: usize, row: usize) -> bool {
        self.pixels[column % DISPLAY_WIDTH][row % DISPLAY_HEIGHT]
    }

    /// A copy of every pixel
    pub fn frame(&self) -> FrameBuffer {
        self.pixels
    }

    /// XORs a sprite onto the display with its top left corner at `x`, `y`.
    ///
    /// Each byte of `sprite` is one row of 8 pixels, most significant bit first.
    /// Returns true if any pixel that was on got turned off.
    ///
    /// # Arguments
    /// * `x` the starting column, taken modulo the display width
    /// * `y` the starting row, taken modulo the display height
    /// * `sprite` the rows to draw
    pub fn draw(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, byte) in sprite.iter().enumerate() {
            let py = (y + row) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                if (byte >> (7 - bit)) & 1 == 0 {
                    continue;
                }
                let px = (x + bit) % DISPLAY_WIDTH;
                let pixel = &mut self.pixels[px][py];
                collision |= *pixel;
                *pixel = !*pixel;
            }
        }
        collision
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(display: &Display) -> usize {
        display
            .frame()
            .iter()
            .map(|column| column.iter().filter(|&&p| p).count())
            .sum()
    }

    #[test]
    fn test_display_starts_blank() {
        assert_eq!(lit(&Display::new()), 0);
    }

    #[test]
    fn test_draw_sets_pixels_msb_first() {
        let mut display = Display::new();
        let collision = display.draw(8, 2, &[0b1010_0001]);
        assert!(!collision);
        assert!(display.pixel(8, 2));
        assert!(!display.pixel(9, 2));
        assert!(display.pixel(10, 2));
        assert!(display.pixel(15, 2));
        assert_eq!(lit(&display), 3);
    }

    #[test]
    fn test_draw_xors_and_reports_collision() {
        let mut display = Display::new();
        display.draw(0, 0, &[0b1100_0000]);
        let collision = display.draw(0, 0, &[0b0110_0000]);
        assert!(collision);
        assert!(display.pixel(0, 0));
        assert!(!display.pixel(1, 0));
        assert!(display.pixel(2, 0));
    }

    #[test]
    fn test_collision_covers_whole_sprite() {
        let mut display = Display::new();
        display.draw(0, 0, &[0x80]);
        // only the first row erases anything; later rows must not reset the flag
        let collision = display.draw(0, 0, &[0x80, 0x80, 0x80]);
        assert!(collision);
    }

    #[test]
    fn test_draw_wraps_horizontally() {
        let mut display = Display::new();
        display.draw(62, 0, &[0xF0]);
        assert!(display.pixel(62, 0));
        assert!(display.pixel(63, 0));
        assert!(display.pixel(0, 0));
        assert!(display.pixel(1, 0));
    }

    #[test]
    fn test_draw_wraps_vertically() {
        let mut display = Display::new();
        display.draw(0, 31, &[0x80, 0x80]);
        assert!(display.pixel(0, 31));
        assert!(display.pixel(0, 0));
    }

    #[test]
    fn test_draw_wraps_large_coordinates() {
        let mut display = Display::new();
        display.draw(64 + 3, 32 + 4, &[0x80]);
        assert!(display.pixel(3, 4));
    }

    #[test]
    fn test_clear() {
        let mut display = Display::new();
        display.draw(10, 10, &[0xFF, 0xFF]);
        display.clear();
        assert_eq!(lit(&display), 0);
    }
}
