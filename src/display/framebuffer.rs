//! Monochrome 128x64 framebuffer.

use super::font::{self, ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};

/// Bit-packed 128x64 frame in SSD1306 page layout: each byte holds eight
/// vertically stacked pixels, least significant bit on top.
///
/// Drawing calls clip silently at the frame edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pages: Vec<u8>,
}

impl Framebuffer {
    /// Frame width in pixels.
    pub const WIDTH: i32 = 128;
    /// Frame height in pixels.
    pub const HEIGHT: i32 = 64;

    /// Creates a blank frame.
    pub fn new() -> Self {
        Self {
            pages: vec![0; (Self::WIDTH * Self::HEIGHT / 8) as usize],
        }
    }

    /// Raw page bytes, ready for the panel controller.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pages
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        self.pages.fill(0);
    }

    fn offset(x: i32, y: i32) -> Option<(usize, u8)> {
        if !(0..Self::WIDTH).contains(&x) || !(0..Self::HEIGHT).contains(&y) {
            return None;
        }
        let index = (y / 8 * Self::WIDTH + x) as usize;
        Some((index, 1 << (y % 8)))
    }

    /// Whether the pixel at `(x, y)` is lit; off-frame pixels read as off.
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        Self::offset(x, y).is_some_and(|(index, bit)| self.pages[index] & bit != 0)
    }

    /// Sets one pixel.
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((index, bit)) = Self::offset(x, y) {
            if on {
                self.pages[index] |= bit;
            } else {
                self.pages[index] &= !bit;
            }
        }
    }

    /// Number of lit pixels.
    pub fn lit_count(&self) -> u32 {
        self.pages.iter().map(|b| b.count_ones()).sum()
    }

    /// Fills a `width` x `height` rectangle whose top-left corner is `(x, y)`.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, on: bool) {
        for py in y..y + height {
            for px in x..x + width {
                self.set_pixel(px, py, on);
            }
        }
    }

    /// Draws a straight line between two points, both inclusive.
    ///
    /// Lines thicker than one pixel grow right and down from the ideal line.
    pub fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), thickness: i32, on: bool) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.fill_rect(x, y, thickness.max(1), thickness.max(1), on);
            if (x, y) == to {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draws a circle outline (midpoint algorithm).
    pub fn draw_circle(&mut self, center: (i32, i32), radius: i32, on: bool) {
        let (cx, cy) = center;
        let mut x = radius;
        let mut y = 0;
        let mut err = 1 - radius;

        while x >= y {
            for (px, py) in [
                (x, y),
                (y, x),
                (-y, x),
                (-x, y),
                (-x, -y),
                (-y, -x),
                (y, -x),
                (x, -y),
            ] {
                self.set_pixel(cx + px, cy + py, on);
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Draws `text` with its top-left corner at `(x, y)` and returns the
    /// width drawn.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, on: bool) -> i32 {
        let mut cursor = x;
        for c in text.chars() {
            for (col, bits) in (0..GLYPH_WIDTH).zip(font::glyph(c)) {
                for row in 0..GLYPH_HEIGHT {
                    if bits & (1 << row) != 0 {
                        self.set_pixel(cursor + col, y + row, on);
                    }
                }
            }
            cursor += ADVANCE;
        }
        font::text_width(text)
    }

    /// Draws `text` horizontally centred on the frame.
    pub fn draw_text_centered(&mut self, y: i32, text: &str, on: bool) {
        let x = (Self::WIDTH - font::text_width(text)) / 2;
        self.draw_text(x.max(0), y, text, on);
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}
