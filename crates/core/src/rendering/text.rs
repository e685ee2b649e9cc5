//! Bitmap text for legend labels.

use font8x8::{UnicodeFonts, BASIC_FONTS};

use crate::shared::color::Color;
use crate::shared::frame::Frame;

pub const GLYPH_SIZE: i32 = 8;

/// Draws `text` with its baseline at `origin.1`, starting at `origin.0`.
///
/// Characters without a glyph advance the cursor and draw nothing. Pixels
/// outside the frame are skipped.
pub fn draw_text(frame: &mut Frame, text: &str, origin: (i32, i32), color: Color) {
    let (w, h) = (frame.width() as i32, frame.height() as i32);
    let top = origin.1 - GLYPH_SIZE;
    for (i, ch) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(ch) else {
            continue;
        };
        let left = origin.0 + i as i32 * GLYPH_SIZE;
        for (row, bits) in glyph.iter().enumerate() {
            let y = top + row as i32;
            if y < 0 || y >= h {
                continue;
            }
            for col in 0..GLYPH_SIZE {
                let x = left + col;
                // LSB is the leftmost column
                if bits & (1 << col) != 0 && x >= 0 && x < w {
                    frame.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::frame::PixelOrder;

    fn black(w: u32, h: u32) -> Frame {
        Frame::new(vec![0u8; (w * h * 3) as usize], w, h, PixelOrder::Bgr, 0)
    }

    fn lit(frame: &Frame, color: Color) -> Vec<(u32, u32)> {
        let mut out = Vec::new();
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                if frame.pixel(x, y) == color {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_text_sits_above_baseline() {
        let mut frame = black(40, 20);
        let red = Color::new(255, 0, 0);
        draw_text(&mut frame, "chin", (2, 12), red);
        let pixels = lit(&frame, red);
        assert!(!pixels.is_empty());
        assert!(pixels.iter().all(|&(x, y)| (4..12).contains(&y) && x >= 2 && x < 34));
    }

    #[test]
    fn test_space_draws_nothing() {
        let mut frame = black(16, 16);
        draw_text(&mut frame, " ", (0, 10), Color::new(1, 1, 1));
        assert!(frame.data().iter().all(|b| *b == 0));
    }

    #[test]
    fn test_text_clipped_at_edges() {
        let mut frame = black(10, 4);
        draw_text(&mut frame, "left_eye", (-3, 6), Color::new(0, 255, 0));
        // no panic; something visible in the strip
        assert!(frame.data().iter().any(|b| *b == 255));
    }
}
