//! Text helpers shared by the PDF and raster renderers.

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{Rgb, RgbImage};

/// Width and height of one bitmap glyph in pixels.
pub const GLYPH_PX: u32 = 8;

/// Encode `text` for the base-14 fonts' WinAnsi encoding.
///
/// Characters outside Windows-1252 become `?` instead of the numeric
/// character references `encoding_rs` would otherwise emit.
pub fn to_winansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    let mut buf = [0u8; 4];
    for c in text.chars() {
        let (bytes, _, had_errors) = encoding_rs::WINDOWS_1252.encode(c.encode_utf8(&mut buf));
        if had_errors {
            out.push(b'?');
        } else {
            out.extend_from_slice(&bytes);
        }
    }
    out
}

fn glyph(c: char) -> Option<[u8; 8]> {
    BASIC_FONTS.get(c).or_else(|| LATIN_FONTS.get(c))
}

/// Draw `text` with the 8x8 bitmap font, top-left corner at (`x`, `y`).
/// Pixels falling outside the image are clipped. Unknown glyphs draw as `?`.
pub fn draw_bitmap_text(image: &mut RgbImage, x: u32, y: u32, text: &str, color: Rgb<u8>) {
    let (width, height) = image.dimensions();

    for (i, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c).or_else(|| glyph('?')) else {
            continue;
        };
        let left = x + i as u32 * GLYPH_PX;
        if left >= width {
            break;
        }

        for (dy, bits) in rows.iter().enumerate() {
            let py = y + dy as u32;
            if py >= height {
                break;
            }
            for dx in 0..GLYPH_PX {
                // Bit 0 is the leftmost pixel.
                if bits & (1 << dx) == 0 {
                    continue;
                }
                let px = left + dx;
                if px < width {
                    image.put_pixel(px, py, color);
                }
            }
        }
    }
}
