//! Built-in bitmap font
//!
//! A 5x7 uppercase/digit font compiled into the binary. It is the last link
//! of the font fallback chain, so it must never fail to produce a glyph.

use crate::font::{GlyphBitmap, VerticalMetrics};

const GLYPH_COLS: u32 = 5;
const GLYPH_ROWS: u32 = 7;
/// Horizontal advance in font units (glyph plus one column of spacing)
const ADVANCE_COLS: u32 = GLYPH_COLS + 1;

/// Row bitmaps, bit 4 is the leftmost column
type Rows = [u8; GLYPH_ROWS as usize];

const TOFU: Rows = [0x1f, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1f];
const SPACE: Rows = [0; 7];

const LETTERS: [Rows; 26] = [
    [0x0e, 0x11, 0x11, 0x1f, 0x11, 0x11, 0x11], // A
    [0x1e, 0x11, 0x11, 0x1e, 0x11, 0x11, 0x1e], // B
    [0x0e, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0e], // C
    [0x1c, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1c], // D
    [0x1f, 0x10, 0x10, 0x1e, 0x10, 0x10, 0x1f], // E
    [0x1f, 0x10, 0x10, 0x1e, 0x10, 0x10, 0x10], // F
    [0x0e, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0f], // G
    [0x11, 0x11, 0x11, 0x1f, 0x11, 0x11, 0x11], // H
    [0x0e, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0e], // I
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0c], // J
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11], // K
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1f], // L
    [0x11, 0x1b, 0x15, 0x15, 0x11, 0x11, 0x11], // M
    [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11], // N
    [0x0e, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0e], // O
    [0x1e, 0x11, 0x11, 0x1e, 0x10, 0x10, 0x10], // P
    [0x0e, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0d], // Q
    [0x1e, 0x11, 0x11, 0x1e, 0x14, 0x12, 0x11], // R
    [0x0f, 0x10, 0x10, 0x0e, 0x01, 0x01, 0x1e], // S
    [0x1f, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // T
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0e], // U
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0a, 0x04], // V
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0a], // W
    [0x11, 0x11, 0x0a, 0x04, 0x0a, 0x11, 0x11], // X
    [0x11, 0x11, 0x11, 0x0a, 0x04, 0x04, 0x04], // Y
    [0x1f, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1f], // Z
];

const DIGITS: [Rows; 10] = [
    [0x0e, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0e], // 0
    [0x04, 0x0c, 0x04, 0x04, 0x04, 0x04, 0x0e], // 1
    [0x0e, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1f], // 2
    [0x1f, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0e], // 3
    [0x02, 0x06, 0x0a, 0x12, 0x1f, 0x02, 0x02], // 4
    [0x1f, 0x10, 0x1e, 0x01, 0x01, 0x11, 0x0e], // 5
    [0x06, 0x08, 0x10, 0x1e, 0x11, 0x11, 0x0e], // 6
    [0x1f, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08], // 7
    [0x0e, 0x11, 0x11, 0x0e, 0x11, 0x11, 0x0e], // 8
    [0x0e, 0x11, 0x11, 0x0f, 0x01, 0x02, 0x0c], // 9
];

fn rows_for(c: char) -> &'static Rows {
    match c.to_ascii_uppercase() {
        ' ' => &SPACE,
        c @ 'A'..='Z' => &LETTERS[(c as u8 - b'A') as usize],
        c @ '0'..='9' => &DIGITS[(c as u8 - b'0') as usize],
        _ => &TOFU,
    }
}

/// Built-in bitmap font scaled by an integer factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinFont {
    scale: u32,
}

impl BuiltinFont {
    /// Pick a scale so the cap height is roughly 70% of `px`
    pub fn for_size(px: f32) -> Self {
        let scale = (px * 0.7 / GLYPH_ROWS as f32).round().max(1.0) as u32;
        Self { scale }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn vertical_metrics(&self) -> VerticalMetrics {
        VerticalMetrics {
            ascent: (GLYPH_ROWS * self.scale) as f32,
            descent: 0.0,
        }
    }

    /// Rasterize a character; unknown characters come out as a hollow box
    pub fn rasterize(&self, c: char) -> GlyphBitmap {
        let rows = rows_for(c);
        let s = self.scale as usize;
        let width = GLYPH_COLS as usize * s;
        let height = GLYPH_ROWS as usize * s;

        let mut coverage = vec![0u8; width * height];
        for (py, row) in coverage.chunks_exact_mut(width).enumerate() {
            let bits = rows[py / s];
            for (px, value) in row.iter_mut().enumerate() {
                let col = px / s;
                if bits & (0x10 >> col) != 0 {
                    *value = 255;
                }
            }
        }

        GlyphBitmap {
            width,
            height,
            xmin: (self.scale / 2) as i32,
            ymin: 0,
            advance_width: (ADVANCE_COLS * self.scale) as f32,
            coverage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_for_icon_size() {
        assert_eq!(BuiltinFont::for_size(280.0).scale(), 28);
        assert_eq!(BuiltinFont::for_size(1.0).scale(), 1);
    }

    #[test]
    fn test_rasterize_dimensions() {
        let font = BuiltinFont::for_size(280.0);
        let glyph = font.rasterize('L');
        assert_eq!(glyph.width, 140);
        assert_eq!(glyph.height, 196);
        assert_eq!(glyph.coverage.len(), 140 * 196);
        assert_eq!(glyph.advance_width, 168.0);
    }

    #[test]
    fn test_letter_l_shape() {
        let font = BuiltinFont { scale: 1 };
        let glyph = font.rasterize('L');
        // Left column fully set, bottom row fully set
        for y in 0..7 {
            assert_eq!(glyph.coverage[y * 5], 255);
        }
        assert!(glyph.coverage[6 * 5..].iter().all(|&v| v == 255));
        assert_eq!(glyph.coverage[4], 0);
    }

    #[test]
    fn test_lowercase_maps_to_uppercase() {
        let font = BuiltinFont { scale: 2 };
        assert_eq!(font.rasterize('m').coverage, font.rasterize('M').coverage);
    }

    #[test]
    fn test_unknown_char_is_box() {
        let font = BuiltinFont { scale: 1 };
        let glyph = font.rasterize('λ');
        let set = glyph.coverage.iter().filter(|&&v| v == 255).count();
        // 5 + 5 + 2 * 5 side pixels
        assert_eq!(set, 20);
    }

    #[test]
    fn test_space_is_blank() {
        let font = BuiltinFont { scale: 3 };
        assert!(font.rasterize(' ').coverage.iter().all(|&v| v == 0));
    }
}
