//! RGBA Canvas
//!
//! The square raster buffer the icon is drawn on, with the handful of
//! primitives the icon needs: a background fill, the backdrop plate and
//! ink-blended glyph coverage.

use image::{Rgba, RgbaImage};

use crate::error::{IconError, Result};
use crate::font::GlyphBitmap;

/// Square RGBA drawing surface
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Allocate a `size` x `size` canvas filled with `background`
    pub fn new(size: u32, background: Rgba<u8>) -> Result<Self> {
        if size == 0 {
            return Err(IconError::Canvas("canvas size must be positive".to_string()));
        }
        let bytes = (size as usize)
            .checked_mul(size as usize)
            .and_then(|n| n.checked_mul(4));
        if bytes.is_none() {
            return Err(IconError::Canvas(format!(
                "{0}x{0} canvas does not fit in memory",
                size
            )));
        }

        Ok(Self {
            image: RgbaImage::from_pixel(size, size, background),
        })
    }

    pub fn size(&self) -> u32 {
        self.image.width()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Draw a filled circle with an inner outline ring.
    ///
    /// A pixel belongs to the circle when its index lies within `radius` of
    /// `(cx, cy)`, so the disc spans `cx - radius ..= cx + radius` on both
    /// axes. The outermost `outline_width` pixels take the outline color.
    /// Pixels are replaced, not blended.
    pub fn fill_circle(
        &mut self,
        (cx, cy): (f32, f32),
        radius: f32,
        fill: Rgba<u8>,
        outline: Rgba<u8>,
        outline_width: f32,
    ) {
        let size = self.size() as f32;
        let x_start = (cx - radius).ceil().max(0.0) as u32;
        let y_start = (cy - radius).ceil().max(0.0) as u32;
        let x_end = ((cx + radius).floor() + 1.0).min(size) as u32;
        let y_end = ((cy + radius).floor() + 1.0).min(size) as u32;

        let r2 = radius * radius;
        let inner = (radius - outline_width).max(0.0);
        let inner2 = inner * inner;

        for y in y_start..y_end {
            let dy = y as f32 - cy;
            for x in x_start..x_end {
                let dx = x as f32 - cx;
                let d2 = dx * dx + dy * dy;
                if d2 > r2 {
                    continue;
                }

                let color = if d2 > inner2 { outline } else { fill };
                self.image.put_pixel(x, y, color);
            }
        }
    }

    /// Ink a glyph's coverage in `color`, top-left corner at `(x, y)`.
    ///
    /// Every channel, alpha included, moves toward the ink by the coverage.
    /// A fully covered pixel becomes exactly `color`, so a half-transparent
    /// ink leaves half-transparent pixels behind.
    pub fn draw_glyph(&mut self, glyph: &GlyphBitmap, x: i32, y: i32, color: Rgba<u8>) {
        if glyph.width == 0 || glyph.height == 0 {
            return;
        }

        let size = self.size() as i32;
        for (dy, row) in glyph.coverage.chunks_exact(glyph.width).enumerate() {
            let py = y + dy as i32;
            if py < 0 || py >= size {
                continue;
            }

            for (dx, &coverage) in row.iter().enumerate() {
                let px = x + dx as i32;
                if px < 0 || px >= size || coverage == 0 {
                    continue;
                }

                let dst = self.image.get_pixel_mut(px as u32, py as u32);
                for (out, &ink) in dst.0.iter_mut().zip(color.0.iter()) {
                    *out = ink_channel(*out, ink, coverage);
                }
            }
        }
    }
}

/// `dst + (ink - dst) * coverage / 255`, rounded to nearest
fn ink_channel(dst: u8, ink: u8, coverage: u8) -> u8 {
    let c = coverage as u32;
    let t = dst as u32 * (255 - c) + ink as u32 * c + 128;
    (((t >> 8) + t) >> 8) as u8
}
