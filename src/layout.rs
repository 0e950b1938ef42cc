//! Wordmark layout
//!
//! Places glyph anchors so the run of letters is centered on the canvas.
//! Anchors are glyph middles, not top-left corners.

/// Anchor point of one glyph, in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
}

impl Anchor {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This anchor moved by `(dx, dy)`
    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Compute anchors for `count` glyphs spaced `spacing` apart on a square canvas.
///
/// The run spans `spacing * (count - 1)` pixels and is centered on `size / 2`.
/// All glyphs share `y = size / 2 + vertical_offset`.
pub fn glyph_anchors(size: u32, spacing: u32, count: usize, vertical_offset: i32) -> Vec<Anchor> {
    if count == 0 {
        return Vec::new();
    }

    let center = (size / 2) as i32;
    let spacing = spacing as i32;
    let total_width = spacing * (count as i32 - 1);
    let start_x = center - total_width / 2;
    let y = center + vertical_offset;

    (0..count as i32)
        .map(|i| Anchor::new(start_x + i * spacing, y))
        .collect()
}
