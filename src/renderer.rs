//! Icon Renderer
//!
//! Draws the wordmark icon onto a fresh canvas and exports it.
//!
//! The procedure is a single linear pass:
//! 1. background fill
//! 2. backdrop plate
//! 3. font acquisition (fallback chain, never fails)
//! 4. per letter: shadow, then the letter itself
//! 5. export of the base image and the resampled copies

use std::path::PathBuf;

use image::{Rgba, RgbaImage};

use crate::canvas::Canvas;
use crate::config::{IconConfig, Palette};
use crate::error::Result;
use crate::export;
use crate::font::{GlyphBitmap, IconFont, VerticalMetrics};
use crate::layout::{self, Anchor};

/// Renders the icon described by an `IconConfig`
#[derive(Debug, Clone)]
pub struct IconRenderer {
    config: IconConfig,
    palette: Palette,
}

impl IconRenderer {
    /// Create a renderer, validating the configuration up front
    pub fn new(config: IconConfig) -> Result<Self> {
        config.validate()?;
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!("Effective config:\n{}", config.to_toml()?);
        }
        let palette = Palette::from_config(&config)?;
        Ok(Self { config, palette })
    }

    pub fn config(&self) -> &IconConfig {
        &self.config
    }

    /// Resolve the font from the configured candidates
    pub fn load_font(&self) -> IconFont {
        IconFont::load_with_fallback(&self.config.fonts.candidates, self.config.fonts.size)
    }

    /// Draw the base icon
    pub fn render(&self) -> Result<RgbaImage> {
        let font = self.load_font();
        self.render_with_font(&font)
    }

    /// Draw the base icon with an already-resolved font
    pub fn render_with_font(&self, font: &IconFont) -> Result<RgbaImage> {
        let size = self.config.canvas.size;
        tracing::info!("Rendering {}x{} icon with {}", size, size, font.source());

        let mut canvas = Canvas::new(size, self.palette.background)?;

        let center = (size / 2) as f32;
        let plate = &self.config.plate;
        canvas.fill_circle(
            (center, center),
            plate.radius as f32,
            self.palette.plate_fill,
            self.palette.plate_outline,
            plate.outline_width as f32,
        );

        let wordmark = &self.config.wordmark;
        let anchors = layout::glyph_anchors(
            size,
            wordmark.spacing,
            wordmark.letters.len(),
            wordmark.vertical_offset,
        );
        let metrics = font.vertical_metrics();

        for ((letter, color), anchor) in wordmark
            .letters
            .iter()
            .zip(&self.palette.letters)
            .zip(anchors)
        {
            let glyph = font.rasterize(letter.glyph);
            tracing::debug!("Drawing '{}' at ({}, {})", letter.glyph, anchor.x, anchor.y);

            let shadow = anchor.offset(wordmark.shadow_offset);
            draw_anchored(&mut canvas, &glyph, shadow, metrics, self.palette.shadow);
            draw_anchored(&mut canvas, &glyph, anchor, metrics, *color);
        }

        Ok(canvas.into_image())
    }

    /// Render and write the full file set into the output directory
    pub fn run(&self) -> Result<Vec<PathBuf>> {
        let base = self.render()?;
        let output = &self.config.output;
        let written = export::export_all(&base, &output.directory, &output.sizes)?;
        tracing::info!(
            "Wrote {} files to {}",
            written.len(),
            output.directory.display()
        );
        Ok(written)
    }
}

fn draw_anchored(
    canvas: &mut Canvas,
    glyph: &GlyphBitmap,
    anchor: Anchor,
    metrics: VerticalMetrics,
    color: Rgba<u8>,
) {
    let (x, y) = glyph_origin(glyph, anchor, metrics);
    canvas.draw_glyph(glyph, x, y, color);
}

/// Top-left bitmap position for a glyph whose middle sits on `anchor`.
///
/// Horizontally the anchor is half the advance width; vertically it is
/// halfway between the ascender and descender lines.
fn glyph_origin(glyph: &GlyphBitmap, anchor: Anchor, metrics: VerticalMetrics) -> (i32, i32) {
    let pen_x = (anchor.x as f32 - glyph.advance_width / 2.0).round() as i32;
    let baseline = (anchor.y as f32 + (metrics.ascent + metrics.descent) / 2.0).round() as i32;

    let x = pen_x + glyph.xmin;
    let y = baseline - glyph.ymin - glyph.height as i32;
    (x, y)
}
