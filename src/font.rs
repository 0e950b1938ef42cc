//! Font Loading
//!
//! Resolves the wordmark font from an ordered list of candidate files and
//! rasterizes single glyphs. TrueType files go through fontdue; when no
//! candidate loads, the built-in bitmap font takes over.

use std::fmt;
use std::path::{Path, PathBuf};

use fontdue::{Font, FontSettings};
use thiserror::Error;

use crate::builtin_font::BuiltinFont;

/// Coverage bitmap of one rasterized glyph
#[derive(Debug, Clone)]
pub struct GlyphBitmap {
    pub width: usize,
    pub height: usize,
    /// Left edge relative to the pen position
    pub xmin: i32,
    /// Bottom edge relative to the baseline (positive is up)
    pub ymin: i32,
    pub advance_width: f32,
    /// Row-major alpha coverage, 1 byte per pixel
    pub coverage: Vec<u8>,
}

/// Distances of the ascender and descender lines from the baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalMetrics {
    pub ascent: f32,
    /// Negative when the descender sits below the baseline
    pub descent: f32,
}

/// Font loading errors
#[derive(Error, Debug)]
pub enum FontError {
    #[error("Font IO error: {0}")]
    Io(String),
    #[error("Font parse error: {0}")]
    Parse(String),
}

/// Where the active font came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    File(PathBuf),
    Builtin,
}

impl fmt::Display for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSource::File(path) => write!(f, "{}", path.display()),
            FontSource::Builtin => write!(f, "built-in bitmap font"),
        }
    }
}

enum Backend {
    TrueType {
        font: Box<Font>,
        metrics: VerticalMetrics,
    },
    Builtin(BuiltinFont),
}

/// Font used to draw the wordmark at a fixed pixel size
pub struct IconFont {
    backend: Backend,
    size: f32,
    source: FontSource,
}

impl IconFont {
    /// Load a TrueType/OpenType file (first face of a collection)
    pub fn from_file(path: &Path, size: f32) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|e| FontError::Io(e.to_string()))?;

        let mut font = Self::from_bytes(&data, size)?;
        font.source = FontSource::File(path.to_path_buf());
        Ok(font)
    }

    /// Parse font data bytes
    pub fn from_bytes(data: &[u8], size: f32) -> Result<Self, FontError> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| FontError::Parse(e.to_string()))?;

        let line_metrics = font
            .horizontal_line_metrics(size)
            .ok_or_else(|| FontError::Parse("No line metrics".to_string()))?;

        Ok(Self {
            backend: Backend::TrueType {
                font: Box::new(font),
                metrics: VerticalMetrics {
                    ascent: line_metrics.ascent,
                    descent: line_metrics.descent,
                },
            },
            size,
            source: FontSource::Builtin,
        })
    }

    /// The built-in bitmap font scaled for `size`
    pub fn builtin(size: f32) -> Self {
        Self {
            backend: Backend::Builtin(BuiltinFont::for_size(size)),
            size,
            source: FontSource::Builtin,
        }
    }

    /// Try each candidate in order; the first that loads wins.
    ///
    /// Never fails: an exhausted list yields the built-in font.
    pub fn load_with_fallback(candidates: &[PathBuf], size: f32) -> Self {
        for path in candidates {
            match Self::from_file(path, size) {
                Ok(font) => {
                    tracing::info!("Loaded font: {}", path.display());
                    return font;
                }
                Err(e) => {
                    tracing::debug!("Skipping font {}: {}", path.display(), e);
                }
            }
        }

        tracing::info!("No candidate font available, using built-in font");
        Self::builtin(size)
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.backend, Backend::Builtin(_))
    }

    pub fn vertical_metrics(&self) -> VerticalMetrics {
        match &self.backend {
            Backend::TrueType { metrics, .. } => *metrics,
            Backend::Builtin(builtin) => builtin.vertical_metrics(),
        }
    }

    /// Rasterize one character at the font size
    pub fn rasterize(&self, c: char) -> GlyphBitmap {
        match &self.backend {
            Backend::TrueType { font, .. } => {
                let (metrics, coverage) = font.rasterize(c, self.size);
                GlyphBitmap {
                    width: metrics.width,
                    height: metrics.height,
                    xmin: metrics.xmin,
                    ymin: metrics.ymin,
                    advance_width: metrics.advance_width,
                    coverage,
                }
            }
            Backend::Builtin(builtin) => builtin.rasterize(c),
        }
    }
}
