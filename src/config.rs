//! Configuration for the icon generator
//!
//! Every drawing constant lives here as the default of an `IconConfig` field.
//! With no overrides the generator draws the stock LAMA icon. Overrides come from:
//! - an optional TOML file passed with `--config`
//! - CLI arguments
//!
//! Precedence: CLI > file > defaults.

use clap::Parser;
use image::Rgba;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Largest accepted canvas edge; keeps pixel coordinates well inside `i32`
pub const MAX_CANVAS_SIZE: u32 = 16384;

/// CLI arguments for the icon generator
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "generate-icon")]
#[command(version)]
#[command(about = "Draws the LAMA app icon and exports it at several sizes", long_about = None)]
pub struct CliArgs {
    /// Path to a TOML file overriding the embedded constants
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output directory for the generated PNG files
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Candidate font file, tried in the order given (replaces the default list)
    #[arg(long = "font", value_name = "PATH")]
    pub fonts: Vec<PathBuf>,

    /// Skip system fonts and draw with the built-in bitmap font
    #[arg(long)]
    pub no_system_fonts: bool,
}

/// One letter of the wordmark and its color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordmarkLetter {
    pub glyph: char,
    /// Hex color (#RRGGBB)
    pub color: String,
}

impl WordmarkLetter {
    pub fn new(glyph: char, color: &str) -> Self {
        Self {
            glyph,
            color: color.to_string(),
        }
    }
}

/// Canvas configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Edge length of the square base canvas in pixels
    #[serde(default = "default_canvas_size")]
    pub size: u32,
    /// Background color (hex)
    #[serde(default = "default_background")]
    pub background: String,
}

fn default_canvas_size() -> u32 {
    1024
}
fn default_background() -> String {
    "#0a0a0a".to_string()
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            size: default_canvas_size(),
            background: default_background(),
        }
    }
}

/// Backdrop plate (the circle behind the letters)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlateConfig {
    #[serde(default = "default_plate_radius")]
    pub radius: u32,
    #[serde(default = "default_plate_fill")]
    pub fill: String,
    #[serde(default = "default_plate_outline")]
    pub outline: String,
    /// Outline stroke width in pixels, drawn inside the radius
    #[serde(default = "default_outline_width")]
    pub outline_width: u32,
}

fn default_plate_radius() -> u32 {
    450
}
fn default_plate_fill() -> String {
    "#141414".to_string()
}
fn default_plate_outline() -> String {
    "#282828".to_string()
}
fn default_outline_width() -> u32 {
    2
}

impl Default for PlateConfig {
    fn default() -> Self {
        Self {
            radius: default_plate_radius(),
            fill: default_plate_fill(),
            outline: default_plate_outline(),
            outline_width: default_outline_width(),
        }
    }
}

/// Font configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    /// Font files tried in order; the built-in font is used if none loads
    #[serde(default = "default_font_candidates")]
    pub candidates: Vec<PathBuf>,
    /// Font size in pixels
    #[serde(default = "default_font_size")]
    pub size: f32,
}

fn default_font_candidates() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/System/Library/Fonts/Helvetica.ttc"),
        PathBuf::from("/System/Library/Fonts/Avenir.ttc"),
    ]
}
fn default_font_size() -> f32 {
    280.0
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            candidates: default_font_candidates(),
            size: default_font_size(),
        }
    }
}

/// Wordmark configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordmarkConfig {
    /// Distance between neighbouring glyph centers
    #[serde(default = "default_spacing")]
    pub spacing: u32,
    /// Offset of the glyph row from the canvas center (negative is up)
    #[serde(default = "default_vertical_offset")]
    pub vertical_offset: i32,
    #[serde(default = "default_shadow_offset")]
    pub shadow_offset: (i32, i32),
    /// Shadow color (#RRGGBBAA)
    #[serde(default = "default_shadow_color")]
    pub shadow_color: String,
    /// Letters in left-to-right order
    #[serde(default = "default_letters")]
    pub letters: Vec<WordmarkLetter>,
}

fn default_letters() -> Vec<WordmarkLetter> {
    vec![
        WordmarkLetter::new('L', "#ef4444"), // Red
        WordmarkLetter::new('A', "#eab308"), // Yellow
        WordmarkLetter::new('M', "#22c55e"), // Green
        WordmarkLetter::new('A', "#a855f7"), // Purple
    ]
}
fn default_spacing() -> u32 {
    200
}
fn default_vertical_offset() -> i32 {
    -20
}
fn default_shadow_offset() -> (i32, i32) {
    (4, 4)
}
fn default_shadow_color() -> String {
    "#00000080".to_string()
}

impl Default for WordmarkConfig {
    fn default() -> Self {
        Self {
            spacing: default_spacing(),
            vertical_offset: default_vertical_offset(),
            shadow_offset: default_shadow_offset(),
            shadow_color: default_shadow_color(),
            letters: default_letters(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
    /// Edge lengths of the resampled copies
    #[serde(default = "default_export_sizes")]
    pub sizes: Vec<u32>,
}

fn default_output_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").join("icons")
}
fn default_export_sizes() -> Vec<u32> {
    vec![16, 32, 64, 128, 256, 512]
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            sizes: default_export_sizes(),
        }
    }
}

/// Full generator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IconConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub plate: PlateConfig,
    #[serde(default)]
    pub fonts: FontConfig,
    #[serde(default)]
    pub wordmark: WordmarkConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration error
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub message: String,
    pub field: Option<String>,
}

impl ConfigError {
    fn for_field(field: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: Some(field.to_string()),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "Config error in '{}': {}", field, self.message)
        } else {
            write!(f, "Config error: {}", self.message)
        }
    }
}

impl std::error::Error for ConfigError {}

/// Colors resolved from their hex strings
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub background: Rgba<u8>,
    pub plate_fill: Rgba<u8>,
    pub plate_outline: Rgba<u8>,
    pub shadow: Rgba<u8>,
    /// One color per wordmark letter, same order
    pub letters: Vec<Rgba<u8>>,
}

impl Palette {
    /// Resolve every color in the config, failing on the first malformed one
    pub fn from_config(config: &IconConfig) -> Result<Self, ConfigError> {
        let letters = config
            .wordmark
            .letters
            .iter()
            .enumerate()
            .map(|(i, letter)| {
                resolve_color(&letter.color, &format!("wordmark.letters[{}].color", i))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            background: resolve_color(&config.canvas.background, "canvas.background")?,
            plate_fill: resolve_color(&config.plate.fill, "plate.fill")?,
            plate_outline: resolve_color(&config.plate.outline, "plate.outline")?,
            shadow: resolve_color(&config.wordmark.shadow_color, "wordmark.shadow_color")?,
            letters,
        })
    }
}

fn resolve_color(hex: &str, field: &str) -> Result<Rgba<u8>, ConfigError> {
    parse_hex(hex).ok_or_else(|| {
        ConfigError::for_field(
            field,
            format!(
                "Invalid hex color '{}'. Expected format: #RRGGBB or #RRGGBBAA",
                hex
            ),
        )
    })
}

/// Parse `#RRGGBB` (opaque) or `#RRGGBBAA` into RGBA
pub fn parse_hex(hex: &str) -> Option<Rgba<u8>> {
    let hex = hex.trim_start_matches('#');
    if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let r = channel(0)?;
    let g = channel(2)?;
    let b = channel(4)?;
    let a = if hex.len() == 8 { channel(6)? } else { 255 };

    Some(Rgba([r, g, b, a]))
}

impl IconConfig {
    /// Load configuration with precedence: CLI args > config file > defaults
    pub fn load_with_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::load_from_file(path)?,
            None => IconConfig::default(),
        };

        config.apply_cli_args(args);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
            field: None,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
            field: None,
        })
    }

    /// Serialize the effective configuration back to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError {
            message: format!("Failed to serialize config: {}", e),
            field: None,
        })
    }

    fn apply_cli_args(&mut self, args: &CliArgs) {
        if let Some(output) = &args.output {
            self.output.directory = output.clone();
        }
        if !args.fonts.is_empty() {
            self.fonts.candidates = args.fonts.clone();
        }
        if args.no_system_fonts {
            self.fonts.candidates.clear();
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.canvas.size;
        if size == 0 {
            return Err(ConfigError::for_field("canvas.size", "Canvas size must be positive"));
        }
        if size > MAX_CANVAS_SIZE {
            return Err(ConfigError::for_field(
                "canvas.size",
                format!("Canvas size must be at most {}", MAX_CANVAS_SIZE),
            ));
        }

        if self.plate.radius.saturating_mul(2) > size {
            return Err(ConfigError::for_field(
                "plate.radius",
                format!("Plate diameter must fit within the {}px canvas", size),
            ));
        }
        if self.plate.outline_width > self.plate.radius {
            return Err(ConfigError::for_field(
                "plate.outline_width",
                "Outline width must not exceed the plate radius",
            ));
        }

        if !(self.fonts.size >= 1.0 && self.fonts.size <= size as f32) {
            return Err(ConfigError::for_field(
                "fonts.size",
                format!("Font size must be between 1 and {}", size),
            ));
        }

        if self.wordmark.letters.is_empty() {
            return Err(ConfigError::for_field(
                "wordmark.letters",
                "Wordmark needs at least one letter",
            ));
        }

        if self.wordmark.letters.len() > size as usize {
            return Err(ConfigError::for_field(
                "wordmark.letters",
                format!("Wordmark must have at most {} letters", size),
            ));
        }
        let run_width = self.wordmark.spacing as u64 * (self.wordmark.letters.len() as u64 - 1);
        if run_width > size as u64 {
            return Err(ConfigError::for_field(
                "wordmark.spacing",
                format!("Letter run of {}px does not fit the {}px canvas", run_width, size),
            ));
        }
        let limit = size as i64;
        if (self.wordmark.vertical_offset as i64).abs() > limit {
            return Err(ConfigError::for_field(
                "wordmark.vertical_offset",
                format!("Vertical offset must be within ±{}", size),
            ));
        }
        let (dx, dy) = self.wordmark.shadow_offset;
        if (dx as i64).abs() > limit || (dy as i64).abs() > limit {
            return Err(ConfigError::for_field(
                "wordmark.shadow_offset",
                format!("Shadow offset must be within ±{} on both axes", size),
            ));
        }

        if self.output.sizes.contains(&0) {
            return Err(ConfigError::for_field(
                "output.sizes",
                "Export sizes must be positive",
            ));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.output.sizes.iter().find(|s| !seen.insert(**s)) {
            return Err(ConfigError::for_field(
                "output.sizes",
                format!("Export size {} is listed twice", dup),
            ));
        }

        Palette::from_config(self)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IconConfig::default();
        assert_eq!(config.canvas.size, 1024);
        assert_eq!(config.plate.radius, 450);
        assert_eq!(config.fonts.size, 280.0);
        assert_eq!(config.fonts.candidates.len(), 2);
        assert_eq!(config.wordmark.spacing, 200);
        assert_eq!(config.wordmark.vertical_offset, -20);
        assert_eq!(config.wordmark.shadow_offset, (4, 4));
        assert_eq!(config.output.sizes, vec![16, 32, 64, 128, 256, 512]);
        assert!(config.output.directory.ends_with("assets/icons"));

        let glyphs: String = config.wordmark.letters.iter().map(|l| l.glyph).collect();
        assert_eq!(glyphs, "LAMA");
    }

    #[test]
    fn test_default_palette() {
        let palette = Palette::from_config(&IconConfig::default()).unwrap();
        assert_eq!(palette.background, Rgba([10, 10, 10, 255]));
        assert_eq!(palette.plate_fill, Rgba([20, 20, 20, 255]));
        assert_eq!(palette.plate_outline, Rgba([40, 40, 40, 255]));
        assert_eq!(palette.shadow, Rgba([0, 0, 0, 128]));
        assert_eq!(
            palette.letters,
            vec![
                Rgba([0xef, 0x44, 0x44, 255]),
                Rgba([0xea, 0xb3, 0x08, 255]),
                Rgba([0x22, 0xc5, 0x5e, 255]),
                Rgba([0xa8, 0x55, 0xf7, 255]),
            ]
        );
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#ff0000"), Some(Rgba([255, 0, 0, 255])));
        assert_eq!(parse_hex("00ff00"), Some(Rgba([0, 255, 0, 255])));
        assert_eq!(parse_hex("#00000080"), Some(Rgba([0, 0, 0, 128])));
        assert_eq!(parse_hex("#invalid"), None);
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#ééé"), None);
    }

    #[test]
    fn test_config_validation() {
        let mut config = IconConfig::default();
        assert!(config.validate().is_ok());

        config.plate.radius = 600;
        let err = config.validate().unwrap_err();
        assert_eq!(err.field.as_deref(), Some("plate.radius"));
        config.plate.radius = 450;

        config.wordmark.letters.clear();
        assert!(config.validate().is_err());
        config.wordmark.letters = default_letters();

        config.output.sizes = vec![16, 0];
        assert!(config.validate().is_err());
        config.output.sizes = vec![32, 32];
        assert!(config.validate().is_err());
        config.output.sizes = default_export_sizes();

        config.canvas.size = MAX_CANVAS_SIZE + 1;
        let err = config.validate().unwrap_err();
        assert_eq!(err.field.as_deref(), Some("canvas.size"));
        config.canvas.size = 1024;

        config.wordmark.letters[2].color = "green".to_string();
        let err = config.validate().unwrap_err();
        assert_eq!(err.field.as_deref(), Some("wordmark.letters[2].color"));
    }

    #[test]
    fn test_wordmark_geometry_bounds() {
        let mut config = IconConfig::default();

        config.wordmark.spacing = 1_000_000_000;
        let err = config.validate().unwrap_err();
        assert_eq!(err.field.as_deref(), Some("wordmark.spacing"));

        // Widest run that still fits: 3 gaps spanning the whole canvas
        config.wordmark.spacing = 341;
        assert!(config.validate().is_ok());
        config.wordmark.spacing = 342;
        assert!(config.validate().is_err());
        config.wordmark.spacing = 200;

        config.wordmark.vertical_offset = i32::MAX;
        let err = config.validate().unwrap_err();
        assert_eq!(err.field.as_deref(), Some("wordmark.vertical_offset"));
        config.wordmark.vertical_offset = i32::MIN;
        assert!(config.validate().is_err());
        config.wordmark.vertical_offset = -20;

        config.wordmark.shadow_offset = (4, i32::MIN);
        let err = config.validate().unwrap_err();
        assert_eq!(err.field.as_deref(), Some("wordmark.shadow_offset"));
        config.wordmark.shadow_offset = (-1024, 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_toml_parsing() {
        let toml_str = r##"
            [canvas]
            size = 512

            [plate]
            radius = 200

            [fonts]
            candidates = ["/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"]
            size = 140.0

            [wordmark]
            spacing = 100
            letters = [
                { glyph = "O", color = "#ffffff" },
                { glyph = "K", color = "#00ff00" },
            ]

            [output]
            sizes = [48, 96]
        "##;

        let config: IconConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.canvas.size, 512);
        assert_eq!(config.canvas.background, "#0a0a0a");
        assert_eq!(config.plate.radius, 200);
        assert_eq!(config.plate.outline_width, 2);
        assert_eq!(config.fonts.candidates.len(), 1);
        assert_eq!(config.wordmark.letters[1], WordmarkLetter::new('K', "#00ff00"));
        assert_eq!(config.wordmark.vertical_offset, -20);
        assert_eq!(config.output.sizes, vec![48, 96]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_effective_config_dumps_as_loadable_toml() {
        let mut config = IconConfig::default();
        config.output.directory = PathBuf::from("/tmp/lama-icons");
        config.wordmark.shadow_offset = (2, 6);

        let dumped = config.to_toml().unwrap();
        assert!(dumped.contains("[wordmark]"));

        let reloaded: IconConfig = toml::from_str(&dumped).unwrap();
        assert_eq!(reloaded.wordmark.letters, config.wordmark.letters);
        assert_eq!(reloaded.wordmark.shadow_offset, (2, 6));
        assert_eq!(reloaded.output.directory, config.output.directory);
        assert_eq!(reloaded.fonts.candidates, config.fonts.candidates);
    }

    #[test]
    fn test_cli_overrides() {
        let args = CliArgs {
            output: Some(PathBuf::from("/tmp/out")),
            fonts: vec![PathBuf::from("a.ttf"), PathBuf::from("b.ttf")],
            ..CliArgs::default()
        };
        let config = IconConfig::load_with_args(&args).unwrap();
        assert_eq!(config.output.directory, PathBuf::from("/tmp/out"));
        assert_eq!(config.fonts.candidates.len(), 2);

        let args = CliArgs {
            no_system_fonts: true,
            ..CliArgs::default()
        };
        let config = IconConfig::load_with_args(&args).unwrap();
        assert!(config.fonts.candidates.is_empty());
    }

    #[test]
    fn test_cli_parsing() {
        let args = CliArgs::parse_from([
            "generate-icon",
            "--output",
            "out",
            "--font",
            "one.ttf",
            "--font",
            "two.ttf",
        ]);
        assert_eq!(args.output, Some(PathBuf::from("out")));
        assert_eq!(args.fonts, vec![PathBuf::from("one.ttf"), PathBuf::from("two.ttf")]);
        assert!(!args.no_system_fonts);
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let args = CliArgs {
            config: Some(PathBuf::from("/nonexistent/lama-icon.toml")),
            ..CliArgs::default()
        };
        assert!(IconConfig::load_with_args(&args).is_err());
    }
}
