//! LAMA Icon Generator
//!
//! Procedurally draws the LAMA application icon and exports it as PNG files.
//! The crate is organized as:
//!
//! - `config`: embedded constants, TOML overrides and CLI arguments
//! - `error`: the crate error type
//! - `canvas`: the RGBA canvas and its drawing primitives
//! - `font`: font acquisition with a fallback chain
//! - `builtin_font`: bitmap font used when no font file loads
//! - `layout`: glyph anchor positions for the wordmark
//! - `renderer`: the render procedure
//! - `export`: PNG output at the base and resampled sizes

pub mod builtin_font;
pub mod canvas;
pub mod config;
pub mod error;
pub mod export;
pub mod font;
pub mod layout;
pub mod renderer;

pub use config::{CliArgs, ConfigError, IconConfig};
pub use error::{IconError, Result};
pub use renderer::IconRenderer;
