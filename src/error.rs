//! Error types for icon generation

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Icon generation error type
#[derive(Error, Debug)]
pub enum IconError {
    /// Filesystem error while creating the output directory or writing a file
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// PNG encoding failed
    #[error("Failed to encode {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Invalid or unreadable configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Canvas buffer could not be built
    #[error("Canvas error: {0}")]
    Canvas(String),
}

/// Result type for icon generation
pub type Result<T> = std::result::Result<T, IconError>;
