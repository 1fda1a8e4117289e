//! Error types
//!
//! Only configuration-level problems are errors. Anything odd inside the
//! input stream itself is logged and skipped by the terminal.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("Failed to read font {}: {1}", .0.display())]
    Io(PathBuf, #[source] io::Error),

    #[error("Failed to parse font: {0}")]
    Parse(String),

    #[error("Font has no horizontal line metrics")]
    NoLineMetrics,

    #[error("No suitable font found; set font_path or pass --font")]
    NoFontFound,
}

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Console width {width} not in allowed range ({min}-{max})")]
    InvalidWidth { width: u32, min: u32, max: u32 },

    #[error(transparent)]
    Font(#[from] FontError),

    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {1}", .0.display())]
    Read(PathBuf, #[source] io::Error),

    #[error("Invalid config {}: {1}", .0.display())]
    Parse(PathBuf, #[source] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
