//! Configuration for cp862term.
//!
//! Settings come from three places, highest precedence first:
//!
//! 1. Command line flags
//! 2. A TOML file (`--config PATH`, or `~/.cp862term/config.toml`)
//! 3. Built-in defaults
//!
//! ```toml
//! # Screen width in character cells (40-1000)
//! width = 80
//!
//! # Console font; a system monospace font is used when unset
//! font_path = "/usr/share/fonts/clacon2.ttf"
//! font_size = 16.0
//!
//! # Ignore color and cursor escape sequences
//! skip_escapes = false
//!
//! # Where batch output goes; defaults to next to each input
//! output_dir = "/tmp/rendered"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::convert::{ConvertOptions, CONSOLE_WIDTH_DEFAULT};
use crate::error::ConfigError;
use crate::render::font::DEFAULT_FONT_SIZE;

/// Command line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "cp862term")]
#[command(version)]
#[command(about = "Render CP862 (DOS Hebrew) text files with ANSI escapes as terminal screenshots", long_about = None)]
pub struct CliArgs {
    /// Input files or directories
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output image (single file input only)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Directory for output images
    #[arg(short = 'd', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Console width in cells (40-1000)
    #[arg(short, long, value_name = "COLS")]
    pub width: Option<u32>,

    /// TrueType/OpenType console font
    #[arg(short, long, value_name = "FONT")]
    pub font: Option<PathBuf>,

    /// Font size in pixels
    #[arg(long, value_name = "PX")]
    pub font_size: Option<f32>,

    /// Skip ANSI escape sequences
    #[arg(short, long)]
    pub skip_escapes: bool,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Append log output to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// File configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: u32,
    pub font_path: Option<PathBuf>,
    pub font_size: f32,
    pub skip_escapes: bool,
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: CONSOLE_WIDTH_DEFAULT,
            font_path: None,
            font_size: DEFAULT_FONT_SIZE,
            skip_escapes: false,
            output_dir: None,
        }
    }
}

impl Config {
    /// Load from an explicit path. Missing or malformed files are errors.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    /// Load `path` if given, else the default location if it exists.
    ///
    /// A broken file at the default location is reported and ignored.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load_from(path);
        }

        if let Some(path) = Self::default_path() {
            if path.exists() {
                match Self::load_from(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("{}; using defaults", e),
                }
            }
        }
        Ok(Self::default())
    }

    /// `~/.cp862term/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".cp862term").join("config.toml"))
    }

    /// Overlay command line flags
    pub fn merge_cli(mut self, args: &CliArgs) -> Self {
        if let Some(width) = args.width {
            self.width = width;
        }
        if let Some(font) = &args.font {
            self.font_path = Some(font.clone());
        }
        if let Some(size) = args.font_size {
            self.font_size = size;
        }
        if args.skip_escapes {
            self.skip_escapes = true;
        }
        if let Some(dir) = &args.output_dir {
            self.output_dir = Some(dir.clone());
        }
        self
    }

    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            width: self.width,
            skip_escapes: self.skip_escapes,
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.width, 80);
        assert_eq!(config.font_size, 16.0);
        assert!(!config.skip_escapes);
        assert_eq!(config.convert_options(), ConvertOptions::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "width = 132").unwrap();
        writeln!(file, "font_path = \"/fonts/clacon2.ttf\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.width, 132);
        assert_eq!(config.font_path, Some(PathBuf::from("/fonts/clacon2.ttf")));
        assert_eq!(config.font_size, DEFAULT_FONT_SIZE);
        assert_eq!(config.output_dir, None);
    }

    #[test]
    fn test_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "width = \"wide\"").unwrap();
        assert!(matches!(
            Config::load_from(file.path()),
            Err(ConfigError::Parse(..))
        ));
    }

    #[test]
    fn test_explicit_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/cp862term.toml")));
        assert!(matches!(result, Err(ConfigError::Read(..))));
    }

    #[test]
    fn test_cli_overrides_file() {
        let file_config = Config {
            width: 132,
            font_size: 20.0,
            skip_escapes: false,
            ..Config::default()
        };
        let args = CliArgs::parse_from(["cp862term", "-w", "100", "-s", "-d", "/out", "a.txt"]);
        let config = file_config.merge_cli(&args);

        assert_eq!(config.width, 100);
        assert_eq!(config.font_size, 20.0);
        assert!(config.skip_escapes);
        assert_eq!(config.output_dir, Some(PathBuf::from("/out")));
        assert_eq!(args.inputs, vec![PathBuf::from("a.txt")]);
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(CliArgs::try_parse_from(["cp862term"]).is_err());
    }

    #[test]
    fn test_round_trip_toml() {
        let config = Config {
            width: 120,
            output_dir: Some(PathBuf::from("/tmp/out")),
            ..Config::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
