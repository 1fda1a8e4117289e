//! cp862term - render DOS Hebrew text files as terminal screenshots
//!
//! Input is a byte stream in code page 862, optionally carrying ANSI
//! cursor and color escapes. Output is an image of how a period 80-column
//! color terminal would have shown it.
//!
//! ```no_run
//! use cp862term::{render_buffer, ConvertOptions, FontRenderer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut font = FontRenderer::with_default_font(16.0)?;
//! let bytes = std::fs::read("MENU.TXT")?;
//! let image = render_buffer(&bytes, &ConvertOptions::default(), &mut font)?;
//! image.save("menu.png")?;
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod convert;
pub mod core;
pub mod error;
pub mod render;

pub use batch::{run_batch, BatchOptions, BatchSummary};
pub use config::{CliArgs, Config};
pub use convert::{convert_file, render_buffer, ConvertOptions};
pub use error::{ConfigError, ConvertError, FontError};
pub use render::{CellAttrs, Color, FontRenderer, GlyphRenderer};
