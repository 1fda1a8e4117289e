//! Font-backed glyph renderer
//!
//! Rasterizes glyphs with fontdue and blends their coverage into the row
//! image. Glyphs are cached per character since DOS text reuses a small set
//! of box-drawing and letter glyphs over and over.

use std::collections::HashMap;
use std::path::Path;

use fontdue::{Font, FontSettings, Metrics};
use image::{Rgb, RgbImage};

use super::{fill_cell, CellAttrs, GlyphRenderer, CELL_WIDTH};
use crate::error::FontError;

/// Default pixel size, tuned for 8x13 console fonts
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

/// Monospace fonts tried when no font is configured
const FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeMono.ttf",
    "/Library/Fonts/Courier New.ttf",
    "C:\\Windows\\Fonts\\cour.ttf",
];

/// A rasterized glyph: metrics plus 8-bit coverage bitmap
#[derive(Debug, Clone)]
struct RasterizedGlyph {
    metrics: Metrics,
    bitmap: Vec<u8>,
}

/// Glyph renderer using a TrueType/OpenType font
pub struct FontRenderer {
    font: Font,
    font_size: f32,
    /// Baseline offset from the top of the cell
    baseline: i32,
    glyph_cache: HashMap<char, RasterizedGlyph>,
}

impl FontRenderer {
    /// Load a font file
    pub fn new(font_path: &Path, font_size: f32) -> Result<Self, FontError> {
        let font_data =
            std::fs::read(font_path).map_err(|e| FontError::Io(font_path.to_path_buf(), e))?;
        Self::from_bytes(&font_data, font_size)
    }

    /// Load font data already in memory
    pub fn from_bytes(font_data: &[u8], font_size: f32) -> Result<Self, FontError> {
        let font = Font::from_bytes(font_data, FontSettings::default())
            .map_err(|e| FontError::Parse(e.to_string()))?;

        let line_metrics = font
            .horizontal_line_metrics(font_size)
            .ok_or(FontError::NoLineMetrics)?;

        Ok(Self {
            font,
            font_size,
            baseline: line_metrics.ascent.round() as i32,
            glyph_cache: HashMap::new(),
        })
    }

    /// Load the first available system monospace font
    pub fn with_default_font(font_size: f32) -> Result<Self, FontError> {
        for path in FALLBACK_FONTS {
            match Self::new(Path::new(path), font_size) {
                Ok(renderer) => {
                    tracing::info!("Loaded font: {}", path);
                    return Ok(renderer);
                }
                Err(e) => tracing::trace!("Skipping font {}: {}", path, e),
            }
        }
        Err(FontError::NoFontFound)
    }

    /// Load `font_path` if given, otherwise fall back to a system font
    pub fn load(font_path: Option<&Path>, font_size: f32) -> Result<Self, FontError> {
        match font_path {
            Some(path) => Self::new(path, font_size),
            None => Self::with_default_font(font_size),
        }
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    fn rasterize(&mut self, ch: char) -> &RasterizedGlyph {
        let font = &self.font;
        let size = self.font_size;
        self.glyph_cache.entry(ch).or_insert_with(|| {
            let (metrics, bitmap) = font.rasterize(ch, size);
            RasterizedGlyph { metrics, bitmap }
        })
    }
}

impl GlyphRenderer for FontRenderer {
    fn draw(&mut self, canvas: &mut RgbImage, _row: usize, col: u32, ch: char, attrs: &CellAttrs) {
        fill_cell(canvas, col, attrs.bg_rgb());

        let fg = attrs.fg_rgb();
        let baseline = self.baseline;
        let glyph = self.rasterize(ch);
        let metrics = glyph.metrics;
        if metrics.width == 0 || metrics.height == 0 {
            return;
        }

        let left = (col * CELL_WIDTH) as i32 + metrics.xmin;
        let top = baseline - (metrics.height as i32 + metrics.ymin);

        for (i, &coverage) in glyph.bitmap.iter().enumerate() {
            if coverage == 0 {
                continue;
            }
            let x = left + (i % metrics.width) as i32;
            let y = top + (i / metrics.width) as i32;
            if x < 0 || y < 0 || x as u32 >= canvas.width() || y as u32 >= canvas.height() {
                continue;
            }
            let pixel = canvas.get_pixel_mut(x as u32, y as u32);
            *pixel = blend(*pixel, fg, coverage);
        }
    }
}

/// Alpha-blend `fg` over `dst` with 8-bit coverage
fn blend(dst: Rgb<u8>, fg: Rgb<u8>, coverage: u8) -> Rgb<u8> {
    let a = coverage as u16;
    let mix = |d: u8, f: u8| ((f as u16 * a + d as u16 * (255 - a) + 127) / 255) as u8;
    Rgb([mix(dst[0], fg[0]), mix(dst[1], fg[1]), mix(dst[2], fg[2])])
}
