//! Raster output.
//!
//! The terminal draws one row image per text line. Drawing a glyph into a
//! row is delegated to a [`GlyphRenderer`] so the state machine does not
//! depend on a particular font backend.
//!
//! - **palette**: the eight ANSI colors, normal and bold
//! - **font**: [`FontRenderer`], the fontdue-backed glyph renderer

pub mod font;
pub mod palette;

use bitflags::bitflags;
use image::RgbImage;

pub use font::FontRenderer;
pub use palette::Color;

/// Width of one character cell in pixels
pub const CELL_WIDTH: u32 = 8;
/// Height of one character cell in pixels
pub const CELL_HEIGHT: u32 = 13;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct AttrFlags: u8 {
        const BOLD = 0b0000_0001;
    }
}

/// Style applied to a written character
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellAttrs {
    pub fg: Color,
    pub bg: Color,
    pub flags: AttrFlags,
}

impl Default for CellAttrs {
    fn default() -> Self {
        Self {
            fg: Color::White,
            bg: Color::Black,
            flags: AttrFlags::empty(),
        }
    }
}

impl CellAttrs {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_bold(&self) -> bool {
        self.flags.contains(AttrFlags::BOLD)
    }

    /// Foreground pixel color; bold selects the bright palette
    pub fn fg_rgb(&self) -> image::Rgb<u8> {
        self.fg.rgb(self.is_bold())
    }

    /// Background pixel color; always the normal palette
    pub fn bg_rgb(&self) -> image::Rgb<u8> {
        self.bg.rgb(false)
    }
}

/// Draws single glyphs into a row image.
pub trait GlyphRenderer {
    /// Draw `ch` at cell `col` of `canvas`, which is the image for text row
    /// `row`. The renderer owns the whole cell rectangle, background included.
    fn draw(&mut self, canvas: &mut RgbImage, row: usize, col: u32, ch: char, attrs: &CellAttrs);
}

/// A row image filled with the default background
pub fn blank_row(width: u32) -> RgbImage {
    RgbImage::from_pixel(width * CELL_WIDTH, CELL_HEIGHT, CellAttrs::default().bg_rgb())
}

/// Fill one cell of a row image with a solid color.
pub fn fill_cell(canvas: &mut RgbImage, col: u32, color: image::Rgb<u8>) {
    let x0 = col * CELL_WIDTH;
    let x1 = (x0 + CELL_WIDTH).min(canvas.width());
    let y1 = CELL_HEIGHT.min(canvas.height());
    for y in 0..y1 {
        for x in x0..x1 {
            canvas.put_pixel(x, y, color);
        }
    }
}

/// Renderer that paints backgrounds and remembers every draw call.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub struct DrawCall {
        pub row: usize,
        pub col: u32,
        pub ch: char,
        pub attrs: CellAttrs,
    }

    #[derive(Debug, Default)]
    pub struct RecordingRenderer {
        pub calls: Vec<DrawCall>,
    }

    impl RecordingRenderer {
        pub fn chars(&self) -> String {
            self.calls.iter().map(|c| c.ch).collect()
        }
    }

    impl GlyphRenderer for RecordingRenderer {
        fn draw(&mut self, canvas: &mut RgbImage, row: usize, col: u32, ch: char, attrs: &CellAttrs) {
            fill_cell(canvas, col, attrs.bg_rgb());
            self.calls.push(DrawCall {
                row,
                col,
                ch,
                attrs: *attrs,
            });
        }
    }
}
