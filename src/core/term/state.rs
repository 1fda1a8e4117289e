//! Virtual terminal state
//!
//! A fixed-width, unbounded-height screen. Rows are row images created on
//! demand as the cursor writes into them, so the finished screen is exactly
//! as tall as the content. There is no scrolling: moving down past the last
//! row simply makes the screen longer, up to [`MAX_ROWS`] rows. Writes
//! past that are dropped.

use image::{imageops, RgbImage};

use super::parser::{self, Command, EraseMode, SgrOp};
use super::tokenizer::Token;
use crate::render::{blank_row, AttrFlags, CellAttrs, GlyphRenderer, CELL_HEIGHT, CELL_WIDTH};

/// CP862 maps 0x05 to a club suit, but in real files that byte is noise
/// and never meant to be shown.
const SUPPRESSED_GLYPH: char = '♣';

/// Tallest screen a conversion may produce, in rows
pub const MAX_ROWS: usize = 4096;

/// Cursor position, 0-based
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    /// In `0..=width`; `width` means "past the last column"
    pub col: u32,
}

/// Terminal state for one conversion.
///
/// Created per input buffer, fed every token in order, then consumed by
/// [`TerminalState::finalize`].
pub struct TerminalState<'r, R: GlyphRenderer + ?Sized> {
    width: u32,
    cursor: Cursor,
    attrs: CellAttrs,
    saved: Option<Cursor>,
    /// Set after an auto-wrap so the line's own newline does not add a blank row
    skip_next_newline: bool,
    /// A write went past `MAX_ROWS`; reported once per conversion
    overflowed: bool,
    rows: Vec<RgbImage>,
    renderer: &'r mut R,
}

impl<'r, R: GlyphRenderer + ?Sized> TerminalState<'r, R> {
    pub fn new(width: u32, renderer: &'r mut R) -> Self {
        Self {
            width,
            cursor: Cursor::default(),
            attrs: CellAttrs::default(),
            saved: None,
            skip_next_newline: false,
            overflowed: false,
            rows: Vec::new(),
            renderer,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn attrs(&self) -> &CellAttrs {
        &self.attrs
    }

    pub fn saved_position(&self) -> Option<Cursor> {
        self.saved
    }

    /// Number of rows created so far
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Apply one token
    pub fn feed(&mut self, token: Token<'_>) {
        match token {
            Token::Char(ch) => self.write(ch),
            Token::Escape(span) => self.apply(&parser::parse(span)),
        }
    }

    /// Apply a parsed escape sequence
    pub fn apply(&mut self, command: &Command) {
        match command {
            Command::CursorUp(n) => self.move_up(*n),
            Command::CursorForward(n) => self.move_right(*n),
            Command::CursorBack(n) => self.move_left(*n),
            Command::CursorPosition { row, col } => {
                self.set_position(row.saturating_sub(1) as usize, col.saturating_sub(1));
            }
            Command::EraseInDisplay(mode) => self.erase_in_display(*mode),
            Command::Sgr(ops) => self.sgr(ops),
            Command::SavePosition => self.save_position(),
            Command::RestorePosition => self.restore_position(),
            Command::Unsupported => {}
        }
    }

    /// Write one character at the cursor
    pub fn write(&mut self, ch: char) {
        match ch {
            '\n' => {
                if self.skip_next_newline {
                    self.skip_next_newline = false;
                } else {
                    self.cursor.row = self.cursor.row.saturating_add(1);
                    self.cursor.col = 0;
                }
            }
            '\r' | SUPPRESSED_GLYPH => {}
            _ => {
                // Cursor parked past the last column by CUF/CUP
                if self.cursor.col >= self.width {
                    self.cursor.row = self.cursor.row.saturating_add(1);
                    self.cursor.col = 0;
                }

                let Cursor { row, col } = self.cursor;
                if row >= MAX_ROWS {
                    if !self.overflowed {
                        tracing::warn!(
                            "Row {} is past the {} row limit, dropping output",
                            row.saturating_add(1),
                            MAX_ROWS
                        );
                        self.overflowed = true;
                    }
                    return;
                }
                self.ensure_row(row);
                self.renderer.draw(&mut self.rows[row], row, col, ch, &self.attrs);

                self.cursor.col += 1;
                self.skip_next_newline = false;

                if self.cursor.col == self.width {
                    self.cursor.row += 1;
                    self.cursor.col = 0;
                    self.skip_next_newline = true;
                }
            }
        }
    }

    fn ensure_row(&mut self, row: usize) {
        while self.rows.len() <= row {
            self.rows.push(blank_row(self.width));
        }
    }

    pub fn move_right(&mut self, n: u32) {
        self.cursor.col = self.cursor.col.saturating_add(n).min(self.width);
    }

    pub fn move_left(&mut self, n: u32) {
        self.cursor.col = self.cursor.col.saturating_sub(n);
    }

    pub fn move_up(&mut self, n: u32) {
        self.cursor.row = self.cursor.row.saturating_sub(n as usize);
    }

    /// Only a full-screen erase does anything; partial erases are ignored.
    pub fn erase_in_display(&mut self, mode: EraseMode) {
        match mode {
            EraseMode::EntireScreen => {
                self.rows.clear();
                self.cursor = Cursor::default();
                self.skip_next_newline = false;
            }
            EraseMode::ToEnd | EraseMode::ToStart => {}
        }
    }

    pub fn sgr(&mut self, ops: &[SgrOp]) {
        for op in ops {
            match *op {
                SgrOp::Reset => self.attrs.reset(),
                SgrOp::SetBold => self.attrs.flags |= AttrFlags::BOLD,
                SgrOp::SetForeground(color) => self.attrs.fg = color,
                SgrOp::SetBackground(color) => self.attrs.bg = color,
            }
        }
    }

    pub fn save_position(&mut self) {
        self.saved = Some(self.cursor);
    }

    /// Restore and forget the saved position
    pub fn restore_position(&mut self) {
        match self.saved.take() {
            Some(cursor) => self.cursor = cursor,
            None => tracing::warn!("Attempt to restore position when position not saved"),
        }
    }

    /// Absolute move, 0-based. The column is clamped to the screen width.
    pub fn set_position(&mut self, row: usize, col: u32) {
        self.cursor = Cursor {
            row,
            col: col.min(self.width),
        };
    }

    /// Stack the rows into the final image. An empty screen is one blank row.
    pub fn finalize(mut self) -> RgbImage {
        if self.rows.is_empty() {
            self.rows.push(blank_row(self.width));
        }

        // rows.len() <= MAX_ROWS, so neither side can overflow
        let height = u32::try_from(self.rows.len())
            .map_or(u32::MAX, |n| n.saturating_mul(CELL_HEIGHT));
        let mut output = RgbImage::new(self.width.saturating_mul(CELL_WIDTH), height);
        for (i, row) in self.rows.iter().enumerate() {
            imageops::replace(&mut output, row, 0, i as i64 * CELL_HEIGHT as i64);
        }
        output
    }
}
