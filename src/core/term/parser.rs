//! Escape sequence parser
//!
//! Turns a raw escape span from the tokenizer into a [`Command`]. The final
//! byte selects the function; everything between the introducer and the
//! final byte is the parameter region.

use std::num::IntErrorKind;
use std::str;

use crate::render::palette::Color;

/// ED (erase in display) mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseMode {
    /// Cursor to end of screen
    ToEnd,
    /// Start of screen to cursor
    ToStart,
    /// Whole screen
    EntireScreen,
}

/// Single SGR attribute change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SgrOp {
    Reset,
    SetBold,
    SetForeground(Color),
    SetBackground(Color),
}

/// A parsed escape sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// CUU - ESC [ n A
    CursorUp(u32),
    /// CUF - ESC [ n C
    CursorForward(u32),
    /// CUB - ESC [ n D
    CursorBack(u32),
    /// CUP - ESC [ row ; col H, 1-based
    CursorPosition { row: u32, col: u32 },
    /// ED - ESC [ n J
    EraseInDisplay(EraseMode),
    /// SGR - ESC [ ... m
    Sgr(Vec<SgrOp>),
    /// SCP - ESC [ s
    SavePosition,
    /// RCP - ESC [ u
    RestorePosition,
    Unsupported,
}

const FGCOLOR_BASE: u32 = 30;
const BGCOLOR_BASE: u32 = 40;

/// Raw parameters of one escape span
struct RawParams<'a> {
    region: &'a [u8],
    values: Vec<u32>,
}

impl<'a> RawParams<'a> {
    fn split(span: &'a [u8]) -> Self {
        // ESC [ ... F carries parameters; ESC F carries none
        let region: &[u8] = if span.len() > 2 { &span[2..span.len() - 1] } else { &[] };

        let mut values = Vec::new();
        if !region.is_empty() {
            for raw in region.split(|&b| b == b';') {
                match parse_int(raw) {
                    Some(v) => values.push(v),
                    None if raw.is_empty() => {
                        tracing::debug!("Empty argument in {:?}", String::from_utf8_lossy(span));
                    }
                    None => {
                        tracing::warn!(
                            "Unable to parse argument {:?} of {:?}",
                            String::from_utf8_lossy(raw),
                            String::from_utf8_lossy(span)
                        );
                    }
                }
            }
        }

        Self { region, values }
    }

    fn first_or(&self, default: u32) -> u32 {
        self.values.first().copied().unwrap_or(default)
    }
}

/// Values too large for `u32` saturate; the cursor clamps them later.
fn parse_int(raw: &[u8]) -> Option<u32> {
    match str::from_utf8(raw).ok()?.trim().parse::<u32>() {
        Ok(value) => Some(value),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(u32::MAX),
        Err(_) => None,
    }
}

/// Parse a complete escape span (ESC included).
pub fn parse(span: &[u8]) -> Command {
    let Some(&final_byte) = span.last() else {
        return Command::Unsupported;
    };
    let params = RawParams::split(span);

    match final_byte {
        b'A' => Command::CursorUp(params.first_or(1)),
        b'C' => Command::CursorForward(params.first_or(1)),
        b'D' => Command::CursorBack(params.first_or(1)),
        b'H' => cursor_position(&params),
        b'J' => match params.first_or(0) {
            0 => Command::EraseInDisplay(EraseMode::ToEnd),
            1 => Command::EraseInDisplay(EraseMode::ToStart),
            2 => Command::EraseInDisplay(EraseMode::EntireScreen),
            mode => {
                tracing::debug!("Unsupported erase mode {}", mode);
                Command::Unsupported
            }
        },
        b'm' => Command::Sgr(params.values.iter().filter_map(|&v| sgr_op(v)).collect()),
        b's' => Command::SavePosition,
        b'u' => Command::RestorePosition,
        _ => {
            tracing::warn!(
                "Unsupported function {:?} in {:?}",
                final_byte as char,
                String::from_utf8_lossy(span)
            );
            Command::Unsupported
        }
    }
}

/// CUP arguments. With a single value the separator position tells which
/// coordinate was given: `;5` is column 5, `3;` is row 3. A lone value
/// with no separator names neither and homes the cursor.
fn cursor_position(params: &RawParams<'_>) -> Command {
    let (row, col) = match params.values.as_slice() {
        [only] if params.region.first() == Some(&b';') => (1, *only),
        [only] if params.region.last() == Some(&b';') => (*only, 1),
        [] | [_] => (1, 1),
        [row, col, ..] => (*row, *col),
    };
    Command::CursorPosition { row, col }
}

fn sgr_op(value: u32) -> Option<SgrOp> {
    match value {
        0 => Some(SgrOp::Reset),
        1 => Some(SgrOp::SetBold),
        30..=37 => Color::from_index(value - FGCOLOR_BASE).map(SgrOp::SetForeground),
        40..=47 => Color::from_index(value - BGCOLOR_BASE).map(SgrOp::SetBackground),
        _ => {
            tracing::debug!("Unsupported SGR argument {}", value);
            None
        }
    }
}
