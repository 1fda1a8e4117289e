//! Byte stream tokenizer
//!
//! Splits a raw CP862 buffer into printable characters and 7-bit escape
//! sequences. Recognized sequences are:
//!
//! ```text
//! ESC Fe                      Fe in 0x40-0x5F except '['
//! ESC [ P* I* F               P in 0x30-0x3F, I in 0x20-0x2F, F in 0x40-0x7E
//! ```
//!
//! An ESC that does not start a complete sequence is an ordinary byte and
//! goes through the code page table like any other.

use crate::core::codepage;

const ESC: u8 = 0x1B;

/// One unit of input, in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A single translated byte
    Char(char),
    /// A complete escape sequence, ESC included
    Escape(&'a [u8]),
}

impl Token<'_> {
    /// Number of input bytes this token covers
    pub fn byte_len(&self) -> usize {
        match self {
            Token::Char(_) => 1,
            Token::Escape(span) => span.len(),
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum ScanState {
    Escape,
    CsiParam,
    CsiIntermediate,
}

/// Length of the escape sequence starting at `buf[0]`, if there is one.
fn escape_len(buf: &[u8]) -> Option<usize> {
    if buf.first() != Some(&ESC) {
        return None;
    }

    let mut state = ScanState::Escape;
    for (i, &byte) in buf.iter().enumerate().skip(1) {
        match (state, byte) {
            (ScanState::Escape, b'[') => state = ScanState::CsiParam,
            (ScanState::Escape, 0x40..=0x5F) => return Some(i + 1),
            (ScanState::Escape, _) => return None,

            (ScanState::CsiParam, 0x30..=0x3F) => {}
            (ScanState::CsiParam | ScanState::CsiIntermediate, 0x20..=0x2F) => {
                state = ScanState::CsiIntermediate;
            }
            (ScanState::CsiParam | ScanState::CsiIntermediate, 0x40..=0x7E) => return Some(i + 1),
            (ScanState::CsiParam | ScanState::CsiIntermediate, _) => return None,
        }
    }

    // Ran out of input mid-sequence
    None
}

/// Iterator over the tokens of a buffer
pub struct Tokens<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let rest = self.buf.get(self.pos..).filter(|r| !r.is_empty())?;

        let token = match escape_len(rest) {
            Some(len) => Token::Escape(&rest[..len]),
            None => Token::Char(codepage::translate(rest[0])),
        };
        self.pos += token.byte_len();
        Some(token)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buf.len().saturating_sub(self.pos);
        (remaining.min(1), Some(remaining))
    }
}

/// Tokenize a buffer. Never fails; every byte ends up in exactly one token.
pub fn tokenize(buf: &[u8]) -> Tokens<'_> {
    Tokens { buf, pos: 0 }
}

/// Collecting variant of [`tokenize`]
pub fn decode(buf: &[u8]) -> Vec<Token<'_>> {
    tokenize(buf).collect()
}
