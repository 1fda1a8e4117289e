//! Code page 862 translation table
//!
//! CP862 is the DOS Hebrew code page: the 22 Hebrew letters (plus the five
//! final forms) sit at 0x80-0x9A, and the rest of the upper half is shared
//! with CP437 (Latin accents, box drawing, Greek and math symbols). Control
//! bytes in the low range display as their CP437 glyphs, except for line
//! feed and carriage return which must keep their meaning for the terminal.

/// Glyphs for 0x00-0x1F. NUL, LF and CR pass through unchanged.
const LOW_GLYPHS: [char; 32] = [
    '\0', '☺', '☻', '♥', '♦', '♣', '♠', '•', '◘', '○', '\n', '♂', '♀', '\r', '♫', '☼',
    '►', '◄', '↕', '‼', '¶', '§', '▬', '↨', '↑', '↓', '→', '←', '∟', '↔', '▲', '▼',
];

/// Glyphs for 0x80-0xFF.
const HIGH_GLYPHS: [char; 128] = [
    // 0x80
    'א', 'ב', 'ג', 'ד', 'ה', 'ו', 'ז', 'ח', 'ט', 'י', 'ך', 'כ', 'ל', 'ם', 'מ', 'ן',
    // 0x90
    'נ', 'ס', 'ע', 'ף', 'פ', 'ץ', 'צ', 'ק', 'ר', 'ש', 'ת', '¢', '£', '¥', '₧', 'ƒ',
    // 0xA0
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    // 0xB0
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    // 0xC0
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    // 0xD0
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    // 0xE0
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    // 0xF0
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{A0}',
];

/// Full byte -> char table. Bytes 0x20-0x7F map to themselves.
pub static CP862: [char; 256] = build_table();

const fn build_table() -> [char; 256] {
    let mut table = ['\0'; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = if i < 0x20 {
            LOW_GLYPHS[i]
        } else if i >= 0x80 {
            HIGH_GLYPHS[i - 0x80]
        } else {
            i as u8 as char
        };
        i += 1;
    }
    table
}

/// Translate a single CP862 byte.
#[inline]
pub fn translate(byte: u8) -> char {
    CP862[byte as usize]
}
