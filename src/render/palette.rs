//! The eight ANSI colors and their two fixed palettes.

use image::Rgb;

/// Standard ANSI color index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

/// Normal intensity, used for backgrounds and non-bold text
const NORMAL: [[u8; 3]; 8] = [
    [0x0C, 0x0C, 0x0C],
    [0xAA, 0x00, 0x00],
    [0x00, 0xAA, 0x00],
    [0xAA, 0x55, 0x00],
    [0x00, 0x37, 0xDA],
    [0xAA, 0x00, 0xAA],
    [0x00, 0xAA, 0xAA],
    [0xAA, 0xAA, 0xAA],
];

/// Bright variants, used for bold foregrounds
const BOLD: [[u8; 3]; 8] = [
    [0xCC, 0xCC, 0xCC],
    [0xFF, 0x55, 0x55],
    [0x55, 0xFF, 0x55],
    [0xFF, 0xFF, 0x55],
    [0x55, 0x55, 0xFF],
    [0xFF, 0x55, 0xFF],
    [0x55, 0xFF, 0xFF],
    [0xFF, 0xFF, 0xFF],
];

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
    ];

    /// Color for an SGR offset (30 + n / 40 + n)
    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn rgb(self, bold: bool) -> Rgb<u8> {
        if bold {
            Rgb(BOLD[self.index()])
        } else {
            Rgb(NORMAL[self.index()])
        }
    }
}
