//! Built-in 5×7 proportional font
//!
//! Column bytes, leftmost column first, bit 6 the top pixel row. Widths vary
//! per character; callers insert their own inter-character spacing.

use crate::glyph::Glyph;

/// Single blank column used between characters
pub const BLANK: &[u8] = &[0x00];

/// Drawn for characters the font does not cover (a question mark)
pub const FALLBACK: &[u8] = &[0x20, 0x4F, 0x48, 0x30];

/// Printable ASCII, sorted by code point
pub static GLYPHS: &[Glyph] = &[
    Glyph::new(' ', &[0x00, 0x00, 0x00]),
    Glyph::new('!', &[0x7D]),
    Glyph::new('"', &[0x60, 0x60]),
    Glyph::new('#', &[0x14, 0x7F, 0x14, 0x7F, 0x14]),
    Glyph::new('$', &[0x32, 0x49, 0x7F, 0x49, 0x26]),
    Glyph::new('%', &[0x31, 0x4A, 0x4C, 0x3E, 0x19, 0x29, 0x46]),
    Glyph::new('&', &[0x37, 0x49, 0x45, 0x2B, 0x07]),
    Glyph::new('\'', &[0x60]),
    Glyph::new('(', &[0x3E, 0x41]),
    Glyph::new(')', &[0x41, 0x3E]),
    Glyph::new('*', &[0x28, 0x10, 0x7C, 0x10, 0x28]),
    Glyph::new('+', &[0x08, 0x08, 0x3E, 0x08, 0x08]),
    Glyph::new(',', &[0x01, 0x06]),
    Glyph::new('-', &[0x08, 0x08, 0x08, 0x08, 0x08]),
    Glyph::new('.', &[0x01]),
    Glyph::new('/', &[0x03, 0x1C, 0x60]),
    Glyph::new('0', &[0x3E, 0x41, 0x41, 0x41, 0x3E]),
    Glyph::new('1', &[0x20, 0x7F]),
    Glyph::new('2', &[0x21, 0x43, 0x45, 0x49, 0x31]),
    Glyph::new('3', &[0x22, 0x41, 0x49, 0x49, 0x36]),
    Glyph::new('4', &[0x1C, 0x24, 0x44, 0x7F, 0x04]),
    Glyph::new('5', &[0x72, 0x51, 0x51, 0x51, 0x4E]),
    Glyph::new('6', &[0x1E, 0x29, 0x49, 0x49, 0x06]),
    Glyph::new('7', &[0x60, 0x40, 0x47, 0x58, 0x60]),
    Glyph::new('8', &[0x36, 0x49, 0x49, 0x49, 0x36]),
    Glyph::new('9', &[0x30, 0x49, 0x49, 0x4A, 0x3C]),
    Glyph::new(':', &[0x36]),
    Glyph::new(';', &[0x01, 0x36]),
    Glyph::new('<', &[0x08, 0x14, 0x22]),
    Glyph::new('=', &[0x14, 0x14, 0x14, 0x14]),
    Glyph::new('>', &[0x22, 0x14, 0x08]),
    Glyph::new('?', &[0x20, 0x4F, 0x48, 0x30]),
    Glyph::new('@', &[0x1F, 0x10, 0x17, 0x15, 0x1F]),
    Glyph::new('A', &[0x3F, 0x48, 0x48, 0x48, 0x3F]),
    Glyph::new('B', &[0x7F, 0x49, 0x49, 0x49, 0x36]),
    Glyph::new('C', &[0x3E, 0x41, 0x41, 0x41, 0x22]),
    Glyph::new('D', &[0x7F, 0x41, 0x41, 0x41, 0x3E]),
    Glyph::new('E', &[0x7F, 0x49, 0x49, 0x41]),
    Glyph::new('F', &[0x7F, 0x48, 0x48, 0x40]),
    Glyph::new('G', &[0x3E, 0x41, 0x41, 0x49, 0x2F]),
    Glyph::new('H', &[0x7F, 0x08, 0x08, 0x08, 0x7F]),
    Glyph::new('I', &[0x7F]),
    Glyph::new('J', &[0x02, 0x01, 0x41, 0x7E]),
    Glyph::new('K', &[0x7F, 0x08, 0x14, 0x22, 0x41]),
    Glyph::new('L', &[0x7F, 0x01, 0x01, 0x01]),
    Glyph::new('M', &[0x7F, 0x20, 0x10, 0x08, 0x10, 0x20, 0x7F]),
    Glyph::new('N', &[0x7F, 0x20, 0x10, 0x08, 0x04, 0x7F]),
    Glyph::new('O', &[0x3E, 0x41, 0x41, 0x41, 0x3E]),
    Glyph::new('P', &[0x7F, 0x48, 0x48, 0x48, 0x30]),
    Glyph::new('Q', &[0x3C, 0x42, 0x46, 0x42, 0x3D]),
    Glyph::new('R', &[0x7F, 0x48, 0x48, 0x48, 0x37]),
    Glyph::new('S', &[0x32, 0x49, 0x49, 0x49, 0x26]),
    Glyph::new('T', &[0x40, 0x40, 0x7F, 0x40, 0x40]),
    Glyph::new('U', &[0x7E, 0x01, 0x01, 0x01, 0x7E]),
    Glyph::new('V', &[0x78, 0x06, 0x01, 0x06, 0x78]),
    Glyph::new('W', &[0x7E, 0x01, 0x01, 0x7E, 0x01, 0x01, 0x7E]),
    Glyph::new('X', &[0x41, 0x22, 0x1C, 0x22, 0x41]),
    Glyph::new('Y', &[0x60, 0x10, 0x0F, 0x10, 0x60]),
    Glyph::new('Z', &[0x43, 0x45, 0x49, 0x51, 0x61]),
    Glyph::new('[', &[0x7F, 0x41]),
    Glyph::new('\\', &[0x60, 0x1C, 0x03]),
    Glyph::new(']', &[0x41, 0x7F]),
    Glyph::new('^', &[0x20, 0x40, 0x20]),
    Glyph::new('_', &[0x01, 0x01, 0x01]),
    Glyph::new('`', &[0x40, 0x20]),
    Glyph::new('a', &[0x0E, 0x11, 0x11, 0x1F]),
    Glyph::new('b', &[0x7F, 0x11, 0x11, 0x0E]),
    Glyph::new('c', &[0x0E, 0x11, 0x11, 0x11]),
    Glyph::new('d', &[0x0E, 0x11, 0x11, 0x7F]),
    Glyph::new('e', &[0x0E, 0x15, 0x15, 0x0D]),
    Glyph::new('f', &[0x10, 0x3F, 0x50]),
    Glyph::new('g', &[0x01, 0x15, 0x15, 0x15, 0x0E]),
    Glyph::new('h', &[0x7F, 0x10, 0x10, 0x10, 0x0F]),
    Glyph::new('i', &[0x10, 0x5F]),
    Glyph::new('j', &[0x11, 0x5E]),
    Glyph::new('k', &[0x7F, 0x06, 0x0A, 0x11]),
    Glyph::new('l', &[0x7E, 0x01]),
    Glyph::new('m', &[0x1F, 0x10, 0x10, 0x0F, 0x10, 0x10, 0x0F]),
    Glyph::new('n', &[0x1F, 0x10, 0x10, 0x0F]),
    Glyph::new('o', &[0x0E, 0x11, 0x11, 0x0E]),
    Glyph::new('p', &[0x3F, 0x24, 0x24, 0x18]),
    Glyph::new('q', &[0x18, 0x24, 0x24, 0x3F]),
    Glyph::new('r', &[0x1F, 0x08, 0x10]),
    Glyph::new('s', &[0x09, 0x15, 0x15, 0x12]),
    Glyph::new('t', &[0x10, 0x3E, 0x11]),
    Glyph::new('u', &[0x1E, 0x01, 0x01, 0x1F]),
    Glyph::new('v', &[0x1E, 0x01, 0x01, 0x1E]),
    Glyph::new('w', &[0x1E, 0x01, 0x01, 0x1E, 0x01, 0x01, 0x1E]),
    Glyph::new('x', &[0x1B, 0x04, 0x04, 0x1B]),
    Glyph::new('y', &[0x38, 0x05, 0x05, 0x3E]),
    Glyph::new('z', &[0x13, 0x14, 0x14, 0x19]),
    Glyph::new('{', &[0x08, 0x36, 0x41]),
    Glyph::new('|', &[0x77]),
    Glyph::new('}', &[0x41, 0x36, 0x08]),
    Glyph::new('~', &[0x08, 0x10, 0x08, 0x04, 0x08]),
];
