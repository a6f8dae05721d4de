//! Character to column-byte lookup
//!
//! Text on the sign is a run of column bytes. Each character contributes
//! its glyph's columns, separated by a delimiter run (normally one blank
//! column). Lookup never fails: characters outside the table render as the
//! fallback glyph so unsupported input is visible on the sign rather than
//! silently dropped.

use heapless::Vec;

use crate::font;

/// Longest column run a text encoding may produce
pub const MAX_COLUMNS: usize = 1024;

/// Logical column bytes, leftmost column first
pub type ColumnBytes = Vec<u8, MAX_COLUMNS>;

/// One character's columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// Character this glyph draws
    pub ch: char,
    /// Column bytes, leftmost first
    pub columns: &'static [u8],
}

impl Glyph {
    /// Create a glyph
    pub const fn new(ch: char, columns: &'static [u8]) -> Self {
        Self { ch, columns }
    }

    /// Width in columns
    pub const fn width(&self) -> usize {
        self.columns.len()
    }
}

/// Static glyph table with a fallback for unknown characters
#[derive(Debug, Clone, Copy)]
pub struct GlyphTable {
    glyphs: &'static [Glyph],
    fallback: &'static [u8],
    blank: &'static [u8],
}

impl Default for GlyphTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl GlyphTable {
    /// Create a table from static data
    ///
    /// `blank` is the all-zero run used as the default delimiter.
    pub const fn new(
        glyphs: &'static [Glyph],
        fallback: &'static [u8],
        blank: &'static [u8],
    ) -> Self {
        Self {
            glyphs,
            fallback,
            blank,
        }
    }

    /// Built-in 5×7 font
    pub const fn standard() -> Self {
        Self::new(font::GLYPHS, font::FALLBACK, font::BLANK)
    }

    /// Glyph for `ch`, if the table has one
    pub fn get(&self, ch: char) -> Option<&'static [u8]> {
        self.glyphs
            .iter()
            .find(|glyph| glyph.ch == ch)
            .map(|glyph| glyph.columns)
    }

    /// Columns for `ch`, or the fallback glyph
    pub fn lookup(&self, ch: char) -> &'static [u8] {
        self.get(ch).unwrap_or(self.fallback)
    }

    /// Glyph drawn for unknown characters
    pub const fn fallback(&self) -> &'static [u8] {
        self.fallback
    }

    /// Default inter-character delimiter
    pub const fn blank(&self) -> &'static [u8] {
        self.blank
    }

    /// All glyphs in the table
    pub const fn glyphs(&self) -> &'static [Glyph] {
        self.glyphs
    }

    /// Concatenate glyphs with `delimiter` repeated `repeat` times between
    /// characters
    ///
    /// No delimiter follows the last character, and an empty string encodes
    /// to nothing. Output past [`MAX_COLUMNS`] is dropped.
    pub fn encode_string(&self, text: &str, delimiter: &[u8], repeat: usize) -> ColumnBytes {
        let mut columns = ColumnBytes::new();
        for (n, ch) in text.chars().enumerate() {
            if n > 0 {
                for _ in 0..repeat {
                    if !push_all(&mut columns, delimiter) {
                        return truncated(columns);
                    }
                }
            }
            if !push_all(&mut columns, self.lookup(ch)) {
                return truncated(columns);
            }
        }
        columns
    }

    /// Encode with a single blank column between characters
    pub fn encode(&self, text: &str) -> ColumnBytes {
        self.encode_string(text, self.blank, 1)
    }

    /// Column count [`encode_string`] would produce, without the capacity cap
    ///
    /// [`encode_string`]: GlyphTable::encode_string
    pub fn text_width(&self, text: &str, delimiter: &[u8], repeat: usize) -> usize {
        let mut chars = 0usize;
        let mut width = 0;
        for ch in text.chars() {
            chars += 1;
            width += self.lookup(ch).len();
        }
        width + chars.saturating_sub(1) * repeat * delimiter.len()
    }
}

fn push_all(columns: &mut ColumnBytes, bytes: &[u8]) -> bool {
    let room = MAX_COLUMNS - columns.len();
    let take = bytes.len().min(room);
    // Cannot fail: `take` fits the remaining capacity
    let _ = columns.extend_from_slice(&bytes[..take]);
    take == bytes.len()
}

fn truncated(columns: ColumnBytes) -> ColumnBytes {
    warn!("encode_string: text truncated at {} columns", MAX_COLUMNS);
    columns
}
