//! Clock faces and countdowns

use core::fmt::Write;

use heapless::String;

use flipdot_protocol::glyph::{ColumnBytes, MAX_COLUMNS};
use flipdot_protocol::{Frame, FrameEncoder, GlyphTable, Layout};

use crate::text::{place, Justify};

/// Row bit for the hour in [`binary_clock`] (top row)
pub const HOUR_ROW: u8 = 1 << 6;
/// Row bit for the minute in [`binary_clock`]
pub const MINUTE_ROW: u8 = 1 << 3;
/// Row bit for the second in [`binary_clock`] (bottom row)
pub const SECOND_ROW: u8 = 1 << 0;

/// Blank columns between the binary digits and the text in a clock face
const FACE_GAP: usize = 3;

/// "HH:MM:SS" as column bytes
pub fn clock_text(glyphs: &GlyphTable, hour: u8, minute: u8, second: u8) -> ColumnBytes {
    let mut text: String<8> = String::new();
    // Cannot fail: two-digit fields fit in 8 characters
    let _ = write!(text, "{:02}:{:02}:{:02}", hour % 100, minute % 100, second % 100);
    glyphs.encode(&text)
}

/// Six-column binary clock
///
/// Column `i` carries bit `i` (value 2^i) of each field, least significant
/// column on the left: the hour on the top row, the minute in the middle
/// and the second on the bottom row. Fields are taken modulo 64.
pub fn binary_clock(hour: u8, minute: u8, second: u8) -> [u8; 6] {
    core::array::from_fn(|power| {
        let mut column = 0;
        if hour & (1 << power) != 0 {
            column |= HOUR_ROW;
        }
        if minute & (1 << power) != 0 {
            column |= MINUTE_ROW;
        }
        if second & (1 << power) != 0 {
            column |= SECOND_ROW;
        }
        column
    })
}

/// Binary clock, a short gap, then "HH:MM"
pub fn binary_clock_face(glyphs: &GlyphTable, hour: u8, minute: u8, second: u8) -> ColumnBytes {
    let mut columns = ColumnBytes::new();
    // Cannot fail: 9 columns plus five glyphs stay far below capacity
    let _ = columns.extend_from_slice(&binary_clock(hour, minute, second));
    let _ = columns.extend_from_slice(&[0; FACE_GAP]);

    let mut text: String<5> = String::new();
    let _ = write!(text, "{:02}:{:02}", hour % 100, minute % 100);
    let _ = columns.extend_from_slice(&glyphs.encode(&text));
    columns
}

/// "M:SS" for a number of seconds left
///
/// Whole hours are dropped, so 3725 seconds reads "2:05".
pub fn countdown_text(glyphs: &GlyphTable, seconds: u32) -> ColumnBytes {
    let mut text: String<5> = String::new();
    let seconds = seconds % 3600;
    // Cannot fail: at most "59:59"
    let _ = write!(text, "{}:{:02}", seconds / 60, seconds % 60);
    glyphs.encode(&text)
}

/// Blinking "M:SS" countdown
///
/// Two frames per second: the centered time, then its negative. The last
/// pair shows "0:01"; timing is left to the [`Animator`](crate::Animator),
/// which should run at two frames per second.
#[derive(Debug, Clone)]
pub struct Countdown<'a> {
    encoder: FrameEncoder<'a>,
    glyphs: GlyphTable,
    width: usize,
    remaining: u32,
    pending: Option<Frame>,
}

impl<'a> Countdown<'a> {
    /// Count down from `seconds`
    pub fn new(layout: &'a Layout, glyphs: GlyphTable, seconds: u32) -> Self {
        Self {
            encoder: FrameEncoder::new(layout),
            glyphs,
            width: layout.visible_width,
            remaining: seconds,
            pending: None,
        }
    }
}

impl Iterator for Countdown<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if let Some(negative) = self.pending.take() {
            return Some(negative);
        }
        if self.remaining == 0 {
            return None;
        }
        let text = countdown_text(&self.glyphs, self.remaining);
        self.remaining -= 1;

        let frame = self.encoder.pack(&place(&text, self.width, Justify::Center));
        self.pending = Some(self.encoder.negative(&frame));
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = 2 * self.remaining as usize + usize::from(self.pending.is_some());
        (left, Some(left))
    }
}

/// Countdown that fills the panel one dot at a time
///
/// Columns fill left to right. Within a column a dot climbs from the bottom
/// on even columns and drops from the top on odd ones, blinking against the
/// negative of the columns already full. Each finished column is shown
/// once on its own, and the last frame is the `finish` image. A panel
/// `w` columns wide with `r` rows takes `w * (2r + 1) + 1` frames.
#[derive(Debug, Clone)]
pub struct DotCountdown<'a> {
    encoder: FrameEncoder<'a>,
    finish: Frame,
    width: usize,
    rows: usize,
    index: usize,
}

impl<'a> DotCountdown<'a> {
    /// Fill the visible window, then show `finish` (logical columns)
    pub fn new(layout: &'a Layout, finish: &[u8]) -> Self {
        let encoder = FrameEncoder::new(layout);
        Self {
            finish: encoder.pack(finish),
            encoder,
            width: layout.visible_width.min(MAX_COLUMNS - 1),
            rows: layout.rows_per_column() as usize,
            index: 0,
        }
    }

    fn total(&self) -> usize {
        self.width * (2 * self.rows + 1) + 1
    }

    /// Column `column` with the first `dots` dots set
    fn partial(&self, column: usize, dots: usize) -> u8 {
        let full = self.encoder.layout().bit_mask();
        if dots >= self.rows {
            return full;
        }
        let low = ((1u16 << dots) - 1) as u8;
        if column % 2 == 0 {
            low
        } else {
            full & !(full >> dots)
        }
    }
}

impl Iterator for DotCountdown<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.index >= self.total() {
            return None;
        }
        let index = self.index;
        self.index += 1;

        let per_column = 2 * self.rows + 1;
        let column = index / per_column;
        if column == self.width {
            return Some(self.finish.clone());
        }

        let full = self.encoder.layout().bit_mask();
        let within = index % per_column;
        let mut columns = ColumnBytes::new();
        if within == 2 * self.rows {
            // Cannot fail: width is kept below capacity
            let _ = columns.resize(column + 1, full);
        } else {
            // The negative of a full column is dark
            let filled = if within % 2 == 1 { 0 } else { full };
            let _ = columns.resize(column, filled);
            let _ = columns.push(self.partial(column, within / 2 + 1));
        }
        Some(self.encoder.pack(&columns))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total() - self.index;
        (left, Some(left))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_text_matches_encoded_string() {
        let glyphs = GlyphTable::standard();
        assert_eq!(clock_text(&glyphs, 9, 5, 30), glyphs.encode("09:05:30"));
    }

    #[test]
    fn test_binary_clock_bits() {
        // 13 = 0b001101, 42 = 0b101010, 7 = 0b000111
        let columns = binary_clock(13, 42, 7);
        assert_eq!(columns[0], HOUR_ROW | SECOND_ROW);
        assert_eq!(columns[1], MINUTE_ROW | SECOND_ROW);
        assert_eq!(columns[2], HOUR_ROW | SECOND_ROW);
        assert_eq!(columns[3], HOUR_ROW | MINUTE_ROW);
        assert_eq!(columns[4], 0);
        assert_eq!(columns[5], MINUTE_ROW);
    }

    #[test]
    fn test_binary_clock_midnight_is_dark() {
        assert_eq!(binary_clock(0, 0, 0), [0; 6]);
    }

    #[test]
    fn test_binary_clock_face_layout() {
        let glyphs = GlyphTable::standard();
        let face = binary_clock_face(&glyphs, 23, 59, 1);
        assert_eq!(&face[..6], &binary_clock(23, 59, 1));
        assert_eq!(&face[6..9], &[0, 0, 0]);
        assert_eq!(&face[9..], &glyphs.encode("23:59")[..]);
    }

    #[test]
    fn test_countdown_text_drops_hours() {
        let glyphs = GlyphTable::standard();
        assert_eq!(countdown_text(&glyphs, 59), glyphs.encode("0:59"));
        assert_eq!(countdown_text(&glyphs, 3725), glyphs.encode("2:05"));
    }

    #[test]
    fn test_countdown_blinks_each_second() {
        let glyphs = GlyphTable::standard();
        let layout = Layout::single_row();
        let encoder = FrameEncoder::new(&layout);
        let mut countdown = Countdown::new(&layout, glyphs, 2);
        assert_eq!(countdown.size_hint(), (4, Some(4)));

        let expected = encoder.pack(&place(&glyphs.encode("0:02"), 105, Justify::Center));
        let first = countdown.next().unwrap();
        assert_eq!(first, expected);
        assert_eq!(countdown.next().unwrap(), encoder.negative(&first));

        let third = countdown.next().unwrap();
        assert_eq!(encoder.unpack(&third)[..], place(&glyphs.encode("0:01"), 105, Justify::Center)[..]);
        assert_eq!(countdown.next().unwrap(), encoder.negative(&third));
        assert!(countdown.next().is_none());
    }

    #[test]
    fn test_countdown_from_zero_is_empty() {
        let glyphs = GlyphTable::standard();
        let layout = Layout::single_row();
        assert_eq!(Countdown::new(&layout, glyphs, 0).count(), 0);
    }

    #[test]
    fn test_dot_countdown_fills_alternating_columns() {
        let layout = Layout::new(2, 2, flipdot_protocol::ControlBytes::LEGACY).with_bits_per_column(3);
        let frames: heapless::Vec<Frame, 32> = DotCountdown::new(&layout, &[0b101, 0b010]).collect();
        // 2 columns * (2 * 3 + 1) + finish
        assert_eq!(frames.len(), 15);

        // Column 0 climbs from the bottom, blinking against nothing
        assert_eq!(frames[0].as_bytes(), &[0b001, 0]);
        assert_eq!(frames[1].as_bytes(), &[0b001, 0]);
        assert_eq!(frames[2].as_bytes(), &[0b011, 0]);
        assert_eq!(frames[4].as_bytes(), &[0b111, 0]);
        assert_eq!(frames[6].as_bytes(), &[0b111, 0]);

        // Column 1 drops from the top; the full column blinks dark
        assert_eq!(frames[7].as_bytes(), &[0b111, 0b100]);
        assert_eq!(frames[8].as_bytes(), &[0, 0b100]);
        assert_eq!(frames[9].as_bytes(), &[0b111, 0b110]);
        assert_eq!(frames[13].as_bytes(), &[0b111, 0b111]);
        assert_eq!(frames[14].as_bytes(), &[0b101, 0b010]);
    }

    #[test]
    fn test_dot_countdown_size_hint() {
        let layout = Layout::two_row();
        let mut countdown = DotCountdown::new(&layout, &[]);
        assert_eq!(countdown.size_hint(), (30 * 15 + 1, Some(30 * 15 + 1)));
        countdown.next();
        assert_eq!(countdown.size_hint().0, 30 * 15);
    }
}
