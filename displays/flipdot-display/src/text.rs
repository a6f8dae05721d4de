//! Column-level text helpers
//!
//! Everything here works on logical column bytes, before a frame is packed.

use flipdot_protocol::glyph::{ColumnBytes, MAX_COLUMNS};
use flipdot_protocol::MAX_BITS_PER_COLUMN;

/// Horizontal placement of text narrower than the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Justify {
    #[default]
    Left,
    /// Centered; an odd leftover column goes on the right
    Center,
    Right,
}

/// Blank columns to put before `text_width` columns in a `width` window
///
/// Text that does not fit is always left-aligned.
pub const fn leading_padding(text_width: usize, width: usize, justify: Justify) -> usize {
    if text_width >= width {
        return 0;
    }
    match justify {
        Justify::Left => 0,
        Justify::Center => (width - text_width) / 2,
        Justify::Right => width - text_width,
    }
}

/// Exactly `width` columns with `columns` justified inside
///
/// Overlong input is cut on the right.
pub fn place(columns: &[u8], width: usize, justify: Justify) -> ColumnBytes {
    let width = width.min(MAX_COLUMNS);
    let pad = leading_padding(columns.len(), width, justify);
    let take = columns.len().min(width - pad);

    let mut out = ColumnBytes::new();
    // Cannot fail: pad + take + tail == width <= capacity
    let _ = out.resize(pad, 0);
    let _ = out.extend_from_slice(&columns[..take]);
    let _ = out.resize(width, 0);
    out
}

/// `width` blank columns on both sides of `columns`
///
/// A window sliding over the result starts and ends on a dark panel.
pub fn padded_for_scroll(columns: &[u8], width: usize) -> ColumnBytes {
    let total = width + columns.len() + width;
    if total > MAX_COLUMNS {
        warn!("padded_for_scroll: {} columns truncated to {}", total, MAX_COLUMNS);
    }

    let mut out = ColumnBytes::new();
    let _ = out.resize(width.min(MAX_COLUMNS), 0);
    let room = MAX_COLUMNS - out.len();
    let _ = out.extend_from_slice(&columns[..columns.len().min(room)]);
    let _ = out.resize(total.min(MAX_COLUMNS), 0);
    out
}

/// Stretch columns to twice their height
///
/// Every pixel row of a `bits`-row column becomes two rows. The upper half
/// of the result is returned first, ready for [`FrameEncoder::pack_dual`].
/// `bits` is capped at [`MAX_BITS_PER_COLUMN`].
///
/// [`FrameEncoder::pack_dual`]: flipdot_protocol::FrameEncoder::pack_dual
pub fn double_height(columns: &[u8], bits: u8) -> (ColumnBytes, ColumnBytes) {
    let bits = bits.min(MAX_BITS_PER_COLUMN) as usize;
    let mut top = ColumnBytes::new();
    let mut bottom = ColumnBytes::new();

    for &column in columns.iter().take(MAX_COLUMNS) {
        let mut upper = 0u8;
        let mut lower = 0u8;
        for row in 0..2 * bits {
            let source = row / 2;
            if column & (1 << (bits - 1 - source)) == 0 {
                continue;
            }
            if row < bits {
                upper |= 1 << (bits - 1 - row);
            } else {
                lower |= 1 << (2 * bits - 1 - row);
            }
        }
        let _ = top.push(upper);
        let _ = bottom.push(lower);
    }

    (top, bottom)
}

/// Repeat every column once
pub fn double_width(columns: &[u8]) -> ColumnBytes {
    let mut out = ColumnBytes::new();
    for &column in columns.iter().take(MAX_COLUMNS / 2) {
        let _ = out.push(column);
        let _ = out.push(column);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_padding() {
        assert_eq!(leading_padding(4, 10, Justify::Left), 0);
        assert_eq!(leading_padding(4, 10, Justify::Center), 3);
        assert_eq!(leading_padding(4, 10, Justify::Right), 6);
        // Odd leftover: 2 left, 3 right
        assert_eq!(leading_padding(5, 10, Justify::Center), 2);
        assert_eq!(leading_padding(12, 10, Justify::Right), 0);
    }

    #[test]
    fn test_place_center_odd_goes_right() {
        let placed = place(&[1, 2, 3], 6, Justify::Center);
        assert_eq!(&placed[..], &[0, 1, 2, 3, 0, 0]);
    }

    #[test]
    fn test_place_right() {
        let placed = place(&[1, 2], 5, Justify::Right);
        assert_eq!(&placed[..], &[0, 0, 0, 1, 2]);
    }

    #[test]
    fn test_place_truncates_wide_text() {
        let placed = place(&[1, 2, 3, 4, 5], 3, Justify::Center);
        assert_eq!(&placed[..], &[1, 2, 3]);
    }

    #[test]
    fn test_padded_for_scroll() {
        let padded = padded_for_scroll(&[7, 8], 3);
        assert_eq!(&padded[..], &[0, 0, 0, 7, 8, 0, 0, 0]);
    }

    #[test]
    fn test_padded_for_scroll_caps_length() {
        let padded = padded_for_scroll(&[0x7F; 600], 300);
        assert_eq!(padded.len(), MAX_COLUMNS);
        assert_eq!(padded[299], 0);
        assert_eq!(padded[300], 0x7F);
    }

    #[test]
    fn test_double_height_full_column() {
        let (top, bottom) = double_height(&[0x7F], 7);
        assert_eq!(&top[..], &[0x7F]);
        assert_eq!(&bottom[..], &[0x7F]);
    }

    #[test]
    fn test_double_height_splits_rows() {
        // Top pixel only: first two doubled rows
        let (top, bottom) = double_height(&[0x40], 7);
        assert_eq!(&top[..], &[0x60]);
        assert_eq!(&bottom[..], &[0x00]);

        // Middle row 3 becomes rows 6 and 7, straddling the halves
        let (top, bottom) = double_height(&[0x08], 7);
        assert_eq!(&top[..], &[0x01]);
        assert_eq!(&bottom[..], &[0x40]);

        // Bottom pixel lands in the last two rows
        let (top, bottom) = double_height(&[0x01], 7);
        assert_eq!(&top[..], &[0x00]);
        assert_eq!(&bottom[..], &[0x03]);
    }

    #[test]
    fn test_double_height_caps_bits() {
        let (top, bottom) = double_height(&[0x40, 0x01], 40);
        assert_eq!(&top[..], &[0x60, 0x00]);
        assert_eq!(&bottom[..], &[0x00, 0x03]);
        assert_eq!(double_height(&[0x7F], 0).0[0], 0);
    }

    #[test]
    fn test_double_width() {
        assert_eq!(&double_width(&[1, 2])[..], &[1, 1, 2, 2]);
    }
}
