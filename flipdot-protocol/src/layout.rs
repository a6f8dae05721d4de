//! Device buffer layouts
//!
//! A [`Layout`] describes how a logical run of column bytes lands in the
//! controller's wire buffer: how long the buffer is, where the second row of
//! modules starts, which control bytes the batch understands and how logical
//! columns are permuted on the wire.
//!
//! Logical space is what callers reason about: column `i` of the first pixel
//! band is logical index `i`, column `i` of the second band is
//! `row_break_index + i`. Wire space is the order bytes are actually sent in.
//! The two only differ through [`ColumnRemap`].

use core::ops::Range;

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::control::ControlBytes;

/// Largest wire buffer any supported controller accepts
pub const MAX_FRAME_LEN: usize = 256;

/// Pixel rows driven by one column byte (bit 7 is reserved for commands)
pub const MAX_BITS_PER_COLUMN: u8 = 7;

/// Layout validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutError {
    /// Buffer length is zero
    EmptyBuffer,
    /// Buffer length exceeds [`MAX_FRAME_LEN`]
    BufferTooLong,
    /// Row break lies beyond the end of the buffer
    RowBreakOutOfRange,
    /// Bits per column outside 1..=7
    InvalidBitsPerColumn,
    /// A control byte collides with column data or the row selects are equal
    InvalidControlBytes,
    /// Visible width is zero or does not fit inside its pixel band
    VisibleWidthOutOfRange,
    /// Column remap is not a permutation of the buffer
    RemapNotBijective,
}

impl core::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            LayoutError::EmptyBuffer => "buffer length is zero",
            LayoutError::BufferTooLong => "buffer length exceeds 256",
            LayoutError::RowBreakOutOfRange => "row break is past the end of the buffer",
            LayoutError::InvalidBitsPerColumn => "bits per column must be 1..=7",
            LayoutError::InvalidControlBytes => "control bytes overlap data or each other",
            LayoutError::VisibleWidthOutOfRange => "visible width does not fit its band",
            LayoutError::RemapNotBijective => "column remap is not a bijection",
        };
        f.write_str(msg)
    }
}

/// Quadrant of a double-height panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Quadrant {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl Quadrant {
    /// Logical order of the quadrants
    pub const LOGICAL: [Quadrant; 4] = [
        Quadrant::UpperLeft,
        Quadrant::UpperRight,
        Quadrant::LowerLeft,
        Quadrant::LowerRight,
    ];

    /// Position in logical order
    pub const fn index(self) -> usize {
        match self {
            Quadrant::UpperLeft => 0,
            Quadrant::UpperRight => 1,
            Quadrant::LowerLeft => 2,
            Quadrant::LowerRight => 3,
        }
    }
}

/// Logical-to-wire column permutation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColumnRemap {
    /// Logical index equals wire index
    #[default]
    Identity,
    /// Serpentine module wiring
    ///
    /// The buffer is cut into blocks of `block` columns. In every complete
    /// odd-numbered block the groups of `group` columns are sent in reverse
    /// order; even blocks and a trailing partial block are sent as-is.
    ReversedGroups { block: u16, group: u16 },
    /// Four `width`-column quadrants
    ///
    /// Logical columns `0..4*width` hold upper-left, upper-right, lower-left
    /// and lower-right in that order; `order` lists the quadrants in the
    /// order the controller expects them on the wire. Columns past the
    /// quadrants are sent as-is.
    Quadrants { width: u16, order: [Quadrant; 4] },
    /// Explicit table: entry `i` is the wire position of logical column `i`
    ///
    /// Logical columns past the end of the table are sent as-is.
    Table(Vec<u16, MAX_FRAME_LEN>),
}

impl ColumnRemap {
    /// Wire position of logical column `logical` in a buffer of `len` bytes
    pub fn wire_index(&self, logical: usize, len: usize) -> usize {
        match self {
            ColumnRemap::Identity => logical,
            ColumnRemap::ReversedGroups { block, group } => {
                reverse_groups(logical, *block as usize, *group as usize, len)
            }
            ColumnRemap::Quadrants { width, order } => {
                let width = *width as usize;
                if width == 0 || logical >= 4 * width {
                    return logical;
                }
                let quadrant = Quadrant::LOGICAL[logical / width];
                match order.iter().position(|q| *q == quadrant) {
                    Some(slot) => slot * width + logical % width,
                    None => logical,
                }
            }
            ColumnRemap::Table(table) => table
                .get(logical)
                .map(|&wire| wire as usize)
                .unwrap_or(logical),
        }
    }

    /// Logical column sent at wire position `wire` (inverse of [`wire_index`])
    ///
    /// [`wire_index`]: ColumnRemap::wire_index
    pub fn logical_index(&self, wire: usize, len: usize) -> usize {
        match self {
            ColumnRemap::Identity => wire,
            // Reversing groups twice restores the original order
            ColumnRemap::ReversedGroups { block, group } => {
                reverse_groups(wire, *block as usize, *group as usize, len)
            }
            ColumnRemap::Quadrants { width, order } => {
                let width = *width as usize;
                if width == 0 || wire >= 4 * width {
                    return wire;
                }
                order[wire / width].index() * width + wire % width
            }
            ColumnRemap::Table(table) => {
                if wire < table.len() {
                    table
                        .iter()
                        .position(|&w| w as usize == wire)
                        .unwrap_or(wire)
                } else {
                    wire
                }
            }
        }
    }

    /// Whether this remap is a permutation of `0..len`
    ///
    /// Also checks that [`logical_index`](ColumnRemap::logical_index)
    /// inverts [`wire_index`](ColumnRemap::wire_index) at every position.
    pub fn is_bijection(&self, len: usize) -> bool {
        if len > MAX_FRAME_LEN {
            return false;
        }
        if let ColumnRemap::Table(table) = self {
            if table.len() > len {
                return false;
            }
        }
        let mut seen = [false; MAX_FRAME_LEN];
        for logical in 0..len {
            let wire = self.wire_index(logical, len);
            if wire >= len || seen[wire] {
                return false;
            }
            seen[wire] = true;
            if self.logical_index(wire, len) != logical {
                return false;
            }
        }
        true
    }
}

fn reverse_groups(index: usize, block: usize, group: usize, len: usize) -> usize {
    if block == 0 || group == 0 || block % group != 0 {
        return index;
    }
    let block_idx = index / block;
    if block_idx % 2 == 0 || (block_idx + 1) * block > len {
        return index;
    }
    let within = index % block;
    let groups = block / group;
    let mirrored = (groups - 1 - within / group) * group + within % group;
    block_idx * block + mirrored
}

/// Wire buffer layout of one sign model
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Layout {
    /// Bytes in one full frame
    pub buffer_length: usize,
    /// Wire index where the second row's data starts
    pub row_break_index: usize,
    /// Pixel rows per column byte
    pub bits_per_column: u8,
    /// Columns visible in each pixel band
    pub visible_width: usize,
    /// Control byte values of this batch
    pub control: ControlBytes,
    /// Logical-to-wire permutation
    pub remap: ColumnRemap,
}

impl Layout {
    /// Create a layout with identity remap and 7-row columns
    ///
    /// The visible width defaults to the narrower of the two row regions
    /// (or the whole buffer when there is only one pixel band).
    pub fn new(buffer_length: usize, row_break_index: usize, control: ControlBytes) -> Self {
        let visible_width = if row_break_index > 0 && row_break_index < buffer_length {
            row_break_index.min(buffer_length - row_break_index)
        } else {
            buffer_length
        };
        Self {
            buffer_length,
            row_break_index,
            bits_per_column: MAX_BITS_PER_COLUMN,
            visible_width,
            control,
            remap: ColumnRemap::Identity,
        }
    }

    /// 21 modules in a single row: 105 columns × 7 rows
    pub fn single_row() -> Self {
        Self::new(105, 105, ControlBytes::LEGACY)
    }

    /// 2 × 6 modules: 30 columns × 14 rows
    ///
    /// The second row is addressed from wire index 75; wire 30..75 is
    /// accepted by the controller but not shown.
    pub fn two_row() -> Self {
        Self::new(105, 75, ControlBytes::LEGACY).with_visible_width(30)
    }

    /// 30 × 14 panel wired serpentine over a 150-byte buffer
    pub fn serpentine() -> Self {
        Self::new(150, 75, ControlBytes::LEGACY)
            .with_visible_width(30)
            .with_remap(ColumnRemap::ReversedGroups { block: 30, group: 5 })
    }

    /// 30 × 14 panel addressed as four 15-column quadrants
    pub fn quadrants() -> Self {
        Self::new(60, 30, ControlBytes::SPLIT).with_remap(ColumnRemap::Quadrants {
            width: 15,
            order: Quadrant::LOGICAL,
        })
    }

    /// Replace the column remap
    pub fn with_remap(mut self, remap: ColumnRemap) -> Self {
        self.remap = remap;
        self
    }

    /// Replace the number of pixel rows per column byte
    pub fn with_bits_per_column(mut self, bits: u8) -> Self {
        self.bits_per_column = bits;
        self
    }

    /// Replace the visible width of each band
    pub fn with_visible_width(mut self, width: usize) -> Self {
        self.visible_width = width;
        self
    }

    /// Replace the control bytes
    pub fn with_control(mut self, control: ControlBytes) -> Self {
        self.control = control;
        self
    }

    /// Check every structural invariant
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.buffer_length == 0 {
            return Err(LayoutError::EmptyBuffer);
        }
        if self.buffer_length > MAX_FRAME_LEN {
            return Err(LayoutError::BufferTooLong);
        }
        if self.row_break_index > self.buffer_length {
            return Err(LayoutError::RowBreakOutOfRange);
        }
        if self.bits_per_column == 0 || self.bits_per_column > MAX_BITS_PER_COLUMN {
            return Err(LayoutError::InvalidBitsPerColumn);
        }
        if !self.control.is_valid() {
            return Err(LayoutError::InvalidControlBytes);
        }
        if self.visible_width == 0
            || (0..self.bands()).any(|band| {
                self.band_origin(band).saturating_add(self.visible_width) > self.buffer_length
            })
        {
            return Err(LayoutError::VisibleWidthOutOfRange);
        }
        if !self.remap.is_bijection(self.buffer_length) {
            return Err(LayoutError::RemapNotBijective);
        }
        Ok(())
    }

    /// Pixel rows per column byte, capped at [`MAX_BITS_PER_COLUMN`]
    ///
    /// Unvalidated layouts may carry any `bits_per_column`; everything that
    /// shifts by the row count goes through this.
    pub const fn rows_per_column(&self) -> u8 {
        if self.bits_per_column > MAX_BITS_PER_COLUMN {
            MAX_BITS_PER_COLUMN
        } else {
            self.bits_per_column
        }
    }

    /// Mask applied to every data byte
    pub const fn bit_mask(&self) -> u8 {
        ((1u16 << self.rows_per_column()) - 1) as u8
    }

    /// Whether the buffer has a second row region
    pub const fn has_second_row(&self) -> bool {
        self.row_break_index < self.buffer_length
    }

    /// Wire range sent after the row 1 select
    pub fn row1_range(&self) -> Range<usize> {
        0..self.row_break_index.min(self.buffer_length)
    }

    /// Wire range sent after the row 2 select (empty for single-row layouts)
    pub fn row2_range(&self) -> Range<usize> {
        self.row_break_index.min(self.buffer_length)..self.buffer_length
    }

    /// Number of stacked pixel bands
    ///
    /// A row break at index 0 leaves row 1 empty, so the panel has a single
    /// band fed entirely through the row 2 select.
    pub const fn bands(&self) -> usize {
        if self.row_break_index > 0 && self.has_second_row() {
            2
        } else {
            1
        }
    }

    /// First logical index of a pixel band
    pub const fn band_origin(&self, band: usize) -> usize {
        if band == 0 {
            0
        } else {
            self.row_break_index
        }
    }

    /// Pixel rows of the whole panel
    pub const fn pixel_height(&self) -> usize {
        self.bands() * self.rows_per_column() as usize
    }

    /// Pixel columns of the whole panel
    pub const fn pixel_width(&self) -> usize {
        self.visible_width
    }

    /// Wire position of a logical column
    pub fn wire_index(&self, logical: usize) -> usize {
        self.remap.wire_index(logical, self.buffer_length)
    }

    /// Logical column at a wire position
    pub fn logical_index(&self, wire: usize) -> usize {
        self.remap.logical_index(wire, self.buffer_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert_eq!(Layout::single_row().validate(), Ok(()));
        assert_eq!(Layout::two_row().validate(), Ok(()));
        assert_eq!(Layout::serpentine().validate(), Ok(()));
        assert_eq!(Layout::quadrants().validate(), Ok(()));
    }

    #[test]
    fn test_reversed_groups_mirror_odd_blocks() {
        let remap = ColumnRemap::ReversedGroups { block: 30, group: 5 };
        // Even block untouched
        assert_eq!(remap.wire_index(3, 150), 3);
        // Odd block: first group goes last, last group goes first
        assert_eq!(remap.wire_index(30, 150), 55);
        assert_eq!(remap.wire_index(34, 150), 59);
        assert_eq!(remap.wire_index(40, 150), 45);
        assert_eq!(remap.wire_index(55, 150), 30);
        // Third block (index 2) untouched, fourth mirrored
        assert_eq!(remap.wire_index(60, 150), 60);
        assert_eq!(remap.wire_index(90, 150), 115);
    }

    #[test]
    fn test_reversed_groups_leaves_partial_block() {
        let remap = ColumnRemap::ReversedGroups { block: 30, group: 5 };
        // 105 bytes: block 3 (90..120) is incomplete
        assert_eq!(remap.wire_index(90, 105), 90);
        assert!(remap.is_bijection(105));
    }

    #[test]
    fn test_quadrant_order() {
        let remap = ColumnRemap::Quadrants {
            width: 15,
            order: [
                Quadrant::UpperLeft,
                Quadrant::LowerLeft,
                Quadrant::UpperRight,
                Quadrant::LowerRight,
            ],
        };
        // Upper-right logical 15..30 is the third quadrant on the wire
        assert_eq!(remap.wire_index(15, 60), 30);
        // Lower-left logical 30..45 is second on the wire
        assert_eq!(remap.wire_index(31, 60), 16);
        assert_eq!(remap.logical_index(16, 60), 31);
        assert!(remap.is_bijection(60));
        assert!(remap.is_bijection(64));
    }

    #[test]
    fn test_quadrant_duplicate_is_rejected() {
        let remap = ColumnRemap::Quadrants {
            width: 5,
            order: [
                Quadrant::UpperLeft,
                Quadrant::UpperLeft,
                Quadrant::LowerLeft,
                Quadrant::LowerRight,
            ],
        };
        assert!(!remap.is_bijection(20));
    }

    #[test]
    fn test_table_bijection() {
        let table: Vec<u16, MAX_FRAME_LEN> = Vec::from_slice(&[2, 0, 1]).unwrap();
        let remap = ColumnRemap::Table(table);
        assert!(remap.is_bijection(3));
        assert!(remap.is_bijection(5));
        assert_eq!(remap.wire_index(0, 3), 2);
        assert_eq!(remap.logical_index(2, 3), 0);

        let table: Vec<u16, MAX_FRAME_LEN> = Vec::from_slice(&[1, 1, 0]).unwrap();
        assert!(!ColumnRemap::Table(table).is_bijection(3));

        let table: Vec<u16, MAX_FRAME_LEN> = Vec::from_slice(&[0, 1, 7]).unwrap();
        assert!(!ColumnRemap::Table(table).is_bijection(3));
    }

    #[test]
    fn test_validate_errors() {
        let control = ControlBytes::LEGACY;
        assert_eq!(
            Layout::new(0, 0, control).validate(),
            Err(LayoutError::EmptyBuffer)
        );
        assert_eq!(
            Layout::new(300, 150, control).validate(),
            Err(LayoutError::BufferTooLong)
        );
        assert_eq!(
            Layout::new(10, 11, control).validate(),
            Err(LayoutError::RowBreakOutOfRange)
        );
        assert_eq!(
            Layout::new(10, 5, control).with_bits_per_column(8).validate(),
            Err(LayoutError::InvalidBitsPerColumn)
        );
        assert_eq!(
            Layout::new(10, 5, ControlBytes::new(0x81, 0x83, 0x83)).validate(),
            Err(LayoutError::InvalidControlBytes)
        );
        assert_eq!(
            Layout::new(10, 5, control).with_visible_width(6).validate(),
            Err(LayoutError::VisibleWidthOutOfRange)
        );
        let table: Vec<u16, MAX_FRAME_LEN> = Vec::from_slice(&[0, 0]).unwrap();
        assert_eq!(
            Layout::new(10, 5, control)
                .with_remap(ColumnRemap::Table(table))
                .validate(),
            Err(LayoutError::RemapNotBijective)
        );
    }

    #[test]
    fn test_geometry() {
        let layout = Layout::two_row();
        assert_eq!(layout.bands(), 2);
        assert_eq!(layout.band_origin(1), 75);
        assert_eq!(layout.pixel_height(), 14);
        assert_eq!(layout.pixel_width(), 30);
        assert_eq!(layout.row1_range(), 0..75);
        assert_eq!(layout.row2_range(), 75..105);

        let layout = Layout::single_row();
        assert_eq!(layout.bands(), 1);
        assert_eq!(layout.pixel_height(), 7);
        assert!(layout.row2_range().is_empty());
    }

    #[test]
    fn test_bit_mask() {
        assert_eq!(Layout::single_row().bit_mask(), 0x7F);
        assert_eq!(Layout::single_row().with_bits_per_column(5).bit_mask(), 0x1F);
    }

    #[test]
    fn test_oversized_bits_are_capped_but_rejected() {
        let layout = Layout::single_row().with_bits_per_column(200);
        assert_eq!(layout.rows_per_column(), 7);
        assert_eq!(layout.bit_mask(), 0x7F);
        assert_eq!(layout.pixel_height(), 7);
        assert_eq!(layout.validate(), Err(LayoutError::InvalidBitsPerColumn));
    }

    #[test]
    fn test_huge_visible_width_is_rejected() {
        let layout = Layout::two_row().with_visible_width(usize::MAX);
        assert_eq!(layout.validate(), Err(LayoutError::VisibleWidthOutOfRange));
    }
}
