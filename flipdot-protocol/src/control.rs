//! Row-addressing control bytes
//!
//! Column data only ever uses the low seven bits, so any byte with the high
//! bit set is free to carry a command. The controller understands three:
//! reset the cursor, select the first row, select the second row. Their
//! numeric values differ between production batches of otherwise identical
//! signs, so they travel with the [`Layout`](crate::Layout) instead of being
//! baked in.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mask of the bits a data byte may use on the wire
pub const DATA_MASK: u8 = 0x7F;

/// Control byte values for one device batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlBytes {
    /// Resets the cursor to the first column
    pub reset: u8,
    /// Selects the first row of modules
    pub row1: u8,
    /// Selects the second row of modules
    pub row2: u8,
}

/// Row of modules addressed by a select byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Row {
    First,
    Second,
}

impl ControlBytes {
    /// Batch where reset and row 1 share a value
    pub const LEGACY: Self = Self::new(0x81, 0x81, 0x82);

    /// Batch with a distinct value per command
    pub const SPLIT: Self = Self::new(0x81, 0x82, 0x83);

    /// Batch that skips 0x82 for the second row
    pub const SKIP: Self = Self::new(0x81, 0x81, 0x83);

    /// Create a control byte set
    pub const fn new(reset: u8, row1: u8, row2: u8) -> Self {
        Self { reset, row1, row2 }
    }

    /// Sequence sent before the first row's column data
    pub const fn reset_and_row1(&self) -> [u8; 2] {
        [self.reset, self.row1]
    }

    /// Sequence sent before the second row's column data
    pub const fn reset_and_row2(&self) -> [u8; 2] {
        [self.reset, self.row2]
    }

    /// Select byte for a row
    pub const fn row_select(&self, row: Row) -> u8 {
        match row {
            Row::First => self.row1,
            Row::Second => self.row2,
        }
    }

    /// Byte that moves the cursor to `column`, if one exists
    ///
    /// The device reads any control byte after data as `reset + column`, so
    /// only columns that keep the sum within a byte are reachable.
    pub const fn column_select(&self, column: usize) -> Option<u8> {
        let byte = self.reset as usize + column;
        if byte <= u8::MAX as usize && Self::is_control(byte as u8) {
            Some(byte as u8)
        } else {
            None
        }
    }

    /// Whether a wire byte is a command rather than column data
    pub const fn is_control(byte: u8) -> bool {
        byte > DATA_MASK
    }

    /// All three values are commands and the row selects are distinguishable
    pub const fn is_valid(&self) -> bool {
        Self::is_control(self.reset)
            && Self::is_control(self.row1)
            && Self::is_control(self.row2)
            && self.row1 != self.row2
    }
}

impl Default for ControlBytes {
    fn default() -> Self {
        Self::LEGACY
    }
}
