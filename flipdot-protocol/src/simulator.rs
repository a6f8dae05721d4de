//! In-memory sign simulator
//!
//! Interprets the wire protocol the way the controller does and keeps the
//! resulting wire buffer, so encoder output can be checked pixel by pixel
//! without hardware. Implements [`Transport`], which makes it a drop-in
//! replacement for a serial port.
//!
//! Addressing works in pairs of control bytes:
//!
//! - the first control byte after column data (or at stream start) selects
//!   an absolute column: `cursor = byte - reset`
//! - a control byte right after a column select picks the row: the row 2
//!   value moves the cursor forward by the layout's row break, anything else
//!   leaves it on row 1
//!
//! Data bytes land at the cursor, which then advances by one. Bytes past the
//! end of the buffer are counted and discarded.

use core::fmt;

use heapless::Vec;

use flipdot_hal::{Transport, TransportError};

use crate::control::ControlBytes;
use crate::frame::Frame;
use crate::glyph::ColumnBytes;
use crate::layout::{Layout, MAX_FRAME_LEN};

/// What the next control byte means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum CursorState {
    /// Next control byte selects a column
    AwaitingColumnSelect,
    /// Previous byte selected a column; next control byte selects a row
    AwaitingRowSelect,
}

/// Simulated sign
#[derive(Debug, Clone)]
pub struct Simulator {
    layout: Layout,
    wire: Vec<u8, MAX_FRAME_LEN>,
    cursor: usize,
    state: CursorState,
    writes: usize,
    dropped: usize,
    fault: Option<(usize, TransportError)>,
}

impl Simulator {
    /// Create a blank sign for a layout
    pub fn new(layout: Layout) -> Self {
        let mut wire = Vec::new();
        let _ = wire.resize(layout.buffer_length.min(MAX_FRAME_LEN), 0);
        Self {
            layout,
            wire,
            cursor: 0,
            state: CursorState::AwaitingColumnSelect,
            writes: 0,
            dropped: 0,
            fault: None,
        }
    }

    /// Layout being simulated
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Blank the sign and reset the cursor and counters
    pub fn reset(&mut self) {
        self.wire.iter_mut().for_each(|b| *b = 0);
        self.cursor = 0;
        self.state = CursorState::AwaitingColumnSelect;
        self.writes = 0;
        self.dropped = 0;
    }

    /// Fail every write after the first `after_writes` successful ones
    pub fn inject_fault(&mut self, after_writes: usize, error: TransportError) {
        self.fault = Some((after_writes, error));
    }

    /// Remove an injected fault
    pub fn clear_fault(&mut self) {
        self.fault = None;
    }

    /// Interpret one wire byte
    pub fn feed(&mut self, byte: u8) {
        if ControlBytes::is_control(byte) {
            self.control(byte);
        } else {
            self.data(byte);
        }
    }

    /// Interpret a run of wire bytes
    pub fn feed_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.feed(byte);
        }
    }

    fn control(&mut self, byte: u8) {
        match self.state {
            CursorState::AwaitingColumnSelect => {
                self.cursor = byte.saturating_sub(self.layout.control.reset) as usize;
                self.state = CursorState::AwaitingRowSelect;
            }
            CursorState::AwaitingRowSelect => {
                if byte == self.layout.control.row2 {
                    self.cursor += self.layout.row_break_index;
                }
                self.state = CursorState::AwaitingColumnSelect;
            }
        }
    }

    fn data(&mut self, byte: u8) {
        match self.wire.get_mut(self.cursor) {
            Some(slot) => *slot = byte & self.layout.bit_mask(),
            None => self.dropped += 1,
        }
        self.cursor += 1;
        self.state = CursorState::AwaitingColumnSelect;
    }

    /// Current wire cursor
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of successful `write` calls
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Data bytes that fell past the end of the buffer
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Wire buffer as received
    pub fn frame(&self) -> Frame {
        Frame::from_wire(&self.wire)
    }

    /// Wire buffer mapped back to logical column order
    pub fn columns(&self) -> ColumnBytes {
        let mut columns = ColumnBytes::new();
        for logical in 0..self.wire.len() {
            let wire = self.layout.wire_index(logical);
            let _ = columns.push(self.wire.get(wire).copied().unwrap_or(0));
        }
        columns
    }

    /// Whether the pixel at `row`, `col` is lit
    ///
    /// Row 0 is the top of the panel. Out-of-range coordinates read as dark.
    pub fn pixel(&self, row: usize, col: usize) -> bool {
        let bits = self.layout.rows_per_column() as usize;
        if bits == 0 || col >= self.layout.visible_width {
            return false;
        }
        let band = row / bits;
        if band >= self.layout.bands() {
            return false;
        }
        let logical = self.layout.band_origin(band).saturating_add(col);
        if logical >= self.wire.len() {
            return false;
        }
        let byte = self
            .wire
            .get(self.layout.wire_index(logical))
            .copied()
            .unwrap_or(0);
        let bit = bits - 1 - row % bits;
        byte & (1 << bit) != 0
    }

    /// Snapshot view of the panel
    pub fn grid(&self) -> PixelGrid<'_> {
        PixelGrid { sim: self }
    }
}

impl Transport for Simulator {
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        if let Some((after, error)) = self.fault {
            if self.writes >= after {
                return Err(error);
            }
        }
        self.feed_bytes(bytes);
        self.writes += 1;
        Ok(())
    }
}

/// Pixel view of a [`Simulator`]
///
/// Renders as one text line per pixel row, `O` for lit and `.` for dark.
#[derive(Clone, Copy)]
pub struct PixelGrid<'a> {
    sim: &'a Simulator,
}

impl PixelGrid<'_> {
    /// Pixel rows
    pub fn rows(&self) -> usize {
        self.sim.layout.pixel_height()
    }

    /// Pixel columns
    pub fn cols(&self) -> usize {
        self.sim.layout.pixel_width()
    }

    /// Whether a pixel is lit
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.sim.pixel(row, col)
    }

    /// Number of lit pixels
    pub fn lit_count(&self) -> usize {
        (0..self.rows())
            .map(|row| (0..self.cols()).filter(|&col| self.get(row, col)).count())
            .sum()
    }
}

impl fmt::Display for PixelGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                f.write_str(if self.get(row, col) { "O" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
