//! Frame packing and transmission
//!
//! A [`Frame`] is one complete wire buffer, already permuted into wire order
//! and masked to the layout's data bits. [`FrameEncoder`] builds frames from
//! logical column bytes and streams them to a [`Transport`]:
//!
//! ```text
//! ┌───────────────┬──────────────────┬───────────────┬──────────────────┐
//! │ RESET + ROW 1 │ frame[..break]   │ RESET + ROW 2 │ frame[break..]   │
//! │ 2B            │ row_break bytes  │ 2B (optional) │ remainder        │
//! └───────────────┴──────────────────┴───────────────┴──────────────────┘
//! ```
//!
//! The encoder holds no state between frames. Scrolling and other animation
//! is done by packing successive windows on the caller's side.
//!
//! [`FrameEncoder::transmit_at`] updates part of the buffer in place: a
//! column select (`reset + column`) and a row select, followed by raw wire
//! bytes.

use heapless::Vec;

use flipdot_hal::{Transport, TransportError};

use crate::control::Row;
use crate::glyph::ColumnBytes;
use crate::layout::{Layout, MAX_FRAME_LEN};

/// Partial update failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateError {
    /// Column cannot be selected or lies past the buffer
    ColumnOutOfRange,
    /// Layout has no second row
    NoSecondRow,
    /// Transport failed mid-update
    Transport(TransportError),
}

impl From<TransportError> for UpdateError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl core::fmt::Display for UpdateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ColumnOutOfRange => write!(f, "column out of range"),
            Self::NoSecondRow => write!(f, "layout has no second row"),
            Self::Transport(e) => write!(f, "transport: {}", e),
        }
    }
}

/// One display update in wire order
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    bytes: Vec<u8, MAX_FRAME_LEN>,
}

impl Frame {
    /// All-dark frame of `len` bytes (clamped to [`MAX_FRAME_LEN`])
    pub fn blank(len: usize) -> Self {
        let mut bytes = Vec::new();
        // Cannot fail: length is clamped to capacity
        let _ = bytes.resize(len.min(MAX_FRAME_LEN), 0);
        Self { bytes }
    }

    /// Frame from raw wire bytes, truncated to [`MAX_FRAME_LEN`]
    pub fn from_wire(wire: &[u8]) -> Self {
        let mut bytes = Vec::new();
        let _ = bytes.extend_from_slice(&wire[..wire.len().min(MAX_FRAME_LEN)]);
        Self { bytes }
    }

    /// Wire bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Frame length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the frame holds no bytes
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether every pixel is dark
    pub fn is_dark(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }

    /// Apply `f` to every byte
    pub fn map(&self, mut f: impl FnMut(u8) -> u8) -> Self {
        let mut bytes = self.bytes.clone();
        for byte in bytes.iter_mut() {
            *byte = f(*byte);
        }
        Self { bytes }
    }

    /// Overwrite wire bytes from `start`, dropping anything past the end
    pub fn overwrite(&mut self, start: usize, wire: &[u8]) {
        for (slot, &byte) in self.bytes.iter_mut().skip(start).zip(wire) {
            *slot = byte;
        }
    }

    /// Keep only the pixel rows selected by `mask`
    pub fn masked(&self, mask: u8) -> Self {
        self.map(|b| b & mask)
    }
}

/// Stateless frame builder for one layout
#[derive(Debug, Clone, Copy)]
pub struct FrameEncoder<'a> {
    layout: &'a Layout,
}

impl<'a> FrameEncoder<'a> {
    /// Create an encoder for a layout
    ///
    /// The layout is expected to have passed [`Layout::validate`]; an
    /// invalid remap still produces a frame of the right length, but pixels
    /// may collide.
    pub const fn new(layout: &'a Layout) -> Self {
        Self { layout }
    }

    /// Layout this encoder targets
    pub const fn layout(&self) -> &'a Layout {
        self.layout
    }

    /// Pack logical columns into a frame
    ///
    /// Shorter input is zero-filled, longer input is truncated to the buffer
    /// length. Each byte is masked to the layout's data bits and stored at
    /// its remapped wire position.
    pub fn pack(&self, columns: &[u8]) -> Frame {
        let len = self.layout.buffer_length;
        if columns.len() > len {
            trace!("pack: truncating {} columns to {}", columns.len(), len);
        }
        let mut frame = Frame::blank(len);
        self.place(&mut frame, columns, 0, len);
        frame
    }

    /// Pack two column runs into the row 1 and row 2 regions
    ///
    /// `top` fills logical `0..row_break_index`, `bottom` fills logical
    /// `row_break_index..buffer_length`. Each is truncated to its region.
    /// On a single-row layout `bottom` has nowhere to go and is ignored.
    pub fn pack_dual(&self, top: &[u8], bottom: &[u8]) -> Frame {
        let len = self.layout.buffer_length;
        let split = self.layout.row_break_index.min(len);
        let mut frame = Frame::blank(len);
        self.place(&mut frame, top, 0, split);
        self.place(&mut frame, bottom, split, len);
        frame
    }

    fn place(&self, frame: &mut Frame, columns: &[u8], start: usize, end: usize) {
        let mask = self.layout.bit_mask();
        let len = frame.bytes.len();
        for (offset, &column) in columns.iter().take(end.saturating_sub(start)).enumerate() {
            let wire = self.layout.wire_index(start + offset);
            if wire < len {
                frame.bytes[wire] = column & mask;
            }
        }
    }

    /// Invert every pixel under the layout's data mask
    pub fn negative(&self, frame: &Frame) -> Frame {
        let mask = self.layout.bit_mask();
        frame.map(|b| !b & mask)
    }

    /// Recover logical columns from a frame (inverse of [`pack`])
    ///
    /// [`pack`]: FrameEncoder::pack
    pub fn unpack(&self, frame: &Frame) -> ColumnBytes {
        let mut columns = ColumnBytes::new();
        for logical in 0..frame.len() {
            let wire = self.layout.wire_index(logical);
            let byte = frame.as_bytes().get(wire).copied().unwrap_or(0);
            let _ = columns.push(byte);
        }
        columns
    }

    /// Stream a frame to the sign
    ///
    /// Writes, in order and as separate writes: reset + row 1 select, the
    /// row 1 bytes, then (only if the layout has a second row) reset + row 2
    /// select and the row 2 bytes. The first transport error aborts the
    /// transmission and is returned unchanged.
    pub fn transmit<T: Transport + ?Sized>(
        &self,
        frame: &Frame,
        sink: &mut T,
    ) -> Result<(), TransportError> {
        let control = &self.layout.control;
        let bytes = frame.as_bytes();
        let split = self.layout.row_break_index.min(bytes.len());

        sink.write(&control.reset_and_row1())
            .inspect_err(|e| warn!("transmit: row 1 select failed: {}", e))?;
        if split > 0 {
            sink.write(&bytes[..split])?;
        }

        if self.layout.has_second_row() && split < bytes.len() {
            sink.write(&control.reset_and_row2())
                .inspect_err(|e| warn!("transmit: row 2 select failed: {}", e))?;
            sink.write(&bytes[split..])?;
        }

        Ok(())
    }

    /// Wire position a column select on `row` lands on
    pub fn address(&self, column: usize, row: Row) -> Result<usize, UpdateError> {
        let origin = match row {
            Row::First => 0,
            Row::Second if self.layout.has_second_row() => self.layout.row_break_index,
            Row::Second => return Err(UpdateError::NoSecondRow),
        };
        if self.layout.control.column_select(column).is_none() {
            return Err(UpdateError::ColumnOutOfRange);
        }
        let wire = origin + column;
        if wire >= self.layout.buffer_length {
            return Err(UpdateError::ColumnOutOfRange);
        }
        Ok(wire)
    }

    /// Rewrite part of the sign without resending the whole frame
    ///
    /// Sends the column select and row select as one write, then `wire`
    /// masked to the data bits. Bytes are in wire order and land on
    /// consecutive positions starting at [`address`]; the remap is not
    /// applied. Bytes that would run past the buffer are not sent. An empty
    /// `wire` sends nothing, since a lone select pair would change how the
    /// device reads the next control byte.
    ///
    /// [`address`]: FrameEncoder::address
    pub fn transmit_at<T: Transport + ?Sized>(
        &self,
        column: usize,
        row: Row,
        wire: &[u8],
        sink: &mut T,
    ) -> Result<(), UpdateError> {
        let start = self.address(column, row)?;
        if wire.is_empty() {
            return Ok(());
        }
        let control = &self.layout.control;
        let select = control
            .column_select(column)
            .ok_or(UpdateError::ColumnOutOfRange)?;

        let room = self.layout.buffer_length - start;
        if wire.len() > room {
            trace!("transmit_at: truncating {} bytes to {}", wire.len(), room);
        }
        let mask = self.layout.bit_mask();
        let mut data: Vec<u8, MAX_FRAME_LEN> = Vec::new();
        for &byte in wire.iter().take(room) {
            let _ = data.push(byte & mask);
        }

        sink.write(&[select, control.row_select(row)])
            .inspect_err(|e| warn!("transmit_at: select failed: {}", e))?;
        sink.write(&data)?;
        Ok(())
    }
}
