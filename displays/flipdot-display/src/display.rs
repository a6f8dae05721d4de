//! Display handle
//!
//! A [`Display`] is the single owner of one sign's transport. Every update
//! goes through it, so two writers can never interleave control bytes on the
//! same link.

use flipdot_hal::{Transport, TransportError};
use flipdot_protocol::{Frame, FrameEncoder, GlyphTable, Layout, LayoutError, Row, UpdateError};

use crate::text::{double_height, place, Justify};

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Link failed while sending a frame
    Transport(TransportError),
    /// Layout rejected at construction
    Layout(LayoutError),
    /// Partial update aimed outside the buffer
    Address(UpdateError),
}

impl From<TransportError> for DisplayError {
    fn from(e: TransportError) -> Self {
        DisplayError::Transport(e)
    }
}

impl From<LayoutError> for DisplayError {
    fn from(e: LayoutError) -> Self {
        DisplayError::Layout(e)
    }
}

impl From<UpdateError> for DisplayError {
    fn from(e: UpdateError) -> Self {
        match e {
            UpdateError::Transport(e) => DisplayError::Transport(e),
            other => DisplayError::Address(other),
        }
    }
}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DisplayError::Transport(e) => write!(f, "transport: {}", e),
            DisplayError::Layout(e) => write!(f, "layout: {}", e),
            DisplayError::Address(e) => write!(f, "address: {}", e),
        }
    }
}

/// One sign: its link, layout and font
pub struct Display<T> {
    link: T,
    layout: Layout,
    glyphs: GlyphTable,
    last: Frame,
}

impl<T: Transport> Display<T> {
    /// Create a display with the built-in font
    ///
    /// Fails if the layout does not validate. Nothing is sent until the
    /// first update.
    pub fn new(link: T, layout: Layout) -> Result<Self, DisplayError> {
        Self::with_glyphs(link, layout, GlyphTable::standard())
    }

    /// Create a display with a custom glyph table
    pub fn with_glyphs(link: T, layout: Layout, glyphs: GlyphTable) -> Result<Self, DisplayError> {
        layout
            .validate()
            .inspect_err(|e| warn!("display: layout rejected: {}", e))?;
        debug!(
            "display: {} byte buffer, row break {}, {} visible columns",
            layout.buffer_length,
            layout.row_break_index,
            layout.visible_width
        );
        let last = Frame::blank(layout.buffer_length);
        Ok(Self {
            link,
            layout,
            glyphs,
            last,
        })
    }

    /// Layout of this sign
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Glyph table used for text
    pub fn glyphs(&self) -> &GlyphTable {
        &self.glyphs
    }

    /// Frame builder for this sign's layout
    pub fn encoder(&self) -> FrameEncoder<'_> {
        FrameEncoder::new(&self.layout)
    }

    /// Visible columns per pixel band
    pub fn width(&self) -> usize {
        self.layout.visible_width
    }

    /// Turn every pixel off
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.show(&Frame::blank(self.layout.buffer_length))
    }

    /// Send a prepared frame
    ///
    /// The frame is remembered as [`last_frame`](Display::last_frame) only
    /// if the whole transmission succeeds.
    pub fn show(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        FrameEncoder::new(&self.layout)
            .transmit(frame, &mut self.link)
            .inspect_err(|e| warn!("display: frame dropped: {}", e))?;
        self.last = frame.clone();
        Ok(())
    }

    /// Pack and send logical columns
    pub fn show_columns(&mut self, columns: &[u8]) -> Result<(), DisplayError> {
        let frame = self.encoder().pack(columns);
        self.show(&frame)
    }

    /// Pack and send separate row 1 and row 2 columns
    pub fn show_dual(&mut self, top: &[u8], bottom: &[u8]) -> Result<(), DisplayError> {
        let frame = self.encoder().pack_dual(top, bottom);
        self.show(&frame)
    }

    /// Render one line of text in the first pixel band
    pub fn show_text(&mut self, text: &str, justify: Justify) -> Result<(), DisplayError> {
        let columns = self.glyphs.encode(text);
        let placed = place(&columns, self.width(), justify);
        self.show_columns(&placed)
    }

    /// Render text at double height across both pixel bands
    pub fn show_tall_text(&mut self, text: &str, justify: Justify) -> Result<(), DisplayError> {
        let columns = self.glyphs.encode(text);
        let placed = place(&columns, self.width(), justify);
        let (top, bottom) = double_height(&placed, self.layout.bits_per_column);
        self.show_dual(&top, &bottom)
    }

    /// Overwrite wire bytes starting at `column` of `row`
    ///
    /// Only the touched bytes go over the link. They are in wire order, so
    /// on a remapped layout the caller picks wire positions directly. On
    /// success the same bytes are patched into
    /// [`last_frame`](Display::last_frame).
    pub fn send_raw(&mut self, column: usize, row: Row, wire: &[u8]) -> Result<(), DisplayError> {
        let encoder = FrameEncoder::new(&self.layout);
        let start = encoder.address(column, row)?;
        encoder
            .transmit_at(column, row, wire, &mut self.link)
            .inspect_err(|e| warn!("display: partial update dropped: {}", e))?;
        self.last.overwrite(start, wire);
        self.last = self.last.masked(self.layout.bit_mask());
        Ok(())
    }

    /// Show the negative of the current image
    pub fn invert(&mut self) -> Result<(), DisplayError> {
        let frame = self.encoder().negative(&self.last);
        self.show(&frame)
    }

    /// Last frame sent successfully
    pub fn last_frame(&self) -> &Frame {
        &self.last
    }

    /// Borrow the link
    pub fn link(&self) -> &T {
        &self.link
    }

    /// Mutably borrow the link
    pub fn link_mut(&mut self) -> &mut T {
        &mut self.link
    }

    /// Give the link back
    pub fn into_inner(self) -> T {
        self.link
    }
}
