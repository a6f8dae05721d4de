//! Flipdot Wire Protocol
//!
//! This crate turns logical column bytes into the exact byte stream a serial
//! flip-disc sign controller expects, and back again. It knows nothing about
//! ports or timing; everything leaves through a [`Transport`].
//!
//! # Protocol Overview
//!
//! Every column of the sign is one byte: the low seven bits are pixels
//! (bit 6 at the top), bit 7 is reserved for commands. A full update is
//! the layout's whole buffer, split at the row break:
//!
//! ```text
//! ┌───────┬──────┬──────────────┬───────┬──────┬──────────────┐
//! │ RESET │ ROW1 │ ROW 1 DATA   │ RESET │ ROW2 │ ROW 2 DATA   │
//! │ 1B    │ 1B   │ 0–256B       │ 1B    │ 1B   │ 0–256B       │
//! └───────┴──────┴──────────────┴───────┴──────┴──────────────┘
//! ```
//!
//! Buffer length, row break, control values and the logical-to-wire column
//! permutation all vary between sign batches and live in a [`Layout`].
//!
//! # Components
//!
//! - [`GlyphTable`] - character to column-byte lookup with a fallback glyph
//! - [`FrameEncoder`] - packs columns into a [`Frame`] and transmits it
//! - [`Simulator`] - in-memory sign that decodes the stream back to pixels
//!
//! [`Transport`]: flipdot_hal::Transport

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod control;
pub mod font;
pub mod frame;
pub mod glyph;
pub mod layout;
pub mod simulator;

pub use control::{ControlBytes, Row, DATA_MASK};
pub use frame::{Frame, FrameEncoder, UpdateError};
pub use glyph::{ColumnBytes, Glyph, GlyphTable, MAX_COLUMNS};
pub use layout::{ColumnRemap, Layout, LayoutError, Quadrant, MAX_BITS_PER_COLUMN, MAX_FRAME_LEN};
pub use simulator::{PixelGrid, Simulator};

pub use flipdot_hal::{Transport, TransportError};
