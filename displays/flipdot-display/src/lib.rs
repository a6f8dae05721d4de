//! Flipdot display handle and effects
//!
//! This crate provides:
//! - [`Display`] - owns the link to one sign and shows frames, columns and text
//! - [`Link`] - hardware or simulated transport, chosen at construction
//! - text helpers for justification, scrolling padding and doubled glyphs
//! - frame effects (scroll, rotate, sweep, flash, typewriter, ...) as plain
//!   iterators, and an [`Animator`] that plays them with a frame delay
//! - clock faces
//! - device profiles loaded from TOML and persisted with postcard
//!
//! # Architecture
//!
//! ```text
//!  effects ──► Iterator<Item = Frame> ──► Animator ──┐
//!                                                    ▼
//!  text / clock ──► column bytes ──► Display ──► FrameEncoder ──► Link
//!                                                               │
//!                                              Hardware(H) ◄────┴────► Simulated
//! ```
//!
//! Effects never touch the link. They borrow the layout, build frames, and
//! leave pacing and cancellation to whoever drives them.

#![no_std]
#![deny(unsafe_code)]

#[cfg(feature = "config")]
extern crate alloc;

#[macro_use]
mod fmt;

pub mod animator;
pub mod clock;
#[cfg(feature = "config")]
pub mod config;
pub mod display;
pub mod effects;
pub mod link;
pub mod text;

pub use animator::{Animator, Playback};
pub use clock::{binary_clock, binary_clock_face, clock_text, countdown_text, Countdown, DotCountdown};
#[cfg(feature = "config")]
pub use config::{parse_config, ConfigError, DeviceConfig, MAX_NAME_LEN};
pub use display::{Display, DisplayError};
pub use effects::{Flash, RandomSweep, Rotate, Scroll, Shift, Sweep, SweepKind, Typewriter};
pub use link::Link;
pub use text::{double_height, double_width, leading_padding, padded_for_scroll, place, Justify};

pub use flipdot_protocol::{Frame, GlyphTable, Layout, Row, Simulator};
