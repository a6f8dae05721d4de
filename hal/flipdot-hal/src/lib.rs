//! Flipdot Hardware Abstraction Layer
//!
//! This crate defines the byte-sink abstraction the sign protocol writes
//! into, plus adapters for concrete serial ports. The protocol and display
//! crates only ever see a [`Transport`]; what sits behind it (a UART, a USB
//! serial adapter, an in-memory simulator) is chosen by the application.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  flipdot-display (Display, effects)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  flipdot-protocol (FrameEncoder)        │
//! └─────────────────────────────────────────┘
//!                     │ Transport::write
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ SerialTrans-  │       │   Simulator   │
//! │ port / IoT... │       │  (in memory)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`transport::Transport`] - Ordered, blocking byte sink
//! - [`uart::SerialConfig`] - Line settings for the sign's serial port

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

pub mod transport;
pub mod uart;

#[cfg(feature = "std")]
pub mod std_io;

// Re-export key types at crate root for convenience
pub use transport::{SerialTransport, Transport, TransportError};
pub use uart::{DataBits, Parity, SerialConfig, StopBits};

#[cfg(feature = "std")]
pub use std_io::{IoTransport, StdDelay};
