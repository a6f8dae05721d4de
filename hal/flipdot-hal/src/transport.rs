//! Byte transport abstraction
//!
//! The sign controller is stateful: the cursor and the selected row persist
//! between writes. A transport therefore has to deliver bytes in order and
//! must never drop or coalesce them behind the caller's back.

use core::fmt;

use embedded_io::{Error as _, ErrorKind, Write};

/// Transport failure kinds
///
/// Surfaced unchanged to the caller of a transmit; nothing in the driver
/// retries on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Link went away (port closed, cable pulled)
    Disconnected,
    /// Write did not complete in time
    Timeout,
    /// Link refused the data
    WriteRejected,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Disconnected => f.write_str("transport disconnected"),
            TransportError::Timeout => f.write_str("transport write timed out"),
            TransportError::WriteRejected => f.write_str("transport rejected write"),
        }
    }
}

impl From<ErrorKind> for TransportError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::TimedOut => TransportError::Timeout,
            ErrorKind::NotConnected
            | ErrorKind::BrokenPipe
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::NotFound => TransportError::Disconnected,
            _ => TransportError::WriteRejected,
        }
    }
}

/// Ordered, blocking byte sink
///
/// Implementations must write every byte of `bytes`, in order, before
/// returning `Ok`. Timeouts are the implementation's concern.
pub trait Transport {
    /// Write all bytes to the link
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        (**self).write(bytes)
    }
}

/// Transport over any blocking `embedded_io::Write` port
///
/// Each `write` is pushed out completely and flushed before returning, so
/// the sign sees control bytes and column data in exactly the order they
/// were issued.
pub struct SerialTransport<W> {
    port: W,
}

impl<W: Write> SerialTransport<W> {
    /// Wrap a serial port
    pub fn new(port: W) -> Self {
        Self { port }
    }

    /// Borrow the underlying port
    pub fn port(&self) -> &W {
        &self.port
    }

    /// Release the underlying port
    pub fn into_inner(self) -> W {
        self.port
    }
}

impl<W: Write> Transport for SerialTransport<W> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.port
            .write_all(bytes)
            .map_err(|e| TransportError::from(e.kind()))?;
        self.port
            .flush()
            .map_err(|e| TransportError::from(e.kind()))
    }
}
