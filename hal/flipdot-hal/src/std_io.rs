//! Host adapters
//!
//! Lets a desktop application drive the sign through any `std::io::Write`
//! (a serial port crate's handle, a file, a TCP bridge) and pace animations
//! with `std::thread::sleep`.

use std::io::{ErrorKind, Write};
use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;

use crate::transport::{Transport, TransportError};

/// Transport over a `std::io::Write`
pub struct IoTransport<W> {
    inner: W,
}

impl<W: Write> IoTransport<W> {
    /// Wrap a writer
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Borrow the underlying writer
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Release the underlying writer
    pub fn into_inner(self) -> W {
        self.inner
    }
}

fn classify(kind: ErrorKind) -> TransportError {
    match kind {
        ErrorKind::TimedOut | ErrorKind::WouldBlock => TransportError::Timeout,
        ErrorKind::NotConnected
        | ErrorKind::BrokenPipe
        | ErrorKind::ConnectionReset
        | ErrorKind::ConnectionAborted
        | ErrorKind::NotFound
        | ErrorKind::UnexpectedEof => TransportError::Disconnected,
        _ => TransportError::WriteRejected,
    }
}

impl<W: Write> Transport for IoTransport<W> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.inner
            .write_all(bytes)
            .map_err(|e| classify(e.kind()))?;
        self.inner.flush().map_err(|e| classify(e.kind()))
    }
}

/// Blocking delay backed by `std::thread::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(ns as u64));
    }
}
