//! Serial line settings
//!
//! The sign controllers this driver targets talk 8N1 at 38400 baud; other
//! batches differ only in speed, so every field stays configurable.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Serial port configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
    /// Per-write timeout in milliseconds, enforced by the port implementation
    pub timeout_ms: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baudrate: 38400,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            timeout_ms: 1000,
        }
    }
}

impl SerialConfig {
    /// Time on the wire for `bytes` bytes, in microseconds
    ///
    /// Counts one start bit plus data, parity and stop bits per byte. Useful
    /// for pacing animations so frames are not queued faster than the line
    /// can drain them.
    pub fn transmit_time_us(&self, bytes: usize) -> u64 {
        let bits_per_byte = 1
            + self.data_bits.count() as u64
            + self.parity.overhead() as u64
            + self.stop_bits.count() as u64;
        let bits = bits_per_byte * bytes as u64;
        if self.baudrate == 0 {
            return 0;
        }
        bits * 1_000_000 / self.baudrate as u64
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DataBits {
    Seven,
    Eight,
}

impl DataBits {
    /// Bit count
    pub const fn count(self) -> u8 {
        match self {
            DataBits::Seven => 7,
            DataBits::Eight => 8,
        }
    }
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Parity {
    None,
    Even,
    Odd,
}

impl Parity {
    const fn overhead(self) -> u8 {
        match self {
            Parity::None => 0,
            Parity::Even | Parity::Odd => 1,
        }
    }
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StopBits {
    One,
    Two,
}

impl StopBits {
    /// Bit count
    pub const fn count(self) -> u8 {
        match self {
            StopBits::One => 1,
            StopBits::Two => 2,
        }
    }
}
