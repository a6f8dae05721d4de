//! Device profiles
//!
//! A profile names one sign and carries everything that differs between
//! batches: buffer geometry, control bytes, column wiring and serial
//! settings. Profiles are written by hand in TOML and stored compactly
//! with postcard.
//!
//! ```toml
//! name = "lobby"
//!
//! [layout]
//! preset = "serpentine"        # single-row | two-row | serpentine | quadrants
//! control = "split"            # legacy | split | skip, or a table:
//! # control = { reset = 0x81, row1 = 0x82, row2 = 0x83 }
//!
//! [layout.remap]
//! kind = "reversed-groups"     # identity | reversed-groups | quadrants | table
//! block = 30
//! group = 5
//!
//! [serial]
//! baudrate = 38400
//! ```
//!
//! Without a preset, `buffer_length` is required and `row_break` defaults
//! to it (one row). Fields given next to a preset override the preset's.

use alloc::string::String;
use alloc::vec::Vec;

use heapless::String as HString;
use serde::{Deserialize, Serialize};

use flipdot_hal::SerialConfig;
use flipdot_protocol::{ColumnRemap, ControlBytes, Layout, LayoutError, Quadrant, MAX_FRAME_LEN};

/// Longest device name
pub const MAX_NAME_LEN: usize = 32;

/// Profile loading errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Not valid TOML, or fields of the wrong shape
    Toml,
    /// Unknown layout or control-byte preset name
    UnknownPreset,
    /// No preset and no `buffer_length`
    MissingBufferLength,
    /// Remap table longer than any frame
    TableTooLong,
    /// Name longer than [`MAX_NAME_LEN`]
    NameTooLong,
    /// Resulting layout failed validation
    InvalidLayout(LayoutError),
    /// Binary profile could not be encoded or decoded
    Postcard,
}

impl From<LayoutError> for ConfigError {
    fn from(e: LayoutError) -> Self {
        ConfigError::InvalidLayout(e)
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::Toml => f.write_str("malformed TOML profile"),
            ConfigError::UnknownPreset => f.write_str("unknown preset"),
            ConfigError::MissingBufferLength => f.write_str("buffer_length missing"),
            ConfigError::TableTooLong => f.write_str("remap table too long"),
            ConfigError::NameTooLong => f.write_str("device name too long"),
            ConfigError::InvalidLayout(e) => write!(f, "invalid layout: {}", e),
            ConfigError::Postcard => f.write_str("binary profile corrupt"),
        }
    }
}

/// One sign's profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub name: HString<MAX_NAME_LEN>,
    pub layout: Layout,
    pub serial: SerialConfig,
}

impl DeviceConfig {
    /// Encode into `buf`, returning the used prefix
    pub fn to_postcard<'b>(&self, buf: &'b mut [u8]) -> Result<&'b mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Postcard)
    }

    /// Decode a profile written by [`to_postcard`](DeviceConfig::to_postcard)
    ///
    /// The layout is validated again, so a stale or corrupted profile is
    /// rejected before it reaches a display.
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: DeviceConfig =
            postcard::from_bytes(bytes).map_err(|_| ConfigError::Postcard)?;
        config.layout.validate()?;
        Ok(config)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    name: String,
    layout: RawLayout,
    #[serde(default)]
    serial: SerialConfig,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLayout {
    preset: Option<String>,
    buffer_length: Option<usize>,
    row_break: Option<usize>,
    bits_per_column: Option<u8>,
    visible_width: Option<usize>,
    control: Option<RawControl>,
    remap: Option<RawRemap>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawControl {
    Preset(String),
    Bytes { reset: u8, row1: u8, row2: u8 },
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
enum RawRemap {
    Identity,
    ReversedGroups {
        block: u16,
        group: u16,
    },
    Quadrants {
        width: u16,
        #[serde(default = "logical_order")]
        order: [Quadrant; 4],
    },
    Table {
        wire: Vec<u16>,
    },
}

fn logical_order() -> [Quadrant; 4] {
    Quadrant::LOGICAL
}

/// Parse and validate a TOML profile
pub fn parse_config(input: &str) -> Result<DeviceConfig, ConfigError> {
    let raw: RawConfig = toml::from_str(input).map_err(|e| {
        warn!("config: TOML error: {}", defmt_str(&e));
        ConfigError::Toml
    })?;

    let name = HString::try_from(raw.name.as_str()).map_err(|_| ConfigError::NameTooLong)?;
    let layout = build_layout(raw.layout)?;
    layout.validate()?;

    debug!(
        "config: loaded {} byte layout, {} baud",
        layout.buffer_length,
        raw.serial.baudrate
    );
    Ok(DeviceConfig {
        name,
        layout,
        serial: raw.serial,
    })
}

fn build_layout(raw: RawLayout) -> Result<Layout, ConfigError> {
    let control = raw.control.map(control_bytes).transpose()?;

    let mut layout = match raw.preset.as_deref() {
        Some(name) => layout_preset(name)?,
        None => {
            let len = raw.buffer_length.ok_or(ConfigError::MissingBufferLength)?;
            Layout::new(len, raw.row_break.unwrap_or(len), control.unwrap_or_default())
        }
    };

    if let Some(len) = raw.buffer_length {
        layout.buffer_length = len;
    }
    if let Some(row_break) = raw.row_break {
        layout.row_break_index = row_break;
    }
    if let Some(bits) = raw.bits_per_column {
        layout.bits_per_column = bits;
    }
    if let Some(width) = raw.visible_width {
        layout.visible_width = width;
    }
    if let Some(control) = control {
        layout.control = control;
    }
    if let Some(remap) = raw.remap {
        layout.remap = column_remap(remap)?;
    }
    Ok(layout)
}

fn layout_preset(name: &str) -> Result<Layout, ConfigError> {
    match name {
        "single-row" => Ok(Layout::single_row()),
        "two-row" => Ok(Layout::two_row()),
        "serpentine" => Ok(Layout::serpentine()),
        "quadrants" => Ok(Layout::quadrants()),
        _ => Err(ConfigError::UnknownPreset),
    }
}

fn control_bytes(raw: RawControl) -> Result<ControlBytes, ConfigError> {
    match raw {
        RawControl::Preset(name) => match name.as_str() {
            "legacy" => Ok(ControlBytes::LEGACY),
            "split" => Ok(ControlBytes::SPLIT),
            "skip" => Ok(ControlBytes::SKIP),
            _ => Err(ConfigError::UnknownPreset),
        },
        RawControl::Bytes { reset, row1, row2 } => Ok(ControlBytes::new(reset, row1, row2)),
    }
}

fn column_remap(raw: RawRemap) -> Result<ColumnRemap, ConfigError> {
    Ok(match raw {
        RawRemap::Identity => ColumnRemap::Identity,
        RawRemap::ReversedGroups { block, group } => ColumnRemap::ReversedGroups { block, group },
        RawRemap::Quadrants { width, order } => ColumnRemap::Quadrants { width, order },
        RawRemap::Table { wire } => ColumnRemap::Table(
            heapless::Vec::<u16, MAX_FRAME_LEN>::from_slice(&wire)
                .map_err(|_| ConfigError::TableTooLong)?,
        ),
    })
}

/// TOML errors only implement `core::fmt::Display`
#[cfg(feature = "defmt")]
fn defmt_str(e: &toml::de::Error) -> defmt::Display2Format<'_, toml::de::Error> {
    defmt::Display2Format(e)
}

#[cfg(not(feature = "defmt"))]
fn defmt_str(e: &toml::de::Error) -> &toml::de::Error {
    e
}
