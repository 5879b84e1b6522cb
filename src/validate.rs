//! Field rules for the device configuration.
//!
//! This module is compiled twice: into the library, and into `build.rs` via
//! `#[path]`, so a bad `cfg.toml` is rejected before any firmware is built.
//! It must therefore only depend on `core` and `constants`.

use core::fmt;

use crate::constants::{DEVICE_TOPIC_MAX_LEN, TOPIC_LEVEL_SEPARATOR};

/// Longest device id accepted (it doubles as the DHCP hostname).
pub const DEVICE_ID_MAX_LEN: usize = 32;
/// Longest broker hostname accepted (RFC 1035).
pub const HOSTNAME_MAX_LEN: usize = 253;
/// Longest SSID accepted by 802.11.
pub const SSID_MAX_LEN: usize = 32;
/// WPA2 passphrases are 8..=63 printable characters.
pub const PSK_MIN_LEN: usize = 8;
pub const PSK_MAX_LEN: usize = 63;
/// A raw WPA2 key is given as 64 hex digits.
pub const PSK_HEX_LEN: usize = 64;
/// MQTT topics are length-prefixed with a u16.
pub const TOPIC_MAX_LEN: usize = 65535;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    Empty,
    TooLong,
    TooShort,
    Whitespace,
    Wildcard,
    EmptyTopicLevel,
    InvalidCharacter,
    ZeroPort,
    BufferOverflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::Empty => "must not be empty",
            Error::TooLong => "is too long",
            Error::TooShort => "is too short",
            Error::Whitespace => "must not contain whitespace",
            Error::Wildcard => "must not contain MQTT wildcards ('+' or '#')",
            Error::EmptyTopicLevel => "must not contain an empty topic level",
            Error::InvalidCharacter => "contains an invalid character",
            Error::ZeroPort => "must be in range 1-65535",
            Error::BufferOverflow => "does not fit in the output buffer",
        };
        f.write_str(msg)
    }
}

fn non_empty(value: &str) -> Result<(), Error> {
    if value.is_empty() {
        return Err(Error::Empty);
    }
    Ok(())
}

fn no_boundary_whitespace(value: &str) -> Result<(), Error> {
    if value.trim() != value {
        return Err(Error::Whitespace);
    }
    Ok(())
}

pub fn ssid(value: &str) -> Result<(), Error> {
    non_empty(value)?;
    if value.len() > SSID_MAX_LEN {
        return Err(Error::TooLong);
    }
    Ok(())
}

pub fn passphrase(value: &str) -> Result<(), Error> {
    non_empty(value)?;
    if value.len() == PSK_HEX_LEN {
        if !value.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidCharacter);
        }
        return Ok(());
    }
    if value.len() < PSK_MIN_LEN {
        return Err(Error::TooShort);
    }
    if value.len() > PSK_MAX_LEN {
        return Err(Error::TooLong);
    }
    if !value.bytes().all(|b| (0x20..=0x7e).contains(&b)) {
        return Err(Error::InvalidCharacter);
    }
    Ok(())
}

pub fn host(value: &str) -> Result<(), Error> {
    non_empty(value)?;
    if value.len() > HOSTNAME_MAX_LEN {
        return Err(Error::TooLong);
    }
    if value.chars().any(char::is_whitespace) {
        return Err(Error::Whitespace);
    }
    if !value
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'-' || b == b'_')
    {
        return Err(Error::InvalidCharacter);
    }
    Ok(())
}

pub fn port(value: u16) -> Result<(), Error> {
    if value == 0 {
        return Err(Error::ZeroPort);
    }
    Ok(())
}

/// A topic used as a publish target: non-empty levels, no wildcards.
pub fn topic(value: &str) -> Result<(), Error> {
    non_empty(value)?;
    no_boundary_whitespace(value)?;
    if value.len() > TOPIC_MAX_LEN {
        return Err(Error::TooLong);
    }
    if value.contains(['+', '#']) {
        return Err(Error::Wildcard);
    }
    if value.contains('\0') {
        return Err(Error::InvalidCharacter);
    }
    // A single trailing separator is tolerated, `device_topic` absorbs it.
    let levels = value.strip_suffix(TOPIC_LEVEL_SEPARATOR).unwrap_or(value);
    if levels.split(TOPIC_LEVEL_SEPARATOR).any(str::is_empty) {
        return Err(Error::EmptyTopicLevel);
    }
    Ok(())
}

/// The device id ends up as a topic level, an MQTT client id and a DHCP hostname.
pub fn device_id(value: &str) -> Result<(), Error> {
    non_empty(value)?;
    if value.len() > DEVICE_ID_MAX_LEN {
        return Err(Error::TooLong);
    }
    if value.chars().any(char::is_whitespace) {
        return Err(Error::Whitespace);
    }
    if value.contains(['/', '+', '#', '\0']) {
        return Err(Error::InvalidCharacter);
    }
    Ok(())
}

/// Both parts valid, and `topic/device_id` fits the per-device topic buffer.
pub fn device_topic(topic: &str, device_id: &str) -> Result<(), Error> {
    self::topic(topic)?;
    self::device_id(device_id)?;
    let base = topic.strip_suffix(TOPIC_LEVEL_SEPARATOR).unwrap_or(topic);
    if base.len() + TOPIC_LEVEL_SEPARATOR.len_utf8() + device_id.len() > DEVICE_TOPIC_MAX_LEN {
        return Err(Error::TooLong);
    }
    Ok(())
}
