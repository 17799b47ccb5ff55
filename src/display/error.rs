/*
 *  display/error.rs
 *
 *  monodisp - one API for small displays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Unified error type for the display subsystem
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::error::Error;
use std::fmt;

/// Unified error type for all display operations
///
/// Drawing never fails; the only error a caller sees from the compositor
/// itself is `UnsupportedDevice` at construction. The remaining variants are
/// produced by transfer sinks and buffer import.
#[derive(Debug)]
pub enum DisplayError {
    /// Device name not present in the device table
    UnsupportedDevice(String),

    /// Pushing the buffer to the panel failed
    Transfer(String),

    /// Raw buffer does not match width, height and encoding
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Invalid configuration
    InvalidConfiguration(String),

    /// File or pipe error from a transfer sink
    Io(std::io::Error),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::UnsupportedDevice(name) =>
                write!(f, "Device: {} is not a valid chip or a chip which is not supported yet", name),
            DisplayError::Transfer(msg) =>
                write!(f, "Display transfer failed: {}", msg),
            DisplayError::BufferSizeMismatch { expected, actual } =>
                write!(f, "Buffer size mismatch: expected {} bytes, got {}", expected, actual),
            DisplayError::InvalidConfiguration(msg) =>
                write!(f, "Invalid configuration: {}", msg),
            DisplayError::Io(err) =>
                write!(f, "I/O error: {}", err),
        }
    }
}

impl Error for DisplayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DisplayError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DisplayError {
    fn from(err: std::io::Error) -> Self {
        DisplayError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_device_message_names_device() {
        let err = DisplayError::UnsupportedDevice("ili9341".into());
        assert!(err.to_string().contains("ili9341"));
    }

    #[test]
    fn test_io_source_is_exposed() {
        let err: DisplayError = std::io::Error::new(std::io::ErrorKind::Other, "pipe").into();
        assert!(err.source().is_some());
    }
}
