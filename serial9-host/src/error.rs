//! Host client errors

use std::io;

/// Errors from the host client
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Transport read or write failed
    #[error("connection error: {0}")]
    Io(#[from] io::Error),

    /// Configuration file could not be parsed
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Serial port could not be opened
    #[cfg(feature = "serialport")]
    #[error("serial port error: {0}")]
    Port(#[from] serialport::Error),

    /// No port configured and no bridge found on USB
    #[cfg(feature = "serialport")]
    #[error("no serial9 bridge found")]
    NoDevice,
}
