//! Host client configuration
//!
//! Loaded from a TOML file such as:
//!
//! ```toml
//! port = "/dev/ttyACM0"
//! baud = 9600
//! timeout_ms = 10
//! ```
//!
//! Every key is optional. Without `port` the first USB device matching
//! the bridge's VID:PID is used.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serial9_hal::BaudRate;

use crate::error::HostError;

/// USB vendor id of the reference board (Arduino Pro Micro)
pub const BRIDGE_USB_VID: u16 = 0x2341;

/// USB product id of the reference board (Arduino Pro Micro)
pub const BRIDGE_USB_PID: u16 = 0x8036;

/// Default read timeout on the USB port
const DEFAULT_TIMEOUT_MS: u64 = 10;

/// Host client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Serial device path; `None` searches USB for the bridge
    pub port: Option<String>,
    /// Bus baud rate requested from the bridge after opening
    pub baud: BaudRate,
    /// Read timeout on the USB port in milliseconds
    pub timeout_ms: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud: BaudRate::default(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl HostConfig {
    /// Parse a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self, HostError> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HostError> {
        let path = path.as_ref();
        log::debug!("loading config from {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let config = HostConfig::from_toml_str(
            r#"
            port = "/dev/ttyACM0"
            baud = 115200
            timeout_ms = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.port.as_deref(), Some("/dev/ttyACM0"));
        assert_eq!(config.baud, BaudRate::B115200);
        assert_eq!(config.timeout_ms, 50);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = HostConfig::from_toml_str("").unwrap();
        assert_eq!(config, HostConfig::default());
        assert_eq!(config.baud, BaudRate::B9600);
    }

    #[test]
    fn test_unsupported_baud_rejected() {
        let result = HostConfig::from_toml_str("baud = 250000");
        assert!(matches!(result, Err(HostError::Config(_))));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = HostConfig::from_toml_str("parity = \"even\"");
        assert!(matches!(result, Err(HostError::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = HostConfig::load("/nonexistent/serial9.toml");
        assert!(matches!(result, Err(HostError::Io(_))));
    }
}
