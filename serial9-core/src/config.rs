//! Bridge configuration

use serial9_hal::BaudRate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bridge settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BridgeConfig {
    /// Default UART baud rate to open at; the host may change it later
    pub baud: BaudRate,
}

impl BridgeConfig {
    /// Config with a specific default baud rate
    pub const fn with_baud(baud: BaudRate) -> Self {
        Self { baud }
    }
}
