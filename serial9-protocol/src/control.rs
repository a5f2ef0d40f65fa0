//! Escape and control bytes

use serial9_hal::BaudRate;

/// Escape code: the next byte is a control byte
pub const ESCAPE: u8 = 0xFF;

/// Control byte: the following byte carries the 9th bit set
pub const HIGH: u8 = 0x01;

/// Meaning of the byte that follows an [`ESCAPE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlByte {
    /// Next byte is data with the 9th bit set
    High,
    /// Escaped escape: literal `0xFF` with the 9th bit clear
    Escape,
    /// Change the UART baud rate
    Baud(BaudRate),
    /// Not a defined control byte
    Illegal(u8),
}

impl ControlByte {
    /// Classify the byte following an escape code
    pub fn classify(byte: u8) -> Self {
        match byte {
            HIGH => ControlByte::High,
            ESCAPE => ControlByte::Escape,
            other => match BaudRate::from_control(other) {
                Some(rate) => ControlByte::Baud(rate),
                None => ControlByte::Illegal(other),
            },
        }
    }

    /// The wire byte for this control
    pub fn byte(self) -> u8 {
        match self {
            ControlByte::High => HIGH,
            ControlByte::Escape => ESCAPE,
            ControlByte::Baud(rate) => rate.control_byte(),
            ControlByte::Illegal(byte) => byte,
        }
    }
}
