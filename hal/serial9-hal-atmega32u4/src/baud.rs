//! UBRR divisor computation
//!
//! Prefers double-speed mode (U2X) for its lower rounding error and
//! falls back to normal speed when the divisor would not fit in 12 bits.
//! 57600 baud on a 16 MHz part always uses normal speed to match the
//! timing of the stock Arduino bootloaders.

/// Largest value the 12-bit UBRR register can hold
pub const UBRR_MAX: u16 = 4095;

/// Clock of 16 MHz boards that get the 57600 normal-speed exception
const CPU_16MHZ: u32 = 16_000_000;

/// Divisor and speed mode for one baud rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BaudSetting {
    /// Value for UBRRH:UBRRL
    pub ubrr: u16,
    /// Whether U2X is set
    pub double_speed: bool,
}

impl BaudSetting {
    /// High byte for UBRRH
    pub fn high(&self) -> u8 {
        (self.ubrr >> 8) as u8
    }

    /// Low byte for UBRRL
    pub fn low(&self) -> u8 {
        (self.ubrr & 0xFF) as u8
    }
}

/// Compute the UBRR setting for `baud` at `cpu_hz`
pub fn baud_setting(cpu_hz: u32, baud: u32) -> BaudSetting {
    let double = divisor(cpu_hz / 4, baud);
    if (cpu_hz == CPU_16MHZ && baud == 57600) || double > u32::from(UBRR_MAX) {
        BaudSetting {
            ubrr: clamp(divisor(cpu_hz / 8, baud)),
            double_speed: false,
        }
    } else {
        BaudSetting {
            ubrr: clamp(double),
            double_speed: true,
        }
    }
}

/// `(clock / baud - 1) / 2`, saturating at zero
fn divisor(clock: u32, baud: u32) -> u32 {
    (clock / baud.max(1)).saturating_sub(1) / 2
}

fn clamp(ubrr: u32) -> u16 {
    ubrr.min(u32::from(UBRR_MAX)) as u16
}
