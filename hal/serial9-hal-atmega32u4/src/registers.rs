//! USART1 register map
//!
//! Bit positions follow the ATmega32U4 datasheet (USART1 block).

/// USART1 registers used by the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Control and status A (flags, double speed)
    Ucsra,
    /// Control and status B (enables, 9th bits)
    Ucsrb,
    /// Control and status C (frame format)
    Ucsrc,
    /// Baud rate register, high byte
    Ubrrh,
    /// Baud rate register, low byte
    Ubrrl,
    /// Data register
    Udr,
}

/// Raw register access
///
/// Reading [`Register::Udr`] consumes the received character and writing
/// it starts a transmission, exactly like the hardware.
pub trait UsartRegisters {
    /// Read a register
    fn read(&mut self, reg: Register) -> u8;

    /// Write a register
    fn write(&mut self, reg: Register, value: u8);

    /// Read-modify-write: set the bits in `mask`
    fn set_bits(&mut self, reg: Register, mask: u8) {
        let value = self.read(reg);
        self.write(reg, value | mask);
    }

    /// Read-modify-write: clear the bits in `mask`
    fn clear_bits(&mut self, reg: Register, mask: u8) {
        let value = self.read(reg);
        self.write(reg, value & !mask);
    }
}

/// Single-bit mask
pub const fn bit(n: u8) -> u8 {
    1 << n
}

// UCSRA
/// Receive complete
pub const RXC: u8 = 7;
/// Transmit complete (write 1 to clear)
pub const TXC: u8 = 6;
/// Data register empty
pub const UDRE: u8 = 5;
/// Double transmission speed
pub const U2X: u8 = 1;

// UCSRB
/// RX complete interrupt enable
pub const RXCIE: u8 = 7;
/// TX complete interrupt enable
pub const TXCIE: u8 = 6;
/// Data register empty interrupt enable
pub const UDRIE: u8 = 5;
/// Receiver enable
pub const RXEN: u8 = 4;
/// Transmitter enable
pub const TXEN: u8 = 3;
/// Character size bit 2
pub const UCSZ2: u8 = 2;
/// Received 9th bit
pub const RXB8: u8 = 1;
/// Transmitted 9th bit
pub const TXB8: u8 = 0;

// UCSRC
/// Character size bit 1
pub const UCSZ1: u8 = 2;
/// Character size bit 0
pub const UCSZ0: u8 = 1;
