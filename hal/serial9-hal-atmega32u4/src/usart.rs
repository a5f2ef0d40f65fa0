//! USART1 9-bit adapter
//!
//! Polling only: all interrupt enables stay clear, so the bridge never
//! sees more than the single received character the hardware holds.

use serial9_hal::{BaudRate, FrameValue, NineBitUart, OutputPin};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::baud::baud_setting;
use crate::registers::{
    bit, Register, UsartRegisters, RXB8, RXC, RXEN, TXB8, TXC, TXEN, U2X, UCSZ0, UCSZ1, UCSZ2,
    UDRE,
};

/// Adapter configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdapterConfig {
    /// CPU clock feeding the USART
    pub cpu_hz: u32,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self { cpu_hz: 16_000_000 }
    }
}

/// USART1 plus RS-485 direction pins
pub struct Atmega32u4Uart<R, DE, RE> {
    regs: R,
    /// Driver enable (active high)
    de: DE,
    /// Receiver enable (active low)
    re: RE,
    config: AdapterConfig,
}

impl<R, DE, RE> Atmega32u4Uart<R, DE, RE>
where
    R: UsartRegisters,
    DE: OutputPin,
    RE: OutputPin,
{
    /// Create the adapter
    ///
    /// The peripheral is left untouched until
    /// [`configure`](NineBitUart::configure) and
    /// [`start`](NineBitUart::start) are called.
    pub fn new(regs: R, de: DE, re: RE, config: AdapterConfig) -> Self {
        Self {
            regs,
            de,
            re,
            config,
        }
    }

    /// Give back the register block and pins
    pub fn release(self) -> (R, DE, RE) {
        (self.regs, self.de, self.re)
    }

    /// Active configuration
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    fn status(&mut self) -> u8 {
        self.regs.read(Register::Ucsra)
    }
}

impl<R, DE, RE> NineBitUart for Atmega32u4Uart<R, DE, RE>
where
    R: UsartRegisters,
    DE: OutputPin,
    RE: OutputPin,
{
    fn configure(&mut self, baud: BaudRate) {
        let setting = baud_setting(self.config.cpu_hz, baud.bps());

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "USART1 {} baud: ubrr={} u2x={}",
            baud.bps(),
            setting.ubrr,
            setting.double_speed
        );

        let ucsra = if setting.double_speed { bit(U2X) } else { 0 };
        self.regs.write(Register::Ucsra, ucsra);
        self.regs.write(Register::Ubrrh, setting.high());
        self.regs.write(Register::Ubrrl, setting.low());
    }

    fn start(&mut self) {
        // 9-bit characters, RX and TX on, every interrupt off
        self.regs
            .write(Register::Ucsrb, bit(UCSZ2) | bit(TXEN) | bit(RXEN));
        // Remaining frame format bits (parity, stop) are left alone
        self.regs
            .set_bits(Register::Ucsrc, bit(UCSZ1) | bit(UCSZ0));
    }

    fn stop(&mut self) {
        self.regs
            .clear_bits(Register::Ucsrb, bit(TXEN) | bit(RXEN));
        self.enter_offline();
    }

    fn receive_ready(&mut self) -> bool {
        self.status() & bit(RXC) != 0
    }

    fn receive(&mut self) -> FrameValue {
        // RXB8 must be read before UDR
        let high = self.regs.read(Register::Ucsrb) & bit(RXB8) != 0;
        let data = self.regs.read(Register::Udr);
        if high {
            FrameValue::high(data)
        } else {
            FrameValue::low(data)
        }
    }

    fn transmit_busy(&mut self) -> bool {
        self.status() & bit(UDRE) == 0
    }

    fn transmit_complete(&mut self) -> bool {
        self.status() & bit(TXC) != 0
    }

    fn transmit(&mut self, frame: FrameValue) {
        // TXB8 must be written before UDR
        if frame.is_high() {
            self.regs.set_bits(Register::Ucsrb, bit(TXB8));
        } else {
            self.regs.clear_bits(Register::Ucsrb, bit(TXB8));
        }
        self.regs.write(Register::Udr, frame.data());
    }

    fn enter_talk(&mut self) {
        self.de.set_high();
        // TXC is not always set; writing 1 clears a stale flag
        self.regs.set_bits(Register::Ucsra, bit(TXC));
    }

    fn enter_listen(&mut self) {
        self.de.set_low();
        self.re.set_low();
    }

    fn enter_offline(&mut self) {
        self.de.set_low();
        self.re.set_high();
    }
}
