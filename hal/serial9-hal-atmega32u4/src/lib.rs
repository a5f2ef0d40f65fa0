//! ATmega32U4 adapter for the serial9 bridge
//!
//! Implements [`serial9_hal::NineBitUart`] on top of USART1 of the
//! ATmega32U4 (Pro Micro / Leonardo class boards) and an RS-485
//! transceiver wired to two GPIOs:
//!
//! - `DE` - driver enable, high while talking
//! - `RE_` - receiver enable, active low
//!
//! Register access goes through [`registers::UsartRegisters`] so the
//! adapter can run against the real memory-mapped registers or a fake
//! register file in tests.
//!
//! # Modules
//!
//! - [`baud`] - UBRR divisor computation
//! - [`registers`] - register map and bit positions
//! - [`usart`] - the adapter itself
//! - [`pins`] - `embedded-hal` pin wrapper

#![no_std]
#![deny(unsafe_code)]

pub mod baud;
pub mod pins;
pub mod registers;
pub mod usart;

pub use baud::{baud_setting, BaudSetting};
pub use pins::EhOutputPin;
pub use registers::{Register, UsartRegisters};
pub use usart::{AdapterConfig, Atmega32u4Uart};
