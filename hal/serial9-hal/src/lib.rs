//! Serial9 Hardware Abstraction Layer
//!
//! This crate defines the collaborator traits the bridge state machine is
//! written against. Chip-specific crates implement them so the same bridge
//! logic runs on any 9-bit capable UART.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  serial9-core (bridge state machine)    │
//! └─────────────────────────────────────────┘
//!           │                     │
//!           ▼                     ▼
//! ┌───────────────────┐  ┌───────────────────┐
//! │ uart::NineBitUart │  │ host::HostPort    │
//! └───────────────────┘  └───────────────────┘
//!           │
//!           ▼
//! ┌─────────────────────────────────────────┐
//! │  serial9-hal-atmega32u4 (USART1)        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::NineBitUart`] - 9-bit UART with half-duplex direction control
//! - [`host::HostPort`] - Byte stream towards the host (USB CDC)
//! - [`gpio::OutputPin`] - Direction control pins (DE, RE_)

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod host;
pub mod uart;

// Re-export key types at crate root for convenience
pub use gpio::OutputPin;
pub use host::HostPort;
pub use uart::{BaudRate, FrameValue, NineBitUart};
