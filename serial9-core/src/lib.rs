//! Board-agnostic core of the serial9 bridge
//!
//! This crate moves characters between a host byte stream and a 9-bit
//! UART without any buffering:
//!
//! - Bridge state machine, one byte per direction per tick
//! - Escape decoding of host bytes, escape encoding of UART frames
//! - Half-duplex bus arbitration (talk while sending, listen otherwise)
//! - Bridge configuration
//!
//! Hardware access goes through the traits in `serial9-hal`; the escape
//! coding itself lives in `serial9-protocol`.

#![no_std]
#![deny(unsafe_code)]

pub mod bridge;
pub mod config;

#[cfg(test)]
mod mock;

pub use bridge::{Bridge, Tick};
pub use config::BridgeConfig;
pub use serial9_protocol::DecoderState;
