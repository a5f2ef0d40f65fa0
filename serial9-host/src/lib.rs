//! Host-side client for the serial9 bridge
//!
//! The bridge firmware exposes a USB virtual serial port that carries
//! escape-coded 9-bit characters. This crate does the host half of the
//! job: it escapes outgoing data, decodes incoming data back into 9-bit
//! [`FrameValue`]s and sends baud-select commands.
//!
//! Any `std::io::Read + std::io::Write` transport works as a
//! [`Connection`] (a serial port, a TCP socket forwarding the port, or a
//! test double). With the `serialport` feature, [`port::open`] finds and
//! opens the bridge's USB port.

pub mod client;
pub mod config;
pub mod connection;
pub mod error;
#[cfg(feature = "serialport")]
pub mod port;

pub use client::Serial9;
pub use config::HostConfig;
pub use connection::Connection;
pub use error::HostError;
pub use serial9_hal::{BaudRate, FrameValue};
