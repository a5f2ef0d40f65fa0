//! Serial9 escape protocol
//!
//! The host side of the bridge only moves 8-bit bytes, while the bus side
//! carries 9-bit characters. This crate defines the byte-oriented escape
//! coding that carries 9-bit values (and a few control commands) over the
//! 8-bit link.
//!
//! # Wire format
//!
//! ```text
//! dd           data byte dd (dd != FF), 9th bit clear
//! FF 01 dd     data byte dd, 9th bit set
//! FF FF        data byte FF, 9th bit clear
//! FF 10..FF 19 select baud rate 300..115200 (towards the device only)
//! FF xx        anything else is illegal and dropped
//! ```
//!
//! The same coding is used in both directions, so [`encode`] and
//! [`Decoder`] serve the device firmware and the host library alike.

#![no_std]
#![deny(unsafe_code)]

pub mod codec;
pub mod control;

pub use codec::{
    baud_command, encode, encode_into, CodecError, Decoded, Decoder, DecoderState, Encoded,
};
pub use control::{ControlByte, ESCAPE, HIGH};
pub use serial9_hal::{BaudRate, FrameValue};
