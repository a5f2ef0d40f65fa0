//! Frame encoder and streaming decoder
//!
//! Encoding priority: the 9th bit is checked before the escape value, so
//! `0x1FF` encodes as `FF 01 FF` and never as `FF FF`.

use core::ops::Deref;

use serial9_hal::{BaudRate, FrameValue};

use crate::control::{ControlByte, ESCAPE, HIGH};

/// Longest encoding of a single frame (`FF 01 dd`)
pub const MAX_ENCODED_LEN: usize = 3;

/// Errors that can occur while encoding into a caller buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodecError {
    /// Buffer too small for the encoded output
    BufferTooSmall,
}

/// Escape-coded bytes for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoded {
    bytes: [u8; MAX_ENCODED_LEN],
    len: u8,
}

impl Encoded {
    fn one(a: u8) -> Self {
        Self {
            bytes: [a, 0, 0],
            len: 1,
        }
    }

    fn two(a: u8, b: u8) -> Self {
        Self {
            bytes: [a, b, 0],
            len: 2,
        }
    }

    fn three(a: u8, b: u8, c: u8) -> Self {
        Self {
            bytes: [a, b, c],
            len: 3,
        }
    }

    /// The encoded bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

impl Deref for Encoded {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl<'a> IntoIterator for &'a Encoded {
    type Item = &'a u8;
    type IntoIter = core::slice::Iter<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

/// Escape-code one frame value
pub fn encode(frame: FrameValue) -> Encoded {
    let data = frame.data();
    if frame.is_high() {
        Encoded::three(ESCAPE, HIGH, data)
    } else if data == ESCAPE {
        Encoded::two(ESCAPE, data)
    } else {
        Encoded::one(data)
    }
}

/// Escape-code a sequence of frames into `buffer`
///
/// Returns the number of bytes written. Nothing is guaranteed about the
/// buffer contents on error.
pub fn encode_into<I>(frames: I, buffer: &mut [u8]) -> Result<usize, CodecError>
where
    I: IntoIterator<Item = FrameValue>,
{
    let mut len = 0;
    for frame in frames {
        let encoded = encode(frame);
        let end = len + encoded.len();
        buffer
            .get_mut(len..end)
            .ok_or(CodecError::BufferTooSmall)?
            .copy_from_slice(&encoded);
        len = end;
    }
    Ok(len)
}

/// Command bytes asking the device to switch its UART to `rate`
pub fn baud_command(rate: BaudRate) -> [u8; 2] {
    [ESCAPE, rate.control_byte()]
}

/// How the decoder will interpret the next byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecoderState {
    /// Next byte is data or an escape code
    #[default]
    Idle,
    /// Next byte is a control byte
    Escape,
    /// Next byte is data with the 9th bit set
    High,
}

/// Result of feeding a byte that completes a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decoded {
    /// A data frame
    Frame(FrameValue),
    /// A baud-select command
    SetBaud(BaudRate),
    /// An undefined control byte, dropped
    Illegal(u8),
}

/// Streaming escape decoder
///
/// Bytes are fed one at a time; any escape sequence in progress is kept
/// across calls. An illegal control byte resynchronises the decoder to
/// [`DecoderState::Idle`].
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    state: DecoderState,
}

impl Decoder {
    /// Create a decoder in the idle state
    pub const fn new() -> Self {
        Self {
            state: DecoderState::Idle,
        }
    }

    /// Current state
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Drop any partial sequence
    pub fn reset(&mut self) {
        self.state = DecoderState::Idle;
    }

    /// Feed a single byte
    ///
    /// Returns `None` while a sequence is incomplete (after an escape code
    /// or a `HIGH` prefix).
    pub fn feed(&mut self, byte: u8) -> Option<Decoded> {
        match self.state {
            DecoderState::Idle => {
                if byte == ESCAPE {
                    self.state = DecoderState::Escape;
                    None
                } else {
                    Some(Decoded::Frame(FrameValue::low(byte)))
                }
            }
            DecoderState::Escape => {
                // Every control byte except HIGH ends the sequence
                self.state = DecoderState::Idle;
                match ControlByte::classify(byte) {
                    ControlByte::High => {
                        self.state = DecoderState::High;
                        None
                    }
                    ControlByte::Escape => Some(Decoded::Frame(FrameValue::low(ESCAPE))),
                    ControlByte::Baud(rate) => Some(Decoded::SetBaud(rate)),
                    ControlByte::Illegal(byte) => Some(Decoded::Illegal(byte)),
                }
            }
            DecoderState::High => {
                self.state = DecoderState::Idle;
                Some(Decoded::Frame(FrameValue::high(byte)))
            }
        }
    }
}
