//! 9-bit UART abstraction
//!
//! Describes the peripheral the bridge drives: one received frame and one
//! transmit holding slot, with no buffering beyond that, plus the
//! half-duplex direction control of an RS-485 style transceiver.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mask of the side-channel (9th) bit in a [`FrameValue`]
pub const SIDE_BIT: u16 = 0x100;

/// Mask of all valid bits in a [`FrameValue`]
pub const FRAME_MASK: u16 = 0x1FF;

/// A 9-bit character: 8 data bits plus the side-channel bit
///
/// The side-channel bit is typically used as an address/data marker on a
/// multidrop bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameValue(u16);

impl FrameValue {
    /// Build a frame value from a raw integer, discarding bits above bit 8
    pub const fn new(raw: u16) -> Self {
        Self(raw & FRAME_MASK)
    }

    /// Data byte with the side-channel bit clear
    pub const fn low(data: u8) -> Self {
        Self(data as u16)
    }

    /// Data byte with the side-channel bit set
    pub const fn high(data: u8) -> Self {
        Self(data as u16 | SIDE_BIT)
    }

    /// Low 8 data bits
    pub const fn data(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Whether the side-channel bit is set
    pub const fn is_high(self) -> bool {
        self.0 & SIDE_BIT != 0
    }

    /// The full 9-bit value
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl From<u8> for FrameValue {
    fn from(data: u8) -> Self {
        Self::low(data)
    }
}

impl From<FrameValue> for u16 {
    fn from(frame: FrameValue) -> Self {
        frame.raw()
    }
}

/// Baud rates selectable from the host
///
/// The discriminant order matches the low nibble of the baud-select
/// control byte (`0x10` = 300 ... `0x19` = 115200).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub enum BaudRate {
    B300,
    B600,
    B1200,
    B2400,
    B4800,
    #[default]
    B9600,
    B19200,
    B38400,
    B57600,
    B115200,
}

/// First baud-select control byte
const BAUD_CONTROL_BASE: u8 = 0x10;

impl BaudRate {
    /// All selectable rates, in control byte order
    pub const ALL: [BaudRate; 10] = [
        BaudRate::B300,
        BaudRate::B600,
        BaudRate::B1200,
        BaudRate::B2400,
        BaudRate::B4800,
        BaudRate::B9600,
        BaudRate::B19200,
        BaudRate::B38400,
        BaudRate::B57600,
        BaudRate::B115200,
    ];

    /// Bits per second
    pub const fn bps(self) -> u32 {
        match self {
            BaudRate::B300 => 300,
            BaudRate::B600 => 600,
            BaudRate::B1200 => 1200,
            BaudRate::B2400 => 2400,
            BaudRate::B4800 => 4800,
            BaudRate::B9600 => 9600,
            BaudRate::B19200 => 19200,
            BaudRate::B38400 => 38400,
            BaudRate::B57600 => 57600,
            BaudRate::B115200 => 115_200,
        }
    }

    /// Look up a rate by its bits-per-second value
    pub fn from_bps(bps: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|rate| rate.bps() == bps)
    }

    /// Decode a baud-select control byte (`0x10`..=`0x19`)
    pub fn from_control(byte: u8) -> Option<Self> {
        let index = byte.checked_sub(BAUD_CONTROL_BASE)?;
        Self::ALL.get(index as usize).copied()
    }

    /// The control byte that selects this rate
    pub const fn control_byte(self) -> u8 {
        BAUD_CONTROL_BASE + self as u8
    }
}

/// Error returned when a numeric baud rate is not one of [`BaudRate::ALL`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnsupportedBaud(pub u32);

impl core::fmt::Display for UnsupportedBaud {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "unsupported baud rate {}", self.0)
    }
}

impl TryFrom<u32> for BaudRate {
    type Error = UnsupportedBaud;

    fn try_from(bps: u32) -> Result<Self, Self::Error> {
        Self::from_bps(bps).ok_or(UnsupportedBaud(bps))
    }
}

impl From<BaudRate> for u32 {
    fn from(rate: BaudRate) -> Self {
        rate.bps()
    }
}

/// 9-bit UART with half-duplex bus control
///
/// Every query must return immediately. The peripheral holds a single
/// received frame; a second frame arriving before [`receive`](Self::receive)
/// is called overwrites or drops the first without notice.
pub trait NineBitUart {
    /// Set the clock divisor for `baud`
    ///
    /// Leaves the peripheral in 9-bit framing. Callers only change the
    /// rate between frames.
    fn configure(&mut self, baud: BaudRate);

    /// Enable the peripheral and claim the direction pins
    fn start(&mut self);

    /// Disable the peripheral and release the direction pins
    fn stop(&mut self);

    /// True if a complete frame is waiting to be read
    fn receive_ready(&mut self) -> bool;

    /// Take the waiting frame
    ///
    /// Only meaningful after [`receive_ready`](Self::receive_ready)
    /// returned `true`.
    fn receive(&mut self) -> FrameValue;

    /// True while the transmit holding register cannot take a new frame
    fn transmit_busy(&mut self) -> bool;

    /// True once the last frame has fully left the shift register
    fn transmit_complete(&mut self) -> bool;

    /// Queue one frame for transmission
    ///
    /// Callers check [`transmit_busy`](Self::transmit_busy) first.
    fn transmit(&mut self, frame: FrameValue);

    /// Drive the bus (driver enabled)
    fn enter_talk(&mut self);

    /// Release the bus and listen (driver disabled, receiver enabled)
    fn enter_listen(&mut self);

    /// Neither drive nor listen (driver and receiver disabled)
    fn enter_offline(&mut self);
}

impl<T: NineBitUart + ?Sized> NineBitUart for &mut T {
    fn configure(&mut self, baud: BaudRate) {
        (**self).configure(baud)
    }

    fn start(&mut self) {
        (**self).start()
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn receive_ready(&mut self) -> bool {
        (**self).receive_ready()
    }

    fn receive(&mut self) -> FrameValue {
        (**self).receive()
    }

    fn transmit_busy(&mut self) -> bool {
        (**self).transmit_busy()
    }

    fn transmit_complete(&mut self) -> bool {
        (**self).transmit_complete()
    }

    fn transmit(&mut self, frame: FrameValue) {
        (**self).transmit(frame)
    }

    fn enter_talk(&mut self) {
        (**self).enter_talk()
    }

    fn enter_listen(&mut self) {
        (**self).enter_listen()
    }

    fn enter_offline(&mut self) {
        (**self).enter_offline()
    }
}
