//! Host-facing byte stream
//!
//! On the reference hardware this is the USB CDC virtual serial port.
//! Only 8-bit bytes cross this link; 9-bit values are escape coded by
//! `serial9-protocol`.

/// Non-blocking byte stream towards the host
///
/// The bridge reads at most one byte and writes at most three bytes per
/// tick. None of these calls may block for an unbounded time; if the
/// underlying transport applies backpressure on `write`, UART frames may
/// be lost while the bridge waits.
pub trait HostPort {
    /// Number of bytes waiting to be read
    fn available(&mut self) -> usize;

    /// Read one byte
    ///
    /// Only valid when [`available`](Self::available) returned a non-zero
    /// count. Implementations may return any value otherwise.
    fn read(&mut self) -> u8;

    /// Write one byte towards the host
    fn write(&mut self, byte: u8);
}

impl<T: HostPort + ?Sized> HostPort for &mut T {
    fn available(&mut self) -> usize {
        (**self).available()
    }

    fn read(&mut self) -> u8 {
        (**self).read()
    }

    fn write(&mut self, byte: u8) {
        (**self).write(byte)
    }
}
