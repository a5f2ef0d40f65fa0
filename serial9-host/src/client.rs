//! Escape-coding client

use serial9_hal::{BaudRate, FrameValue};
use serial9_protocol::{baud_command, encode, Decoded, Decoder};

use crate::connection::Connection;
use crate::error::HostError;

/// Size of each read from the connection
const RX_CHUNK: usize = 256;

/// Client for a serial9 bridge
///
/// Partial escape sequences are kept across [`rx`](Self::rx) calls, so
/// reads may split a sequence anywhere.
pub struct Serial9<C> {
    conn: C,
    decoder: Decoder,
}

impl<C: Connection> Serial9<C> {
    /// Wrap a connection to the bridge
    pub fn new(conn: C) -> Self {
        Self {
            conn,
            decoder: Decoder::new(),
        }
    }

    /// Send `data` with the 9th bit clear on every byte
    pub fn tx8(&mut self, data: &[u8]) -> Result<(), HostError> {
        log::debug!("tx8 {:02x?}", data);
        self.send_frames(data.iter().copied().map(FrameValue::low))
    }

    /// Send `data` with the 9th bit set on every byte
    pub fn tx9(&mut self, data: &[u8]) -> Result<(), HostError> {
        log::debug!("tx9 {:02x?}", data);
        self.send_frames(data.iter().copied().map(FrameValue::high))
    }

    /// Send arbitrary 9-bit frames
    pub fn send_frames<I>(&mut self, frames: I) -> Result<(), HostError>
    where
        I: IntoIterator<Item = FrameValue>,
    {
        let mut wire = Vec::new();
        for frame in frames {
            wire.extend_from_slice(&encode(frame));
        }
        if wire.is_empty() {
            return Ok(());
        }
        self.conn.send(&wire)?;
        Ok(())
    }

    /// Ask the bridge to switch its UART to `rate`
    ///
    /// The USB link itself is unaffected.
    pub fn set_baud(&mut self, rate: BaudRate) -> Result<(), HostError> {
        log::info!("set bridge baud to {}", rate.bps());
        self.conn.send(&baud_command(rate))?;
        Ok(())
    }

    /// Drain what the bridge has sent and decode it
    ///
    /// Values with the 9th bit set come back in `0x100..=0x1FF`.
    pub fn rx(&mut self) -> Result<Vec<FrameValue>, HostError> {
        let mut frames = Vec::new();
        let mut buf = [0u8; RX_CHUNK];

        loop {
            let n = self.conn.receive(&mut buf)?;
            for &byte in &buf[..n] {
                match self.decoder.feed(byte) {
                    None => {}
                    Some(Decoded::Frame(frame)) => frames.push(frame),
                    Some(Decoded::SetBaud(rate)) => {
                        log::warn!(
                            "ignoring baud command {:#04x} from bridge",
                            rate.control_byte()
                        );
                    }
                    Some(Decoded::Illegal(byte)) => {
                        log::warn!("ignoring illegal escape sequence ff {:02x}", byte);
                    }
                }
            }
            if n < buf.len() {
                break;
            }
        }

        log::debug!("rx {} frames", frames.len());
        Ok(frames)
    }

    /// Borrow the connection
    pub fn get_ref(&self) -> &C {
        &self.conn
    }

    /// Mutably borrow the connection
    pub fn get_mut(&mut self) -> &mut C {
        &mut self.conn
    }

    /// Unwrap the connection
    pub fn into_inner(self) -> C {
        self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::{self, Read, Write};

    /// Captures writes and replays scripted reads in fixed-size chunks
    #[derive(Default)]
    struct FakeLink {
        sent: Vec<u8>,
        incoming: VecDeque<Vec<u8>>,
    }

    impl Read for FakeLink {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let Some(mut chunk) = self.incoming.pop_front() else {
                return Ok(0);
            };
            let n = chunk.len().min(buf.len());
            buf[..n].copy_from_slice(&chunk[..n]);
            if n < chunk.len() {
                self.incoming.push_front(chunk.split_off(n));
            }
            Ok(n)
        }
    }

    impl Write for FakeLink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.sent.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_tx8_escapes_ff() {
        let mut client = Serial9::new(FakeLink::default());
        client.tx8(b"abc\xff\x01\xff123").unwrap();

        assert_eq!(client.get_ref().sent, b"abc\xff\xff\x01\xff\xff123");
    }

    #[test]
    fn test_tx9_prefixes_every_byte() {
        let mut client = Serial9::new(FakeLink::default());
        client.tx9(&[0x02, 0xFF]).unwrap();

        assert_eq!(client.get_ref().sent, [0xFF, 0x01, 0x02, 0xFF, 0x01, 0xFF]);
    }

    #[test]
    fn test_empty_send_writes_nothing() {
        let mut client = Serial9::new(FakeLink::default());
        client.tx8(&[]).unwrap();
        assert!(client.get_ref().sent.is_empty());
    }

    #[test]
    fn test_set_baud() {
        let mut client = Serial9::new(FakeLink::default());
        client.set_baud(BaudRate::B19200).unwrap();

        assert_eq!(client.get_ref().sent, [0xFF, 0x16]);
    }

    #[test]
    fn test_rx_decodes_mixed_stream() {
        let mut link = FakeLink::default();
        link.incoming
            .push_back(vec![0x41, 0xFF, 0xFF, 0xFF, 0x01, 0x02, 0xFF, 0xAA, 0x42]);
        let mut client = Serial9::new(link);

        let frames = client.rx().unwrap();
        assert_eq!(
            frames,
            vec![
                FrameValue::low(0x41),
                FrameValue::low(0xFF),
                FrameValue::high(0x02),
                FrameValue::low(0x42),
            ]
        );
    }

    #[test]
    fn test_rx_keeps_sequence_across_calls() {
        let mut link = FakeLink::default();
        link.incoming
            .push_back(vec![0xFF, 0x01]);
        let mut client = Serial9::new(link);

        assert!(client.rx().unwrap().is_empty());

        client.get_mut().incoming.push_back(vec![0x33]);
        assert_eq!(client.rx().unwrap(), vec![FrameValue::high(0x33)]);
    }

    #[test]
    fn test_rx_drains_more_than_one_chunk() {
        let mut link = FakeLink::default();
        link.incoming
            .push_back(vec![0x11; RX_CHUNK + 10]);
        let mut client = Serial9::new(link);

        assert_eq!(client.rx().unwrap().len(), RX_CHUNK + 10);
    }

    #[test]
    fn test_rx_ignores_baud_command() {
        let mut link = FakeLink::default();
        link.incoming
            .push_back(vec![0xFF, 0x15, 0x07]);
        let mut client = Serial9::new(link);

        assert_eq!(client.rx().unwrap(), vec![FrameValue::low(0x07)]);
    }

    #[test]
    fn test_loopback_roundtrip() {
        let mut client = Serial9::new(FakeLink::default());
        let frames: Vec<FrameValue> = (0..=0x1FF).map(FrameValue::new).collect();
        client.send_frames(frames.iter().copied()).unwrap();

        let wire = std::mem::take(&mut client.get_mut().sent);
        client.get_mut().incoming.push_back(wire);

        assert_eq!(client.rx().unwrap(), frames);
    }
}
