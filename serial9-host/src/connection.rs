//! Transport to the bridge

use std::io::{self, ErrorKind, Read, Write};

/// Byte transport to the bridge's USB port
pub trait Connection {
    /// Send all of `data`
    fn send(&mut self, data: &[u8]) -> io::Result<()>;

    /// Read whatever is available into `buf`
    ///
    /// Returns 0 when nothing arrived before the transport's timeout.
    fn receive(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl<T: Read + Write> Connection for T {
    fn send(&mut self, data: &[u8]) -> io::Result<()> {
        self.write_all(data)?;
        self.flush()
    }

    fn receive(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.read(buf) {
            Ok(n) => Ok(n),
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
                ) =>
            {
                Ok(0)
            }
            Err(e) => Err(e),
        }
    }
}
