//! Bridge state machine
//!
//! Each [`Bridge::tick`] runs exactly one of these branches, first match
//! wins:
//!
//! 1. A UART frame is waiting: forward it to the host, escape coded.
//! 2. The UART cannot take another frame: wait.
//! 3. A host byte is waiting: decode it, possibly transmitting a frame.
//! 4. The last frame has left the wire: release the bus.
//! 5. Nothing to do.
//!
//! The peripheral holds a single received frame, so receive comes first;
//! a second frame arriving before the first is read is lost. Bus release
//! comes last so a host byte arriving right after a frame keeps the bus
//! in talk mode instead of flapping.

use serial9_hal::{BaudRate, FrameValue, HostPort, NineBitUart};
use serial9_protocol::{encode, Decoded, Decoder, DecoderState};

use crate::config::BridgeConfig;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    /// A UART frame was sent to the host
    Forwarded(FrameValue),
    /// Transmit holding register full, host input left waiting
    TransmitBusy,
    /// A host byte completed a data sequence and was transmitted
    Transmitted(FrameValue),
    /// A host byte started or continued an escape sequence
    Prefix(DecoderState),
    /// A host baud-select command reconfigured the UART
    BaudChanged(BaudRate),
    /// A host byte followed an escape but is not a defined control byte
    Discarded(u8),
    /// Transmission finished and the bus went back to listening
    Released,
    /// Nothing happened
    Idle,
}

/// Polling bridge between a host byte stream and a 9-bit UART
///
/// Holds no buffers: at most one byte crosses in each direction per tick.
/// Calls to [`tick`](Self::tick) must be serialized by the caller.
pub struct Bridge<U, H> {
    uart: U,
    host: H,
    config: BridgeConfig,
    /// Interpretation of the next host byte
    decoder: Decoder,
    /// True while we drive the bus
    talking: bool,
    baud: BaudRate,
}

impl<U, H> Bridge<U, H>
where
    U: NineBitUart,
    H: HostPort,
{
    /// Create a bridge; the peripheral is untouched until [`open`](Self::open)
    pub fn new(uart: U, host: H, config: BridgeConfig) -> Self {
        Self {
            uart,
            host,
            config,
            decoder: Decoder::new(),
            talking: false,
            baud: config.baud,
        }
    }

    /// Configure the UART for `baud`, start it, then listen on the bus
    ///
    /// Pass `bridge.config().baud` to open at the configured default.
    pub fn open(&mut self, baud: BaudRate) {
        self.baud = baud;
        self.uart.configure(baud);
        self.uart.start();
        self.uart.enter_listen();

        #[cfg(feature = "defmt")]
        defmt::info!("Bridge open at {} baud", self.baud.bps());
    }

    /// Stop the UART
    ///
    /// Any partial escape sequence is dropped so a reopened bridge starts
    /// clean.
    pub fn close(&mut self) {
        self.uart.stop();
        self.decoder.reset();
        self.talking = false;

        #[cfg(feature = "defmt")]
        defmt::info!("Bridge closed");
    }

    /// Run one scheduling step
    pub fn tick(&mut self) -> Tick {
        if self.uart.receive_ready() {
            let frame = self.uart.receive();
            for &byte in encode(frame).iter() {
                self.host.write(byte);
            }
            Tick::Forwarded(frame)
        } else if self.uart.transmit_busy() {
            Tick::TransmitBusy
        } else if self.host.available() > 0 {
            let byte = self.host.read();
            self.host_byte(byte)
        } else if self.uart.transmit_complete() {
            self.release_bus()
        } else {
            Tick::Idle
        }
    }

    /// Tick forever
    pub fn run(&mut self) -> ! {
        loop {
            self.tick();
        }
    }

    fn host_byte(&mut self, byte: u8) -> Tick {
        if !self.talking {
            self.talking = true;
            self.uart.enter_talk();

            #[cfg(feature = "defmt")]
            defmt::trace!("bus: talk");
        }

        match self.decoder.feed(byte) {
            None => Tick::Prefix(self.decoder.state()),
            Some(Decoded::Frame(frame)) => {
                self.uart.transmit(frame);
                Tick::Transmitted(frame)
            }
            Some(Decoded::SetBaud(rate)) => {
                // Only reached once the previous frame left the holding
                // register; the shift register may still be draining
                self.uart.configure(rate);
                self.baud = rate;

                #[cfg(feature = "defmt")]
                defmt::debug!("baud -> {}", rate.bps());

                Tick::BaudChanged(rate)
            }
            Some(Decoded::Illegal(byte)) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("illegal control byte {=u8:#x} dropped", byte);

                Tick::Discarded(byte)
            }
        }
    }

    fn release_bus(&mut self) -> Tick {
        if !self.talking {
            return Tick::Idle;
        }

        self.talking = false;
        self.uart.enter_listen();

        #[cfg(feature = "defmt")]
        defmt::trace!("bus: listen");

        Tick::Released
    }

    /// Current decoder state
    pub fn decoder_state(&self) -> DecoderState {
        self.decoder.state()
    }

    /// Whether the bridge is driving the bus
    pub fn is_talking(&self) -> bool {
        self.talking
    }

    /// Baud rate currently programmed into the UART
    ///
    /// Reports the configured default until [`open`](Self::open) runs.
    pub fn baud(&self) -> BaudRate {
        self.baud
    }

    /// Configuration the bridge was created with
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Borrow the peripheral
    pub fn uart(&self) -> &U {
        &self.uart
    }

    /// Mutably borrow the peripheral
    pub fn uart_mut(&mut self) -> &mut U {
        &mut self.uart
    }

    /// Borrow the host port
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutably borrow the host port
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Give back the collaborators
    pub fn release(self) -> (U, H) {
        (self.uart, self.host)
    }
}
