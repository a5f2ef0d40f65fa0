//! Call-recording collaborators for bridge tests

use heapless::{Deque, Vec};
use serial9_hal::{BaudRate, FrameValue, HostPort, NineBitUart};

/// Maximum calls recorded between [`MockUart::take_calls`]
const MAX_CALLS: usize = 128;

/// One call made on the peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Configure(BaudRate),
    Start,
    Stop,
    ReceiveReady,
    Receive,
    TransmitBusy,
    TransmitComplete,
    Transmit(FrameValue),
    Talk,
    Listen,
    Offline,
}

/// Peripheral with scripted flags and a receive queue
#[derive(Default)]
pub struct MockUart {
    /// Frames the "wire" delivers, one per `receive`
    pub rx: Deque<FrameValue, 16>,
    pub busy: bool,
    pub complete: bool,
    pub calls: Vec<Call, MAX_CALLS>,
}

impl MockUart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deliver(&mut self, frame: FrameValue) {
        self.rx.push_back(frame).unwrap();
    }

    pub fn take_calls(&mut self) -> Vec<Call, MAX_CALLS> {
        core::mem::take(&mut self.calls)
    }

    pub fn transmitted(&self) -> Vec<FrameValue, MAX_CALLS> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Transmit(frame) => Some(*frame),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: Call) -> usize {
        self.calls.iter().filter(|&&call| call == wanted).count()
    }

    fn record(&mut self, call: Call) {
        self.calls.push(call).unwrap();
    }
}

impl NineBitUart for MockUart {
    fn configure(&mut self, baud: BaudRate) {
        self.record(Call::Configure(baud));
    }

    fn start(&mut self) {
        self.record(Call::Start);
    }

    fn stop(&mut self) {
        self.record(Call::Stop);
    }

    fn receive_ready(&mut self) -> bool {
        self.record(Call::ReceiveReady);
        !self.rx.is_empty()
    }

    fn receive(&mut self) -> FrameValue {
        self.record(Call::Receive);
        self.rx.pop_front().unwrap_or_default()
    }

    fn transmit_busy(&mut self) -> bool {
        self.record(Call::TransmitBusy);
        self.busy
    }

    fn transmit_complete(&mut self) -> bool {
        self.record(Call::TransmitComplete);
        self.complete
    }

    fn transmit(&mut self, frame: FrameValue) {
        self.record(Call::Transmit(frame));
    }

    fn enter_talk(&mut self) {
        self.record(Call::Talk);
    }

    fn enter_listen(&mut self) {
        self.record(Call::Listen);
    }

    fn enter_offline(&mut self) {
        self.record(Call::Offline);
    }
}

/// Host stream with a scripted input queue and captured output
#[derive(Default)]
pub struct MockHost {
    pub input: Deque<u8, 64>,
    pub output: Vec<u8, 64>,
    /// Calls to `available`
    pub polls: usize,
    pub reads: usize,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.input.push_back(byte).unwrap();
        }
    }
}

impl HostPort for MockHost {
    fn available(&mut self) -> usize {
        self.polls += 1;
        self.input.len()
    }

    fn read(&mut self) -> u8 {
        self.reads += 1;
        self.input.pop_front().unwrap_or(0)
    }

    fn write(&mut self, byte: u8) {
        self.output.push(byte).unwrap();
    }
}
