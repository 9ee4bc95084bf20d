//! Test doubles shared by the integration tests.
#![allow(dead_code, reason = "Each test binary uses a different subset")]

use std::collections::{HashMap, VecDeque};

use embedded_hal_async::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use video_switch::chip::STATUS_REG;
use video_switch::config::{CHIP_A_ADDRESS, CHIP_B_ADDRESS};
use video_switch::{Channel, Indicators};

pub const A: u8 = CHIP_A_ADDRESS;
pub const B: u8 = CHIP_B_ADDRESS;

/// How a chip answers a status read.
#[derive(Clone, Copy, Debug)]
pub enum Reply {
    Byte(u8),
    Fail,
}

/// Scripted I²C bus. Records every register write and answers status reads from a
/// per-address queue, falling back to a steady reply.
#[derive(Debug, Default)]
pub struct FakeBus {
    writes: Vec<(u8, u8, u8)>,
    steady: HashMap<u8, Reply>,
    queued: HashMap<u8, VecDeque<Reply>>,
    failing_writes: Vec<u8>,
}

impl FakeBus {
    /// A bus where both chips report `chip_a` and `chip_b` on every status read.
    pub fn with_status(chip_a: u8, chip_b: u8) -> Self {
        let mut bus = Self::default();
        bus.set_status(A, Reply::Byte(chip_a));
        bus.set_status(B, Reply::Byte(chip_b));
        bus
    }

    pub fn set_status(&mut self, address: u8, reply: Reply) {
        self.steady.insert(address, reply);
    }

    /// Answer the next status read from `address` with `reply`, then go back to steady.
    pub fn queue_status(&mut self, address: u8, reply: Reply) {
        self.queued.entry(address).or_default().push_back(reply);
    }

    pub fn fail_writes_to(&mut self, address: u8, fail: bool) {
        self.failing_writes.retain(|&failing| failing != address);
        if fail {
            self.failing_writes.push(address);
        }
    }

    /// All successful writes as `(address, register, value)`, in bus order.
    pub fn writes(&self) -> &[(u8, u8, u8)] {
        &self.writes
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    fn write_register(&mut self, address: u8, bytes: &[u8]) -> Result<(), ErrorKind> {
        if self.failing_writes.contains(&address) {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        let &[register, value] = bytes else {
            return Err(ErrorKind::Other);
        };
        self.writes.push((address, register, value));
        Ok(())
    }

    fn read_status(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), ErrorKind> {
        let reply = self
            .queued
            .get_mut(&address)
            .and_then(VecDeque::pop_front)
            .or_else(|| self.steady.get(&address).copied())
            .unwrap_or(Reply::Fail);
        match (reply, buffer) {
            (Reply::Byte(byte), [slot]) => {
                *slot = byte;
                Ok(())
            }
            (Reply::Fail, _) => Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)),
            (Reply::Byte(_), _) => Err(ErrorKind::Other),
        }
    }
}

impl ErrorType for FakeBus {
    type Error = ErrorKind;
}

impl I2c for FakeBus {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        match operations {
            // Register-addressed read: [register], then the value.
            [Operation::Write(register), Operation::Read(buffer)]
                if *register == [STATUS_REG].as_slice() =>
            {
                self.read_status(address, buffer)
            }
            [Operation::Write(bytes)] => self.write_register(address, bytes),
            _ => Err(ErrorKind::Other),
        }
    }
}

/// Indicator double that remembers which LEDs are on.
#[derive(Debug, Default)]
pub struct RecordingLeds {
    pub lit: [bool; 5],
    pub clears: usize,
}

impl RecordingLeds {
    /// The single lit channel, or `None` if zero or several are on.
    pub fn only_lit(&self) -> Option<Channel> {
        let mut lit = Channel::ALL
            .into_iter()
            .filter(|channel| self.lit[channel.index()]);
        match (lit.next(), lit.next()) {
            (Some(channel), None) => Some(channel),
            _ => None,
        }
    }
}

impl Indicators for RecordingLeds {
    fn clear(&mut self) {
        self.lit = [false; 5];
        self.clears += 1;
    }

    fn light(&mut self, channel: Channel) {
        self.lit[channel.index()] = true;
    }
}

/// The 16 writes of the static configuration, as `(address, register, value)`.
pub fn static_config_writes() -> Vec<(u8, u8, u8)> {
    vec![
        (A, 0x02, 0xFC),
        (B, 0x02, 0xFC),
        (A, 0x03, 0x71),
        (B, 0x03, 0x71),
        (A, 0x04, 0x5D),
        (B, 0x04, 0x5D),
        (A, 0x09, 0x42),
        (B, 0x09, 0x42),
        (A, 0x0A, 0x0E),
        (B, 0x0A, 0x09),
        (A, 0x0B, 0x0A),
        (B, 0x0B, 0x09),
        (A, 0x0C, 0xC5),
        (B, 0x0C, 0xC0),
        (A, 0x0D, 0x01),
        (B, 0x0D, 0x01),
    ]
}
