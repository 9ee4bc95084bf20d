//! Register protocol of the two 3-input switch chips.
//!
//! Chip A switches inputs 1 and 2 directly; its third input is the output of chip B,
//! which switches inputs 3, 4 and 5. A 5-way selection therefore always writes both
//! chips: channels 3..5 route chip A to its third input and then choose on chip B.
//!
//! Everything here is data. [`crate::SwitchDriver`] performs the bus writes.

use derive_more::derive::Display;

use crate::Channel;

/// One of the two switch chips on the shared bus.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, defmt::Format)]
pub enum Chip {
    /// Carries inputs 1 and 2, the cascade from chip B, and the output-connected sense.
    #[display("A")]
    A,
    /// Carries inputs 3, 4 and 5.
    #[display("B")]
    B,
}

impl Chip {
    /// Both chips, in the order every dual write is sent.
    pub const BOTH: [Self; 2] = [Self::A, Self::B];
}

/// Which chips receive a register write.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub enum Target {
    /// The same byte goes to chip A, then to chip B.
    Both,
    /// Only the named chip.
    Only(Chip),
}

impl Target {
    /// Whether `chip` receives writes sent to this target.
    #[must_use]
    pub fn includes(self, chip: Chip) -> bool {
        match self {
            Self::Both => true,
            Self::Only(only) => only == chip,
        }
    }
}

/// One unit of bus output: a single register byte sent to one or both chips.
///
/// Writing the same `RegisterWrite` twice leaves the chips in the same state.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub struct RegisterWrite {
    pub register: u8,
    pub value: u8,
    pub target: Target,
}

impl RegisterWrite {
    const fn both(register: u8, value: u8) -> Self {
        Self {
            register,
            value,
            target: Target::Both,
        }
    }

    const fn only(chip: Chip, register: u8, value: u8) -> Self {
        Self {
            register,
            value,
            target: Target::Only(chip),
        }
    }
}

// ===== Registers ============================================================

/// Input selection register (write).
pub const SELECT_REG: u8 = 0x10;
/// Connection status register (read).
pub const STATUS_REG: u8 = 0x11;

/// Bits always set in the selection register.
pub const SELECT_BASE: u8 = 0x18;
pub const EN_IN1: u8 = 1 << 7;
pub const EN_IN2: u8 = 1 << 6;
pub const EN_IN3: u8 = 1 << 5;

/// Status bit for the chip's first input (input 1 on chip A, input 3 on chip B).
pub const STATUS_IN1: u8 = 1 << 0;
/// Status bit for the chip's second input (input 2 on chip A, input 4 on chip B).
pub const STATUS_IN2: u8 = 1 << 1;
/// Status bit for the chip's third input (input 5 on chip B; the cascade on chip A).
pub const STATUS_IN3: u8 = 1 << 2;
/// Output-connected bit. Only meaningful on chip A.
pub const STATUS_OUT: u8 = 1 << 4;

/// Status byte the chips return when they have nothing valid to report.
pub const STATUS_INVALID: u8 = 0x10;

/// Extra enable bits for `channel`, as `(chip A, chip B)`.
const fn enable_bits(channel: Channel) -> (u8, u8) {
    match channel {
        Channel::In1 => (EN_IN1, 0),
        Channel::In2 => (EN_IN2, 0),
        Channel::In3 => (EN_IN3, EN_IN1),
        Channel::In4 => (EN_IN3, EN_IN2),
        Channel::In5 => (EN_IN3, EN_IN3),
    }
}

/// Selection register bytes `(chip A, chip B)` that route `channel` to the output.
#[must_use]
pub const fn selection_bytes(channel: Channel) -> (u8, u8) {
    let (chip_a, chip_b) = enable_bits(channel);
    (SELECT_BASE | chip_a, SELECT_BASE | chip_b)
}

/// The two writes that realize `channel`: chip A first, then chip B.
#[must_use]
pub const fn selection_writes(channel: Channel) -> [RegisterWrite; 2] {
    let (chip_a, chip_b) = selection_bytes(channel);
    [
        RegisterWrite::only(Chip::A, SELECT_REG, chip_a),
        RegisterWrite::only(Chip::B, SELECT_REG, chip_b),
    ]
}

/// Static configuration, sent in this order after every selection.
///
/// Registers `0x0A`..`0x0C` differ between the chips; all others are shared.
pub const STATIC_CONFIG: [RegisterWrite; 11] = [
    RegisterWrite::both(0x02, 0xFC),
    RegisterWrite::both(0x03, 0x71),
    RegisterWrite::both(0x04, 0x5D),
    RegisterWrite::both(0x09, 0x42),
    RegisterWrite::only(Chip::A, 0x0A, 0x0E),
    RegisterWrite::only(Chip::B, 0x0A, 0x09),
    RegisterWrite::only(Chip::A, 0x0B, 0x0A),
    RegisterWrite::only(Chip::B, 0x0B, 0x09),
    RegisterWrite::only(Chip::A, 0x0C, 0xC5),
    RegisterWrite::only(Chip::B, 0x0C, 0xC0),
    RegisterWrite::both(0x0D, 0x01),
];

/// Presence bits decoded from one chip's status byte.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, defmt::Format)]
pub struct ChipStatus {
    pub output: bool,
    pub inputs: [bool; 3],
}

impl ChipStatus {
    /// Decodes a status byte, or `None` for the invalid code `0x10`.
    #[must_use]
    pub const fn decode(byte: u8) -> Option<Self> {
        if byte == STATUS_INVALID {
            return None;
        }
        Some(Self {
            output: byte & STATUS_OUT != 0,
            inputs: [
                byte & STATUS_IN1 != 0,
                byte & STATUS_IN2 != 0,
                byte & STATUS_IN3 != 0,
            ],
        })
    }
}
