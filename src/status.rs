//! Sticky connection status of the output and the five inputs.

use crate::{Channel, chip::ChipStatus};

/// Number of status slots: the output plus five inputs.
pub const SLOT_COUNT: usize = 6;
/// Slot index of the output-connected flag. Inputs use their channel number.
pub const OUTPUT_SLOT: usize = 0;

/// Last known state of one slot.
///
/// A slot starts `Unknown` and becomes `Known` after the first successful read. It
/// never goes back to `Unknown`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, defmt::Format)]
pub enum SlotStatus {
    #[default]
    Unknown,
    Known(bool),
}

impl SlotStatus {
    /// `true` only for a slot known to be connected.
    #[must_use]
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Known(true))
    }
}

/// One poll's worth of readings. `None` marks a slot whose chip gave no usable answer.
pub type StatusReading = [Option<bool>; SLOT_COUNT];

/// Persistent status vector: index 0 is the output, indexes 1..=5 the inputs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, defmt::Format)]
pub struct ConnectionStatus([SlotStatus; SLOT_COUNT]);

impl ConnectionStatus {
    /// All slots unknown, as at power-up.
    #[must_use]
    pub const fn new() -> Self {
        Self([SlotStatus::Unknown; SLOT_COUNT])
    }

    #[must_use]
    pub fn slot(&self, index: usize) -> SlotStatus {
        self.0.get(index).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn input(&self, channel: Channel) -> SlotStatus {
        self.slot(usize::from(channel.number()))
    }

    /// Whether `channel` is known to have a source plugged in.
    #[must_use]
    pub fn is_connected(&self, channel: Channel) -> bool {
        self.input(channel).is_connected()
    }

    /// Whether a display is known to be plugged into the output.
    #[must_use]
    pub fn output_connected(&self) -> bool {
        self.slot(OUTPUT_SLOT).is_connected()
    }

    /// Overwrites every slot that has a reading and keeps the rest.
    ///
    /// Returns, per slot, `true` where the known value changed (including the first
    /// reading of an unknown slot).
    pub fn merge(&mut self, reading: &StatusReading) -> [bool; SLOT_COUNT] {
        let mut changed = [false; SLOT_COUNT];
        for ((slot, value), flag) in self.0.iter_mut().zip(reading).zip(&mut changed) {
            if let Some(value) = *value {
                let next = SlotStatus::Known(value);
                *flag = *slot != next;
                *slot = next;
            }
        }
        changed
    }
}

/// Places one chip's decoded bits into the 6-slot layout.
///
/// Chip A reports the output and inputs 1, 2 (its third input is the cascade from chip
/// B and is ignored). Chip B reports inputs 3, 4, 5 (its output bit is ignored).
#[must_use]
pub const fn chip_a_reading(status: ChipStatus) -> StatusReading {
    let [in1, in2, _cascade] = status.inputs;
    [Some(status.output), Some(in1), Some(in2), None, None, None]
}

/// See [`chip_a_reading`].
#[must_use]
pub const fn chip_b_reading(status: ChipStatus) -> StatusReading {
    let [in3, in4, in5] = status.inputs;
    [None, None, None, Some(in3), Some(in4), Some(in5)]
}
