use derive_more::derive::Display;

use crate::{Error, Result};

/// One of the five selectable video inputs.
///
/// Exactly one channel is active at a time. Being an `enum`, a `Channel` can never hold
/// `0` or anything above `5`; raw numbers enter through [`Channel::try_from`], which
/// reports [`Error::ChannelOutOfRange`] instead of clamping.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, defmt::Format)]
#[repr(u8)]
pub enum Channel {
    #[display("1")]
    In1 = 1,
    #[display("2")]
    In2 = 2,
    #[display("3")]
    In3 = 3,
    #[display("4")]
    In4 = 4,
    #[display("5")]
    In5 = 5,
}

impl Channel {
    /// All channels in ascending order.
    pub const ALL: [Self; 5] = [Self::In1, Self::In2, Self::In3, Self::In4, Self::In5];

    /// Channel selected at power-up.
    pub const DEFAULT: Self = Self::In1;

    /// The input number, `1..=5`.
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Zero-based position, `0..5`, for indexing per-channel tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::In1 => 0,
            Self::In2 => 1,
            Self::In3 => 2,
            Self::In4 => 3,
            Self::In5 => 4,
        }
    }

    /// Cyclic successor over `1..=5`: `5` wraps to `1`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::In1 => Self::In2,
            Self::In2 => Self::In3,
            Self::In3 => Self::In4,
            Self::In4 => Self::In5,
            Self::In5 => Self::In1,
        }
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Channel {
    type Error = Error;

    fn try_from(number: u8) -> Result<Self> {
        match number {
            1 => Ok(Self::In1),
            2 => Ok(Self::In2),
            3 => Ok(Self::In3),
            4 => Ok(Self::In4),
            5 => Ok(Self::In5),
            _ => Err(Error::ChannelOutOfRange(number)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_wraps_after_five() {
        let numbers: [u8; 6] = core::array::from_fn(|step| {
            let mut channel = Channel::In4;
            for _ in 0..step {
                channel = channel.next();
            }
            channel.number()
        });
        assert_eq!(numbers, [4, 5, 1, 2, 3, 4]);
    }

    #[test]
    fn try_from_rejects_out_of_range() {
        assert!(matches!(
            Channel::try_from(0),
            Err(Error::ChannelOutOfRange(0))
        ));
        assert!(matches!(
            Channel::try_from(6),
            Err(Error::ChannelOutOfRange(6))
        ));
        for channel in Channel::ALL {
            assert_eq!(Channel::try_from(channel.number()).ok(), Some(channel));
        }
    }
}
