use derive_more::derive::{Display, Error};
use embedded_hal::i2c::ErrorKind;

use crate::Chip;

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
#[derive(Debug, Display, Error, defmt::Format)]
pub enum Error {
    // `#[error(not(source))]` below tells `derive_more` that `embassy_executor::SpawnError` does
    // not implement Rust's `core::error::Error` trait.
    #[cfg(target_os = "none")]
    #[display("{_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    /// A bus transaction with one of the switch chips failed.
    #[display("I2C transaction with chip {chip} failed: {kind:?}")]
    Transport { chip: Chip, kind: ErrorKind },

    /// The chip answered a status read with `0x10`, which it documents as invalid.
    #[display("chip {_0} returned the invalid status code 0x10")]
    InvalidStatusCode(#[error(not(source))] Chip),

    /// A raw channel number outside `1..=5`.
    #[display("channel {_0} is outside 1..=5")]
    ChannelOutOfRange(#[error(not(source))] u8),
}

impl Error {
    /// Wraps a bus error from the given chip.
    pub fn transport<E: embedded_hal::i2c::Error>(chip: Chip, err: &E) -> Self {
        Self::Transport {
            chip,
            kind: err.kind(),
        }
    }
}

#[cfg(target_os = "none")]
impl From<embassy_executor::SpawnError> for Error {
    fn from(err: embassy_executor::SpawnError) -> Self {
        Self::TaskSpawn(err)
    }
}
