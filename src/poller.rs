//! Per-cycle connection polling with a sticky-on-failure policy.

use embedded_hal_async::i2c::I2c;

use crate::status::{OUTPUT_SLOT, StatusReading, chip_a_reading, chip_b_reading};
use crate::{Chip, ConnectionStatus, Indicators, SwitchDriver};

/// Owns the persistent [`ConnectionStatus`] and refreshes it from both chips.
///
/// A chip that fails to answer, or answers with the invalid code `0x10`, contributes
/// nothing to the cycle: its three slots keep their previous values. A good answer
/// always overwrites its slots, `true` to `false` included.
#[derive(Debug, Default)]
pub struct StatusPoller {
    status: ConnectionStatus,
}

impl StatusPoller {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: ConnectionStatus::new(),
        }
    }

    /// The status as of the last poll.
    #[must_use]
    pub const fn status(&self) -> &ConnectionStatus {
        &self.status
    }

    /// Reads both chips, merges what was readable, and returns the updated status.
    pub async fn poll<B: I2c, L: Indicators>(
        &mut self,
        driver: &mut SwitchDriver<B, L>,
    ) -> ConnectionStatus {
        for chip in Chip::BOTH {
            let status = match driver.read_status(chip).await {
                Ok(status) => status,
                Err(err) => {
                    warn!("status: keeping last values for chip {}: {}", chip, err);
                    continue;
                }
            };
            let reading = match chip {
                Chip::A => chip_a_reading(status),
                Chip::B => chip_b_reading(status),
            };
            self.merge(&reading);
        }
        self.status
    }

    fn merge(&mut self, reading: &StatusReading) {
        let changed = self.status.merge(reading);
        for (index, (flag, value)) in changed.iter().zip(reading).enumerate() {
            if !*flag {
                continue;
            }
            let state = if value.unwrap_or_default() {
                "connected"
            } else {
                "disconnected"
            };
            if index == OUTPUT_SLOT {
                info!("status: output {}", state);
            } else {
                info!("status: input {} {}", index, state);
            }
        }
    }
}
