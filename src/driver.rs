//! Bus driver that makes the two switch chips act as one 5-way switch.
//!
//! See [`SwitchDriver`] for usage examples.

use embedded_hal_async::i2c::I2c;

use crate::chip::{self, ChipStatus, RegisterWrite, STATUS_REG};
use crate::{Channel, Chip, Error, Indicators, Result, SwitchConfig};

/// Drives both switch chips over one I²C bus and mirrors the selection on the indicators.
///
/// Every operation stops at the first failed bus transaction and returns
/// [`Error::Transport`]. Nothing is retried here; the arbitrator's next cycle is the
/// retry.
///
/// # Examples
/// ```no_run
/// # use video_switch::{Channel, Indicators, SwitchConfig, SwitchDriver};
/// # async fn example(
/// #     bus: impl embedded_hal_async::i2c::I2c,
/// #     leds: impl Indicators,
/// # ) -> video_switch::Result<()> {
/// let mut driver = SwitchDriver::new(bus, leds, SwitchConfig::default());
/// driver.select_channel(Channel::In3).await?;
/// let status = driver.read_status(video_switch::Chip::B).await?;
/// # let _ = status;
/// # Ok(())
/// # }
/// ```
pub struct SwitchDriver<B, L> {
    bus: B,
    indicators: L,
    config: SwitchConfig,
}

impl<B: I2c, L: Indicators> SwitchDriver<B, L> {
    #[must_use]
    pub const fn new(bus: B, indicators: L, config: SwitchConfig) -> Self {
        Self {
            bus,
            indicators,
            config,
        }
    }

    /// Routes `channel` to the output.
    ///
    /// Clears the indicators, writes the selection register on chip A then chip B,
    /// lights the indicator for `channel`, and re-sends the static configuration in
    /// case a chip has reset since it was last configured.
    ///
    /// # Errors
    /// Returns [`Error::Transport`] from the first failed write. Later writes are not
    /// attempted and the indicators stay cleared.
    pub async fn select_channel(&mut self, channel: Channel) -> Result<()> {
        self.indicators.clear();
        for write in chip::selection_writes(channel) {
            self.send(write).await?;
        }
        self.indicators.light(channel);
        self.apply_static_config().await
    }

    /// Writes the full static configuration sequence, in order.
    ///
    /// # Errors
    /// Returns [`Error::Transport`] from the first failed write.
    pub async fn apply_static_config(&mut self) -> Result<()> {
        for write in chip::STATIC_CONFIG {
            self.send(write).await?;
        }
        Ok(())
    }

    /// Sends one register write to each chip in its target, chip A first.
    ///
    /// # Errors
    /// Returns [`Error::Transport`] from the first failed write.
    pub async fn send(&mut self, write: RegisterWrite) -> Result<()> {
        for chip in Chip::BOTH {
            if write.target.includes(chip) {
                let address = self.config.address(chip);
                self.bus
                    .write(address, &[write.register, write.value])
                    .await
                    .map_err(|err| Error::transport(chip, &err))?;
            }
        }
        Ok(())
    }

    /// Reads and decodes one chip's status register.
    ///
    /// # Errors
    /// Returns [`Error::Transport`] if the read fails and [`Error::InvalidStatusCode`] if
    /// the chip answers `0x10`.
    pub async fn read_status(&mut self, chip: Chip) -> Result<ChipStatus> {
        let mut buffer = [0_u8; 1];
        self.bus
            .write_read(self.config.address(chip), &[STATUS_REG], &mut buffer)
            .await
            .map_err(|err| Error::transport(chip, &err))?;
        let [byte] = buffer;
        ChipStatus::decode(byte).ok_or(Error::InvalidStatusCode(chip))
    }

    pub const fn config(&self) -> &SwitchConfig {
        &self.config
    }

    pub const fn indicators(&self) -> &L {
        &self.indicators
    }

    pub const fn bus(&self) -> &B {
        &self.bus
    }

    pub const fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }
}
