use embassy_time::Duration;

use crate::Chip;

/// Device address the remote control transmits with.
pub const REMOTE_ADDRESS: u16 = 0x0080;
/// Bus address of chip A (inputs 1, 2 and the cascade).
pub const CHIP_A_ADDRESS: u8 = 0x5A;
/// Bus address of chip B (inputs 3, 4, 5).
pub const CHIP_B_ADDRESS: u8 = 0x4A;
/// Time between arbitration cycles.
pub const CYCLE_INTERVAL: Duration = Duration::from_millis(200);
/// Button presses closer together than this are contact bounce.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(100);
/// I²C bus clock.
pub const I2C_FREQUENCY_HZ: u32 = 100_000;

/// Fixed settings of the switch. Nothing here is persisted or changed at run time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SwitchConfig {
    pub remote_address: u16,
    pub chip_a_address: u8,
    pub chip_b_address: u8,
    pub cycle_interval: Duration,
    pub debounce_window: Duration,
}

impl SwitchConfig {
    /// The settings the hardware is built for.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            remote_address: REMOTE_ADDRESS,
            chip_a_address: CHIP_A_ADDRESS,
            chip_b_address: CHIP_B_ADDRESS,
            cycle_interval: CYCLE_INTERVAL,
            debounce_window: DEBOUNCE_WINDOW,
        }
    }

    /// Bus address of `chip`.
    #[must_use]
    pub const fn address(&self, chip: Chip) -> u8 {
        match chip {
            Chip::A => self.chip_a_address,
            Chip::B => self.chip_b_address,
        }
    }
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self::new()
    }
}
