//! Five-input video switch controlled by an IR remote, a button, and cable sensing.
//!
//! Runs on a Raspberry Pi Pico (RP2040).
#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use panic_probe as _;
use video_switch::button::spawn_button;
use video_switch::hardware::Hardware;
use video_switch::ir_nec::spawn_remote;
use video_switch::remote::CHANNEL_BUTTONS;
use video_switch::{
    Arbitrator, Debouncer, Never, RemoteMapping, Result, SwitchConfig, SwitchDriver,
    SwitchRequestCell,
};

/// Pending selection, written by the IR and button tasks and drained by the arbitrator.
static REQUESTS: SwitchRequestCell = SwitchRequestCell::new();

#[embassy_executor::main]
pub async fn main(spawner: Spawner) -> ! {
    // If it returns, something went wrong.
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Never> {
    let hardware = Hardware::default();
    let config = SwitchConfig::default();

    spawn_remote(
        hardware.ir,
        RemoteMapping::new(config.remote_address, &CHANNEL_BUTTONS),
        &REQUESTS,
        spawner,
    )?;
    spawn_button(
        hardware.button,
        Debouncer::new(config.debounce_window),
        &REQUESTS,
        spawner,
    )?;

    info!("video switch started");
    let driver = SwitchDriver::new(hardware.i2c, hardware.leds, config);
    Arbitrator::new(driver, &REQUESTS).run().await
}
