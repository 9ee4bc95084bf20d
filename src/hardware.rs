use embassy_rp::{
    Peri, bind_interrupts,
    gpio::{self, Level},
    i2c::{self, Async, I2c},
    peripherals::{I2C0, PIN_1, PIN_7},
};

use crate::config::I2C_FREQUENCY_HZ;
use crate::indicator::IndicatorLeds;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

/// Board wiring: both switch chips on I2C0, IR receiver, button, and five input LEDs.
pub struct Hardware {
    pub i2c: I2c<'static, I2C0, Async>,
    pub leds: IndicatorLeds<'static>,
    pub ir: Peri<'static, PIN_7>,
    pub button: Peri<'static, PIN_1>,
}

impl Default for Hardware {
    fn default() -> Self {
        let peripherals: embassy_rp::Peripherals =
            embassy_rp::init(embassy_rp::config::Config::default());

        let mut i2c_config = i2c::Config::default();
        i2c_config.frequency = I2C_FREQUENCY_HZ;
        // SDA on GPIO8 (physical pin 11), SCL on GPIO9 (physical pin 12).
        let i2c = I2c::new_async(
            peripherals.I2C0,
            peripherals.PIN_9,
            peripherals.PIN_8,
            Irqs,
            i2c_config,
        );

        // Ordered by input: LEDs for inputs 4 and 5 sit on GPIO2 and GPIO3.
        let leds = IndicatorLeds::new([
            gpio::Output::new(peripherals.PIN_4, Level::Low),
            gpio::Output::new(peripherals.PIN_5, Level::Low),
            gpio::Output::new(peripherals.PIN_6, Level::Low),
            gpio::Output::new(peripherals.PIN_2, Level::Low),
            gpio::Output::new(peripherals.PIN_3, Level::Low),
        ]);

        Self {
            i2c,
            leds,
            ir: peripherals.PIN_7,
            button: peripherals.PIN_1,
        }
    }
}
