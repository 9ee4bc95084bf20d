//! The five front-panel LEDs that show which input is active.

use crate::Channel;

/// Sink for the "which input is active" indication.
pub trait Indicators {
    /// Turns every indicator off.
    fn clear(&mut self);
    /// Turns on the indicator for `channel`. Others are left as they are.
    fn light(&mut self, channel: Channel);
}

#[cfg(target_os = "none")]
pub use leds::IndicatorLeds;

#[cfg(target_os = "none")]
mod leds {
    use embassy_rp::gpio::{self, Level};

    use super::Indicators;
    use crate::Channel;

    /// One GPIO output per channel, ordered by [`Channel::index`].
    pub struct IndicatorLeds<'a>([gpio::Output<'a>; 5]);

    impl<'a> IndicatorLeds<'a> {
        #[must_use]
        pub const fn new(outputs: [gpio::Output<'a>; 5]) -> Self {
            Self(outputs)
        }
    }

    impl Indicators for IndicatorLeds<'_> {
        fn clear(&mut self) {
            for output in &mut self.0 {
                output.set_level(Level::Low);
            }
        }

        fn light(&mut self, channel: Channel) {
            if let Some(output) = self.0.get_mut(channel.index()) {
                output.set_level(Level::High);
            }
        }
    }
}
