//! The input-selection state machine.
//!
//! See [`Arbitrator`] for the cycle and [`auto_scan`] for the button's fallback search.

use embassy_time::Timer;
use embedded_hal_async::i2c::I2c;

use crate::{
    Channel, ConnectionStatus, Indicators, StatusPoller, SwitchDriver, SwitchRequest,
    SwitchRequestCell,
};

/// Steps taken by [`auto_scan`].
pub const AUTO_SCAN_STEPS: usize = 6;

/// Searches forward from `start` for a connected input.
///
/// Takes up to [`AUTO_SCAN_STEPS`] cyclic steps and stops on the first input known to be
/// connected. With nothing connected the scan runs out on the sixth step which, over a
/// cycle of five, is the same input as the first step: the result is `start.next()`,
/// not `start`. A press with nothing plugged in therefore still moves one input on.
///
/// ```
/// use video_switch::{Channel, ConnectionStatus, auto_scan};
///
/// let nothing = ConnectionStatus::new();
/// assert_eq!(auto_scan(Channel::In3, &nothing), Channel::In4);
/// assert_eq!(auto_scan(Channel::In5, &nothing), Channel::In1);
/// ```
#[must_use]
pub fn auto_scan(start: Channel, status: &ConnectionStatus) -> Channel {
    let mut candidate = start;
    for _ in 0..AUTO_SCAN_STEPS {
        candidate = candidate.next();
        if status.is_connected(candidate) {
            break;
        }
    }
    candidate
}

/// Decides which input is routed to the output and keeps the chips in that state.
///
/// Each [`run_cycle`](Self::run_cycle):
/// 1. takes at most one pending [`SwitchRequest`] and turns it into a candidate channel,
/// 2. if the candidate differs from the active channel, selects it on the chips; on a bus
///    error the active channel is left alone and the same switch is tried next cycle,
/// 3. refreshes the connection status for the next auto-scan.
///
/// [`run`](Self::run) repeats that forever at the configured cycle interval.
///
/// The candidate starts at channel 1 with no active channel, so the first cycle
/// configures the chips and selects channel 1.
pub struct Arbitrator<'a, B, L> {
    driver: SwitchDriver<B, L>,
    poller: StatusPoller,
    requests: &'a SwitchRequestCell,
    active: Option<Channel>,
    candidate: Channel,
}

impl<'a, B: I2c, L: Indicators> Arbitrator<'a, B, L> {
    #[must_use]
    pub const fn new(driver: SwitchDriver<B, L>, requests: &'a SwitchRequestCell) -> Self {
        Self {
            driver,
            poller: StatusPoller::new(),
            requests,
            active: None,
            candidate: Channel::DEFAULT,
        }
    }

    /// Runs one arbitration cycle. Bus errors are logged, never returned.
    pub async fn run_cycle(&mut self) {
        if let Some(request) = self.requests.take() {
            self.candidate = self.resolve(request);
        }

        if self.active != Some(self.candidate) {
            let channel = self.candidate;
            match self.driver.select_channel(channel).await {
                Ok(()) => {
                    info!("switch: input {} selected", channel);
                    self.active = Some(channel);
                }
                Err(err) => error!("switch: could not select input {}: {}", channel, err),
            }
        }

        self.poller.poll(&mut self.driver).await;
    }

    /// Runs cycles forever, sleeping the configured interval between them.
    pub async fn run(mut self) -> ! {
        let interval = self.driver.config().cycle_interval;
        loop {
            self.run_cycle().await;
            Timer::after(interval).await;
        }
    }

    fn resolve(&self, request: SwitchRequest) -> Channel {
        match request {
            SwitchRequest::SelectChannel(channel) => {
                info!("switch: remote asked for input {}", channel);
                channel
            }
            SwitchRequest::AutoAdvance => {
                let channel = auto_scan(self.candidate, self.poller.status());
                info!(
                    "switch: auto-advance from input {} to input {}",
                    self.candidate, channel
                );
                channel
            }
        }
    }

    /// The channel last confirmed on the chips, `None` before the first success.
    #[must_use]
    pub const fn active_channel(&self) -> Option<Channel> {
        self.active
    }

    /// The channel the arbitrator is steering towards.
    #[must_use]
    pub const fn candidate_channel(&self) -> Channel {
        self.candidate
    }

    #[must_use]
    pub const fn status(&self) -> &ConnectionStatus {
        self.poller.status()
    }

    pub const fn driver(&self) -> &SwitchDriver<B, L> {
        &self.driver
    }

    pub const fn driver_mut(&mut self) -> &mut SwitchDriver<B, L> {
        &mut self.driver
    }
}
