//! Hand-off of selection requests from the event tasks to the arbitrator.
//!
//! The remote decoder and the button task run independently of the main loop. Each
//! publishes into a single slot; the arbitrator drains it once per cycle. Requests are
//! not queued: a newer request replaces one the arbitrator has not picked up yet.

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};

use crate::Channel;

/// What a producer asks the arbitrator to do.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub enum SwitchRequest {
    /// Explicit choice from the remote control.
    SelectChannel(Channel),
    /// Button press: scan forward for the next connected input.
    AutoAdvance,
}

/// Single-slot, last-write-wins cell for [`SwitchRequest`]s.
///
/// Both the write and the take run inside one critical section, so the consumer
/// always sees a complete request and a publish racing a take is either taken now or
/// left for the next cycle, never lost half way.
///
/// ```
/// use video_switch::{Channel, SwitchRequest, SwitchRequestCell};
///
/// static REQUESTS: SwitchRequestCell = SwitchRequestCell::new();
///
/// REQUESTS.publish(SwitchRequest::SelectChannel(Channel::In2));
/// REQUESTS.publish(SwitchRequest::AutoAdvance);
/// assert_eq!(REQUESTS.take(), Some(SwitchRequest::AutoAdvance));
/// assert_eq!(REQUESTS.take(), None);
/// ```
pub struct SwitchRequestCell(Signal<CriticalSectionRawMutex, SwitchRequest>);

impl SwitchRequestCell {
    #[must_use]
    pub const fn new() -> Self {
        Self(Signal::new())
    }

    /// Stores `request`, replacing any request not yet taken.
    pub fn publish(&self, request: SwitchRequest) {
        self.0.signal(request);
    }

    /// Removes and returns the pending request, if any.
    pub fn take(&self) -> Option<SwitchRequest> {
        self.0.try_take()
    }

    /// Whether a request is waiting.
    pub fn is_pending(&self) -> bool {
        self.0.signaled()
    }
}

impl Default for SwitchRequestCell {
    fn default() -> Self {
        Self::new()
    }
}
