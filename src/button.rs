//! The auto-advance push button.

use embassy_time::Instant;

use crate::{Debouncer, SwitchRequest, SwitchRequestCell};

#[cfg(target_os = "none")]
pub use task::spawn_button;

/// Handles one falling edge of the button at `now`.
///
/// An edge that survives `debouncer` publishes [`SwitchRequest::AutoAdvance`], replacing
/// any request not yet taken. Returns whether it did.
pub fn on_falling_edge(
    debouncer: &mut Debouncer,
    now: Instant,
    requests: &SwitchRequestCell,
) -> bool {
    if !debouncer.accept(now) {
        debug!("button: bounce ignored");
        return false;
    }
    info!("button: pressed, requesting auto-advance");
    requests.publish(SwitchRequest::AutoAdvance);
    true
}

#[cfg(target_os = "none")]
mod task {
    use embassy_executor::Spawner;
    use embassy_rp::Peri;
    use embassy_rp::gpio::{AnyPin, Input, Pin, Pull};
    use embassy_time::Instant;

    use super::on_falling_edge;
    use crate::{Debouncer, Error, Result, SwitchRequestCell};

    /// Starts watching the button on `pin` in the background.
    ///
    /// The button pulls the pin low. See [`on_falling_edge`] for what each edge does.
    ///
    /// # Errors
    /// Returns an error if the background task cannot be spawned.
    pub fn spawn_button<P: Pin>(
        pin: Peri<'static, P>,
        debouncer: Debouncer,
        requests: &'static SwitchRequestCell,
        spawner: Spawner,
    ) -> Result<()> {
        let any: Peri<'static, AnyPin> = pin.into();
        let token = button_task(Input::new(any, Pull::Up), debouncer, requests)
            .map_err(Error::TaskSpawn)?;
        spawner.spawn(token);
        Ok(())
    }

    #[embassy_executor::task]
    async fn button_task(
        mut pin: Input<'static>,
        mut debouncer: Debouncer,
        requests: &'static SwitchRequestCell,
    ) -> ! {
        info!("button: task started");
        loop {
            pin.wait_for_falling_edge().await;
            on_falling_edge(&mut debouncer, Instant::now(), requests);
        }
    }
}
