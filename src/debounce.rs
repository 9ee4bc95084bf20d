//! Time-window debouncing for the auto-advance button.

use embassy_time::{Duration, Instant};

use crate::config::DEBOUNCE_WINDOW;

/// Collapses a burst of button edges into one press.
///
/// An edge is accepted when more than the window has passed since the last *accepted*
/// edge; rejected edges do not restart the window.
///
/// ```
/// use embassy_time::Instant;
/// use video_switch::Debouncer;
///
/// let mut debouncer = Debouncer::default();
/// assert!(debouncer.accept(Instant::from_millis(1_000)));
/// assert!(!debouncer.accept(Instant::from_millis(1_050)));
/// assert!(debouncer.accept(Instant::from_millis(1_150)));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl Debouncer {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    /// Records an edge at `now` and reports whether it counts as a press.
    pub fn accept(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_accepted
            && now.saturating_duration_since(last) <= self.window
        {
            return false;
        }
        self.last_accepted = Some(now);
        true
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_WINDOW)
    }
}
