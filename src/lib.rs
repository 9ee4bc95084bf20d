//! Firmware for a 5-input video switch built from two 3-input switch chips.
//!
//! Two physical switch chips sit on one I²C bus. Chip A carries inputs 1 and 2 plus a
//! cascade line from chip B, which carries inputs 3, 4 and 5. Together they behave as a
//! single 5-way switch. The active input is chosen by an NEC infrared remote, by a push
//! button that scans for the next connected input, and by sensed cable connections.
//!
//! The decision logic is target independent and is tested on the host:
//!
//! - [`Channel`]: the five selectable inputs.
//! - [`SwitchRequestCell`]: single-slot, last-write-wins hand-off from the event tasks.
//! - [`RemoteMapping`] and [`ir_nec::NecDecoder`]: remote control decoding.
//! - [`Debouncer`]: button press filtering.
//! - [`SwitchDriver`]: the two-chip register protocol.
//! - [`StatusPoller`] and [`ConnectionStatus`]: sticky connection status.
//! - [`Arbitrator`]: the selection state machine that ties everything together.
#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(all(target_os = "none", not(feature = "pico1")))]
compile_error!("The embedded build requires the 'pico1' board feature");

#[cfg(all(target_os = "none", not(feature = "arm")))]
compile_error!("The embedded build requires the 'arm' architecture feature");

#[macro_use]
mod logging;

pub mod arbitrator;
pub mod button;
mod channel;
pub mod chip;
pub mod config;
pub mod debounce;
pub mod driver;
mod error;
#[cfg(target_os = "none")]
pub mod hardware;
pub mod indicator;
pub mod ir_nec;
mod never;
pub mod poller;
pub mod remote;
pub mod request;
pub mod status;

pub use arbitrator::{Arbitrator, auto_scan};
pub use channel::Channel;
pub use chip::Chip;
pub use config::SwitchConfig;
pub use debounce::Debouncer;
pub use driver::SwitchDriver;
pub use error::{Error, Result};
pub use indicator::Indicators;
pub use never::Never;
pub use poller::StatusPoller;
pub use remote::{RemoteCommand, RemoteMapping};
pub use request::{SwitchRequest, SwitchRequestCell};
pub use status::{ConnectionStatus, SlotStatus};
