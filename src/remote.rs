//! Maps decoded remote-control commands to selection requests.
//!
//! See [`RemoteMapping`] for usage examples.

use heapless::LinearMap;

use crate::{Channel, SwitchRequest, config::REMOTE_ADDRESS};

/// Number of remote buttons that select an input.
const BUTTON_COUNT: usize = 5;

/// Remote buttons bound to inputs, as `(command code, channel)`.
pub const CHANNEL_BUTTONS: [(u8, Channel); BUTTON_COUNT] = [
    (0x02, Channel::In1),
    (0x04, Channel::In2),
    (0x05, Channel::In3),
    (0x06, Channel::In4),
    (0x08, Channel::In5),
];

/// A decoded infrared frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub struct RemoteCommand {
    pub code: u8,
    pub address: u16,
    /// Set for the protocol's "button still held" frames, which carry no new command.
    pub repeat: bool,
}

/// Turns [`RemoteCommand`]s from one remote into [`SwitchRequest`]s.
///
/// # Examples
/// ```
/// use video_switch::{Channel, RemoteCommand, RemoteMapping, SwitchRequest};
///
/// let mapping = RemoteMapping::default();
/// let press = RemoteCommand { code: 0x05, address: 0x0080, repeat: false };
/// assert_eq!(mapping.request_for(press), Some(SwitchRequest::SelectChannel(Channel::In3)));
///
/// let held = RemoteCommand { repeat: true, ..press };
/// assert_eq!(mapping.request_for(held), None);
/// ```
pub struct RemoteMapping {
    address: u16,
    buttons: LinearMap<u8, Channel, BUTTON_COUNT>,
}

impl RemoteMapping {
    /// Creates a mapping that accepts commands from `address` only.
    #[must_use]
    pub fn new(address: u16, buttons: &[(u8, Channel); BUTTON_COUNT]) -> Self {
        let mut map = LinearMap::new();
        for &(code, channel) in buttons {
            // Capacity equals the array length, so this cannot overflow.
            let _ = map.insert(code, channel);
        }
        Self {
            address,
            buttons: map,
        }
    }

    /// The request a command should raise, if any.
    ///
    /// Repeat frames, other remotes, and unmapped buttons raise nothing.
    #[must_use]
    pub fn request_for(&self, command: RemoteCommand) -> Option<SwitchRequest> {
        if command.repeat {
            debug!("remote: repeat frame ignored");
            return None;
        }
        if command.address != self.address {
            debug!("remote: address {:#x} is not ours", command.address);
            return None;
        }
        let Some(&channel) = self.buttons.get(&command.code) else {
            debug!("remote: code {:#x} is not mapped", command.code);
            return None;
        };
        Some(SwitchRequest::SelectChannel(channel))
    }
}

impl Default for RemoteMapping {
    fn default() -> Self {
        Self::new(REMOTE_ADDRESS, &CHANNEL_BUTTONS)
    }
}
