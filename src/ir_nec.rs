//! NEC infrared decoding and the task that turns remote presses into switch requests.
//!
//! [`NecDecoder`] is a pure edge-timing state machine. On the embedded target,
//! [`spawn_remote`] runs it on a GPIO pin and publishes mapped presses into the
//! [`SwitchRequestCell`](crate::SwitchRequestCell).

use crate::RemoteCommand;

#[cfg(target_os = "none")]
pub use task::spawn_remote;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum DecoderState {
    Idle,
    LdrLow,
    LdrHigh,
    BitLow { n: u8, v: u32 },
    BitHigh { n: u8, v: u32 },
    StopBit { addr: u16, cmd: u8 }, // Waiting for final stop bit after 32 bits
    RepeatTail,
}

// µs windows, relaxed for cheap receivers
const GLITCH: u32 = 120;
const MIN_IDLE: u32 = 5_000; // Require 5ms of idle before starting decode
const LDR_LOW: (u32, u32) = (7_000, 11_000);
const LDR_HIGH: (u32, u32) = (3_500, 5_500);
const REP_HIGH: (u32, u32) = (1_500, 3_000);
const BIT_LOW: (u32, u32) = (300, 900);
const BIT0_HIGH: (u32, u32) = (250, 900);
const BIT1_HIGH: (u32, u32) = (1_000, 2_400);

#[inline]
const fn inr(x: u32, r: (u32, u32)) -> bool {
    x >= r.0 && x <= r.1
}

/// Validates a 32-bit NEC frame (LSB first) and extracts `(address, command)`.
///
/// Both the address and the command byte must be followed by their inverse. Extended
/// (16-bit address) frames are rejected so they can never alias a standard address.
#[must_use]
fn nec_ok(frame: u32) -> Option<(u16, u8)> {
    let [b0, b1, b2, b3] = frame.to_le_bytes();

    if (b2 ^ b3) != 0xFF || (b0 ^ b1) != 0xFF {
        return None;
    }

    Some((u16::from(b0), b2))
}

/// Decodes NEC frames from the edges of an active-low IR receiver.
///
/// Feed it every edge with the level *after* the edge and the time the previous level
/// lasted. A complete frame yields a press; a repeat frame yields the last press again
/// with `repeat` set.
#[derive(Clone, Debug)]
pub struct NecDecoder {
    state: DecoderState,
    last_code: Option<(u16, u8)>,
}

impl Default for NecDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl NecDecoder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DecoderState::Idle,
            last_code: None,
        }
    }

    /// Advances the decoder by one edge.
    pub fn feed(&mut self, level_low: bool, dt: u32) -> Option<RemoteCommand> {
        if dt < GLITCH {
            return None;
        }
        let (state, command) = self.step(level_low, dt);
        self.state = state;
        command
    }

    fn step(&mut self, level_low: bool, dt: u32) -> (DecoderState, Option<RemoteCommand>) {
        match self.state {
            DecoderState::Idle => {
                // Only start decoding after the line has been idle (HIGH) for a while.
                if level_low && dt >= MIN_IDLE {
                    return (DecoderState::LdrLow, None);
                }
                (DecoderState::Idle, None)
            }
            DecoderState::LdrLow => {
                if !level_low && inr(dt, LDR_LOW) {
                    return (DecoderState::LdrHigh, None);
                }
                // Very short pulses are stop bits, not decode failures.
                if dt > 2_000 {
                    debug!("IR: decode failed (bad leader low)");
                }
                (DecoderState::Idle, None)
            }
            DecoderState::LdrHigh => {
                if level_low && inr(dt, LDR_HIGH) {
                    (DecoderState::BitLow { n: 0, v: 0 }, None)
                } else if level_low && inr(dt, REP_HIGH) {
                    (DecoderState::RepeatTail, None)
                } else {
                    debug!("IR: decode failed (bad leader high)");
                    (DecoderState::Idle, None)
                }
            }
            DecoderState::RepeatTail => {
                if !level_low && inr(dt, BIT_LOW) {
                    let repeat = self.last_code.map(|(address, code)| RemoteCommand {
                        code,
                        address,
                        repeat: true,
                    });
                    return (DecoderState::Idle, repeat);
                }
                debug!("IR: decode failed (bad repeat tail)");
                (DecoderState::Idle, None)
            }
            DecoderState::BitLow { n, v } => {
                if !level_low && inr(dt, BIT_LOW) {
                    return (DecoderState::BitHigh { n, v }, None);
                }
                debug!("IR: decode failed (bad bit low, bit={})", n);
                (DecoderState::Idle, None)
            }
            DecoderState::BitHigh { n, mut v } => {
                if level_low && inr(dt, BIT1_HIGH) {
                    v |= 1_u32 << n;
                } else if !(level_low && inr(dt, BIT0_HIGH)) {
                    debug!("IR: decode failed (bad bit high, bit={})", n);
                    return (DecoderState::Idle, None);
                }

                let next = n.saturating_add(1);
                if next < 32 {
                    return (DecoderState::BitLow { n: next, v }, None);
                }
                if let Some((addr, cmd)) = nec_ok(v) {
                    // Wait for the stop bit before reporting.
                    return (DecoderState::StopBit { addr, cmd }, None);
                }
                debug!("IR: decode failed (checksum or address, v={:#x})", v);
                (DecoderState::Idle, None)
            }
            DecoderState::StopBit { addr, cmd } => {
                if !level_low && inr(dt, BIT_LOW) {
                    self.last_code = Some((addr, cmd));
                    let press = RemoteCommand {
                        code: cmd,
                        address: addr,
                        repeat: false,
                    };
                    return (DecoderState::Idle, Some(press));
                }
                debug!("IR: decode failed (bad stop bit, dt={})", dt);
                (DecoderState::Idle, None)
            }
        }
    }
}

#[cfg(target_os = "none")]
mod task {
    use embassy_executor::Spawner;
    use embassy_rp::Peri;
    use embassy_rp::gpio::{AnyPin, Input, Pin, Pull};
    use embassy_time::Instant;

    use super::NecDecoder;
    use crate::{Error, RemoteMapping, Result, SwitchRequestCell};

    /// Starts decoding the IR receiver on `pin` in the background.
    ///
    /// Presses that `mapping` recognizes are published to `requests`, replacing any
    /// request the arbitrator has not taken yet.
    ///
    /// # Errors
    /// Returns an error if the background task cannot be spawned.
    pub fn spawn_remote<P: Pin>(
        pin: Peri<'static, P>,
        mapping: RemoteMapping,
        requests: &'static SwitchRequestCell,
        spawner: Spawner,
    ) -> Result<()> {
        // Type erase to Peri<'static, AnyPin> (keep the Peri wrapper!)
        let any: Peri<'static, AnyPin> = pin.into();
        // IR receiver modules idle HIGH and pull the line low while a carrier is present.
        let token =
            remote_task(Input::new(any, Pull::Up), mapping, requests).map_err(Error::TaskSpawn)?;
        spawner.spawn(token);
        Ok(())
    }

    #[embassy_executor::task]
    async fn remote_task(
        mut pin: Input<'static>,
        mapping: RemoteMapping,
        requests: &'static SwitchRequestCell,
    ) -> ! {
        let mut decoder = NecDecoder::new();
        let mut level_low: bool = pin.is_low();
        let mut last_edge: Instant = Instant::now();

        info!("IR: remote task started");
        loop {
            pin.wait_for_any_edge().await;

            let now = Instant::now();
            let dt = u32::try_from(now.duration_since(last_edge).as_micros()).unwrap_or(u32::MAX);
            last_edge = now;

            // Every edge toggles the level. Resync if an edge was missed.
            level_low = !level_low;
            let actual_level_low = pin.is_low();
            if level_low != actual_level_low {
                warn!("IR: pin level mismatch (missed edge?)");
                level_low = actual_level_low;
                decoder = NecDecoder::new();
                continue;
            }

            let Some(command) = decoder.feed(level_low, dt) else {
                continue;
            };
            if let Some(request) = mapping.request_for(command) {
                info!(
                    "IR: address={:#x} code={:#x} -> {}",
                    command.address, command.code, request
                );
                requests.publish(request);
            }
        }
    }
}
