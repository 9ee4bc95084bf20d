//! Host-level tests for the selection state machine, driven cycle by cycle.

mod common;

use common::{A, B, FakeBus, RecordingLeds, static_config_writes};
use embassy_futures::block_on;
use video_switch::{
    Arbitrator, Channel, RemoteCommand, RemoteMapping, SwitchConfig, SwitchDriver,
    SwitchRequest, SwitchRequestCell,
};

const NOTHING: u8 = 0x00;

type TestArbitrator<'a> = Arbitrator<'a, FakeBus, RecordingLeds>;

fn arbitrator(requests: &SwitchRequestCell, bus: FakeBus) -> TestArbitrator<'_> {
    let driver = SwitchDriver::new(bus, RecordingLeds::default(), SwitchConfig::default());
    Arbitrator::new(driver, requests)
}

/// Runs the power-up cycle (selects channel 1) and forgets its writes.
fn started(requests: &SwitchRequestCell, bus: FakeBus) -> TestArbitrator<'_> {
    let mut arbitrator = arbitrator(requests, bus);
    block_on(arbitrator.run_cycle());
    assert_eq!(arbitrator.active_channel(), Some(Channel::In1));
    arbitrator.driver_mut().bus_mut().clear_writes();
    arbitrator
}

fn press(code: u8, repeat: bool) -> RemoteCommand {
    RemoteCommand {
        code,
        address: 0x0080,
        repeat,
    }
}

fn publish_remote(requests: &SwitchRequestCell, command: RemoteCommand) {
    if let Some(request) = RemoteMapping::default().request_for(command) {
        requests.publish(request);
    }
}

#[test]
fn first_cycle_selects_channel_one() {
    let requests = SwitchRequestCell::new();
    let mut arbitrator = arbitrator(&requests, FakeBus::with_status(NOTHING, NOTHING));
    assert_eq!(arbitrator.active_channel(), None);
    assert_eq!(arbitrator.candidate_channel(), Channel::In1);

    block_on(arbitrator.run_cycle());

    let mut expected = vec![(A, 0x10, 0x98), (B, 0x10, 0x18)];
    expected.extend(static_config_writes());
    assert_eq!(arbitrator.driver().bus().writes(), expected);
    assert_eq!(arbitrator.active_channel(), Some(Channel::In1));
    assert_eq!(arbitrator.driver().indicators().only_lit(), Some(Channel::In1));
}

#[test]
fn remote_code_five_selects_input_three() {
    let requests = SwitchRequestCell::new();
    let mut arbitrator = started(&requests, FakeBus::with_status(NOTHING, NOTHING));

    publish_remote(&requests, press(0x05, false));
    block_on(arbitrator.run_cycle());

    assert_eq!(arbitrator.candidate_channel(), Channel::In3);
    assert_eq!(arbitrator.active_channel(), Some(Channel::In3));
    let mut expected = vec![(A, 0x10, 0x38), (B, 0x10, 0x98)];
    expected.extend(static_config_writes());
    assert_eq!(arbitrator.driver().bus().writes(), expected);
    assert_eq!(arbitrator.driver().indicators().only_lit(), Some(Channel::In3));
}

#[test]
fn repeat_frames_change_nothing() {
    let requests = SwitchRequestCell::new();
    let mut arbitrator = started(&requests, FakeBus::with_status(NOTHING, NOTHING));

    publish_remote(&requests, press(0x08, true));
    assert!(!requests.is_pending());
    block_on(arbitrator.run_cycle());

    assert_eq!(arbitrator.candidate_channel(), Channel::In1);
    assert_eq!(arbitrator.active_channel(), Some(Channel::In1));
    assert!(arbitrator.driver().bus().writes().is_empty());
}

#[test]
fn steady_state_writes_nothing() {
    let requests = SwitchRequestCell::new();
    let mut arbitrator = started(&requests, FakeBus::with_status(NOTHING, NOTHING));

    block_on(arbitrator.run_cycle());
    block_on(arbitrator.run_cycle());

    assert!(arbitrator.driver().bus().writes().is_empty());
}

#[test]
fn auto_advance_with_nothing_connected_moves_to_successor() {
    // Literal six-step behavior: from 3 with every input disconnected the scan ends on 4.
    let requests = SwitchRequestCell::new();
    let mut arbitrator = started(&requests, FakeBus::with_status(NOTHING, NOTHING));
    requests.publish(SwitchRequest::SelectChannel(Channel::In3));
    block_on(arbitrator.run_cycle());

    requests.publish(SwitchRequest::AutoAdvance);
    block_on(arbitrator.run_cycle());

    assert_eq!(arbitrator.candidate_channel(), Channel::In4);
    assert_eq!(arbitrator.active_channel(), Some(Channel::In4));
}

#[test]
fn auto_advance_stops_at_first_connected_input() {
    // Chip B bit 2: input 5 connected. From 1 the scan passes 2, 3, 4 and stops on 5.
    let requests = SwitchRequestCell::new();
    let mut arbitrator = started(&requests, FakeBus::with_status(NOTHING, 0b0000_0100));

    requests.publish(SwitchRequest::AutoAdvance);
    block_on(arbitrator.run_cycle());

    assert_eq!(arbitrator.active_channel(), Some(Channel::In5));
    assert_eq!(
        arbitrator.driver().bus().writes()[..2],
        [(A, 0x10, 0x38), (B, 0x10, 0x38)]
    );
}

#[test]
fn auto_advance_wraps_to_lower_connected_input() {
    // Chip A bit 1: input 2 connected. From 4 the scan goes 5, 1, 2.
    let requests = SwitchRequestCell::new();
    let mut arbitrator = started(&requests, FakeBus::with_status(0b0000_0010, NOTHING));
    requests.publish(SwitchRequest::SelectChannel(Channel::In4));
    block_on(arbitrator.run_cycle());

    requests.publish(SwitchRequest::AutoAdvance);
    block_on(arbitrator.run_cycle());

    assert_eq!(arbitrator.active_channel(), Some(Channel::In2));
}

#[test]
fn pending_requests_coalesce_last_write_wins() {
    let requests = SwitchRequestCell::new();
    let mut arbitrator = started(&requests, FakeBus::with_status(NOTHING, NOTHING));

    publish_remote(&requests, press(0x04, false));
    publish_remote(&requests, press(0x06, false));
    block_on(arbitrator.run_cycle());

    assert_eq!(arbitrator.active_channel(), Some(Channel::In4));
    assert!(!requests.is_pending());
}

#[test]
fn failed_switch_keeps_active_channel_and_retries_next_cycle() {
    let requests = SwitchRequestCell::new();
    let mut arbitrator = started(&requests, FakeBus::with_status(NOTHING, NOTHING));
    arbitrator.driver_mut().bus_mut().fail_writes_to(A, true);

    requests.publish(SwitchRequest::SelectChannel(Channel::In2));
    block_on(arbitrator.run_cycle());
    assert_eq!(arbitrator.active_channel(), Some(Channel::In1));
    assert_eq!(arbitrator.candidate_channel(), Channel::In2);

    block_on(arbitrator.run_cycle());
    assert_eq!(arbitrator.active_channel(), Some(Channel::In1));

    arbitrator.driver_mut().bus_mut().fail_writes_to(A, false);
    block_on(arbitrator.run_cycle());
    assert_eq!(arbitrator.active_channel(), Some(Channel::In2));
    assert_eq!(arbitrator.driver().indicators().only_lit(), Some(Channel::In2));
}

#[test]
fn failed_power_up_selection_is_retried() {
    let requests = SwitchRequestCell::new();
    let mut bus = FakeBus::with_status(NOTHING, NOTHING);
    bus.fail_writes_to(B, true);
    let mut arbitrator = arbitrator(&requests, bus);

    block_on(arbitrator.run_cycle());
    assert_eq!(arbitrator.active_channel(), None);

    arbitrator.driver_mut().bus_mut().fail_writes_to(B, false);
    block_on(arbitrator.run_cycle());
    assert_eq!(arbitrator.active_channel(), Some(Channel::In1));
}

#[test]
fn status_is_refreshed_every_cycle() {
    let requests = SwitchRequestCell::new();
    let arbitrator = started(&requests, FakeBus::with_status(0b0001_0011, NOTHING));

    assert!(arbitrator.status().output_connected());
    assert!(arbitrator.status().is_connected(Channel::In1));
    assert!(arbitrator.status().is_connected(Channel::In2));
    assert!(!arbitrator.status().is_connected(Channel::In3));
}
