//! Integration tests for the AppService → controller → actuators pipeline.
//!
//! These run on the host (x86_64) and drive the full control cycle
//! (sensor read, evaluation, relay commands, events) against the mock
//! adapters, with explicit timestamps standing in for the clock.

use super::mock_hw::{ActuatorCall, LogSink, MockHardware};

use ventdoor::app::events::AppEvent;
use ventdoor::app::service::AppService;
use ventdoor::config::SystemConfig;
use ventdoor::fsm::DoorState;
use ventdoor::fsm::context::StatusLight;

fn make_app() -> (AppService, MockHardware, LogSink) {
    let config = SystemConfig::default();
    let mut hw = MockHardware::new(config.motion_sensitivity_threshold);
    let mut sink = LogSink::new();
    let mut app = AppService::new(config, 0);
    app.start(&mut hw, &mut sink);
    (app, hw, sink)
}

/// Drive the door from `Closed` to `Open` (motion at 0, open at 15000).
fn open_door(app: &mut AppService, hw: &mut MockHardware, sink: &mut LogSink) {
    hw.set_inputs(false, 1);
    assert_eq!(app.tick(hw, 0, sink), DoorState::Opening);
    hw.set_inputs(false, 0);
    assert_eq!(app.tick(hw, 15_000, sink), DoorState::Open);
}

fn transitions(events: &[AppEvent]) -> Vec<(DoorState, DoorState)> {
    events
        .iter()
        .filter_map(|e| match e {
            AppEvent::StateChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect()
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn start_releases_relays_then_shows_caution() {
    let (app, hw, mut sink) = make_app();

    assert_eq!(app.state(), DoorState::Closed);
    assert_eq!(hw.calls.first(), Some(&ActuatorCall::AllOff));
    assert!(!hw.motor_on());
    assert!(!hw.alarm_on());
    assert_eq!(hw.light(), Some(StatusLight::Caution));
    assert_eq!(sink.take(), vec![AppEvent::Started(DoorState::Closed)]);
}

// ── Motion opens the door ─────────────────────────────────────

#[test]
fn motion_opens_door_after_travel_time() {
    let (mut app, mut hw, mut sink) = make_app();
    sink.take();

    hw.set_inputs(false, 1);
    assert_eq!(app.tick(&mut hw, 0, &mut sink), DoorState::Opening);
    assert_eq!(app.controller().state_entered_at(), 0);
    assert!(hw.motor_on());
    assert_eq!(hw.light(), Some(StatusLight::Caution));

    hw.set_inputs(false, 0);
    assert_eq!(app.tick(&mut hw, 14_999, &mut sink), DoorState::Opening);
    assert_eq!(app.tick(&mut hw, 15_000, &mut sink), DoorState::Open);
    assert!(hw.motor_on(), "motor holds the door open");
    assert_eq!(hw.light(), Some(StatusLight::Safe));

    assert_eq!(
        transitions(&sink.take()),
        vec![
            (DoorState::Closed, DoorState::Opening),
            (DoorState::Opening, DoorState::Open),
        ]
    );
}

// ── Dwell expiry closes the door ──────────────────────────────

#[test]
fn dwell_expiry_closes_door() {
    let (mut app, mut hw, mut sink) = make_app();
    open_door(&mut app, &mut hw, &mut sink);

    hw.set_inputs(false, 1);
    assert_eq!(app.tick(&mut hw, 20_000, &mut sink), DoorState::Open);
    assert_eq!(app.controller().last_motion_at(), Some(20_000));

    hw.set_inputs(false, 0);
    assert_eq!(app.tick(&mut hw, 29_999, &mut sink), DoorState::Open);
    assert_eq!(app.tick(&mut hw, 30_000, &mut sink), DoorState::Closing);
    assert!(!hw.motor_on());
    assert_eq!(hw.light(), Some(StatusLight::Caution));

    assert_eq!(app.tick(&mut hw, 45_000, &mut sink), DoorState::Closed);
}

// ── Obstacle in an open door ──────────────────────────────────

#[test]
fn obstacle_holds_open_door_and_sounds_alarm() {
    let (mut app, mut hw, mut sink) = make_app();
    open_door(&mut app, &mut hw, &mut sink);
    hw.set_inputs(false, 1);
    app.tick(&mut hw, 20_000, &mut sink);
    sink.take();

    hw.set_inputs(true, 0);
    assert_eq!(app.tick(&mut hw, 30_000, &mut sink), DoorState::Open);
    assert!(hw.alarm_on());
    assert!(hw.motor_on(), "motor stays engaged");
    assert_eq!(app.controller().forced_open_count(), 0);

    let events = sink.take();
    assert_eq!(events, vec![AppEvent::ObstacleDetected]);

    // Held for a long time: still open, dwell clock untouched.
    assert_eq!(app.tick(&mut hw, 90_000, &mut sink), DoorState::Open);
    assert_eq!(app.controller().last_motion_at(), Some(20_000));

    // Cleared: closing starts on the very next cycle.
    hw.set_inputs(false, 0);
    assert_eq!(app.tick(&mut hw, 90_050, &mut sink), DoorState::Closing);
    assert!(!hw.alarm_on());
    let events = sink.take();
    assert_eq!(events.first(), Some(&AppEvent::ObstacleCleared));
    assert_eq!(
        transitions(&events),
        vec![(DoorState::Open, DoorState::Closing)]
    );
}

// ── Obstacle alone opens a closed door ────────────────────────

#[test]
fn obstacle_without_motion_forces_closed_door_open() {
    let (mut app, mut hw, mut sink) = make_app();
    sink.take();

    hw.set_inputs(true, 0);
    assert_eq!(app.tick(&mut hw, 5_000, &mut sink), DoorState::Opening);
    assert!(hw.alarm_on());
    assert!(hw.motor_on());
    assert_eq!(app.controller().state_entered_at(), 5_000);
    assert_eq!(
        sink.take(),
        vec![
            AppEvent::ObstacleDetected,
            AppEvent::ForcedOpen {
                from: DoorState::Closed
            },
            AppEvent::StateChanged {
                from: DoorState::Closed,
                to: DoorState::Opening
            },
        ]
    );
}

#[test]
fn obstacle_reverses_closing_door() {
    let (mut app, mut hw, mut sink) = make_app();
    open_door(&mut app, &mut hw, &mut sink);
    assert_eq!(app.tick(&mut hw, 25_000, &mut sink), DoorState::Closing);
    sink.take();

    hw.set_inputs(true, 0);
    assert_eq!(app.tick(&mut hw, 26_000, &mut sink), DoorState::Opening);
    assert_eq!(app.controller().forced_open_count(), 1);
    assert!(sink.take().contains(&AppEvent::ForcedOpen {
        from: DoorState::Closing
    }));

    // Travel restarts from the override, not from the original opening.
    hw.set_inputs(false, 0);
    assert_eq!(app.tick(&mut hw, 40_999, &mut sink), DoorState::Opening);
    assert_eq!(app.tick(&mut hw, 41_000, &mut sink), DoorState::Open);
}

// ── Output and telemetry plumbing ─────────────────────────────

#[test]
fn every_output_reissued_every_cycle() {
    let (mut app, mut hw, mut sink) = make_app();

    for now in [100, 200, 300] {
        hw.clear_calls();
        app.tick(&mut hw, now, &mut sink);
        assert_eq!(
            hw.calls,
            vec![
                ActuatorCall::SetMotor(false),
                ActuatorCall::SetStatusLight(StatusLight::Caution),
                ActuatorCall::SetAlarm(false),
            ]
        );
    }
    assert_eq!(hw.reads, 3, "one sensor snapshot per cycle");
    assert_eq!(app.build_telemetry().cycles, 3);
}

#[test]
fn telemetry_follows_interval() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.set_inputs(false, 2);
    app.tick(&mut hw, 1_000, &mut sink);
    sink.take();

    assert!(!app.emit_telemetry_if_due(59_999, &mut sink));
    assert!(app.emit_telemetry_if_due(60_000, &mut sink));
    assert!(!app.emit_telemetry_if_due(60_050, &mut sink));

    match sink.take().as_slice() {
        [AppEvent::Telemetry(t)] => {
            assert_eq!(t.state, DoorState::Opening);
            assert_eq!(t.ms_in_state, 0);
            assert_eq!(t.active_motion_sensors, 2);
            assert!(t.motor_engaged);
            assert_eq!(t.status_light, StatusLight::Caution);
            assert!(!t.alarm_active);
            assert_eq!(t.cycles, 1);
        }
        other => panic!("expected one telemetry event, got {other:?}"),
    }
}
