//! Fuzz target: `DoorController::evaluate`
//!
//! Feeds arbitrary sensor snapshots at arbitrary (monotonic) timestamps
//! and checks after every cycle:
//! - No panics, including at the edges of the `u64` clock
//! - The motor is engaged exactly in `Opening` and `Open`
//! - The safe lamp is shown only in `Open`
//! - The alarm follows the obstacle input
//! - An obstacle never leaves the door in `Closed` or `Closing`
//!
//! cargo fuzz run fuzz_evaluate

#![no_main]

use libfuzzer_sys::fuzz_target;
use ventdoor::config::SystemConfig;
use ventdoor::controller::DoorController;
use ventdoor::fsm::DoorState;
use ventdoor::fsm::context::{SensorSnapshot, StatusLight};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let config = SystemConfig {
        door_travel_time_ms: 1 + u64::from(data[0] % 64) * 10,
        door_open_dwell_time_ms: 1 + u64::from(data[1] % 64) * 10,
        control_loop_interval_ms: 1,
        telemetry_interval_ms: 1,
        ..SystemConfig::default()
    };
    let threshold = config.motion_sensitivity_threshold;
    let mut now_ms: u64 = 0;
    let mut door = DoorController::new(config, now_ms);

    // Each 2-byte chunk is one cycle: [time step, sensor bits].
    for chunk in data[2..].chunks_exact(2) {
        let step = u64::from(chunk[0]);
        now_ms = if step == 0xFF { u64::MAX } else { now_ms.saturating_add(step) };

        let obstacle = chunk[1] & 0x01 != 0;
        let active = (chunk[1] >> 1) % 4;
        let snap = SensorSnapshot::new(obstacle, active, threshold);

        let (state, cmds) = door.evaluate(&snap, now_ms);

        assert_eq!(state, door.state());
        assert_eq!(
            cmds.motor_engaged,
            matches!(state, DoorState::Opening | DoorState::Open)
        );
        assert_eq!(cmds.status_light == StatusLight::Safe, state == DoorState::Open);
        assert_eq!(cmds.alarm_active, obstacle);
        if obstacle {
            assert!(
                matches!(state, DoorState::Opening | DoorState::Open),
                "obstacle left the door in {state}"
            );
        }
    }
});
