//! GPIO assignments for the door controller board.
//!
//! Single source of truth: `main` builds every pin driver from these
//! numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Relay outputs (opto-isolated 4-channel relay board)
// ---------------------------------------------------------------------------

/// Door motor contactor relay: energised = drive door open / hold open.
pub const MOTOR_RELAY_GPIO: i32 = 4;
/// Green "safe to pass" lamp relay.
pub const LIGHT_SAFE_RELAY_GPIO: i32 = 5;
/// Amber "caution" lamp relay.
pub const LIGHT_CAUTION_RELAY_GPIO: i32 = 6;
/// Alarm buzzer relay.
pub const ALARM_RELAY_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// Obstacle sensors (through-beam photo-electric, open-collector)
// ---------------------------------------------------------------------------

/// Beam pair mounted low on the door frame.  LOW = beam broken.
pub const OBSTACLE_LOW_GPIO: i32 = 15;
/// Beam pair mounted at mid height.  LOW = beam broken.
pub const OBSTACLE_MID_GPIO: i32 = 16;

// ---------------------------------------------------------------------------
// Motion sensors (PIR, push-pull output)
// ---------------------------------------------------------------------------

/// Intake-side PIR.  HIGH = presence.
pub const MOTION_INTAKE_GPIO: i32 = 17;
/// Return-side PIR.  HIGH = presence.
pub const MOTION_RETURN_GPIO: i32 = 18;
/// Overhead PIR above the door opening.  HIGH = presence.
pub const MOTION_OVERHEAD_GPIO: i32 = 8;

/// Beam inputs in hub order.  `obstacle_sensor_count` takes a prefix.
pub const OBSTACLE_GPIOS: [i32; 2] = [OBSTACLE_LOW_GPIO, OBSTACLE_MID_GPIO];
/// PIR inputs in hub order.  `motion_sensor_count` takes a prefix.
pub const MOTION_GPIOS: [i32; 3] = [MOTION_INTAKE_GPIO, MOTION_RETURN_GPIO, MOTION_OVERHEAD_GPIO];
